// Document model: the normalized resume schema, render settings, and the
// fixed demonstration dataset. All shapes serialize camelCase so the
// persisted blob matches the storage layout consumed by presentation layers.

pub mod resume;
pub mod sample;
pub mod settings;

pub use resume::{
    Achievement, Certification, Education, Experience, PersonalInfo, Project, ResumeData,
    SectionKind, SectionOrder, Skill, SkillCategory, SkillLevel,
};
pub use settings::{preset_themes, ResumeSettings, ResumeTheme, Spacing, ThemeColors, ThemeFonts};
