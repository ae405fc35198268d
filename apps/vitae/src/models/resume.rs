//! The resume document schema.
//!
//! Entities are identified by an opaque `Uuid` minted at creation time and
//! never reused. Fields that the presentation layer treats as optional
//! (`gpa`, `link`, `credential_id`, ...) are plain `String`s where empty
//! means absent; every field added after the first persisted-blob schema
//! carries `#[serde(default)]` so older blobs rehydrate cleanly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

/// The seven section categories. `Personal` anchors the document header and
/// is excluded from the body iteration driven by [`SectionOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Personal,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Achievements,
}

impl SectionKind {
    /// All kinds in the default document order.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Personal,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Achievements,
    ];

    pub fn default_label(&self) -> &'static str {
        match self {
            SectionKind::Personal => "Personal Information",
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Projects => "Projects",
            SectionKind::Skills => "Skills",
            SectionKind::Certifications => "Certifications",
            SectionKind::Achievements => "Achievements",
        }
    }
}

/// One entry per section kind; `order` keys define the body rendering
/// sequence among enabled sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOrder {
    pub kind: SectionKind,
    pub label: String,
    pub enabled: bool,
    pub order: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

/// Singleton header record. One instance per document, no identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub portfolio: String,
    #[serde(default)]
    pub github: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub location: String,
    /// Year-month string, e.g. "2022-01".
    pub start_date: String,
    /// Ignored when `current` is true.
    pub end_date: String,
    pub current: bool,
    /// Free-text bullets. Never left empty: the store normalizes an empty
    /// list to a single empty bullet.
    pub description: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

impl Experience {
    /// Fresh entry with a new identifier and a single empty bullet.
    pub fn new() -> Self {
        Experience {
            id: Uuid::new_v4(),
            company: String::new(),
            position: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: vec![String::new()],
            verified: false,
        }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Empty string means no GPA.
    #[serde(default)]
    pub gpa: String,
    /// Honor bullets; empty list means none.
    #[serde(default)]
    pub honors: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

impl Education {
    pub fn new() -> Self {
        Education {
            id: Uuid::new_v4(),
            institution: String::new(),
            degree: String::new(),
            field: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            gpa: String::new(),
            honors: Vec::new(),
            verified: false,
        }
    }
}

impl Default for Education {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Unique per project, insertion order preserved.
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub github: String,
    pub start_date: String,
    pub end_date: String,
    /// Highlight bullets; same minimum-one normalization as experience.
    pub highlights: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

impl Project {
    pub fn new() -> Self {
        Project {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            technologies: Vec::new(),
            link: String::new(),
            github: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            highlights: vec![String::new()],
            verified: false,
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    /// Issue date, year-month granularity.
    pub date: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub credential_id: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub verified: bool,
}

impl Certification {
    pub fn new() -> Self {
        Certification {
            id: Uuid::new_v4(),
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
            expiry_date: String::new(),
            credential_id: String::new(),
            link: String::new(),
            verified: false,
        }
    }
}

impl Default for Certification {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    Soft,
    Language,
    Tool,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::Soft => "Soft",
            SkillCategory::Language => "Language",
            SkillCategory::Tool => "Tool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    pub category: SkillCategory,
}

impl Skill {
    pub fn new(name: &str, level: SkillLevel, category: SkillCategory) -> Self {
        Skill {
            id: Uuid::new_v4(),
            name: name.to_string(),
            level,
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub verified: bool,
}

impl Achievement {
    pub fn new() -> Self {
        Achievement {
            id: Uuid::new_v4(),
            title: String::new(),
            issuer: String::new(),
            date: String::new(),
            description: String::new(),
            verified: false,
        }
    }
}

impl Default for Achievement {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The aggregate resume content: personal info, all section entity lists,
/// and the section-ordering metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,
    pub section_order: Vec<SectionOrder>,
}

impl ResumeData {
    /// The empty initial document: blank personal info, no entries, and all
    /// seven sections enabled in their default order.
    pub fn initial() -> Self {
        ResumeData {
            personal_info: PersonalInfo::default(),
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            skills: Vec::new(),
            achievements: Vec::new(),
            section_order: default_section_order(),
        }
    }
}

impl Default for ResumeData {
    fn default() -> Self {
        Self::initial()
    }
}

/// One enabled entry per section kind, ordered 0..=6.
pub fn default_section_order() -> Vec<SectionOrder> {
    SectionKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| SectionOrder {
            kind: *kind,
            label: kind.default_label().to_string(),
            enabled: true,
            order: i as i32,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
