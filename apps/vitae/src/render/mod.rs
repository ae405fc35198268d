//! Section Renderer — pure mapping from (document, settings) to an ordered
//! block list, shared by the live preview and the export pipeline.
//!
//! Determinism contract: identical inputs yield structurally identical
//! output. No clocks, no randomness; entity identifiers are caller-supplied.

pub mod blocks;
pub mod dates;

use crate::models::resume::{ResumeData, SectionKind, SkillCategory};
use crate::models::settings::ResumeSettings;
use crate::render::blocks::{
    AchievementEntry, CertificationEntry, EducationEntry, ExperienceEntry, HeaderBlock,
    ProjectEntry, SectionBlock, SkillGroup,
};
use crate::render::dates::{format_date_range, format_year_month};

/// Joins non-empty parts with a dot separator, the presentation idiom for
/// "Company • Location" style lines.
fn dotted(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" \u{2022} ")
}

/// Builds the document header. Always rendered first, independent of the
/// section-order entries (including the personal pseudo-entry).
pub fn render_header(data: &ResumeData) -> HeaderBlock {
    let info = &data.personal_info;
    let contacts = [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.portfolio,
        &info.github,
    ]
    .into_iter()
    .filter(|f| !f.is_empty())
    .cloned()
    .collect();

    HeaderBlock {
        full_name: info.full_name.clone(),
        title: info.title.clone(),
        contacts,
        summary: info.summary.clone(),
    }
}

/// Maps the document body to an ordered list of section blocks.
///
/// 1. Keep enabled section entries, excluding the personal pseudo-section.
/// 2. Stable-sort by `order` ascending (ties keep list position).
/// 3. Sections whose backing list is empty emit no block.
pub fn render_blocks(data: &ResumeData, settings: &ResumeSettings) -> Vec<SectionBlock> {
    let mut sections: Vec<_> = data
        .section_order
        .iter()
        .filter(|s| s.enabled && s.kind != SectionKind::Personal)
        .collect();
    sections.sort_by_key(|s| s.order);

    sections
        .iter()
        .filter_map(|section| render_section(section.kind, &section.label, data, settings))
        .collect()
}

fn render_section(
    kind: SectionKind,
    label: &str,
    data: &ResumeData,
    settings: &ResumeSettings,
) -> Option<SectionBlock> {
    let badges = settings.show_verification_badges;
    match kind {
        // Covered by the filter in render_blocks; kept for exhaustiveness.
        SectionKind::Personal => None,

        SectionKind::Experience => {
            if data.experience.is_empty() {
                return None;
            }
            let entries = data
                .experience
                .iter()
                .map(|exp| ExperienceEntry {
                    position: exp.position.clone(),
                    company_line: dotted(&[&exp.company, &exp.location]),
                    date_range: format_date_range(&exp.start_date, &exp.end_date, exp.current),
                    bullets: exp.description.clone(),
                    verified: badges && exp.verified,
                })
                .collect();
            Some(SectionBlock::Experience {
                title: label.to_string(),
                entries,
            })
        }

        SectionKind::Education => {
            if data.education.is_empty() {
                return None;
            }
            let entries = data
                .education
                .iter()
                .map(|edu| EducationEntry {
                    degree_line: if edu.field.is_empty() {
                        edu.degree.clone()
                    } else if edu.degree.is_empty() {
                        edu.field.clone()
                    } else {
                        format!("{} in {}", edu.degree, edu.field)
                    },
                    institution_line: dotted(&[&edu.institution, &edu.location]),
                    gpa_line: if edu.gpa.is_empty() {
                        String::new()
                    } else {
                        format!("GPA: {}", edu.gpa)
                    },
                    date_range: format_date_range(&edu.start_date, &edu.end_date, edu.current),
                    honors: edu.honors.clone(),
                    verified: badges && edu.verified,
                })
                .collect();
            Some(SectionBlock::Education {
                title: label.to_string(),
                entries,
            })
        }

        SectionKind::Projects => {
            if data.projects.is_empty() {
                return None;
            }
            let entries = data
                .projects
                .iter()
                .map(|project| ProjectEntry {
                    name: project.name.clone(),
                    date_range: format_date_range(&project.start_date, &project.end_date, false),
                    description: project.description.clone(),
                    technologies: project.technologies.clone(),
                    highlights: project.highlights.clone(),
                    verified: badges && project.verified,
                })
                .collect();
            Some(SectionBlock::Projects {
                title: label.to_string(),
                entries,
            })
        }

        SectionKind::Skills => {
            if data.skills.is_empty() {
                return None;
            }
            Some(SectionBlock::Skills {
                title: label.to_string(),
                groups: group_skills(data),
            })
        }

        SectionKind::Certifications => {
            if data.certifications.is_empty() {
                return None;
            }
            let entries = data
                .certifications
                .iter()
                .map(|cert| CertificationEntry {
                    name: cert.name.clone(),
                    issuer_line: if cert.credential_id.is_empty() {
                        cert.issuer.clone()
                    } else {
                        format!("{} \u{2022} ID: {}", cert.issuer, cert.credential_id)
                    },
                    date_label: format_year_month(&cert.date),
                    verified: badges && cert.verified,
                })
                .collect();
            Some(SectionBlock::Certifications {
                title: label.to_string(),
                entries,
            })
        }

        SectionKind::Achievements => {
            if data.achievements.is_empty() {
                return None;
            }
            let entries = data
                .achievements
                .iter()
                .map(|ach| AchievementEntry {
                    title: ach.title.clone(),
                    issuer: ach.issuer.clone(),
                    date_label: format_year_month(&ach.date),
                    description: ach.description.clone(),
                    verified: badges && ach.verified,
                })
                .collect();
            Some(SectionBlock::Achievements {
                title: label.to_string(),
                entries,
            })
        }
    }
}

/// Groups the flat skill list by category, preserving first-seen category
/// order and insertion order within each group.
fn group_skills(data: &ResumeData) -> Vec<SkillGroup> {
    let mut order: Vec<SkillCategory> = Vec::new();
    for skill in &data.skills {
        if !order.contains(&skill.category) {
            order.push(skill.category);
        }
    }
    order
        .into_iter()
        .map(|category| SkillGroup {
            category,
            chips: data
                .skills
                .iter()
                .filter(|s| s.category == category)
                .map(|s| format!("{} \u{2022} {}", s.name, s.level.as_str()))
                .collect(),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
