//! The fixed demonstration dataset loaded by `ResumeStore::load_sample_data`.

use uuid::Uuid;

use crate::models::resume::{
    default_section_order, Achievement, Certification, Education, Experience, PersonalInfo,
    Project, ResumeData, Skill, SkillCategory, SkillLevel,
};

fn bullets(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A fully-populated sample resume. Entity identifiers are minted fresh on
/// every call; the content itself is fixed.
pub fn sample_resume_data() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            linkedin: "linkedin.com/in/sarahjohnson".to_string(),
            portfolio: "sarahjohnson.dev".to_string(),
            github: "github.com/sarahjohnson".to_string(),
            title: "Full Stack Developer".to_string(),
            summary: "Innovative Full Stack Developer with 5+ years of experience building \
                      scalable web applications. Specialized in React, Node.js, and cloud \
                      technologies. Passionate about creating intuitive user experiences and \
                      writing clean, maintainable code."
                .to_string(),
        },
        experience: vec![
            Experience {
                id: Uuid::new_v4(),
                company: "Tech Innovations Inc".to_string(),
                position: "Senior Full Stack Developer".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2022-01".to_string(),
                end_date: String::new(),
                current: true,
                description: bullets(&[
                    "Led development of microservices architecture serving 2M+ users, improving system reliability by 40%",
                    "Architected and implemented real-time collaboration features using WebSockets and Redis",
                    "Mentored team of 5 junior developers, establishing code review practices and development standards",
                    "Reduced application load time by 60% through optimization and implementation of caching strategies",
                ]),
                verified: true,
            },
            Experience {
                id: Uuid::new_v4(),
                company: "StartupXYZ".to_string(),
                position: "Full Stack Developer".to_string(),
                location: "Remote".to_string(),
                start_date: "2020-03".to_string(),
                end_date: "2021-12".to_string(),
                current: false,
                description: bullets(&[
                    "Built responsive web applications using React, TypeScript, and Node.js for B2B SaaS platform",
                    "Implemented CI/CD pipelines using GitHub Actions, reducing deployment time by 50%",
                    "Collaborated with UX team to implement accessible UI components following WCAG guidelines",
                    "Integrated payment processing system handling $1M+ in monthly transactions",
                ]),
                verified: true,
            },
        ],
        education: vec![Education {
            id: Uuid::new_v4(),
            institution: "Stanford University".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            location: "Stanford, CA".to_string(),
            start_date: "2015-09".to_string(),
            end_date: "2019-06".to_string(),
            current: false,
            gpa: "3.8".to_string(),
            honors: bullets(&[
                "Dean's List all semesters",
                "President of Women in Tech club",
                "Research assistant in AI lab",
            ]),
            verified: true,
        }],
        projects: vec![
            Project {
                id: Uuid::new_v4(),
                name: "Open Source CMS Platform".to_string(),
                description: "Built a headless CMS platform with modern architecture for content management".to_string(),
                technologies: bullets(&["React", "Next.js", "GraphQL", "PostgreSQL", "Docker"]),
                link: String::new(),
                github: "github.com/sarahjohnson/cms-platform".to_string(),
                start_date: "2023-01".to_string(),
                end_date: "2023-06".to_string(),
                highlights: bullets(&[
                    "Gained 2.5K+ GitHub stars and 150+ contributors",
                    "Featured in JavaScript Weekly newsletter",
                    "Implemented plugin system for extensibility",
                ]),
                verified: false,
            },
            Project {
                id: Uuid::new_v4(),
                name: "Real-time Analytics Dashboard".to_string(),
                description: "Created analytics dashboard for monitoring application performance metrics".to_string(),
                technologies: bullets(&["React", "D3.js", "WebSocket", "Express", "MongoDB"]),
                link: "analytics-demo.sarahjohnson.dev".to_string(),
                github: String::new(),
                start_date: "2022-06".to_string(),
                end_date: "2022-09".to_string(),
                highlights: bullets(&[
                    "Processes 100K+ events per second with real-time visualization",
                    "Implemented custom charting library for complex data visualization",
                    "Achieved 99.9% uptime in production",
                ]),
                verified: true,
            },
        ],
        certifications: vec![
            Certification {
                id: Uuid::new_v4(),
                name: "AWS Certified Solutions Architect".to_string(),
                issuer: "Amazon Web Services".to_string(),
                date: "2023-03".to_string(),
                expiry_date: String::new(),
                credential_id: "AWS-SAA-123456".to_string(),
                link: String::new(),
                verified: true,
            },
            Certification {
                id: Uuid::new_v4(),
                name: "Google Cloud Professional Developer".to_string(),
                issuer: "Google Cloud".to_string(),
                date: "2022-08".to_string(),
                expiry_date: String::new(),
                credential_id: "GCP-PD-789012".to_string(),
                link: String::new(),
                verified: true,
            },
        ],
        skills: vec![
            Skill::new("React", SkillLevel::Expert, SkillCategory::Technical),
            Skill::new("TypeScript", SkillLevel::Expert, SkillCategory::Technical),
            Skill::new("Node.js", SkillLevel::Advanced, SkillCategory::Technical),
            Skill::new("Next.js", SkillLevel::Advanced, SkillCategory::Technical),
            Skill::new("PostgreSQL", SkillLevel::Advanced, SkillCategory::Technical),
            Skill::new("AWS", SkillLevel::Advanced, SkillCategory::Technical),
            Skill::new("Docker", SkillLevel::Intermediate, SkillCategory::Tool),
            Skill::new("GraphQL", SkillLevel::Advanced, SkillCategory::Technical),
            Skill::new("Team Leadership", SkillLevel::Advanced, SkillCategory::Soft),
            Skill::new("Agile/Scrum", SkillLevel::Expert, SkillCategory::Soft),
        ],
        achievements: vec![
            Achievement {
                id: Uuid::new_v4(),
                title: "Best Innovation Award 2023".to_string(),
                issuer: "Tech Innovations Inc".to_string(),
                date: "2023-12".to_string(),
                description: "Recognized for developing innovative real-time collaboration feature".to_string(),
                verified: true,
            },
            Achievement {
                id: Uuid::new_v4(),
                title: "Hackathon Winner - FinTech Challenge".to_string(),
                issuer: "TechCrunch Disrupt".to_string(),
                date: "2022-09".to_string(),
                description: "First place winner for developing AI-powered financial planning tool".to_string(),
                verified: true,
            },
        ],
        section_order: default_section_order(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_populates_every_section() {
        let data = sample_resume_data();
        assert!(!data.personal_info.full_name.is_empty());
        assert!(!data.experience.is_empty());
        assert!(!data.education.is_empty());
        assert!(!data.projects.is_empty());
        assert!(!data.certifications.is_empty());
        assert!(!data.skills.is_empty());
        assert!(!data.achievements.is_empty());
        assert_eq!(data.section_order.len(), 7);
    }

    #[test]
    fn test_sample_current_role_has_blank_end_date() {
        let data = sample_resume_data();
        let current = data.experience.iter().find(|e| e.current).unwrap();
        assert!(current.end_date.is_empty());
    }

    #[test]
    fn test_sample_bullets_are_never_empty() {
        let data = sample_resume_data();
        assert!(data.experience.iter().all(|e| !e.description.is_empty()));
        assert!(data.projects.iter().all(|p| !p.highlights.is_empty()));
    }
}
