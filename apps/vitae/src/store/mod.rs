//! Document Store — single source of truth for the resume document and its
//! render settings.
//!
//! Constructed explicitly at application start and passed by reference to all
//! consumers; never reached through ambient global state, so tests can run
//! any number of independent instances.
//!
//! Every mutation is synchronous and total: the store never rejects a
//! well-typed patch. After applying a mutation the store (1) persists the
//! full `{resumeData, settings, activeSection}` blob through the injected
//! [`StorageBackend`], swallowing failures with a `warn!` so persistence can
//! never block editing, and (2) publishes a fresh [`DocumentSnapshot`] on a
//! watch channel consumed by the export pipeline.

pub mod storage;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::resume::{
    Achievement, Certification, Education, Experience, PersonalInfo, Project, ResumeData,
    SectionKind, SectionOrder, Skill, SkillCategory, SkillLevel,
};
use crate::models::sample::sample_resume_data;
use crate::models::settings::{ResumeSettings, ResumeTheme, SettingsPatch};
use crate::store::storage::{PersistedState, StorageBackend, STORAGE_KEY};

// ────────────────────────────────────────────────────────────────────────────
// Snapshot feed
// ────────────────────────────────────────────────────────────────────────────

/// Immutable view of the store state at a point in time. `revision` is a
/// per-store counter that increments on every mutation.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub revision: u64,
    pub resume_data: ResumeData,
    pub settings: ResumeSettings,
}

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

/// Field-wise partial updates. `None` leaves the field untouched; no
/// validation is performed (empty or transiently invalid values are allowed).
#[derive(Debug, Clone, Default)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub github: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<Vec<String>>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub gpa: Option<String>,
    pub honors: Option<Vec<String>>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub link: Option<String>,
    pub github: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CertificationPatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub link: Option<String>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<SkillLevel>,
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, Default)]
pub struct AchievementPatch {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub verified: Option<bool>,
}

macro_rules! merge {
    ($target:expr, $patch:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

pub struct ResumeStore {
    resume_data: ResumeData,
    settings: ResumeSettings,
    active_section: SectionKind,
    revision: u64,
    storage: Arc<dyn StorageBackend>,
    changes: watch::Sender<DocumentSnapshot>,
}

impl ResumeStore {
    /// Opens the store, rehydrating from the backend if a blob exists under
    /// the fixed storage key. An unreadable or incompatible blob falls back
    /// to the initial empty document and is overwritten on the next save.
    pub fn open(storage: Arc<dyn StorageBackend>) -> Self {
        let persisted = match storage.load(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedState>(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!("Discarding incompatible persisted blob: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read persisted blob, starting empty: {e}");
                None
            }
        };

        let (resume_data, settings, active_section) = match persisted {
            Some(state) => {
                info!("Rehydrated document from storage");
                (state.resume_data, state.settings, state.active_section)
            }
            None => (
                ResumeData::initial(),
                ResumeSettings::default(),
                SectionKind::Personal,
            ),
        };

        let (changes, _) = watch::channel(DocumentSnapshot {
            revision: 0,
            resume_data: resume_data.clone(),
            settings: settings.clone(),
        });

        ResumeStore {
            resume_data,
            settings,
            active_section,
            revision: 0,
            storage,
            changes,
        }
    }

    // ── Read access ─────────────────────────────────────────────────────────

    pub fn resume_data(&self) -> &ResumeData {
        &self.resume_data
    }

    pub fn settings(&self) -> &ResumeSettings {
        &self.settings
    }

    pub fn active_section(&self) -> SectionKind {
        self.active_section
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Subscribes to the snapshot feed. Every mutation publishes one
    /// snapshot; receivers always observe the latest state.
    pub fn snapshots(&self) -> watch::Receiver<DocumentSnapshot> {
        self.changes.subscribe()
    }

    // ── Personal info ───────────────────────────────────────────────────────

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        let info = &mut self.resume_data.personal_info;
        merge!(
            info,
            patch,
            [full_name, email, phone, location, linkedin, portfolio, github, title, summary]
        );
        self.commit();
    }

    // ── Experience ──────────────────────────────────────────────────────────

    pub fn add_experience(&mut self, mut experience: Experience) {
        ensure_min_one_bullet(&mut experience.description);
        self.resume_data.experience.push(experience);
        self.commit();
    }

    /// No-op when `id` is not found.
    pub fn update_experience(&mut self, id: Uuid, patch: ExperiencePatch) {
        if let Some(exp) = self.resume_data.experience.iter_mut().find(|e| e.id == id) {
            merge!(
                exp,
                patch,
                [company, position, location, start_date, end_date, current, description, verified]
            );
            ensure_min_one_bullet(&mut exp.description);
            self.commit();
        }
    }

    /// Removes the matching entry if present, else no-op.
    pub fn delete_experience(&mut self, id: Uuid) {
        self.resume_data.experience.retain(|e| e.id != id);
        self.commit();
    }

    /// Wholesale replacement of the experience list (drag reorder).
    pub fn reorder_experience(&mut self, experiences: Vec<Experience>) {
        self.resume_data.experience = experiences;
        self.commit();
    }

    // ── Education ───────────────────────────────────────────────────────────

    pub fn add_education(&mut self, education: Education) {
        self.resume_data.education.push(education);
        self.commit();
    }

    pub fn update_education(&mut self, id: Uuid, patch: EducationPatch) {
        if let Some(edu) = self.resume_data.education.iter_mut().find(|e| e.id == id) {
            merge!(
                edu,
                patch,
                [institution, degree, field, location, start_date, end_date, current, gpa, honors, verified]
            );
            self.commit();
        }
    }

    pub fn delete_education(&mut self, id: Uuid) {
        self.resume_data.education.retain(|e| e.id != id);
        self.commit();
    }

    // ── Projects ────────────────────────────────────────────────────────────

    pub fn add_project(&mut self, mut project: Project) {
        ensure_min_one_bullet(&mut project.highlights);
        dedupe_preserving_order(&mut project.technologies);
        self.resume_data.projects.push(project);
        self.commit();
    }

    pub fn update_project(&mut self, id: Uuid, patch: ProjectPatch) {
        if let Some(proj) = self.resume_data.projects.iter_mut().find(|p| p.id == id) {
            merge!(
                proj,
                patch,
                [name, description, technologies, link, github, start_date, end_date, highlights, verified]
            );
            ensure_min_one_bullet(&mut proj.highlights);
            dedupe_preserving_order(&mut proj.technologies);
            self.commit();
        }
    }

    pub fn delete_project(&mut self, id: Uuid) {
        self.resume_data.projects.retain(|p| p.id != id);
        self.commit();
    }

    // ── Certifications ──────────────────────────────────────────────────────

    pub fn add_certification(&mut self, cert: Certification) {
        self.resume_data.certifications.push(cert);
        self.commit();
    }

    pub fn update_certification(&mut self, id: Uuid, patch: CertificationPatch) {
        if let Some(cert) = self
            .resume_data
            .certifications
            .iter_mut()
            .find(|c| c.id == id)
        {
            merge!(
                cert,
                patch,
                [name, issuer, date, expiry_date, credential_id, link, verified]
            );
            self.commit();
        }
    }

    pub fn delete_certification(&mut self, id: Uuid) {
        self.resume_data.certifications.retain(|c| c.id != id);
        self.commit();
    }

    // ── Skills ──────────────────────────────────────────────────────────────

    pub fn add_skill(&mut self, skill: Skill) {
        self.resume_data.skills.push(skill);
        self.commit();
    }

    pub fn update_skill(&mut self, id: Uuid, patch: SkillPatch) {
        if let Some(skill) = self.resume_data.skills.iter_mut().find(|s| s.id == id) {
            merge!(skill, patch, [name, level, category]);
            self.commit();
        }
    }

    pub fn delete_skill(&mut self, id: Uuid) {
        self.resume_data.skills.retain(|s| s.id != id);
        self.commit();
    }

    // ── Achievements ────────────────────────────────────────────────────────

    pub fn add_achievement(&mut self, achievement: Achievement) {
        self.resume_data.achievements.push(achievement);
        self.commit();
    }

    pub fn update_achievement(&mut self, id: Uuid, patch: AchievementPatch) {
        if let Some(ach) = self
            .resume_data
            .achievements
            .iter_mut()
            .find(|a| a.id == id)
        {
            merge!(ach, patch, [title, issuer, date, description, verified]);
            self.commit();
        }
    }

    pub fn delete_achievement(&mut self, id: Uuid) {
        self.resume_data.achievements.retain(|a| a.id != id);
        self.commit();
    }

    // ── Sections ────────────────────────────────────────────────────────────

    /// Flips the enabled flag of the matching entry; silent no-op when the
    /// kind has no entry in the current order list.
    pub fn toggle_section(&mut self, kind: SectionKind) {
        if let Some(section) = self
            .resume_data
            .section_order
            .iter_mut()
            .find(|s| s.kind == kind)
        {
            section.enabled = !section.enabled;
            self.commit();
        }
    }

    /// Wholesale replacement. Completeness is not validated: a kind omitted
    /// from the replacement simply stops rendering until it is restored.
    pub fn update_section_order(&mut self, sections: Vec<SectionOrder>) {
        self.resume_data.section_order = sections;
        self.commit();
    }

    pub fn set_active_section(&mut self, kind: SectionKind) {
        self.active_section = kind;
        self.commit();
    }

    // ── Settings ────────────────────────────────────────────────────────────

    pub fn update_theme(&mut self, theme: ResumeTheme) {
        self.settings.theme = theme;
        self.commit();
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        merge!(
            self.settings,
            patch,
            [theme, font_size, line_height, margins, show_icons, show_verification_badges]
        );
        self.commit();
    }

    // ── Whole-document operations ───────────────────────────────────────────

    /// Atomic replacement with the empty initial document. Settings are
    /// untouched.
    pub fn reset_resume(&mut self) {
        self.resume_data = ResumeData::initial();
        self.active_section = SectionKind::Personal;
        self.commit();
    }

    /// Atomic replacement with the fixed demonstration dataset.
    pub fn load_sample_data(&mut self) {
        self.resume_data = sample_resume_data();
        self.commit();
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn commit(&mut self) {
        self.revision += 1;
        self.persist();
        self.changes.send_replace(DocumentSnapshot {
            revision: self.revision,
            resume_data: self.resume_data.clone(),
            settings: self.settings.clone(),
        });
    }

    /// Fire-and-forget persistence; a failure must never block editing.
    fn persist(&self) {
        let state = PersistedState {
            resume_data: self.resume_data.clone(),
            settings: self.settings.clone(),
            active_section: self.active_section,
        };
        let blob = match serde_json::to_string(&state) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Failed to serialize document state: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.save(STORAGE_KEY, &blob) {
            warn!("Failed to persist document state: {e}");
        }
    }
}

/// Bullets are never empty-deleted below one entry.
fn ensure_min_one_bullet(bullets: &mut Vec<String>) {
    if bullets.is_empty() {
        bullets.push(String::new());
    }
}

/// Technology tags are unique per project, first occurrence wins.
fn dedupe_preserving_order(tags: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    tags.retain(|tag| seen.insert(tag.clone()));
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    fn make_store() -> ResumeStore {
        ResumeStore::open(Arc::new(MemoryStorage::new()))
    }

    fn make_store_with(storage: Arc<dyn StorageBackend>) -> ResumeStore {
        ResumeStore::open(storage)
    }

    /// Backend that always fails, for the persistence-failure path.
    struct FailingStorage;

    impl StorageBackend for FailingStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, crate::errors::AppError> {
            Err(crate::errors::AppError::Storage("disk on fire".to_string()))
        }
        fn save(&self, _key: &str, _value: &str) -> Result<(), crate::errors::AppError> {
            Err(crate::errors::AppError::Storage("disk on fire".to_string()))
        }
        fn clear(&self, _key: &str) -> Result<(), crate::errors::AppError> {
            Err(crate::errors::AppError::Storage("disk on fire".to_string()))
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    #[test]
    fn test_update_personal_info_merges_fields() {
        let mut store = make_store();
        store.update_personal_info(PersonalInfoPatch {
            full_name: Some("Grace Hopper".to_string()),
            ..Default::default()
        });
        store.update_personal_info(PersonalInfoPatch {
            email: Some("grace@navy.mil".to_string()),
            ..Default::default()
        });
        let info = &store.resume_data().personal_info;
        assert_eq!(info.full_name, "Grace Hopper");
        assert_eq!(info.email, "grace@navy.mil");
    }

    #[test]
    fn test_add_appends_to_end_of_list() {
        let mut store = make_store();
        let first = Experience::new();
        let second = Experience::new();
        let (a, b) = (first.id, second.id);
        store.add_experience(first);
        store.add_experience(second);
        let ids: Vec<Uuid> = store.resume_data().experience.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = make_store();
        store.add_experience(Experience::new());
        let before = store.resume_data().clone();
        let before_rev = store.revision();
        store.update_experience(
            Uuid::new_v4(),
            ExperiencePatch {
                company: Some("Nowhere Inc".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(store.resume_data(), &before);
        assert_eq!(store.revision(), before_rev, "no-op must not commit");
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = make_store();
        store.add_skill(Skill::new("Rust", SkillLevel::Expert, SkillCategory::Technical));
        store.delete_skill(Uuid::new_v4());
        assert_eq!(store.resume_data().skills.len(), 1);
    }

    #[test]
    fn test_delete_removes_matching_entity() {
        let mut store = make_store();
        let cert = Certification::new();
        let id = cert.id;
        store.add_certification(cert);
        store.delete_certification(id);
        assert!(store.resume_data().certifications.is_empty());
    }

    #[test]
    fn test_emptying_description_normalizes_to_one_blank_bullet() {
        let mut store = make_store();
        let exp = Experience::new();
        let id = exp.id;
        store.add_experience(exp);
        store.update_experience(
            id,
            ExperiencePatch {
                description: Some(vec![]),
                ..Default::default()
            },
        );
        assert_eq!(store.resume_data().experience[0].description, vec![String::new()]);
    }

    #[test]
    fn test_project_technologies_deduped_in_insertion_order() {
        let mut store = make_store();
        let project = Project::new();
        let id = project.id;
        store.add_project(project);
        store.update_project(
            id,
            ProjectPatch {
                technologies: Some(vec![
                    "React".to_string(),
                    "Rust".to_string(),
                    "React".to_string(),
                ]),
                ..Default::default()
            },
        );
        assert_eq!(
            store.resume_data().projects[0].technologies,
            vec!["React".to_string(), "Rust".to_string()]
        );
    }

    #[test]
    fn test_reorder_experience_replaces_list() {
        let mut store = make_store();
        let first = Experience::new();
        let second = Experience::new();
        let (a, b) = (first.id, second.id);
        store.add_experience(first.clone());
        store.add_experience(second.clone());
        store.reorder_experience(vec![second, first]);
        let ids: Vec<Uuid> = store.resume_data().experience.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    // ── Sections ────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_section_flips_enabled() {
        let mut store = make_store();
        store.toggle_section(SectionKind::Projects);
        let section = store
            .resume_data()
            .section_order
            .iter()
            .find(|s| s.kind == SectionKind::Projects)
            .unwrap();
        assert!(!section.enabled);
        store.toggle_section(SectionKind::Projects);
        let section = store
            .resume_data()
            .section_order
            .iter()
            .find(|s| s.kind == SectionKind::Projects)
            .unwrap();
        assert!(section.enabled);
    }

    #[test]
    fn test_toggle_missing_section_is_noop() {
        let mut store = make_store();
        // Drop the projects entry entirely, then toggle it.
        let partial: Vec<SectionOrder> = store
            .resume_data()
            .section_order
            .iter()
            .filter(|s| s.kind != SectionKind::Projects)
            .cloned()
            .collect();
        store.update_section_order(partial);
        let before = store.resume_data().section_order.clone();
        store.toggle_section(SectionKind::Projects);
        assert_eq!(store.resume_data().section_order, before);
    }

    // ── Whole-document operations ───────────────────────────────────────────

    #[test]
    fn test_reset_restores_initial_document_but_keeps_settings() {
        let mut store = make_store();
        store.load_sample_data();
        store.update_settings(SettingsPatch {
            font_size: Some(11.0),
            ..Default::default()
        });
        store.reset_resume();
        assert_eq!(store.resume_data(), &ResumeData::initial());
        assert!((store.settings().font_size - 11.0).abs() < f32::EPSILON);
        assert_eq!(store.active_section(), SectionKind::Personal);
    }

    #[test]
    fn test_load_sample_data_populates_document() {
        let mut store = make_store();
        store.load_sample_data();
        assert_eq!(store.resume_data().personal_info.full_name, "Sarah Johnson");
        assert!(!store.resume_data().experience.is_empty());
    }

    // ── Persistence ─────────────────────────────────────────────────────────

    #[test]
    fn test_round_trip_persistence_reproduces_document() {
        let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let ids = {
            let mut store = make_store_with(storage.clone());
            store.load_sample_data();
            store.update_personal_info(PersonalInfoPatch {
                title: Some("Staff Engineer".to_string()),
                ..Default::default()
            });
            store
                .resume_data()
                .experience
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>()
        };

        let reopened = make_store_with(storage);
        assert_eq!(reopened.resume_data().personal_info.title, "Staff Engineer");
        let reopened_ids: Vec<Uuid> = reopened
            .resume_data()
            .experience
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(reopened_ids, ids, "identifiers must survive rehydration");
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_initial_document() {
        let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        storage.save(STORAGE_KEY, "{ not valid json").unwrap();
        let store = make_store_with(storage);
        assert_eq!(store.resume_data(), &ResumeData::initial());
    }

    #[test]
    fn test_storage_failure_never_blocks_editing() {
        let mut store = make_store_with(Arc::new(FailingStorage));
        store.update_personal_info(PersonalInfoPatch {
            full_name: Some("Still Works".to_string()),
            ..Default::default()
        });
        assert_eq!(store.resume_data().personal_info.full_name, "Still Works");
    }

    // ── Snapshot feed ───────────────────────────────────────────────────────

    #[test]
    fn test_every_mutation_publishes_a_snapshot() {
        let mut store = make_store();
        let rx = store.snapshots();
        assert_eq!(rx.borrow().revision, 0);
        store.load_sample_data();
        assert_eq!(rx.borrow().revision, 1);
        assert_eq!(rx.borrow().resume_data.personal_info.full_name, "Sarah Johnson");
        store.reset_resume();
        assert_eq!(rx.borrow().revision, 2);
    }
}
