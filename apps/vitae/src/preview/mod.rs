//! Preview Surface — double-buffered display of export artifacts.
//!
//! Two named slots: `front` is the fully-loaded artifact currently visible,
//! `back` is the incoming artifact mounting off-screen. The front stays
//! visible and interactive until the back signals readiness, so regeneration
//! never flashes an empty or half-loaded frame. Slots hold the only artifact
//! references the surface owns; every discard path (swap, replacement,
//! resize, teardown) drops its reference.

use std::sync::Arc;

use tracing::debug;

use crate::export::Artifact;

/// What the surface is showing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No artifact has ever finished loading; show a loading placeholder.
    Placeholder,
    /// A front is visible while a newer artifact loads behind it.
    Refreshing,
    /// The front artifact is visible and nothing is loading.
    Showing,
}

#[derive(Default)]
pub struct PreviewSurface {
    front: Option<Arc<Artifact>>,
    back: Option<Arc<Artifact>>,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a freshly-produced artifact into the back slot. A back still
    /// loading is replaced (and its artifact released); the front is
    /// untouched.
    pub fn present(&mut self, artifact: Arc<Artifact>) {
        if let Some(replaced) = self.back.replace(artifact) {
            debug!(revision = replaced.revision, "replacing half-loaded back buffer");
        }
    }

    /// The back slot finished loading: swap it to front and release the old
    /// front. No-op when nothing is mounted.
    pub fn back_loaded(&mut self) {
        if let Some(ready) = self.back.take() {
            self.front = Some(ready);
        }
    }

    /// Viewport resize: remount the visible artifact into the back slot so
    /// it reloads at the new size. Anything already loading is superseded.
    pub fn invalidate(&mut self) {
        if let Some(front) = &self.front {
            self.back = Some(front.clone());
        }
    }

    /// Releases both slots.
    pub fn teardown(&mut self) {
        self.front = None;
        self.back = None;
    }

    /// The artifact the user currently sees, if any.
    pub fn visible(&self) -> Option<&Arc<Artifact>> {
        self.front.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.back.is_some()
    }

    pub fn state(&self) -> PreviewState {
        match (&self.front, &self.back) {
            (None, _) => PreviewState::Placeholder,
            (Some(_), Some(_)) => PreviewState::Refreshing,
            (Some(_), None) => PreviewState::Showing,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn make_artifact(revision: u64) -> Arc<Artifact> {
        Arc::new(Artifact {
            bytes: Bytes::from_static(b"%PDF-stub"),
            page_count: 1,
            file_name: "Resume.pdf".to_string(),
            revision,
        })
    }

    #[test]
    fn test_first_load_shows_placeholder_until_ready() {
        let mut surface = PreviewSurface::new();
        assert_eq!(surface.state(), PreviewState::Placeholder);

        surface.present(make_artifact(1));
        assert_eq!(surface.state(), PreviewState::Placeholder);
        assert!(surface.visible().is_none(), "never show a half-loaded frame");

        surface.back_loaded();
        assert_eq!(surface.state(), PreviewState::Showing);
        assert_eq!(surface.visible().unwrap().revision, 1);
    }

    #[test]
    fn test_front_stays_visible_while_back_loads() {
        let mut surface = PreviewSurface::new();
        surface.present(make_artifact(1));
        surface.back_loaded();

        surface.present(make_artifact(2));
        assert_eq!(surface.state(), PreviewState::Refreshing);
        assert_eq!(
            surface.visible().unwrap().revision,
            1,
            "old front remains until the back is ready"
        );

        surface.back_loaded();
        assert_eq!(surface.visible().unwrap().revision, 2);
        assert_eq!(surface.state(), PreviewState::Showing);
    }

    #[test]
    fn test_newer_artifact_replaces_half_loaded_back() {
        let mut surface = PreviewSurface::new();
        surface.present(make_artifact(1));
        surface.back_loaded();

        surface.present(make_artifact(2));
        surface.present(make_artifact(3)); // 2 never finished loading
        surface.back_loaded();
        assert_eq!(surface.visible().unwrap().revision, 3);
    }

    #[test]
    fn test_swap_releases_the_old_front_reference() {
        let mut surface = PreviewSurface::new();
        let first = make_artifact(1);
        surface.present(first.clone());
        surface.back_loaded();
        assert_eq!(Arc::strong_count(&first), 2);

        surface.present(make_artifact(2));
        surface.back_loaded();
        assert_eq!(
            Arc::strong_count(&first),
            1,
            "surface must drop discarded artifacts"
        );
    }

    #[test]
    fn test_invalidate_remounts_current_frame() {
        let mut surface = PreviewSurface::new();
        surface.present(make_artifact(1));
        surface.back_loaded();

        surface.invalidate();
        assert_eq!(surface.state(), PreviewState::Refreshing);
        assert_eq!(surface.visible().unwrap().revision, 1);

        surface.back_loaded();
        assert_eq!(surface.state(), PreviewState::Showing);
        assert_eq!(surface.visible().unwrap().revision, 1);
    }

    #[test]
    fn test_invalidate_without_front_is_noop() {
        let mut surface = PreviewSurface::new();
        surface.invalidate();
        assert_eq!(surface.state(), PreviewState::Placeholder);
        assert!(!surface.is_loading());
    }

    #[test]
    fn test_ready_without_back_is_noop() {
        let mut surface = PreviewSurface::new();
        surface.present(make_artifact(1));
        surface.back_loaded();
        surface.back_loaded(); // spurious extra ready signal
        assert_eq!(surface.visible().unwrap().revision, 1);
    }

    #[test]
    fn test_teardown_releases_both_slots() {
        let mut surface = PreviewSurface::new();
        let front = make_artifact(1);
        let back = make_artifact(2);
        surface.present(front.clone());
        surface.back_loaded();
        surface.present(back.clone());

        surface.teardown();
        assert_eq!(surface.state(), PreviewState::Placeholder);
        assert_eq!(Arc::strong_count(&front), 1);
        assert_eq!(Arc::strong_count(&back), 1);
    }
}
