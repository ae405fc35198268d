//! Export Pipeline — turns document snapshots into paginated PDF artifacts
//! without blocking editing and without ever publishing a stale or partial
//! result.
//!
//! # State machine
//! - Idle → edit arrives → Pending (debounce timer armed, re-armed on every
//!   further edit, measured from the most recent one).
//! - Pending → timer elapses → Rendering (the latest snapshot, and only it,
//!   goes to `spawn_blocking`; intermediate states are never rendered).
//! - Rendering → success → Idle, artifact published atomically; the previous
//!   artifact stays visible until the new one lands.
//! - Rendering → failure → Idle, previous artifact retained, error logged.
//!
//! Supersession uses a monotonically increasing sequence number bumped on
//! every edit arrival: a completed render is applied only if its captured
//! sequence still equals the latest issued. Cancellation is advisory for the
//! computation (the blocking render runs to completion) but mandatory for
//! result application.

pub mod pdf;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::layout::compose::compose_lines;
use crate::layout::page::PageGeometry;
use crate::layout::paginate::paginate;
use crate::models::resume::PersonalInfo;
use crate::render::{render_blocks, render_header};
use crate::store::DocumentSnapshot;

// ────────────────────────────────────────────────────────────────────────────
// Artifact
// ────────────────────────────────────────────────────────────────────────────

/// A fully-rendered export artifact. `revision` identifies the document
/// snapshot it was rendered from.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Bytes,
    pub page_count: usize,
    pub file_name: String,
    pub revision: u64,
}

/// Download name: the full name with whitespace collapsed to underscores, or
/// a generic fallback when the name is blank.
pub fn artifact_file_name(info: &PersonalInfo) -> String {
    let trimmed = info.full_name.trim();
    if trimmed.is_empty() {
        "Resume.pdf".to_string()
    } else {
        let joined = trimmed.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{joined}_Resume.pdf")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer seam
// ────────────────────────────────────────────────────────────────────────────

/// Produces an artifact from a snapshot. The production implementation is
/// [`PdfArtifactRenderer`]; tests substitute doubles to control timing and
/// failure.
pub trait ArtifactRenderer: Send + Sync + 'static {
    fn render(&self, snapshot: &DocumentSnapshot) -> Result<Artifact, AppError>;
}

/// The real pipeline: blocks → composed lines → page frames → PDF bytes.
pub struct PdfArtifactRenderer;

impl ArtifactRenderer for PdfArtifactRenderer {
    fn render(&self, snapshot: &DocumentSnapshot) -> Result<Artifact, AppError> {
        let geometry = PageGeometry::from_settings(&snapshot.settings);
        let header = render_header(&snapshot.resume_data);
        let blocks = render_blocks(&snapshot.resume_data, &snapshot.settings);
        let lines = compose_lines(&header, &blocks, &snapshot.settings, &geometry);
        let layout = paginate(lines, &geometry);
        let bytes = pdf::render_document(&layout, &geometry, &snapshot.settings.theme)?;
        Ok(Artifact {
            bytes,
            page_count: layout.page_count(),
            file_name: artifact_file_name(&snapshot.resume_data.personal_info),
            revision: snapshot.revision,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Quiet period after the most recent edit before rendering starts.
    pub debounce: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            debounce: Duration::from_millis(300),
        }
    }
}

/// Consumer handle: the published-artifact feed, the generating flag, and
/// teardown.
pub struct ExportHandle {
    artifacts: watch::Receiver<Option<Arc<Artifact>>>,
    generating: watch::Receiver<bool>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ExportHandle {
    /// Latest successfully published artifact; `None` until the first render
    /// completes.
    pub fn artifacts(&self) -> watch::Receiver<Option<Arc<Artifact>>> {
        self.artifacts.clone()
    }

    pub fn current_artifact(&self) -> Option<Arc<Artifact>> {
        self.artifacts.borrow().clone()
    }

    pub fn is_generating(&self) -> bool {
        *self.generating.borrow()
    }

    pub fn generating(&self) -> watch::Receiver<bool> {
        self.generating.clone()
    }

    /// Tears the pipeline down. Any render still in flight is abandoned; its
    /// result is never published.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

pub struct ExportPipeline;

impl ExportPipeline {
    /// Starts the pipeline task. It watches the snapshot feed, debounces,
    /// renders off-thread, and publishes artifacts until the store goes away
    /// or [`ExportHandle::shutdown`] is called.
    pub fn spawn(
        snapshots: watch::Receiver<DocumentSnapshot>,
        renderer: Arc<dyn ArtifactRenderer>,
        config: ExportConfig,
    ) -> ExportHandle {
        let (artifacts_tx, artifacts_rx) = watch::channel(None);
        let (generating_tx, generating_rx) = watch::channel(false);
        let (stop_tx, stop_rx) = watch::channel(false);

        let task = tokio::spawn(run(
            snapshots,
            renderer,
            config,
            artifacts_tx,
            generating_tx,
            stop_rx,
        ));

        ExportHandle {
            artifacts: artifacts_rx,
            generating: generating_rx,
            stop: stop_tx,
            task,
        }
    }
}

async fn run(
    mut snapshots: watch::Receiver<DocumentSnapshot>,
    renderer: Arc<dyn ArtifactRenderer>,
    config: ExportConfig,
    artifacts_tx: watch::Sender<Option<Arc<Artifact>>>,
    generating_tx: watch::Sender<bool>,
    mut stop_rx: watch::Receiver<bool>,
) {
    // Bumped on every edit arrival; a completed render publishes only if the
    // sequence it captured is still the latest.
    let mut latest_seq: u64 = 0;
    // Render the state present at startup once, after one quiet period.
    let mut deadline: Option<Instant> = Some(Instant::now() + config.debounce);

    let (results_tx, mut results_rx) =
        mpsc::unbounded_channel::<(u64, Result<Artifact, AppError>)>();

    loop {
        let timer = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    // Store dropped; nothing left to render.
                    break;
                }
                latest_seq += 1;
                deadline = Some(Instant::now() + config.debounce);
            }

            _ = timer => {
                deadline = None;
                let snapshot = snapshots.borrow().clone();
                let seq = latest_seq;
                generating_tx.send_replace(true);
                let renderer = renderer.clone();
                let results = results_tx.clone();
                debug!(seq, revision = snapshot.revision, "export render started");
                tokio::task::spawn_blocking(move || {
                    let result = renderer.render(&snapshot);
                    let _ = results.send((seq, result));
                });
            }

            Some((seq, result)) = results_rx.recv() => {
                if seq != latest_seq {
                    // Superseded while rendering; by design, not a failure.
                    debug!(seq, latest = latest_seq, "discarding stale export render");
                    continue;
                }
                match result {
                    Ok(artifact) => {
                        info!(
                            revision = artifact.revision,
                            pages = artifact.page_count,
                            "export artifact published"
                        );
                        artifacts_tx.send_replace(Some(Arc::new(artifact)));
                    }
                    Err(e) => {
                        error!("export render failed, keeping previous artifact: {e}");
                    }
                }
                generating_tx.send_replace(false);
            }

            _ = stop_rx.changed() => break,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::store::storage::MemoryStorage;
    use crate::store::{PersonalInfoPatch, ResumeStore};

    fn make_store() -> ResumeStore {
        ResumeStore::open(Arc::new(MemoryStorage::new()))
    }

    fn make_config() -> ExportConfig {
        ExportConfig::default()
    }

    fn tiny_artifact(revision: u64) -> Artifact {
        Artifact {
            bytes: Bytes::from_static(b"%PDF-stub"),
            page_count: 1,
            file_name: "Resume.pdf".to_string(),
            revision,
        }
    }

    /// Counts renders and records the revisions it saw.
    struct CountingRenderer {
        calls: AtomicUsize,
        revisions: Mutex<Vec<u64>>,
    }

    impl CountingRenderer {
        fn new() -> Arc<Self> {
            Arc::new(CountingRenderer {
                calls: AtomicUsize::new(0),
                revisions: Mutex::new(Vec::new()),
            })
        }
    }

    impl ArtifactRenderer for CountingRenderer {
        fn render(&self, snapshot: &DocumentSnapshot) -> Result<Artifact, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.revisions.lock().unwrap().push(snapshot.revision);
            Ok(tiny_artifact(snapshot.revision))
        }
    }

    /// Blocks renders of one specific revision until released.
    struct GatedRenderer {
        gated_revision: u64,
        gate: Mutex<Option<std::sync::mpsc::Receiver<()>>>,
    }

    impl GatedRenderer {
        fn new(gated_revision: u64) -> (Arc<Self>, std::sync::mpsc::Sender<()>) {
            let (tx, rx) = std::sync::mpsc::channel();
            (
                Arc::new(GatedRenderer {
                    gated_revision,
                    gate: Mutex::new(Some(rx)),
                }),
                tx,
            )
        }
    }

    impl ArtifactRenderer for GatedRenderer {
        fn render(&self, snapshot: &DocumentSnapshot) -> Result<Artifact, AppError> {
            if snapshot.revision == self.gated_revision {
                if let Some(gate) = self.gate.lock().unwrap().take() {
                    let _ = gate.recv();
                }
            }
            Ok(tiny_artifact(snapshot.revision))
        }
    }

    /// Fails every render after the first successful revision.
    struct FlakyRenderer;

    impl ArtifactRenderer for FlakyRenderer {
        fn render(&self, snapshot: &DocumentSnapshot) -> Result<Artifact, AppError> {
            if snapshot.revision <= 1 {
                Ok(tiny_artifact(snapshot.revision))
            } else {
                Err(AppError::Render("font table exploded".to_string()))
            }
        }
    }

    async fn wait_for_artifact(
        rx: &mut watch::Receiver<Option<Arc<Artifact>>>,
    ) -> Arc<Artifact> {
        rx.changed().await.expect("pipeline dropped artifact feed");
        rx.borrow().clone().expect("artifact must be published")
    }

    // ── File name ───────────────────────────────────────────────────────────

    #[test]
    fn test_file_name_replaces_whitespace_with_underscores() {
        let mut info = PersonalInfo::default();
        info.full_name = "Sarah  Anne Johnson".to_string();
        assert_eq!(artifact_file_name(&info), "Sarah_Anne_Johnson_Resume.pdf");
    }

    #[test]
    fn test_file_name_falls_back_when_name_blank() {
        let mut info = PersonalInfo::default();
        info.full_name = "   ".to_string();
        assert_eq!(artifact_file_name(&info), "Resume.pdf");
    }

    // ── Debounce coalescing ─────────────────────────────────────────────────

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_rapid_edits_coalesce_into_one_render_of_the_last_state() {
        let mut store = make_store();
        let renderer = CountingRenderer::new();
        let handle = ExportPipeline::spawn(store.snapshots(), renderer.clone(), make_config());
        let mut artifacts = handle.artifacts();

        // Two edits inside the debounce window.
        store.load_sample_data(); // revision 1
        store.update_personal_info(PersonalInfoPatch {
            title: Some("Principal Engineer".to_string()),
            ..Default::default()
        }); // revision 2

        let artifact = wait_for_artifact(&mut artifacts).await;
        assert_eq!(artifact.revision, 2, "only the final state is rendered");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*renderer.revisions.lock().unwrap(), vec![2]);

        handle.shutdown().await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_idle_pipeline_renders_startup_state_once() {
        let store = make_store();
        let renderer = CountingRenderer::new();
        let handle = ExportPipeline::spawn(store.snapshots(), renderer.clone(), make_config());
        let mut artifacts = handle.artifacts();

        let artifact = wait_for_artifact(&mut artifacts).await;
        assert_eq!(artifact.revision, 0);
        assert_eq!(artifact.page_count, 1, "empty document is one page");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);

        handle.shutdown().await;
    }

    // ── Stale discard ───────────────────────────────────────────────────────

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_superseded_render_is_discarded_even_if_it_finishes_later() {
        let mut store = make_store();
        let (renderer, release_gate) = GatedRenderer::new(1);
        let handle = ExportPipeline::spawn(store.snapshots(), renderer, make_config());
        let mut artifacts = handle.artifacts();
        let mut generating = handle.generating();

        store.load_sample_data(); // revision 1 — its render will block on the gate

        // Wait until the revision-1 render is actually in flight.
        while !*generating.borrow() {
            generating.changed().await.unwrap();
        }

        // Supersede it while it is still rendering.
        store.update_personal_info(PersonalInfoPatch {
            title: Some("Superseding Edit".to_string()),
            ..Default::default()
        }); // revision 2

        let artifact = wait_for_artifact(&mut artifacts).await;
        assert_eq!(artifact.revision, 2, "the published artifact reflects S2");

        // Let the stale revision-1 render finish and flow through the
        // pipeline; it must be discarded.
        release_gate.send(()).unwrap();
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            handle.current_artifact().unwrap().revision,
            2,
            "a stale completion must never be published"
        );

        handle.shutdown().await;
    }

    // ── Failure recovery ────────────────────────────────────────────────────

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_render_failure_keeps_previous_artifact_and_clears_flag() {
        let mut store = make_store();
        let handle =
            ExportPipeline::spawn(store.snapshots(), Arc::new(FlakyRenderer), make_config());
        let mut artifacts = handle.artifacts();
        let mut generating = handle.generating();

        store.load_sample_data(); // revision 1 — succeeds
        let artifact = wait_for_artifact(&mut artifacts).await;
        assert_eq!(artifact.revision, 1);

        store.reset_resume(); // revision 2 — render fails

        // Generating goes up for the failed render, then comes back down.
        while !*generating.borrow() {
            generating.changed().await.unwrap();
        }
        while *generating.borrow() {
            generating.changed().await.unwrap();
        }

        let current = handle.current_artifact().unwrap();
        assert_eq!(current.revision, 1, "failed render must not clobber artifact");
        assert!(!handle.is_generating());

        handle.shutdown().await;
    }

    // ── Teardown ────────────────────────────────────────────────────────────

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_shutdown_stops_the_pipeline() {
        let store = make_store();
        let renderer = CountingRenderer::new();
        let handle = ExportPipeline::spawn(store.snapshots(), renderer, make_config());
        handle.shutdown().await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_pipeline_ends_when_store_is_dropped() {
        let store = make_store();
        let renderer = CountingRenderer::new();
        let handle = ExportPipeline::spawn(store.snapshots(), renderer, make_config());
        let mut artifacts = handle.artifacts();

        // First artifact from the startup render.
        wait_for_artifact(&mut artifacts).await;

        drop(store);
        // The artifact feed closes once the task observes the dropped store.
        while artifacts.changed().await.is_ok() {}
    }

    // ── Real renderer ───────────────────────────────────────────────────────

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_pdf_renderer_end_to_end() {
        let mut store = make_store();
        let handle = ExportPipeline::spawn(
            store.snapshots(),
            Arc::new(PdfArtifactRenderer),
            make_config(),
        );
        let mut artifacts = handle.artifacts();

        store.load_sample_data();
        let artifact = wait_for_artifact(&mut artifacts).await;
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert!(artifact.page_count >= 1);
        assert_eq!(artifact.file_name, "Sarah_Johnson_Resume.pdf");

        handle.shutdown().await;
    }
}
