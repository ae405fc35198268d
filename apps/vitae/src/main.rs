//! Demo binary: opens (or seeds) a document, runs one export cycle through
//! the debounced pipeline, and writes the artifact to disk.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitae::config::Config;
use vitae::export::{ExportConfig, ExportPipeline, PdfArtifactRenderer};
use vitae::preview::PreviewSurface;
use vitae::store::storage::JsonFileStorage;
use vitae::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae v{}", env!("CARGO_PKG_VERSION"));

    let storage = Arc::new(JsonFileStorage::new(&config.storage_dir));
    let mut store = ResumeStore::open(storage);

    let pipeline = ExportPipeline::spawn(
        store.snapshots(),
        Arc::new(PdfArtifactRenderer),
        ExportConfig {
            debounce: config.debounce,
        },
    );
    let mut artifacts = pipeline.artifacts();

    // A blank document means a first run; seed it with the sample resume so
    // the demo has something to export.
    if store.resume_data().personal_info.full_name.is_empty()
        && store.resume_data().experience.is_empty()
    {
        info!("Empty document, loading sample data");
        store.load_sample_data();
    }

    artifacts.changed().await?;
    let artifact = artifacts
        .borrow()
        .clone()
        .ok_or_else(|| anyhow::anyhow!("pipeline signalled a change without an artifact"))?;

    // Double-buffered hand-off, the way a preview widget would consume it.
    let mut surface = PreviewSurface::new();
    surface.present(artifact.clone());
    surface.back_loaded();
    info!(
        pages = artifact.page_count,
        state = ?surface.state(),
        "preview swapped in"
    );

    let out_path = config.output_dir.join(&artifact.file_name);
    std::fs::write(&out_path, &artifact.bytes)?;
    info!(path = %out_path.display(), bytes = artifact.bytes.len(), "artifact written");

    pipeline.shutdown().await;
    Ok(())
}
