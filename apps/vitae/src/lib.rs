//! Vitae — a client-side resume builder core.
//!
//! The crate is the document model and its rendering/export pipeline:
//!
//! - [`models`] — the normalized resume schema plus section-ordering metadata
//!   and render settings.
//! - [`store`] — the single mutable container holding the current document,
//!   with typed mutation operations and fire-and-forget persistence to a
//!   durable local key-value backend.
//! - [`render`] — the pure section renderer mapping (document, settings) to
//!   an ordered block list, shared by the live preview and the exporter.
//! - [`layout`] — pagination math: font metrics, page geometry, line
//!   composition, and slicing into page frames.
//! - [`export`] — the debounced, cancellable pipeline producing paginated
//!   PDF artifacts from document snapshots.
//! - [`preview`] — the double-buffered surface that swaps artifacts in only
//!   once fully loaded.
//!
//! Form widgets, theming UI, and application chrome are presentation
//! concerns that consume these modules; they live outside this crate.

pub mod config;
pub mod errors;
pub mod export;
pub mod layout;
pub mod models;
pub mod preview;
pub mod render;
pub mod store;

pub use errors::AppError;
pub use export::{Artifact, ExportConfig, ExportHandle, ExportPipeline, PdfArtifactRenderer};
pub use models::{ResumeData, ResumeSettings, SectionKind};
pub use preview::{PreviewState, PreviewSurface};
pub use render::{render_blocks, render_header};
pub use store::{DocumentSnapshot, ResumeStore};
