// Pagination math for the export pipeline: font metrics, fixed page
// geometry, line composition, and slicing into page frames. Everything here
// is pure and CPU-bound; the export pipeline runs it inside spawn_blocking.

pub mod compose;
pub mod font_metrics;
pub mod page;
pub mod paginate;

pub use compose::{compose_lines, ColorRole, FontRole, StyledLine};
pub use font_metrics::{table_for, FontFamily};
pub use page::PageGeometry;
pub use paginate::{estimated_page_count, paginate, PageFrame, PaginatedLayout};
