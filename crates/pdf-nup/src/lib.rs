pub mod compose;
pub mod constants;
pub mod layout;
pub mod render;

mod batch;
mod options;
mod order;
mod preview;
mod registry;
mod source;
mod stats;
mod types;

pub use batch::{BatchItem, BatchJob, BatchProgress, BatchSummary, generate_batch};
pub use compose::{ComposedSheet, Composition, compose, write_document};
pub use layout::{LayoutPlan, Rect, Slot, compute_slots};
pub use options::*;
pub use order::{identity_order, move_page, resolve_page_order, validate_page_order};
pub use preview::{generate_preview, preview_sheets};
pub use registry::DocumentRegistry;
pub use render::{PageRenderer, RenderBackend};
pub use source::{PageSource, load_source, load_sources};
pub use stats::calculate_statistics;
pub use types::*;
