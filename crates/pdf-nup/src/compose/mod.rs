//! Sheet composition
//!
//! Both outputs share the same pipeline:
//! 1. Resolve the page order (explicit or identity)
//! 2. Chunk it into sheets of `pages_per_sheet`
//! 3. Render each page and fit it into its slot
//! 4. Hand the placed images to a [`SheetWriter`] sink
//!
//! The sinks are an in-memory canvas (preview) and a PDF writer (output).

mod canvas;
mod document;
mod preview;
mod writer;

pub use canvas::SheetCanvas;
pub use document::{compose_into, write_document};
pub use preview::{ComposedSheet, Composition, Sheets, compose};
pub use writer::{PdfSheetWriter, SheetWriter};

use crate::layout::{LayoutPlan, SheetAssignment, fit_rect};
use crate::render::PageRenderer;
use crate::types::{NupError, Result};

/// Render and place every page of one sheet, then finalize it
pub(crate) fn compose_sheet<W: SheetWriter + ?Sized>(
    sheet: &SheetAssignment,
    plan: &LayoutPlan,
    renderer: &dyn PageRenderer,
    dpi: u32,
    writer: &mut W,
) -> Result<()> {
    for assignment in &sheet.slots {
        let slot = &plan.slots[assignment.slot_index];
        let image = renderer.render(assignment.page_index, dpi)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(NupError::Render(format!(
                "page {} rendered as an empty {}x{} image",
                assignment.page_index + 1,
                image.width(),
                image.height()
            )));
        }
        let rect = fit_rect(image.width() as f32, image.height() as f32, slot);
        writer.place_image(&image, rect)?;
    }

    log::debug!(
        "Composed sheet {} ({} placed, {} empty)",
        sheet.sheet_index + 1,
        sheet.slots.len(),
        sheet.empty_slots
    );
    writer.finish_sheet()
}
