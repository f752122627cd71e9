//! Page placement
//!
//! Chunking a page order into sheets, and fitting a page image into
//! its slot without distorting it.

use super::{Rect, SheetAssignment, SlotAssignment};

/// Number of sheets needed for `page_count` pages at `pages_per_sheet`
pub fn sheet_count(page_count: usize, pages_per_sheet: usize) -> usize {
    if pages_per_sheet == 0 {
        return 0;
    }
    page_count.div_ceil(pages_per_sheet)
}

/// Split a page order into sheets.
///
/// Each chunk of `pages_per_sheet` entries becomes one sheet, zipped with
/// the slots in fill order. The last sheet may be short; its remaining
/// slots are reported as empty rather than padded.
pub fn plan_sheets(page_order: &[usize], pages_per_sheet: usize) -> Vec<SheetAssignment> {
    if pages_per_sheet == 0 {
        return Vec::new();
    }

    page_order
        .chunks(pages_per_sheet)
        .enumerate()
        .map(|(sheet_index, chunk)| SheetAssignment {
            sheet_index,
            slots: chunk
                .iter()
                .enumerate()
                .map(|(slot_index, &page_index)| SlotAssignment {
                    slot_index,
                    page_index,
                })
                .collect(),
            empty_slots: pages_per_sheet - chunk.len(),
        })
        .collect()
}

/// Scale an image of `image_width` x `image_height` to fit inside `slot`,
/// preserving its aspect ratio and centering it on the padded axis.
pub fn fit_rect(image_width: f32, image_height: f32, slot: &Rect) -> Rect {
    if image_width <= 0.0 || image_height <= 0.0 {
        return Rect::new(slot.center_x(), slot.center_y(), 0.0, 0.0);
    }

    let scale = (slot.width / image_width).min(slot.height / image_height);
    let width = image_width * scale;
    let height = image_height * scale;

    Rect::new(
        slot.x + (slot.width - width) / 2.0,
        slot.y + (slot.height - height) / 2.0,
        width,
        height,
    )
}
