//! Grid layout calculation
//!
//! This module handles the geometric tiling of a sheet into slots.

use crate::types::{NupError, Result, SheetSpec};

use super::{LayoutPlan, Slot};

// =============================================================================
// Grid Dimensions
// =============================================================================

/// Grid `(rows, cols)` for the supported pages-per-sheet counts.
///
/// Any other count has no grid and falls back to a single slot.
pub fn grid_dimensions(pages_per_sheet: usize) -> Option<(usize, usize)> {
    match pages_per_sheet {
        1 => Some((1, 1)),
        2 => Some((1, 2)),
        4 => Some((2, 2)),
        8 => Some((2, 4)),
        _ => None,
    }
}

// =============================================================================
// Slot Computation
// =============================================================================

/// Compute the slot rectangles for one sheet.
///
/// # Arguments
/// * `sheet_width` - Sheet width in points
/// * `sheet_height` - Sheet height in points
/// * `pages_per_sheet` - N-up factor; unsupported values produce one slot
/// * `spacing` - Gap between slots and around the border, in points
///
/// # Returns
/// Slots in fill order, or `InvalidLayout` when the spacing leaves no room.
pub fn compute_slots(
    sheet_width: f32,
    sheet_height: f32,
    pages_per_sheet: usize,
    spacing: f32,
) -> Result<Vec<Slot>> {
    let finite = sheet_width.is_finite() && sheet_height.is_finite();
    if !finite || sheet_width <= 0.0 || sheet_height <= 0.0 {
        return Err(NupError::InvalidLayout(format!(
            "sheet must have positive size, got {sheet_width}x{sheet_height}pt"
        )));
    }
    if !spacing.is_finite() || spacing < 0.0 {
        return Err(NupError::InvalidLayout(format!(
            "spacing must be a non-negative number, got {spacing}pt"
        )));
    }

    let (rows, cols) = grid_dimensions(pages_per_sheet).unwrap_or((1, 1));

    let width = (sheet_width - (cols + 1) as f32 * spacing) / cols as f32;
    let height = (sheet_height - (rows + 1) as f32 * spacing) / rows as f32;

    if width <= 0.0 || height <= 0.0 {
        return Err(NupError::InvalidLayout(format!(
            "spacing of {spacing}pt leaves no room for a {rows}x{cols} grid on a \
             {sheet_width}x{sheet_height}pt sheet"
        )));
    }

    let mut slots = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            slots.push(Slot::new(
                spacing + col as f32 * (width + spacing),
                spacing + row as f32 * (height + spacing),
                width,
                height,
            ));
        }
    }

    Ok(slots)
}

impl LayoutPlan {
    /// Build the plan for a sheet and N-up factor
    pub fn new(sheet: &SheetSpec, pages_per_sheet: usize) -> Result<Self> {
        let slots = compute_slots(
            sheet.width_pt,
            sheet.height_pt,
            pages_per_sheet,
            sheet.spacing_pt,
        )?;
        Ok(Self {
            sheet_width_pt: sheet.width_pt,
            sheet_height_pt: sheet.height_pt,
            slots,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::cm_to_pt;
    use crate::types::Orientation;

    const EPS: f32 = 1e-3;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(1), Some((1, 1)));
        assert_eq!(grid_dimensions(2), Some((1, 2)));
        assert_eq!(grid_dimensions(4), Some((2, 2)));
        assert_eq!(grid_dimensions(8), Some((2, 4)));
        assert_eq!(grid_dimensions(3), None);
        assert_eq!(grid_dimensions(16), None);
    }

    #[test]
    fn test_supported_counts_are_contained_and_disjoint() {
        let (w, h, s) = (595.0, 842.0, 5.0);
        for count in [1, 2, 4, 8] {
            let slots = compute_slots(w, h, count, s).unwrap();
            assert_eq!(slots.len(), count);

            for slot in &slots {
                assert!(slot.x >= 0.0 && slot.y >= 0.0);
                assert!(slot.right() <= w + EPS);
                assert!(slot.top() <= h + EPS);
            }
            for (i, a) in slots.iter().enumerate() {
                for b in &slots[i + 1..] {
                    assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_widths_and_spacing_sum_to_sheet() {
        let (w, h, s) = (600.0, 400.0, 7.5);

        let two = compute_slots(w, h, 2, s).unwrap();
        assert_close(2.0 * two[0].width + 3.0 * s, w);
        assert_close(two[0].height + 2.0 * s, h);

        let eight = compute_slots(w, h, 8, s).unwrap();
        assert_close(4.0 * eight[0].width + 5.0 * s, w);
        assert_close(2.0 * eight[0].height + 3.0 * s, h);

        // Last slot in each row touches the right spacing margin
        assert_close(eight[3].right() + s, w);
        assert_close(eight[7].top() + s, h);
    }

    #[test]
    fn test_fill_order_is_left_to_right_bottom_to_top() {
        let slots = compute_slots(400.0, 400.0, 4, 10.0).unwrap();
        // Slot size: (400 - 30) / 2 = 185
        assert_eq!(slots[0], Slot::new(10.0, 10.0, 185.0, 185.0));
        assert_eq!(slots[1], Slot::new(205.0, 10.0, 185.0, 185.0));
        assert_eq!(slots[2], Slot::new(10.0, 205.0, 185.0, 185.0));
        assert_eq!(slots[3], Slot::new(205.0, 205.0, 185.0, 185.0));
    }

    #[test]
    fn test_unsupported_count_falls_back_to_single_slot() {
        for count in [3, 5, 6, 100] {
            let slots = compute_slots(300.0, 500.0, count, 4.0).unwrap();
            assert_eq!(slots, vec![Slot::new(4.0, 4.0, 292.0, 492.0)]);
        }
    }

    #[test]
    fn test_zero_spacing_is_full_bleed() {
        let slots = compute_slots(300.0, 500.0, 1, 0.0).unwrap();
        assert_eq!(slots, vec![Slot::new(0.0, 0.0, 300.0, 500.0)]);
    }

    #[test]
    fn test_oversized_spacing_is_rejected() {
        // 3 gaps of 40pt on a 100pt wide sheet
        let result = compute_slots(100.0, 1000.0, 2, 40.0);
        assert!(matches!(result, Err(NupError::InvalidLayout(_))));

        // Exactly zero remaining width is also degenerate
        let result = compute_slots(90.0, 1000.0, 2, 30.0);
        assert!(matches!(result, Err(NupError::InvalidLayout(_))));
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(compute_slots(0.0, 100.0, 1, 0.0).is_err());
        assert!(compute_slots(100.0, -1.0, 1, 0.0).is_err());
        assert!(compute_slots(100.0, 100.0, 1, -1.0).is_err());
        assert!(compute_slots(100.0, 100.0, 1, f32::NAN).is_err());
    }

    #[test]
    fn test_a4_portrait_four_up() {
        let sheet = SheetSpec::new(
            cm_to_pt(21.0),
            cm_to_pt(29.7),
            Orientation::Portrait,
            cm_to_pt(0.17),
        );
        let plan = LayoutPlan::new(&sheet, 4).unwrap();
        let s = cm_to_pt(0.17);
        let w = (cm_to_pt(21.0) - 3.0 * s) / 2.0;
        let h = (cm_to_pt(29.7) - 3.0 * s) / 2.0;

        assert_eq!(plan.pages_per_sheet(), 4);
        for slot in &plan.slots {
            assert_close(slot.width, w);
            assert_close(slot.height, h);
        }
        // bottom-left, bottom-right, top-left, top-right
        assert_close(plan.slots[0].x, s);
        assert_close(plan.slots[0].y, s);
        assert_close(plan.slots[1].x, 2.0 * s + w);
        assert_close(plan.slots[1].y, s);
        assert_close(plan.slots[2].x, s);
        assert_close(plan.slots[2].y, 2.0 * s + h);
        assert_close(plan.slots[3].x, 2.0 * s + w);
        assert_close(plan.slots[3].y, 2.0 * s + h);
    }

    fn sheet_landscape() -> SheetSpec {
        SheetSpec::new(200.0, 300.0, Orientation::Landscape, 0.0)
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let sheet = sheet_landscape();
        assert_eq!((sheet.width_pt, sheet.height_pt), (300.0, 200.0));

        let sheet = SheetSpec::new(300.0, 200.0, Orientation::Portrait, 0.0);
        assert_eq!((sheet.width_pt, sheet.height_pt), (200.0, 300.0));

        let plan = LayoutPlan::new(&sheet_landscape(), 2).unwrap();
        assert_eq!(plan.slots[0], Slot::new(0.0, 0.0, 150.0, 200.0));
        assert_eq!(plan.slots[1], Slot::new(150.0, 0.0, 150.0, 200.0));
    }
}
