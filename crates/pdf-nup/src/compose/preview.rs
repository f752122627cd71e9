//! Lazy in-memory composition for previews

use super::{SheetCanvas, compose_sheet};
use crate::layout::{LayoutPlan, SheetAssignment, plan_sheets};
use crate::order::resolve_page_order;
use crate::render::PageRenderer;
use crate::types::*;
use image::RgbImage;

/// One composed preview sheet
#[derive(Debug, Clone)]
pub struct ComposedSheet {
    /// Zero-based sheet number
    pub sheet_index: usize,
    /// The painted sheet
    pub image: RgbImage,
    /// Which page went into which slot
    pub assignment: SheetAssignment,
}

/// A planned composition whose sheets are rendered on demand.
///
/// Sheet assignments are fixed when the composition is created; every call
/// to [`Composition::sheets`] starts a fresh pass from the first sheet.
pub struct Composition<'a> {
    renderer: &'a dyn PageRenderer,
    plan: &'a LayoutPlan,
    assignments: Vec<SheetAssignment>,
    dpi: u32,
}

/// Plan a composition of `page_count` pages.
///
/// # Arguments
/// * `page_count` - Pages in the source document
/// * `page_order` - Explicit order, or `None` for natural order
/// * `plan` - Slot geometry; its slot count is the pages per sheet
/// * `renderer` - Source of page images
/// * `dpi` - Resolution of both page rendering and the composed sheets
pub fn compose<'a>(
    page_count: usize,
    page_order: Option<&[usize]>,
    plan: &'a LayoutPlan,
    renderer: &'a dyn PageRenderer,
    dpi: u32,
) -> Result<Composition<'a>> {
    let order = resolve_page_order(page_count, page_order)?;
    let assignments = plan_sheets(&order, plan.pages_per_sheet());
    Ok(Composition {
        renderer,
        plan,
        assignments,
        dpi,
    })
}

impl<'a> Composition<'a> {
    pub fn sheet_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn assignments(&self) -> &[SheetAssignment] {
        &self.assignments
    }

    /// Iterate the composed sheets from the beginning
    pub fn sheets(&self) -> Sheets<'_, 'a> {
        Sheets {
            composition: self,
            next: 0,
        }
    }

    fn render_sheet(&self, assignment: &SheetAssignment) -> Result<ComposedSheet> {
        let mut canvas = SheetCanvas::new(
            self.plan.sheet_width_pt,
            self.plan.sheet_height_pt,
            self.dpi,
        );
        compose_sheet(assignment, self.plan, self.renderer, self.dpi, &mut canvas)?;

        match canvas.into_sheets().pop() {
            Some(image) => Ok(ComposedSheet {
                sheet_index: assignment.sheet_index,
                image,
                assignment: assignment.clone(),
            }),
            None => Err(NupError::Render(format!(
                "sheet {} was not finalized",
                assignment.sheet_index + 1
            ))),
        }
    }
}

/// Iterator over the sheets of a [`Composition`]
pub struct Sheets<'c, 'a> {
    composition: &'c Composition<'a>,
    next: usize,
}

impl Iterator for Sheets<'_, '_> {
    type Item = Result<ComposedSheet>;

    fn next(&mut self) -> Option<Self::Item> {
        let assignment = self.composition.assignments.get(self.next)?;
        self.next += 1;
        Some(self.composition.render_sheet(assignment))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.composition.assignments.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sheets<'_, '_> {}

impl<'c, 'a> IntoIterator for &'c Composition<'a> {
    type Item = Result<ComposedSheet>;
    type IntoIter = Sheets<'c, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets()
    }
}
