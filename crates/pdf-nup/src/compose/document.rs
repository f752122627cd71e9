//! Persisted multi-page output

use super::{PdfSheetWriter, SheetWriter, compose_sheet};
use crate::layout::{LayoutPlan, plan_sheets};
use crate::order::resolve_page_order;
use crate::render::PageRenderer;
use crate::types::*;
use std::path::Path;

/// Compose every sheet of `page_order` into `writer`, returning the sheet count
pub fn compose_into<W: SheetWriter + ?Sized>(
    page_order: &[usize],
    plan: &LayoutPlan,
    renderer: &dyn PageRenderer,
    dpi: u32,
    writer: &mut W,
) -> Result<usize> {
    let sheets = plan_sheets(page_order, plan.pages_per_sheet());
    for sheet in &sheets {
        compose_sheet(sheet, plan, renderer, dpi, writer)?;
    }
    Ok(sheets.len())
}

/// Compose a document and write it as a PDF at `path`.
///
/// Nothing is written unless every sheet composes; a document without
/// pages is rejected with [`NupError::NoPages`].
pub fn write_document(
    page_count: usize,
    page_order: Option<&[usize]>,
    plan: &LayoutPlan,
    renderer: &dyn PageRenderer,
    dpi: u32,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let order = resolve_page_order(page_count, page_order)?;
    if order.is_empty() {
        return Err(NupError::NoPages);
    }

    let mut writer = PdfSheetWriter::new(plan.sheet_width_pt, plan.sheet_height_pt);
    let sheets = compose_into(&order, plan, renderer, dpi, &mut writer)?;
    writer.save(path)?;
    Ok(sheets)
}
