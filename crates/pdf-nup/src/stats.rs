use crate::batch::BatchItem;
use crate::layout::sheet_count;
use crate::options::NupOptions;
use crate::order::resolve_page_order;
use crate::types::*;

/// Calculate statistics for composing one document
pub fn calculate_statistics(item: &BatchItem, options: &NupOptions) -> Result<NupStatistics> {
    let order = resolve_page_order(item.source.page_count, item.page_order.as_deref())?;
    let source_pages = order.len();

    if source_pages == 0 {
        return Err(NupError::NoPages);
    }

    // Unsupported counts collapse to a single slot
    let pages_per_sheet = options.layout_plan()?.pages_per_sheet();
    let output_sheets = sheet_count(source_pages, pages_per_sheet);
    let empty_slots = output_sheets * pages_per_sheet - source_pages;

    Ok(NupStatistics {
        source_pages,
        pages_per_sheet,
        output_sheets,
        empty_slots,
    })
}
