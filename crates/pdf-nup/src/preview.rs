use crate::batch::BatchItem;
use crate::compose::{ComposedSheet, compose};
use crate::options::NupOptions;
use crate::render::RenderBackend;
use crate::types::*;

/// Compose preview sheets for one document at the preview resolution.
///
/// At most `max_sheets` sheets are rendered when a limit is given.
pub fn preview_sheets(
    item: &BatchItem,
    options: &NupOptions,
    backend: &dyn RenderBackend,
    max_sheets: Option<usize>,
) -> Result<Vec<ComposedSheet>> {
    let plan = options.layout_plan()?;
    let renderer = backend.open_source(&item.source)?;
    let composition = compose(
        item.source.page_count,
        item.page_order.as_deref(),
        &plan,
        &*renderer,
        options.preview_dpi,
    )?;

    composition
        .sheets()
        .take(max_sheets.unwrap_or(usize::MAX))
        .collect()
}

/// Generate a preview off the async executor
pub async fn generate_preview<B, F>(
    item: BatchItem,
    options: NupOptions,
    make_backend: F,
    max_sheets: Option<usize>,
) -> Result<Vec<ComposedSheet>>
where
    B: RenderBackend,
    F: FnOnce() -> Result<B> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let backend = make_backend()?;
        preview_sheets(&item, &options, &backend, max_sheets)
    })
    .await?
}
