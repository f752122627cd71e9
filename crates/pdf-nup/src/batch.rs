//! Batch generation
//!
//! Documents are processed one at a time, start to finish. Progress is
//! reported after each completed document. The first failing document
//! aborts the rest of the batch; outputs already written stay in place.

use crate::compose::write_document;
use crate::layout::LayoutPlan;
use crate::options::NupOptions;
use crate::render::RenderBackend;
use crate::source::PageSource;
use crate::types::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// One document to compose, with its optional page order
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub source: PageSource,
    pub page_order: Option<Vec<usize>>,
}

impl BatchItem {
    pub fn new(source: PageSource) -> Self {
        Self {
            source,
            page_order: None,
        }
    }

    pub fn with_page_order(mut self, order: Vec<usize>) -> Self {
        self.page_order = Some(order);
        self
    }
}

/// Progress after a document finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    /// `completed / total` on a 0-100 scale, rounded down
    pub percent: u8,
}

impl BatchProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            (completed * 100 / total).min(100) as u8
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// What a finished batch produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub outputs: Vec<PathBuf>,
    pub sheets: usize,
}

/// A set of documents composed with the same options into one folder
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub items: Vec<BatchItem>,
    pub options: NupOptions,
    pub output_dir: PathBuf,
}

impl BatchJob {
    pub fn new(
        items: Vec<BatchItem>,
        options: NupOptions,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            items,
            options,
            output_dir: output_dir.into(),
        }
    }

    /// Run the batch on the current thread.
    ///
    /// Sources whose outputs would share a file name are rejected with
    /// [`NupError::Config`] before anything is written. `cancel` is checked
    /// before each document; setting it stops the batch with
    /// [`NupError::Cancelled`] once the current document is done.
    pub fn run(
        &self,
        backend: &dyn RenderBackend,
        cancel: &AtomicBool,
        mut on_progress: impl FnMut(BatchProgress),
    ) -> Result<BatchSummary> {
        if self.items.is_empty() {
            return Err(NupError::EmptyBatch);
        }

        let plan = self.options.layout_plan()?;
        self.check_output_names()?;
        std::fs::create_dir_all(&self.output_dir)?;

        let total = self.items.len();
        let mut summary = BatchSummary::default();

        for (index, item) in self.items.iter().enumerate() {
            if cancel.load(Ordering::SeqCst) {
                log::info!("Batch cancelled after {} of {} documents", index, total);
                return Err(NupError::Cancelled);
            }

            let output = item.source.output_path(&self.output_dir);
            let sheets = compose_item(item, &plan, backend, self.options.output_dpi, &output)
                .map_err(|e| NupError::Composition {
                    document: item.source.path.display().to_string(),
                    source: Box::new(e),
                })?;

            log::info!(
                "Wrote {} ({} pages on {} sheets)",
                output.display(),
                item.source.page_count,
                sheets
            );
            summary.outputs.push(output);
            summary.sheets += sheets;
            on_progress(BatchProgress::new(index + 1, total));
        }

        Ok(summary)
    }

    /// Every source must map to its own output file
    fn check_output_names(&self) -> Result<()> {
        let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
        for item in &self.items {
            let output = item.source.output_path(&self.output_dir);
            if let Some(previous) = seen.insert(output.clone(), item.source.path.as_path()) {
                return Err(NupError::Config(format!(
                    "{} and {} would both be written to {}",
                    previous.display(),
                    item.source.path.display(),
                    output.display()
                )));
            }
        }
        Ok(())
    }
}

fn compose_item(
    item: &BatchItem,
    plan: &LayoutPlan,
    backend: &dyn RenderBackend,
    dpi: u32,
    output: &Path,
) -> Result<usize> {
    let renderer = backend.open_source(&item.source)?;
    write_document(
        item.source.page_count,
        item.page_order.as_deref(),
        plan,
        &*renderer,
        dpi,
        output,
    )
}

/// Run a batch off the async executor.
///
/// The backend is created on the blocking thread by `make_backend`, so it
/// does not need to be `Send`. Progress is forwarded to `progress` if given.
pub async fn generate_batch<B, F>(
    job: BatchJob,
    make_backend: F,
    progress: Option<mpsc::UnboundedSender<BatchProgress>>,
    cancel: Arc<AtomicBool>,
) -> Result<BatchSummary>
where
    B: RenderBackend,
    F: FnOnce() -> Result<B> + Send + 'static,
{
    if job.items.is_empty() {
        return Err(NupError::EmptyBatch);
    }

    tokio::task::spawn_blocking(move || {
        let backend = make_backend()?;
        job.run(&backend, &cancel, |update| {
            if let Some(tx) = &progress {
                let _ = tx.send(update);
            }
        })
    })
    .await?
}
