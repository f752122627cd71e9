use std::path::PathBuf;

mod thumbnails;
mod worker;

// Re-export types from the library crate
pub use pdf_nup::{BatchProgress, ComposedSheet, DocumentId, NupOptions, NupStatistics};
pub use thumbnails::{ThumbnailTask, ThumbnailUpdate, spawn_thumbnails};
pub use worker::worker_task;

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum NupCommand {
    RegisterDocuments {
        paths: Vec<PathBuf>,
    },
    RemoveDocument {
        doc_id: DocumentId,
    },
    SetPageOrder {
        doc_id: DocumentId,
        order: Vec<usize>,
    },
    /// Drag-and-drop reorder: the page at `from` ends up at `to`
    MovePage {
        doc_id: DocumentId,
        from: usize,
        to: usize,
    },
    ResetPageOrder {
        doc_id: DocumentId,
    },
    GeneratePreview {
        doc_id: DocumentId,
        options: NupOptions,
        max_sheets: Option<usize>,
    },
    CalculateStats {
        doc_id: DocumentId,
        options: NupOptions,
    },
    /// Compose every registered document into `output_dir`
    Generate {
        options: NupOptions,
        output_dir: PathBuf,
    },
    LoadConfig {
        path: PathBuf,
    },
    SaveConfig {
        path: PathBuf,
        options: NupOptions,
    },
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum NupUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
        percent: u8,
    },
    DocumentRegistered {
        doc_id: DocumentId,
        path: PathBuf,
        page_count: usize,
    },
    DocumentRemoved {
        doc_id: DocumentId,
    },
    PageOrderChanged {
        doc_id: DocumentId,
        order: Vec<usize>,
    },
    PreviewGenerated {
        doc_id: DocumentId,
        sheets: Vec<ComposedSheet>,
    },
    StatsCalculated {
        doc_id: DocumentId,
        stats: NupStatistics,
    },
    GenerateComplete {
        outputs: Vec<PathBuf>,
        sheets: usize,
    },
    ConfigLoaded {
        options: NupOptions,
    },
    ConfigSaved {
        path: PathBuf,
    },
    Cancelled,
    Error {
        message: String,
    },
}
