//! Source document registration and output naming

use crate::constants::{OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// A registered source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    pub path: PathBuf,
    pub page_count: usize,
}

impl PageSource {
    /// Open `path` and read its page count
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::load(path).map_err(|e| source_error(path, e.into()))?;
        Ok(Self::from_document(path, &document))
    }

    fn from_document(path: &Path, document: &Document) -> Self {
        Self {
            path: path.to_owned(),
            page_count: document.get_pages().len(),
        }
    }

    /// File name without directory or extension
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }

    /// Where the composed result of this source goes inside `output_dir`
    pub fn output_path(&self, output_dir: impl AsRef<Path>) -> PathBuf {
        output_dir.as_ref().join(format!(
            "{}{}.{}",
            self.base_name(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        ))
    }
}

fn source_error(path: &Path, source: NupError) -> NupError {
    NupError::SourceOpen {
        path: path.to_owned(),
        source: Box::new(source),
    }
}

/// Load a single source document
pub async fn load_source(path: impl AsRef<Path>) -> Result<PageSource> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| source_error(&path, e.into()))?;
    tokio::task::spawn_blocking(move || {
        let document = Document::load_mem(&bytes).map_err(|e| source_error(&path, e.into()))?;
        Ok(PageSource::from_document(&path, &document))
    })
    .await?
}

/// Load several source documents; each result is independent of the others
pub async fn load_sources(paths: &[impl AsRef<Path>]) -> Vec<Result<PageSource>> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        sources.push(load_source(path).await);
    }
    sources
}
