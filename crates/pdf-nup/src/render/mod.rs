//! Page rasterization
//!
//! The compositor never rasterizes pages itself. It asks a [`PageRenderer`]
//! for an image of each page at a given resolution; a [`RenderBackend`]
//! opens source files into renderers.

#[cfg(feature = "pdfium")]
mod pdfium;

#[cfg(feature = "pdfium")]
pub use pdfium::{PdfiumBackend, init_pdfium};

use crate::source::PageSource;
use crate::types::{NupError, Result};
use image::RgbImage;
use std::path::Path;

/// Rasterizes the pages of one opened document
pub trait PageRenderer {
    /// Number of pages the renderer can produce
    fn page_count(&self) -> usize;

    /// Render `page_index` at `dpi` dots per inch
    fn render(&self, page_index: usize, dpi: u32) -> Result<RgbImage>;
}

/// Opens source documents for rendering
pub trait RenderBackend {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageRenderer + 'a>>;

    /// Open a registered source, failing if the file now has fewer pages
    /// than were counted at registration
    fn open_source<'a>(&'a self, source: &PageSource) -> Result<Box<dyn PageRenderer + 'a>> {
        let renderer = self.open(&source.path)?;
        if renderer.page_count() < source.page_count {
            return Err(NupError::Render(format!(
                "{} has {} pages, expected {}",
                source.path.display(),
                renderer.page_count(),
                source.page_count
            )));
        }
        Ok(renderer)
    }
}
