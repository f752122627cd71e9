//! Rasterization through pdfium

use super::{PageRenderer, RenderBackend};
use crate::constants::POINTS_PER_INCH;
use crate::types::{NupError, Result};
use image::{DynamicImage, RgbImage, RgbaImage};
use pdfium_render::prelude::*;
use std::path::Path;

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

fn render_error(e: PdfiumError) -> NupError {
    NupError::Render(e.to_string())
}

/// Backend that opens PDF files with pdfium
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    pub fn new() -> Result<Self> {
        let pdfium = init_pdfium().map_err(render_error)?;
        Ok(Self { pdfium })
    }
}

impl RenderBackend for PdfiumBackend {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageRenderer + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(render_error)?;
        Ok(Box::new(PdfiumPageRenderer { document }))
    }
}

struct PdfiumPageRenderer<'a> {
    document: PdfDocument<'a>,
}

impl PageRenderer for PdfiumPageRenderer<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render(&self, page_index: usize, dpi: u32) -> Result<RgbImage> {
        let index = u16::try_from(page_index)
            .map_err(|_| NupError::Render(format!("page index {page_index} out of range")))?;
        let page = self.document.pages().get(index).map_err(render_error)?;

        let config =
            PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);
        let bitmap = page.render_with_config(&config).map_err(render_error)?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
            .ok_or_else(|| {
                NupError::Render(format!("page {page_index} produced a truncated bitmap"))
            })?;

        Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }
}
