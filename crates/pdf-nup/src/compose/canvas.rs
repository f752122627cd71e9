//! In-memory raster sink used for previews

use super::SheetWriter;
use crate::constants::pt_to_px;
use crate::layout::Rect;
use crate::types::Result;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

const PAPER_WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Paints sheets into RGB images at a fixed resolution
pub struct SheetCanvas {
    dpi: u32,
    current: RgbImage,
    finished: Vec<RgbImage>,
}

impl SheetCanvas {
    pub fn new(width_pt: f32, height_pt: f32, dpi: u32) -> Self {
        let width_px = pt_to_px(width_pt, dpi).round().max(1.0) as u32;
        let height_px = pt_to_px(height_pt, dpi).round().max(1.0) as u32;
        Self {
            dpi,
            current: RgbImage::from_pixel(width_px, height_px, PAPER_WHITE),
            finished: Vec::new(),
        }
    }

    /// Sheets finalized so far, oldest first
    pub fn into_sheets(self) -> Vec<RgbImage> {
        self.finished
    }

    fn blank(&self) -> RgbImage {
        RgbImage::from_pixel(self.current.width(), self.current.height(), PAPER_WHITE)
    }
}

impl SheetWriter for SheetCanvas {
    fn place_image(&mut self, image: &RgbImage, rect: Rect) -> Result<()> {
        // Sheet space grows upwards, image rows grow downwards
        let x = pt_to_px(rect.x, self.dpi).round() as i64;
        let y = (self.current.height() as f32 - pt_to_px(rect.top(), self.dpi)).round() as i64;
        let width = pt_to_px(rect.width, self.dpi).round().max(1.0) as u32;
        let height = pt_to_px(rect.height, self.dpi).round().max(1.0) as u32;

        if (width, height) == image.dimensions() {
            imageops::overlay(&mut self.current, image, x, y);
        } else {
            let resized = imageops::resize(image, width, height, FilterType::Triangle);
            imageops::overlay(&mut self.current, &resized, x, y);
        }
        Ok(())
    }

    fn finish_sheet(&mut self) -> Result<()> {
        let blank = self.blank();
        let sheet = std::mem::replace(&mut self.current, blank);
        self.finished.push(sheet);
        Ok(())
    }
}
