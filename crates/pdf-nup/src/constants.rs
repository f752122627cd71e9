//! Shared constants for N-up layout
//!
//! Unit conversion factors, paper presets and the default resolutions used
//! when rasterizing source pages.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per centimetre (1 inch = 72 points, 1 inch = 2.54cm)
pub const POINTS_PER_CM: f32 = 72.0 / 2.54; // ≈ 28.34646

/// Points per inch, the PDF user space unit basis
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert centimetres to points
#[inline]
pub fn cm_to_pt(cm: f32) -> f32 {
    cm * POINTS_PER_CM
}

/// Convert points to centimetres
#[inline]
pub fn pt_to_cm(pt: f32) -> f32 {
    pt / POINTS_PER_CM
}

/// Size in pixels of a length in points rendered at `dpi`
#[inline]
pub fn pt_to_px(pt: f32, dpi: u32) -> f32 {
    pt * dpi as f32 / POINTS_PER_INCH
}

// =============================================================================
// Paper Presets (portrait, centimetres)
// =============================================================================

pub const A4_WIDTH_CM: f32 = 21.0;
pub const A4_HEIGHT_CM: f32 = 29.7;

pub const LETTER_WIDTH_CM: f32 = 21.59;
pub const LETTER_HEIGHT_CM: f32 = 27.94;

// =============================================================================
// Defaults
// =============================================================================

/// Default gap between slots and around the sheet edge
pub const DEFAULT_SPACING_CM: f32 = 0.17;

/// Resolution used for final output rasterization
pub const DEFAULT_OUTPUT_DPI: u32 = 150;

/// Resolution used for on-screen sheet previews
pub const DEFAULT_PREVIEW_DPI: u32 = 80;

/// Resolution used for page thumbnails
pub const DEFAULT_THUMBNAIL_DPI: u32 = 50;

/// Thumbnails are downscaled to this width in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 80;

/// Appended to the source base name when naming batch outputs
pub const OUTPUT_SUFFIX: &str = "_editado";

/// Extension of generated documents
pub const OUTPUT_EXTENSION: &str = "pdf";
