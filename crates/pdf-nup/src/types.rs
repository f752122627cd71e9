use crate::constants::{A4_HEIGHT_CM, A4_WIDTH_CM, LETTER_HEIGHT_CM, LETTER_WIDTH_CM, cm_to_pt};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No documents to process")]
    EmptyBatch,
    #[error("Could not open {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: Box<NupError>,
    },
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Invalid page order: {0}")]
    InvalidPageOrder(String),
    #[error("Failed to compose {document}: {source}")]
    Composition {
        document: String,
        #[source]
        source: Box<NupError>,
    },
    #[error("Render error: {0}")]
    Render(String),
    #[error("Unknown document {0}")]
    UnknownDocument(DocumentId),
    #[error("No pages to lay out")]
    NoPages,
    #[error("Cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "Vertical"))]
    Portrait,
    /// Landscape: width >= height
    #[cfg_attr(feature = "serde", serde(alias = "Horizontal"))]
    Landscape,
}

impl Orientation {
    /// Order a pair of dimensions so the long side follows this orientation
    pub fn apply(self, width: f32, height: f32) -> (f32, f32) {
        let (short, long) = if width <= height {
            (width, height)
        } else {
            (height, width)
        };
        match self {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

/// Output paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Custom { width_cm: f32, height_cm: f32 },
}

impl PaperSize {
    /// Base dimensions in centimetres, as listed (not orientation-adjusted)
    pub fn dimensions_cm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (A4_WIDTH_CM, A4_HEIGHT_CM),
            PaperSize::Letter => (LETTER_WIDTH_CM, LETTER_HEIGHT_CM),
            PaperSize::Custom {
                width_cm,
                height_cm,
            } => (width_cm, height_cm),
        }
    }

    /// Base dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_cm();
        (cm_to_pt(w), cm_to_pt(h))
    }
}

/// Output sheet geometry in points.
///
/// Width and height are normalized on construction so the long side
/// follows `orientation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec {
    pub width_pt: f32,
    pub height_pt: f32,
    pub orientation: Orientation,
    pub spacing_pt: f32,
}

impl SheetSpec {
    pub fn new(width_pt: f32, height_pt: f32, orientation: Orientation, spacing_pt: f32) -> Self {
        let (width_pt, height_pt) = orientation.apply(width_pt, height_pt);
        Self {
            width_pt,
            height_pt,
            orientation,
            spacing_pt,
        }
    }

    /// Build a sheet from a paper preset and a spacing given in centimetres
    pub fn from_paper(paper: PaperSize, orientation: Orientation, spacing_cm: f32) -> Self {
        let (w, h) = paper.dimensions_pt();
        Self::new(w, h, orientation, cm_to_pt(spacing_cm))
    }
}

/// Stable handle to a registered source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Statistics about an N-up run
#[derive(Debug, Clone, PartialEq)]
pub struct NupStatistics {
    /// Pages that will be placed (length of the page order)
    pub source_pages: usize,
    /// Slots per sheet after fallback
    pub pages_per_sheet: usize,
    /// Number of output sheets
    pub output_sheets: usize,
    /// Unused slots on the last sheet
    pub empty_slots: usize,
}
