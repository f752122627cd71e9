use crate::constants::*;
use crate::layout::LayoutPlan;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// N-up configuration shared by preview and final output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NupOptions {
    // Sheet
    pub paper: PaperSize,
    pub orientation: Orientation,

    // Tiling
    pub pages_per_sheet: usize,
    pub spacing_cm: f32,

    // Rasterization
    pub output_dpi: u32,
    pub preview_dpi: u32,

    // Output
    pub output_dir: Option<PathBuf>,
}

impl Default for NupOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
            pages_per_sheet: 1,
            spacing_cm: DEFAULT_SPACING_CM,
            output_dpi: DEFAULT_OUTPUT_DPI,
            preview_dpi: DEFAULT_PREVIEW_DPI,
            output_dir: None,
        }
    }
}

impl NupOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.pages_per_sheet == 0 {
            return Err(NupError::Config(
                "Pages per sheet must be at least 1".to_string(),
            ));
        }

        if !self.spacing_cm.is_finite() || self.spacing_cm < 0.0 {
            return Err(NupError::Config(format!(
                "Spacing must be a non-negative length, got {}cm",
                self.spacing_cm
            )));
        }

        if self.output_dpi == 0 || self.preview_dpi == 0 {
            return Err(NupError::Config("DPI must be greater than zero".to_string()));
        }

        if let PaperSize::Custom {
            width_cm,
            height_cm,
        } = self.paper
        {
            let valid = |v: f32| v.is_finite() && v > 0.0;
            if !valid(width_cm) || !valid(height_cm) {
                return Err(NupError::Config(format!(
                    "Custom paper size must be positive, got {}x{}cm",
                    width_cm, height_cm
                )));
            }
        }

        Ok(())
    }

    /// Sheet geometry in points, orientation applied
    pub fn sheet_spec(&self) -> SheetSpec {
        SheetSpec::from_paper(self.paper, self.orientation, self.spacing_cm)
    }

    /// Slot geometry for these options
    pub fn layout_plan(&self) -> Result<LayoutPlan> {
        self.validate()?;
        LayoutPlan::new(&self.sheet_spec(), self.pages_per_sheet)
    }
}
