use crate::constants::{DEFAULT_ASPECT_RATIO, DEFAULT_LEFT_CROP, DEFAULT_MIN_OVERLAP};
use crate::pagespec::PageSpec;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of the crop geometry, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GeometryParams {
    /// Target width / height of each output half
    pub aspect_ratio: f32,
    /// Points trimmed from the left margin
    pub left_crop: f32,
    /// Minimum points shared by the top and bottom halves
    pub min_overlap: f32,
    /// Colour of the page-number labels and overlap marker
    pub page_number_color: PageColor,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            left_crop: DEFAULT_LEFT_CROP,
            min_overlap: DEFAULT_MIN_OVERLAP,
            page_number_color: PageColor::default(),
        }
    }
}

/// Complete toasting configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ToastOptions {
    // Page selection
    pub page_spec: PageSpec,

    // Geometry
    pub geometry: GeometryParams,

    // Intermediate files
    pub keep_temp_files: bool,
    /// Directory for the intermediate files; the system temp dir if unset
    pub temp_dir: Option<PathBuf>,
}

impl ToastOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ToastError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ToastError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options.
    ///
    /// Only values that can never produce a page are rejected. Crops or
    /// overlaps too large for a particular page are left to the geometry.
    pub fn validate(&self) -> Result<()> {
        let geometry = &self.geometry;

        if !geometry.aspect_ratio.is_finite() || geometry.aspect_ratio <= 0.0 {
            return Err(ToastError::Config(format!(
                "Aspect ratio must be positive, got {}",
                geometry.aspect_ratio
            )));
        }

        if !geometry.left_crop.is_finite() || geometry.left_crop < 0.0 {
            return Err(ToastError::Config(format!(
                "Left crop must not be negative, got {}",
                geometry.left_crop
            )));
        }

        if !geometry.min_overlap.is_finite() || geometry.min_overlap < 0.0 {
            return Err(ToastError::Config(format!(
                "Minimum overlap must not be negative, got {}",
                geometry.min_overlap
            )));
        }

        Ok(())
    }
}
