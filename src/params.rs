use std::fs;
use std::path::Path;

use opencv::core::Scalar;
use serde::{Deserialize, Serialize};

use crate::error::{HoleError, Result};

/// Tunables of the hole detector. Missing JSON fields fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Brightness cutoff; pixels strictly above it are foreground.
    pub threshold: u8,
    /// A contour larger than `twin_area_ratio * mean_area` counts as two holes.
    /// Single precision, widened only at the comparison: 1.3 becomes 1.2999999523,
    /// so a region at exactly 1.3x the mean is a twin.
    pub twin_area_ratio: f32,
    /// RGB color of boxes and labels.
    pub color: [u8; 3],
    pub stroke_width: i32,
    pub font_scale: f64,
    /// Offset of the first label from the box center.
    pub label_offset: (i32, i32),
    /// Offset of the twin label from the box center.
    pub twin_label_offset: (i32, i32),
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            threshold: 245,
            twin_area_ratio: 1.3,
            color: [255, 0, 0],
            stroke_width: 2,
            font_scale: 1.5,
            label_offset: (20, 0),
            twin_label_offset: (40, 0),
        }
    }
}

impl DetectorParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| HoleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| HoleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Drawing color in the channel order of the working `Mat` (RGB).
    /// Area above which a contour is taken as two merged holes.
    pub fn twin_limit(&self, mean_area: f64) -> f64 {
        f64::from(self.twin_area_ratio) * mean_area
    }

    pub fn scalar_color(&self) -> Scalar {
        let [r, g, b] = self.color;
        Scalar::new(r as f64, g as f64, b as f64, 255.0)
    }
}
