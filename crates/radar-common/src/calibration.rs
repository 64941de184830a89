//! Color-to-reflectivity calibration table.
//!
//! The radar image legend maps reflectivity (dBZ) to colors; this table
//! is the reverse direction, loaded once from YAML and passed by
//! reference to the estimation core.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// One row of the color scale: a reflectivity value and the RGB color
/// the image uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationEntry {
    pub dbz: i32,
    pub rgb: [u8; 3],
}

/// Immutable, ordered calibration table.
#[derive(Debug, Clone)]
pub struct CalibrationTable {
    entries: Vec<CalibrationEntry>,
}

/// On-disk YAML shape: a single `rain_intensity_scale` list.
#[derive(Debug, Deserialize)]
struct ScaleFile {
    rain_intensity_scale: Vec<CalibrationEntry>,
}

impl CalibrationTable {
    /// Build a table from entries, rejecting an empty list.
    pub fn new(entries: Vec<CalibrationEntry>) -> RadarResult<Self> {
        if entries.is_empty() {
            return Err(RadarError::EmptyCalibrationTable);
        }
        Ok(Self { entries })
    }

    /// Load and validate a table from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> RadarResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RadarError::Calibration(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a table from a YAML string.
    pub fn from_yaml(yaml: &str) -> RadarResult<Self> {
        let file: ScaleFile =
            serde_yaml::from_str(yaml).map_err(|e| RadarError::Calibration(e.to_string()))?;
        Self::new(file.rain_intensity_scale)
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[CalibrationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
