//! Reflectivity to rain-intensity classification.

use std::fmt;

use serde::Serialize;

/// Rain rate band in mm/hr. `high: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RainRange {
    pub low: f64,
    pub high: Option<f64>,
}

impl RainRange {
    const fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high: Some(high),
        }
    }

    const fn open(low: f64) -> Self {
        Self { low, high: None }
    }
}

/// Ordered rain-intensity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntensityCategory {
    None,
    AlmostNone,
    Light,
    Moderate,
    Heavy,
    Torrential,
    Extreme,
}

impl IntensityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IntensityCategory::None => "none",
            IntensityCategory::AlmostNone => "almost none",
            IntensityCategory::Light => "light",
            IntensityCategory::Moderate => "moderate",
            IntensityCategory::Heavy => "heavy",
            IntensityCategory::Torrential => "torrential",
            IntensityCategory::Extreme => "extreme",
        }
    }
}

impl fmt::Display for IntensityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a reflectivity value into its intensity category and rain
/// rate band.
///
/// Half-open ladder evaluated from the lowest boundary upward; the
/// first matching band wins, so boundary values belong to the upper
/// band (20 dBZ is light, not almost-none) and 0 dBZ exactly is none.
/// Total over all integers.
pub fn classify(dbz: i32) -> (IntensityCategory, RainRange) {
    match dbz {
        d if d <= 0 => (IntensityCategory::None, RainRange::new(0.0, 0.0)),
        d if d < 20 => (IntensityCategory::AlmostNone, RainRange::new(0.0, 0.1)),
        d if d < 30 => (IntensityCategory::Light, RainRange::new(0.1, 2.5)),
        d if d < 40 => (IntensityCategory::Moderate, RainRange::new(2.5, 10.0)),
        d if d < 50 => (IntensityCategory::Heavy, RainRange::new(10.0, 50.0)),
        d if d < 60 => (IntensityCategory::Torrential, RainRange::new(50.0, 100.0)),
        _ => (IntensityCategory::Extreme, RainRange::open(100.0)),
    }
}
