//! Configuration loading for the rain checker.
//!
//! Loose YAML shapes are validated here, at the load boundary, into the
//! strongly-typed records the estimation core consumes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use radar_common::{GeoPoint, ImageGeometry, Station};

/// Root configuration (config.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    pub fileapi: FileApiConfig,
}

/// CWA file-API settings and the radar dataset list.
#[derive(Debug, Clone, Deserialize)]
pub struct FileApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Open-data API key; may stay empty when CWA_API_KEY is set
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory radar PNGs are downloaded into
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    #[serde(default = "default_save_csv")]
    pub save_csv: bool,

    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Image geometry shared by the single-site products
    #[serde(default)]
    pub image: ImageDefaults,

    pub datasets: Vec<DatasetConfig>,
}

fn default_base_url() -> String {
    "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("radar_png")
}

fn default_save_csv() -> bool {
    true
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("radar_links.csv")
}

/// Default geometry of the rendered single-site products.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImageDefaults {
    pub width: u32,
    pub height: u32,
    pub scale_px_per_km: f64,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            width: 3600,
            height: 3600,
            scale_px_per_km: 11.97,
        }
    }
}

/// One radar dataset entry; geometry fields override the shared
/// defaults per station.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub scale_px_per_km: Option<f64>,
    /// Calibrated principal point; defaults to the image center
    #[serde(default)]
    pub center: Option<(f64, f64)>,
}

impl CheckerConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.as_ref().display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.as_ref().display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let fileapi = &self.fileapi;
        if fileapi.datasets.is_empty() {
            bail!("fileapi.datasets must list at least one radar dataset");
        }

        let mut seen = HashSet::new();
        for dataset in &fileapi.datasets {
            if !seen.insert(dataset.id.as_str()) {
                bail!("duplicate dataset id: {}", dataset.id);
            }
            GeoPoint::new(dataset.lat, dataset.lon)
                .with_context(|| format!("dataset {}", dataset.id))?;

            let scale = dataset
                .scale_px_per_km
                .unwrap_or(fileapi.image.scale_px_per_km);
            if scale <= 0.0 {
                bail!("dataset {}: scale_px_per_km must be positive", dataset.id);
            }
            let width = dataset.width.unwrap_or(fileapi.image.width);
            let height = dataset.height.unwrap_or(fileapi.image.height);
            if width == 0 || height == 0 {
                bail!("dataset {}: image dimensions must be positive", dataset.id);
            }
        }
        Ok(())
    }

    /// Validated station records for the estimation core.
    pub fn stations(&self) -> Result<Vec<Station>> {
        let fileapi = &self.fileapi;
        fileapi
            .datasets
            .iter()
            .map(|dataset| {
                let location = GeoPoint::new(dataset.lat, dataset.lon)
                    .with_context(|| format!("dataset {}", dataset.id))?;
                let mut geometry = ImageGeometry::new(
                    dataset.width.unwrap_or(fileapi.image.width),
                    dataset.height.unwrap_or(fileapi.image.height),
                    dataset
                        .scale_px_per_km
                        .unwrap_or(fileapi.image.scale_px_per_km),
                );
                geometry.center = dataset.center;

                Ok(Station {
                    id: dataset.id.clone(),
                    name: dataset.name.clone(),
                    location,
                    geometry,
                })
            })
            .collect()
    }
}
