//! Point rainfall check against CWA single-site radar imagery.
//!
//! Fetches the latest rendered radar image for each configured station,
//! picks the station nearest the query point, samples the pixel the
//! point maps to, and reports the estimated rain intensity as JSON.

mod config;
mod fetch;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use estimator::RainEstimator;
use radar_common::{CalibrationTable, GeoPoint};

use config::CheckerConfig;
use fetch::{write_links_csv, FileApiClient};

#[derive(Parser, Debug)]
#[command(name = "rain-check")]
#[command(about = "Point rainfall check against single-site radar imagery")]
struct Args {
    /// Query latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Query longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Configuration file
    #[arg(short, long, default_value = "config/checker.yaml")]
    config: PathBuf,

    /// Color-to-dBZ calibration table
    #[arg(long, default_value = "config/rain_intensity_scale.yaml")]
    calibration: PathBuf,

    /// Use already-downloaded images instead of fetching
    #[arg(long)]
    offline: bool,

    /// CWA open-data API key
    #[arg(long, env = "CWA_API_KEY")]
    api_key: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level: Level = args.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    let point = GeoPoint::new(args.lat, args.lon).context("query point")?;
    let config = CheckerConfig::load(&args.config)?;
    let stations = config.stations()?;
    let calibration =
        CalibrationTable::from_file(&args.calibration).context("loading calibration table")?;
    info!(
        stations = stations.len(),
        colors = calibration.len(),
        "configuration loaded"
    );

    let fileapi = &config.fileapi;
    if !args.offline {
        let api_key = args
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| fileapi.api_key.clone());
        if api_key.is_empty() {
            bail!("no API key: set CWA_API_KEY, pass --api-key, or set fileapi.api_key");
        }

        let client = FileApiClient::new(fileapi, api_key)?;
        let mut links = Vec::new();
        for dataset in &fileapi.datasets {
            let mut link = client
                .latest_product(&dataset.id)
                .await
                .with_context(|| format!("fetching {}", dataset.id))?;
            let path = client.download_image(&link, &fileapi.image_dir).await?;
            link.local_path = Some(path);
            links.push(link);
        }
        if fileapi.save_csv {
            write_links_csv(&fileapi.csv_path, &links)?;
            info!(path = %fileapi.csv_path.display(), "link log written");
        }
    }

    let mut estimator = RainEstimator::new(&stations, &calibration);
    let (station, distance_km) = estimator.nearest_station(point)?;
    info!(station = %station.id, name = %station.name, distance_km, "nearest station");

    let image_path = fileapi.image_dir.join(format!("{}.png", station.id));
    if !image_path.exists() {
        bail!(
            "radar image not found: {} (run without --offline to fetch)",
            image_path.display()
        );
    }
    let image = image::open(&image_path)
        .with_context(|| format!("decoding {}", image_path.display()))?
        .to_rgb8();

    let estimate = estimator.estimate(point, &image)?;
    println!("{}", serde_json::to_string_pretty(&estimate)?);

    Ok(())
}
