//! CWA open-data retrieval for single-site radar products.
//!
//! Each dataset's JSON envelope points at the latest rendered PNG.
//! Calls are single-attempt; retry policy belongs to the caller's
//! scheduler, not here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::config::FileApiConfig;

/// Link to the latest rendered product of one dataset.
#[derive(Debug, Clone)]
pub struct ProductLink {
    pub dataset: String,
    pub observed_at: Option<String>,
    pub image_url: String,
    pub local_path: Option<PathBuf>,
}

/// Thin client over the CWA file API.
pub struct FileApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FileApiClient {
    pub fn new(config: &FileApiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetch a dataset's JSON envelope and extract its product link.
    pub async fn latest_product(&self, dataset: &str) -> Result<ProductLink> {
        let url = format!("{}/{}", self.base_url, dataset);
        debug!(%url, "fetching product envelope");

        let body: Value = self
            .client
            .get(&url)
            .query(&[
                ("Authorization", self.api_key.as_str()),
                ("downloadType", "WEB"),
                ("format", "JSON"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("decoding envelope for {dataset}"))?;

        parse_product(dataset, &body)
    }

    /// Download the product image to `image_dir/<dataset>.png`.
    pub async fn download_image(&self, link: &ProductLink, image_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(image_dir)
            .await
            .with_context(|| format!("creating {}", image_dir.display()))?;
        let path = image_dir.join(format!("{}.png", link.dataset));

        let bytes = self
            .client
            .get(&link.image_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await
            .with_context(|| format!("downloading {}", link.image_url))?;
        fs::write(&path, &bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        info!(
            dataset = %link.dataset,
            path = %path.display(),
            bytes = bytes.len(),
            "radar image downloaded"
        );
        Ok(path)
    }
}

/// Extract `cwaopendata.dataset.resource.ProductURL` and the product
/// time, tolerating the alternate key spellings the API has used.
fn parse_product(dataset: &str, body: &Value) -> Result<ProductLink> {
    let envelope = &body["cwaopendata"];
    let dataset_node = &envelope["dataset"];
    let resource = &dataset_node["resource"];

    let image_url = ["ProductURL", "resourceURI", "resource_url"]
        .iter()
        .find_map(|key| resource.get(*key).and_then(Value::as_str))
        .ok_or_else(|| anyhow!("no product URL in envelope for {dataset}"))?
        .to_string();

    let observed_at = dataset_node
        .get("DateTime")
        .and_then(Value::as_str)
        .or_else(|| envelope.get("sent").and_then(Value::as_str))
        .map(str::to_string);

    Ok(ProductLink {
        dataset: dataset.to_string(),
        observed_at,
        image_url,
        local_path: None,
    })
}

/// Write the one-row-per-dataset link log.
pub fn write_links_csv(path: &Path, links: &[ProductLink]) -> Result<()> {
    let mut out = String::from("dataset,obs_time,image_url,local_path\n");
    for link in links {
        let local = link
            .local_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{}\n",
            link.dataset,
            link.observed_at.as_deref().unwrap_or(""),
            link.image_url,
            local,
        ));
    }
    std::fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_product_envelope() {
        let body = json!({
            "cwaopendata": {
                "sent": "2024-06-01T02:05:00+08:00",
                "dataset": {
                    "DateTime": "2024-06-01T02:00:00+08:00",
                    "resource": {
                        "ProductURL": "https://example.test/O-A0084-001.png",
                        "resourceDesc": "single-site radar"
                    }
                }
            }
        });

        let link = parse_product("O-A0084-001", &body).unwrap();
        assert_eq!(link.image_url, "https://example.test/O-A0084-001.png");
        assert_eq!(
            link.observed_at.as_deref(),
            Some("2024-06-01T02:00:00+08:00")
        );
        assert!(link.local_path.is_none());
    }

    #[test]
    fn test_parse_product_alternate_keys() {
        let body = json!({
            "cwaopendata": {
                "sent": "2024-06-01T02:05:00+08:00",
                "dataset": {
                    "resource": { "resourceURI": "https://example.test/alt.png" }
                }
            }
        });

        let link = parse_product("O-A0084-002", &body).unwrap();
        assert_eq!(link.image_url, "https://example.test/alt.png");
        // Falls back to the envelope timestamp
        assert_eq!(
            link.observed_at.as_deref(),
            Some("2024-06-01T02:05:00+08:00")
        );
    }

    #[test]
    fn test_parse_product_missing_url() {
        let body = json!({ "cwaopendata": { "dataset": { "resource": {} } } });
        assert!(parse_product("O-A0084-003", &body).is_err());
    }

    #[test]
    fn test_links_csv_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");

        let links = vec![ProductLink {
            dataset: "O-A0084-001".to_string(),
            observed_at: Some("2024-06-01T02:00:00+08:00".to_string()),
            image_url: "https://example.test/a.png".to_string(),
            local_path: Some(PathBuf::from("radar_png/O-A0084-001.png")),
        }];
        write_links_csv(&path, &links).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("dataset,obs_time,image_url,local_path"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("O-A0084-001,2024-06-01T02:00:00+08:00,"));
        assert!(row.ends_with("radar_png/O-A0084-001.png"));
    }
}
