use crate::config::ApodConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

/// Metadata the APOD service returns for a single day.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodRecord {
    #[serde(default)]
    pub date: Option<String>,
    pub title: String,
    pub media_type: String,
    #[serde(rename = "hdurl", default)]
    pub hd_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl ApodRecord {
    /// URL of the picture to use as wallpaper: the HD image for image entries
    /// and the thumbnail for video entries.
    pub fn image_url(&self) -> Result<&str> {
        let url = match self.media_type.as_str() {
            "image" => self.hd_url.as_deref().or(self.url.as_deref()),
            "video" => self.thumbnail_url.as_deref(),
            other => return Err(Error::UnsupportedMedia(other.to_string())),
        };

        url.filter(|u| !u.trim().is_empty()).ok_or_else(|| {
            Error::Api(format!(
                "APOD entry \"{}\" ({}) has no image URL",
                self.title, self.media_type
            ))
        })
    }

    pub fn image_title(&self) -> &str {
        &self.title
    }
}

/// Remote side of the pipeline: APOD metadata lookups and raw downloads.
#[async_trait]
pub trait ApodSource: Send + Sync {
    async fn fetch_metadata(&self, date: NaiveDate) -> Result<ApodRecord>;
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct ApodClient {
    client: Client,
    config: ApodConfig,
}

impl ApodClient {
    pub fn new(config: ApodConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ApodConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ApodSource for ApodClient {
    async fn fetch_metadata(&self, date: NaiveDate) -> Result<ApodRecord> {
        info!("Getting APOD information from NASA for {}", date);

        let formatted_date = date.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(self.config.api_url.clone())
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("date", formatted_date.as_str()),
                ("thumbs", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(if status == StatusCode::FORBIDDEN {
                Error::Api("API rate limit exceeded or invalid API key".to_string())
            } else {
                Error::Api(format!("Failed to fetch APOD data: HTTP {}", status))
            });
        }

        let record: ApodRecord = response.json().await?;
        debug!(
            "APOD for {}: \"{}\" ({})",
            formatted_date, record.title, record.media_type
        );
        Ok(record)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        info!("Downloading APOD image from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to download image: HTTP {}",
                status
            )));
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
