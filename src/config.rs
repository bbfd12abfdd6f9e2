use crate::{Error, Result};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://api.nasa.gov/planetary/apod";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DATABASE_FILE_NAME: &str = "apod_images.db";

const API_KEY_VAR: &str = "NASA_API_KEY";
const API_URL_VAR: &str = "APOD_API_URL";

/// Runtime settings for talking to the APOD service.
#[derive(Debug, Clone)]
pub struct ApodConfig {
    pub api_key: String,
    pub api_url: Url,
}

impl ApodConfig {
    /// Reads `NASA_API_KEY` and `APOD_API_URL`, falling back to the defaults
    /// when a variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR).unwrap_or_else(|| DEFAULT_API_KEY.to_string());
        let api_url = match non_empty(API_URL_VAR) {
            Some(raw) => parse_api_url(raw.trim())?,
            None => parse_api_url(DEFAULT_API_URL)?,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            api_url,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("{} is not a valid URL ({}): {}", API_URL_VAR, e, raw)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config(format!(
            "{} must use http or https, got {}",
            API_URL_VAR, scheme
        ))),
    }
}
