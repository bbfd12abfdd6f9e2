pub mod apod;
pub mod cache;
pub mod config;
pub mod desktop;
pub mod fingerprint;
pub mod input;
#[cfg(feature = "cli")]
pub mod logging;
pub mod pipeline;
pub mod storage;

pub use apod::{ApodClient, ApodRecord, ApodSource};
pub use cache::{CachedImage, ImageCache};
pub use config::ApodConfig;
pub use desktop::WallpaperManager;
pub use pipeline::RunSummary;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid input: {0}")]
    Input(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),
    #[error("Failed to save image to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Desktop environment error: {0}")]
    DesktopEnv(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
