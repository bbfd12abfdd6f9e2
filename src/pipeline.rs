//! resolve → fetch → fingerprint → cache → set background.

use crate::apod::ApodSource;
use crate::cache::{CachedImage, ImageCache};
use crate::config::DATABASE_FILE_NAME;
use crate::desktop::WallpaperManager;
use crate::fingerprint::{digest_of, size_of};
use crate::storage::{compute_image_path, write_image};
use crate::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// What a run fetched and where the wallpaper now points.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub url: String,
    pub image: CachedImage,
    /// `false` when the image content was already in the cache.
    pub newly_cached: bool,
}

/// Fetches the APOD for `date`, caches it under `cache_dir` unless an image
/// with the same digest is already indexed, and sets it as the wallpaper.
pub async fn run(
    source: &dyn ApodSource,
    wallpaper: &dyn WallpaperManager,
    cache_dir: &Path,
    date: NaiveDate,
) -> Result<RunSummary> {
    let cache = ImageCache::open(&cache_dir.join(DATABASE_FILE_NAME))?;

    let record = source.fetch_metadata(date).await?;
    let url = record.image_url()?.to_string();
    let title = record.image_title();
    let image_path = compute_image_path(cache_dir, title, &url);

    let bytes = source.download(&url).await?;
    let size = size_of(&bytes);
    let digest = digest_of(&bytes);
    debug!("Fetched {} bytes with SHA-256 {}", size, digest);

    let (image, newly_cached) = match cache.find(&digest)? {
        Some(mut existing) => {
            info!("Image {} is already cached at {}", digest, existing.path.display());
            if !existing.path.exists() {
                // Rows are never rewritten; the file is restored inside the
                // current cache directory and the run reports that location.
                warn!(
                    "Cached file {} is missing, using {}",
                    existing.path.display(),
                    image_path.display()
                );
                if !holds_content(&image_path, &digest) {
                    write_image(&bytes, &image_path)?;
                }
                existing.path = image_path;
            }
            (existing, false)
        }
        None => {
            let image = CachedImage {
                title: title.to_string(),
                path: image_path,
                size,
                digest,
            };
            write_image(&bytes, &image.path)?;
            cache.insert(&image)?;
            info!("Cached new image {}", image.path.display());
            (image, true)
        }
    };
    debug!("Image cache holds {} images", cache.len()?);

    info!("Setting {} wallpaper", wallpaper.name());
    wallpaper.set_wallpaper(&image.path)?;

    Ok(RunSummary {
        date,
        url,
        image,
        newly_cached,
    })
}

fn holds_content(path: &Path, digest: &str) -> bool {
    fs::read(path).is_ok_and(|bytes| digest_of(&bytes) == digest)
}
