//! Naming and writing of image files inside the cache directory.
//!
//! Two titles that sanitize to the same name share a file on disk: the later
//! download overwrites the earlier one while both rows stay in the cache.

use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_EXTENSION: &str = "jpg";
const FALLBACK_FILE_STEM: &str = "apod";

/// Path at which the image for `title` downloaded from `url` is stored.
pub fn compute_image_path(cache_dir: &Path, title: &str, url: &str) -> PathBuf {
    let file_name = format!("{}.{}", file_stem(title), extension_of(url));
    cache_dir.join(file_name)
}

/// Trims the title, turns spaces into underscores and drops every character
/// that is not alphanumeric or `_`.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem
    }
}

/// Extension of the last path segment of `url`, ignoring query and fragment.
fn extension_of(url: &str) -> String {
    let without_suffix = url.split(['?', '#']).next().unwrap_or_default();
    let segment = without_suffix.rsplit('/').next().unwrap_or_default();

    match segment.rsplit_once('.') {
        Some((name, ext))
            if !name.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_string()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Writes all of `bytes` to `path`, replacing any existing file.
pub fn write_image(bytes: &[u8], path: &Path) -> Result<()> {
    info!("Saving image file to {}", path.display());

    let save = |path: &Path| -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.sync_all()
    };

    save(path).map_err(|source| Error::Save {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn path_from_title_and_url() {
        let path = compute_image_path(Path::new("/cache"), "My Pic!!", "https://x/y/pic.jpg");
        assert_eq!(path, PathBuf::from("/cache/My_Pic.jpg"));
    }

    #[test]
    fn title_is_trimmed_and_punctuation_dropped() {
        let path = compute_image_path(
            Path::new("/cache"),
            "  NGC 1300: A Barred-Spiral Galaxy  ",
            "https://apod.nasa.gov/apod/image/2401/ngc1300.png",
        );
        assert_eq!(path, PathBuf::from("/cache/NGC_1300_A_BarredSpiral_Galaxy.png"));
    }

    #[test]
    fn non_ascii_letters_are_kept() {
        let path = compute_image_path(Path::new("/cache"), "Comète Hale–Bopp", "https://x/a.jpg");
        assert_eq!(path, PathBuf::from("/cache/Comète_HaleBopp.jpg"));
    }

    #[test]
    fn empty_title_uses_fallback_stem() {
        let path = compute_image_path(Path::new("/cache"), " ?! ", "https://x/a.gif");
        assert_eq!(path, PathBuf::from("/cache/apod.gif"));
    }

    #[test]
    fn extension_ignores_query_and_fragment() {
        assert_eq!(extension_of("https://i.ytimg.com/vi/abc/hqdefault.jpg?x=1#t"), "jpg");
        assert_eq!(extension_of("https://x/y/pic.jpeg"), "jpeg");
    }

    #[test]
    fn extension_case_is_kept() {
        let path = compute_image_path(Path::new("/cache"), "Orion", "https://x/y/orion.JPG");
        assert_eq!(path, PathBuf::from("/cache/Orion.JPG"));
    }

    #[test]
    fn extension_falls_back_to_jpg() {
        assert_eq!(extension_of("https://example.com/image"), "jpg");
        assert_eq!(extension_of("https://example.com/"), "jpg");
        assert_eq!(extension_of("https://example.com/.hidden"), "jpg");
    }

    #[test]
    fn colliding_titles_share_a_path() {
        let a = compute_image_path(Path::new("/cache"), "Moon!", "https://x/a.jpg");
        let b = compute_image_path(Path::new("/cache"), "Moon?", "https://x/b.jpg");
        assert_eq!(a, b);
    }

    #[test]
    fn write_image_persists_bytes() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("image.jpg");

        write_image(b"first", &path).unwrap();
        write_image(b"second", &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn write_image_reports_path_on_failure() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("missing").join("image.jpg");

        let err = write_image(b"data", &path).unwrap_err();
        match err {
            Error::Save { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
