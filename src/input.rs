//! Validation of the two command-line values: the image cache directory and
//! the APOD date.

use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The first day the APOD service has an entry for.
pub const FIRST_APOD_DATE: NaiveDate = NaiveDate::from_ymd_opt(1995, 6, 16).expect("valid date");

/// Validates the image cache directory, creating it when it does not exist yet.
///
/// A failure to create the directory is logged and tolerated; later steps
/// report the real problem when they try to use it.
pub fn resolve_cache_dir(arg: Option<&Path>) -> Result<PathBuf> {
    let dir = arg.ok_or_else(|| Error::Input("missing image cache path parameter".to_string()))?;

    if !dir.is_absolute() {
        return Err(Error::Input(format!(
            "image cache path must be absolute: {}",
            dir.display()
        )));
    }

    if dir.is_dir() {
        info!("Image cache directory: {}", dir.display());
        return Ok(dir.to_path_buf());
    }

    if dir.is_file() {
        return Err(Error::Input(format!(
            "image cache path is an existing file: {}",
            dir.display()
        )));
    }

    info!("Creating new image cache directory {}", dir.display());
    if let Err(e) = fs::create_dir_all(dir) {
        warn!("Failed to create {}: {}", dir.display(), e);
    }

    Ok(dir.to_path_buf())
}

/// Resolves the APOD date, defaulting to today's local date.
pub fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    resolve_date_on(arg, Local::now().date_naive())
}

/// Same as [`resolve_date`] with an explicit notion of "today".
pub fn resolve_date_on(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    let date = match arg {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            Error::Input(format!("Invalid date format: {}. Use YYYY-MM-DD", raw))
        })?,
        None => today,
    };

    if date < FIRST_APOD_DATE {
        return Err(Error::Input(format!(
            "{} is before the first APOD ({})",
            date, FIRST_APOD_DATE
        )));
    }
    if date > today {
        return Err(Error::Input(format!("{} is in the future", date)));
    }

    info!("APOD date: {}", date);
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn missing_cache_dir_is_rejected() {
        assert!(matches!(resolve_cache_dir(None), Err(Error::Input(_))));
    }

    #[test]
    fn relative_cache_dir_is_rejected() {
        let err = resolve_cache_dir(Some(Path::new("relative/cache"))).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn existing_dir_is_returned_unchanged() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_cache_dir(Some(tmp.path())).unwrap();
        assert_eq!(resolved, tmp.path());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn existing_file_is_rejected() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("not_a_dir");
        fs::write(&file, b"x").unwrap();

        let err = resolve_cache_dir(Some(&file)).unwrap_err();
        assert!(err.to_string().contains("existing file"));
    }

    #[test]
    fn missing_dir_is_created_with_parents() {
        let tmp = tempdir().unwrap();
        let nested = tmp.path().join("a").join("b").join("cache");

        let resolved = resolve_cache_dir(Some(&nested)).unwrap();
        assert_eq!(resolved, nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn date_defaults_to_today() {
        assert_eq!(resolve_date_on(None, today()).unwrap(), today());
    }

    #[test]
    fn date_range_boundaries() {
        assert_eq!(
            resolve_date_on(Some("1995-06-16"), today()).unwrap(),
            FIRST_APOD_DATE
        );
        assert_eq!(resolve_date_on(Some("2024-03-10"), today()).unwrap(), today());

        assert!(resolve_date_on(Some("1995-06-15"), today()).is_err());
        assert!(resolve_date_on(Some("2024-03-11"), today()).is_err());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for raw in ["", "yesterday", "2020/01/05", "2020-13-01", "2021-02-29"] {
            let err = resolve_date_on(Some(raw), today()).unwrap_err();
            assert!(matches!(err, Error::Input(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn dates_are_normalised_to_iso() {
        let date = resolve_date_on(Some("2020-1-5"), today()).unwrap();
        assert_eq!(date.to_string(), "2020-01-05");
    }
}
