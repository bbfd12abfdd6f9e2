//! SQLite index of the images stored in the cache directory.
//!
//! One row per unique image content, keyed by the uppercase SHA-256 digest.
//! Rows are only ever appended; the cache has no eviction.

use crate::Result;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS Image (title TEXT, path BLOB, size INTEGER, sha256 BLOB);
    CREATE INDEX IF NOT EXISTS idx_image_sha256 ON Image (sha256);
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub title: String,
    pub path: PathBuf,
    pub size: u64,
    pub digest: String,
}

/// Handle on the cache database. The connection is opened once and closed
/// when the handle is dropped.
pub struct ImageCache {
    conn: Connection,
}

impl ImageCache {
    /// Opens (creating if absent) the database file and makes sure the
    /// `Image` table exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        debug!("Opening image cache database {}", db_path.display());
        let cache = Self {
            conn: Connection::open(db_path)?,
        };
        cache.ensure_schema()?;
        Ok(cache)
    }

    #[cfg(test)]
    fn open_in_memory() -> Result<Self> {
        let cache = Self {
            conn: Connection::open_in_memory()?,
        };
        cache.ensure_schema()?;
        Ok(cache)
    }

    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn contains(&self, digest: &str) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Image WHERE sha256 = ?1)",
            params![digest],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Returns the first record stored for `digest`.
    pub fn find(&self, digest: &str) -> Result<Option<CachedImage>> {
        let image = self
            .conn
            .query_row(
                "SELECT title, path, size, sha256 FROM Image WHERE sha256 = ?1 ORDER BY rowid LIMIT 1",
                params![digest],
                |row| {
                    let path = match row.get_ref(1)? {
                        ValueRef::Blob(bytes) | ValueRef::Text(bytes) => path_from_bytes(bytes),
                        other => {
                            return Err(rusqlite::Error::InvalidColumnType(
                                1,
                                "path".to_string(),
                                other.data_type(),
                            ));
                        }
                    };
                    Ok(CachedImage {
                        title: row.get(0)?,
                        path,
                        size: u64::try_from(row.get::<_, i64>(2)?).unwrap_or_default(),
                        digest: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(image)
    }

    /// Appends a row. Uniqueness is not enforced here; callers check
    /// [`ImageCache::contains`] first.
    pub fn insert(&self, image: &CachedImage) -> Result<()> {
        self.ensure_schema()?;
        self.conn.execute(
            "INSERT INTO Image (title, path, size, sha256) VALUES (?1, ?2, ?3, ?4)",
            params![
                image.title,
                path_to_bytes(&image.path),
                i64::try_from(image.size).unwrap_or(i64::MAX),
                image.digest
            ],
        )?;
        debug!("Added {} to image cache", image.digest);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Image", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

// Paths are stored as raw bytes so non UTF-8 names survive the round trip.
#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
