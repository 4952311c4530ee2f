//! The on-disk store and its write-through protocol.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::key::CacheKey;

/// Blob layout: the fingerprint rides with the value so staleness is
/// detectable without trusting the file name.
#[derive(Serialize, Deserialize)]
struct Payload<V> {
    fingerprint: u64,
    value: V,
}

/// A directory of verification results, one blob per [`CacheKey`].
///
/// Writes go to a `.tmp` sibling and are renamed into place, so a reader
/// never observes a partially written blob and a lost write race resolves
/// to last-writer-wins. There is no locking.
#[derive(Debug, Clone)]
pub struct MetricStore {
    root: PathBuf,
}

impl MetricStore {
    /// Opens a store rooted at `root`. The directory is created lazily on
    /// first write, so read-only use of a missing directory just misses.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The blob path a key resolves to.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Reads the value stored for `key`.
    ///
    /// Returns `Ok(None)` when no blob exists or when a blob decodes
    /// cleanly but carries a different configuration fingerprint (logged;
    /// the caller recomputes and overwrites).
    ///
    /// # Errors
    ///
    /// [`CacheError::Corrupt`] when the blob cannot be decoded and
    /// [`CacheError::Io`] for filesystem failures other than absence.
    pub fn load<V: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<V>, CacheError> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "cache miss");
                return Ok(None);
            }
            Err(e) => return Err(CacheError::Io { path, source: e }),
        };

        let mut reader = BufReader::new(file);
        let payload: Payload<V> =
            bincode::deserialize_from(&mut reader).map_err(|e| CacheError::Corrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if payload.fingerprint != key.fingerprint() {
            warn!(
                path = %path.display(),
                stored = format_args!("{:016x}", payload.fingerprint),
                expected = format_args!("{:016x}", key.fingerprint()),
                "cache blob was written under a different configuration; recomputing"
            );
            return Ok(None);
        }

        debug!(path = %path.display(), "cache hit");
        Ok(Some(payload.value))
    }

    /// Persists `value` under `key`, replacing any existing blob.
    ///
    /// Returns the final blob path.
    pub fn store<V: Serialize>(&self, key: &CacheKey, value: &V) -> Result<PathBuf, CacheError> {
        fs::create_dir_all(&self.root).map_err(|e| CacheError::Io {
            path: self.root.clone(),
            source: e,
        })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("bin.tmp");
        let file = File::create(&tmp).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        let payload = Payload {
            fingerprint: key.fingerprint(),
            value,
        };
        bincode::serialize_into(&mut writer, &payload).map_err(|e| CacheError::Encode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        writer.flush().map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;

        fs::rename(&tmp, &path).map_err(|e| CacheError::Io {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), "cache blob written");
        Ok(path)
    }

    /// Write-through lookup: a hit returns the stored value verbatim, a
    /// miss (absent or stale blob) runs `compute` and persists its result
    /// before returning it.
    ///
    /// The persist happens once, after `compute` returns the complete
    /// mapping; a failure anywhere leaves no partial blob behind.
    pub fn get_or_compute<V, E, F>(&self, key: &CacheKey, compute: F) -> Result<V, E>
    where
        V: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.load(key)? {
            return Ok(hit);
        }
        let value = compute()?;
        self.store(key, &value)?;
        Ok(value)
    }
}
