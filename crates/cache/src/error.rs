//! Error types for the augur-cache crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the augur-cache crate.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Returned when a filesystem operation under the cache root fails.
    #[error("cache i/o at '{}': {source}", path.display())]
    Io {
        /// The file or directory the operation touched.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a cache file exists but cannot be decoded.
    ///
    /// A corrupt blob is fatal for the request, never a silent recompute:
    /// it usually means a truncated write from a crashed run or a foreign
    /// file at the cache path, and both deserve an operator's attention.
    #[error("corrupt cache blob at '{}': {reason}", path.display())]
    Corrupt {
        /// The unreadable file.
        path: PathBuf,
        /// What the decoder reported.
        reason: String,
    },

    /// Returned when a value cannot be encoded into a cache blob.
    #[error("encoding cache blob for '{}': {reason}", path.display())]
    Encode {
        /// The intended destination file.
        path: PathBuf,
        /// What the encoder reported.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io() {
        let e = CacheError::Io {
            path: PathBuf::from("cache/ecmwf_lead0.5_metrics.bin"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            e.to_string(),
            "cache i/o at 'cache/ecmwf_lead0.5_metrics.bin': denied"
        );
    }

    #[test]
    fn display_corrupt() {
        let e = CacheError::Corrupt {
            path: PathBuf::from("cache/x.bin"),
            reason: "unexpected end of file".into(),
        };
        assert_eq!(
            e.to_string(),
            "corrupt cache blob at 'cache/x.bin': unexpected end of file"
        );
    }

    #[test]
    fn display_encode() {
        let e = CacheError::Encode {
            path: PathBuf::from("cache/x.bin"),
            reason: "size limit".into(),
        };
        assert_eq!(e.to_string(), "encoding cache blob for 'cache/x.bin': size limit");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CacheError>();
    }
}
