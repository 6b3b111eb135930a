//! Error types for snippet validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::policy::POLICY_KEYS_HINT;

/// A scan-level error: the documentation tree could not be read.
///
/// These are distinct from [`Rejection`] (a block that was found and failed
/// validation). A `ScanError` means the scan itself could not complete, so
/// the run is aborted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// An I/O error occurred while reading a file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file exceeded the configured maximum size limit.
    #[error("{} exceeds maximum size of {max_file_size} bytes", path.display())]
    FileTooLarge { path: PathBuf, max_file_size: u64 },
    /// The file content is not valid UTF-8.
    #[error("{} is not valid UTF-8", path.display())]
    InvalidEncoding { path: PathBuf },
    /// A directory traversal error (permission denied, loop detected, etc.).
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Why a block failed validation. `Display` is the reason shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The block content is not valid for its resolved format.
    #[error("{0}")]
    Syntax(String),
    /// The block parsed to nothing.
    #[error("empty document")]
    EmptyDocument,
    /// The block parsed to a scalar or a sequence.
    #[error("root must be an object")]
    RootNotObject,
    /// No policy key at the root and no recognized envelope.
    #[error("missing policy key (need one of: {})", POLICY_KEYS_HINT)]
    MissingPolicyKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(Rejection::EmptyDocument.to_string(), "empty document");
        assert_eq!(
            Rejection::RootNotObject.to_string(),
            "root must be an object"
        );
        assert_eq!(
            Rejection::MissingPolicyKey.to_string(),
            "missing policy key (need one of: on_http_request, on_http_response, on_tcp_connect)"
        );
        assert_eq!(
            Rejection::Syntax("bad token".to_owned()).to_string(),
            "bad token"
        );
    }

    #[test]
    fn test_scan_error_mentions_path() {
        let err = ScanError::FileTooLarge {
            path: PathBuf::from("traffic-policy/big.md"),
            max_file_size: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("traffic-policy/big.md"), "got: {msg}");
        assert!(msg.contains("10 bytes"), "got: {msg}");
    }
}
