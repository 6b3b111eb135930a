//! Filesystem validation source.
//!
//! Discovers documentation files on disk and reads them for the validation
//! pipeline:
//! - Search directories that do not exist are skipped, not reported
//! - Symlinked directories are not descended by default (`follow_links: false`);
//!   symlinked documentation files are always included
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Reads are bounded by `max_file_size`

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::{DOC_EXTENSIONS, FsSourceConfig};
use crate::error::ScanError;

/// Check if file has a documentation extension (case-sensitive).
fn is_doc_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOC_EXTENSIONS.contains(&ext))
}

/// Find all documentation files below the configured search directories.
///
/// The result is sorted by path and deduplicated, so overlapping search
/// directories never yield a file twice.
///
/// # Errors
///
/// Returns `ScanError::Walk` if a directory cannot be traversed.
pub fn find_source_files(config: &FsSourceConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for dir in config.resolved_search_dirs() {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "search directory missing, skipping");
            continue;
        }

        for entry in WalkDir::new(&dir)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
        {
            let entry = entry?;
            // `Path::is_file` resolves symlinks, so linked documents are kept.
            if is_doc_file(entry.path()) && entry.path().is_file() {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Read a file using a bounded read, enforcing `max_file_size`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, exceeds `max_file_size`, or
/// is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let io_err = |source| ScanError::Io {
        path: path.to_owned(),
        source,
    };

    let file = std::fs::File::open(path).map_err(io_err)?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(io_err)?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::FileTooLarge {
            path: path.to_owned(),
            max_file_size,
        });
    }

    String::from_utf8(buffer).map_err(|_| ScanError::InvalidEncoding {
        path: path.to_owned(),
    })
}
