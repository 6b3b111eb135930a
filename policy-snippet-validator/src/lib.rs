//! # policy-snippet-validator
//!
//! Lints traffic policy examples embedded in documentation.
//!
//! Documentation files under the configured search directories are scanned
//! for fenced `yaml`/`json` blocks that mention a policy key
//! (`on_http_request`, `on_http_response`, `on_tcp_connect`). Each block must
//! parse and carry a policy key at its root, or wrap one in a recognized
//! envelope.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use policy_snippet_validator::{FsSourceConfig, validate_fs};
//!
//! let config = FsSourceConfig::for_root("docs");
//! let report = validate_fs(&config).unwrap();
//! let summary = report.summary();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Total: {} | Passed: {} | Failed: {}", summary.total, summary.passed, summary.failed);
//! ```

mod config;
mod error;
pub mod format;
pub mod output;
mod report;
mod strategy;

pub use config::{DEFAULT_SEARCH_DIRS, DOC_EXTENSIONS, FsSourceConfig};
pub use error::{Rejection, ScanError};
pub use format::BlockFormat;
pub use format::markdown::{PolicyBlock, extract_blocks};
pub use format::policy::{POLICY_KEYS, validate_block};
pub use report::{BlockOutcome, RunSummary, ValidationReport};

use tracing::debug;

use strategy::fs::{find_source_files, read_file_bounded};

/// Validate the traffic policy blocks of every documentation file on disk.
///
/// Blocks that fail validation are recorded in the report; they never abort
/// the scan. A tree with no documentation files yields a report with
/// `scanned_files: 0`.
///
/// # Errors
///
/// Returns an error if a search directory cannot be traversed or a
/// documentation file cannot be read.
pub fn validate_fs(config: &FsSourceConfig) -> Result<ValidationReport, ScanError> {
    let files = find_source_files(config)?;
    let mut report = ValidationReport::default();

    for path in &files {
        let content = read_file_bounded(path, config.max_file_size)?;
        let rel = config.display_path(path);
        report.scanned_files += 1;

        let before = report.blocks.len();
        for block in extract_blocks(&content) {
            let error = validate_block(&block.content, block.format)
                .err()
                .as_ref()
                .map(ToString::to_string);
            report.blocks.push(BlockOutcome {
                file: rel.clone(),
                block: block.ordinal,
                line: block.line,
                format: block.format,
                error,
            });
        }
        debug!(
            file = %rel.display(),
            blocks = report.blocks.len() - before,
            "scanned"
        );
    }

    Ok(report)
}
