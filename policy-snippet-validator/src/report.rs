//! Validation report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::format::BlockFormat;

/// Outcome of validating one policy block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct BlockOutcome {
    /// Document path, relative to the documentation root.
    pub file: PathBuf,
    /// 1-based block ordinal within the document.
    pub block: usize,
    /// 1-based line of the opening fence.
    pub line: usize,
    /// Format declared by the fence.
    pub format: BlockFormat,
    /// Failure reason; `None` when the block passed.
    pub error: Option<String>,
}

impl BlockOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Block counts for a run, derived from the outcomes.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Result of a validation run.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of documentation files read.
    pub scanned_files: usize,
    /// One entry per validated block, in scan order.
    pub blocks: Vec<BlockOutcome>,
}

impl ValidationReport {
    /// Fold the outcomes into counts.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.blocks
            .iter()
            .fold(RunSummary::default(), |mut summary, outcome| {
                summary.total += 1;
                if outcome.passed() {
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
                summary
            })
    }

    /// Whether every validated block passed.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.blocks.iter().all(BlockOutcome::passed)
    }
}
