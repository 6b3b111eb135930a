//! Format-specific stages of the pipeline.
//!
//! - `markdown` — fenced code block extraction (line-oriented state machine)
//! - `policy` — format re-inference, parsing and structural acceptance of a block

pub mod markdown;
pub mod policy;

use serde::Serialize;

/// Structured-data format of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFormat {
    Yaml,
    Json,
}

impl BlockFormat {
    /// Format declared by a (lowercased, trimmed) fence info string.
    #[must_use]
    pub fn from_info(info: &str) -> Option<Self> {
        if info.starts_with("yaml") {
            Some(Self::Yaml)
        } else if info.starts_with("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}
