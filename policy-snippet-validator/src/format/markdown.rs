//! Markdown fenced-block extraction.
//!
//! Walks the document line by line with a small state machine and yields the
//! `yaml`/`json` fenced blocks that mention a policy key. Each line is visited
//! once; nothing is matched across block boundaries.

use std::iter::Enumerate;
use std::str::Lines;

use tracing::debug;

use crate::format::BlockFormat;
use crate::format::policy::mentions_policy_key;

const FENCE: &str = "```";

/// Info-string markers that exempt a block from validation.
const SKIP_MARKERS: &[&str] = &["skip-validation", "skip_validation"];

/// A candidate policy block extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyBlock {
    /// 1-based position among the blocks yielded from the same document.
    pub ordinal: usize,
    /// 1-based line number of the opening fence.
    pub line: usize,
    /// Format declared by the opening fence.
    pub format: BlockFormat,
    /// Lines between the fences, joined with `\n`.
    pub content: String,
}

/// Markdown parsing state for code block tracking
#[derive(Debug, Default)]
enum FenceState<'a> {
    #[default]
    Prose,
    Exempt,
    Collecting {
        format: BlockFormat,
        opened_at: usize,
        body: Vec<&'a str>,
    },
}

/// Lowercased, trimmed info string of an opening fence line.
fn fence_info(line: &str) -> Option<String> {
    line.trim()
        .strip_prefix(FENCE)
        .map(|rest| rest.trim().to_lowercase())
}

fn is_closing_fence(line: &str) -> bool {
    line.trim() == FENCE
}

fn is_exempt(info: &str) -> bool {
    SKIP_MARKERS.iter().any(|marker| info.contains(marker))
}

/// Lazy iterator over the policy blocks of one document.
#[derive(Debug)]
pub struct PolicyBlocks<'a> {
    lines: Enumerate<Lines<'a>>,
    state: FenceState<'a>,
    yielded: usize,
}

/// Extract the policy blocks of a markdown document.
#[must_use]
pub fn extract_blocks(content: &str) -> PolicyBlocks<'_> {
    PolicyBlocks {
        lines: content.lines().enumerate(),
        state: FenceState::Prose,
        yielded: 0,
    }
}

impl Iterator for PolicyBlocks<'_> {
    type Item = PolicyBlock;

    fn next(&mut self) -> Option<PolicyBlock> {
        for (idx, line) in self.lines.by_ref() {
            match std::mem::take(&mut self.state) {
                FenceState::Prose => {
                    let Some(info) = fence_info(line) else {
                        continue;
                    };
                    // Fences of other languages are not tracked: their body is
                    // scanned as prose.
                    let Some(format) = BlockFormat::from_info(&info) else {
                        continue;
                    };
                    self.state = if is_exempt(&info) {
                        debug!(line = idx + 1, "skipping exempt block");
                        FenceState::Exempt
                    } else {
                        FenceState::Collecting {
                            format,
                            opened_at: idx + 1,
                            body: Vec::new(),
                        }
                    };
                }
                FenceState::Exempt => {
                    if !is_closing_fence(line) {
                        self.state = FenceState::Exempt;
                    }
                }
                FenceState::Collecting {
                    format,
                    opened_at,
                    mut body,
                } => {
                    if !is_closing_fence(line) {
                        body.push(line);
                        self.state = FenceState::Collecting {
                            format,
                            opened_at,
                            body,
                        };
                        continue;
                    }

                    let content = body.join("\n");
                    if !mentions_policy_key(&content) {
                        continue;
                    }
                    self.yielded += 1;
                    return Some(PolicyBlock {
                        ordinal: self.yielded,
                        line: opened_at,
                        format,
                        content,
                    });
                }
            }
        }

        if let FenceState::Collecting { opened_at, .. } = std::mem::take(&mut self.state) {
            debug!(line = opened_at, "discarding unterminated block");
        }
        None
    }
}
