//! Configuration for a documentation scan.
//!
//! The scan roots are part of the documentation repository layout, so the
//! defaults mirror that layout while the CLI layer decides where the root is.

use std::path::{Path, PathBuf};

/// Directories searched below the documentation root, in order.
pub const DEFAULT_SEARCH_DIRS: &[&str] = &[
    "traffic-policy",
    "snippets/traffic-policy",
    "universal-gateway",
];

/// File extensions treated as documentation sources.
pub const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Documentation root. Search directories and reported paths are relative to it.
    pub root: PathBuf,
    /// Directories to search, relative to `root`. Missing ones are skipped.
    pub search_dirs: Vec<PathBuf>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl FsSourceConfig {
    /// Default configuration rooted at `root`.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Search directories joined onto `root`, in configuration order.
    #[must_use]
    pub fn resolved_search_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.search_dirs.iter().map(|dir| self.root.join(dir))
    }

    /// Path shown in reports: relative to `root` when possible.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            search_dirs: DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}
