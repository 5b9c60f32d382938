//! # ckmetrics-walk
//!
//! **Tier 1 (Utilities)**
//!
//! Filesystem traversal for scans. Lists candidate source files under a
//! root, respecting ignore files and the configured exclusions.
//!
//! ## What belongs here
//! * Filesystem traversal respecting gitignore
//! * Exclude-pattern and test-path pruning
//! * Deterministic ordering of the listing
//!
//! ## What does NOT belong here
//! * Reading file contents (use a fact extractor)
//! * Pattern semantics (use ckmetrics-exclude)

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ckmetrics_exclude::{is_excluded, is_test_path, relative_to};
use ignore::WalkBuilder;

/// What to leave out of a listing.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Path fragments to skip (see [`ckmetrics_exclude::is_excluded`]).
    pub exclude_patterns: Vec<String>,
    /// Keep conventionally named test files.
    pub include_tests: bool,
    /// Don't respect ignore files (.gitignore, .ignore, etc.).
    pub no_ignore: bool,
}

impl WalkOptions {
    /// Whether a root-relative path survives the configured filters.
    pub fn keeps(&self, rel: &str) -> bool {
        if is_excluded(rel, &self.exclude_patterns) {
            return false;
        }
        self.include_tests || !is_test_path(rel)
    }
}

/// List files under `root` as root-relative paths, sorted.
///
/// Excluded directories are pruned without descending into them.
pub fn list_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);
    builder.hidden(false);
    builder.ignore(!options.no_ignore);
    builder.git_ignore(!options.no_ignore);
    builder.git_exclude(!options.no_ignore);
    builder.git_global(!options.no_ignore);
    builder.parents(!options.no_ignore);
    builder.require_git(false);
    builder.follow_links(false);

    let patterns = options.exclude_patterns.clone();
    let prune_root = root.to_path_buf();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let rel = relative_to(&prune_root, entry.path());
        !is_excluded(&rel, &patterns)
    });

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let rel = relative_to(root, entry.path());
        if !options.keeps(&rel) {
            continue;
        }
        files.push(PathBuf::from(rel));
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(files)
}
