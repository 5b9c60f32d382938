//! # ckmetrics-scan
//!
//! **Tier 4 (Workflow)**
//!
//! The end-to-end entry point: validate the scan root, list candidate files,
//! extract facts through a [`FactExtractor`] and hand them to
//! ckmetrics-analysis.
//!
//! A missing root is the only fatal condition. A unit that fails extraction
//! is logged, recorded as a report warning and left out of every graph.
//!
//! ## What belongs here
//! * Root validation and file discovery
//! * The fact-extractor seam and the JSON sidecar extractor
//! * Per-unit skip semantics
//!
//! ## What does NOT belong here
//! * Metric computation (use the analyzer crates)
//! * Language parsing (implement [`FactExtractor`])

#![forbid(unsafe_code)]

mod extractor;

use std::path::{Path, PathBuf};

use ckmetrics_analysis::analyze_context;
use ckmetrics_context::ScanContext;
use ckmetrics_settings::OopSettings;
use ckmetrics_types::{FactSet, FileOopAnalysis, OopReport};
use ckmetrics_walk::{WalkOptions, list_files};
use thiserror::Error;
use tracing::{debug, warn};

pub use extractor::{FACTS_SUFFIX, FactExtractor, JsonFactExtractor};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to list files under {}: {message}", root.display())]
    Walk { root: PathBuf, message: String },

    #[error("Failed to extract facts from {}: {message}", path.display())]
    Extract { path: PathBuf, message: String },
}

/// Facts for every accepted unit under `root`, plus one warning per skipped unit.
pub fn collect_facts(
    root: &Path,
    settings: &OopSettings,
    extractor: &dyn FactExtractor,
) -> Result<(FactSet, Vec<String>), ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let options = WalkOptions {
        exclude_patterns: settings.exclude_patterns.clone(),
        include_tests: settings.include_tests,
        no_ignore: settings.no_ignore,
    };
    let files = list_files(root, &options).map_err(|err| ScanError::Walk {
        root: root.to_path_buf(),
        message: format!("{err:#}"),
    })?;

    let mut facts = FactSet::new();
    let mut skipped = Vec::new();
    let units = files.iter().filter(|rel| {
        extractor.accepts(rel)
            && options.keeps(&extractor.described_source(rel).to_string_lossy())
    });
    for rel in units {
        match extractor.extract(root, rel) {
            Ok(file) => facts.push(file),
            Err(err) => {
                let msg = format!("{}: skipped unit: {err:#}", rel.display());
                warn!("{msg}");
                skipped.push(msg);
            }
        }
    }

    debug!(
        listed = files.len(),
        units = facts.files.len(),
        skipped = skipped.len(),
        "fact collection complete"
    );
    Ok((facts, skipped))
}

/// Scan `root` and produce the OOP report.
pub fn scan(
    root: &Path,
    settings: &OopSettings,
    extractor: &dyn FactExtractor,
) -> Result<OopReport, ScanError> {
    let (facts, skipped) = collect_facts(root, settings, extractor)?;
    let ctx = ScanContext::new(facts);
    let mut report = analyze_context(&ctx, &settings.thresholds(), &root.display().to_string());
    let mut warnings = skipped;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;
    Ok(report)
}

/// Analyze a single unit on its own.
///
/// Unlike [`scan`], a failed extraction is an error here since there is
/// nothing else to report.
pub fn scan_file(
    root: &Path,
    relative: &Path,
    settings: &OopSettings,
    extractor: &dyn FactExtractor,
) -> Result<FileOopAnalysis, ScanError> {
    let path = root.join(relative);
    if !path.exists() {
        return Err(ScanError::RootNotFound(path));
    }
    let file = extractor
        .extract(root, relative)
        .map_err(|err| ScanError::Extract {
            path,
            message: format!("{err:#}"),
        })?;
    Ok(ckmetrics_analysis::analyze_file_facts(file, settings))
}
