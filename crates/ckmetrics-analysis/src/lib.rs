//! # ckmetrics-analysis
//!
//! **Tier 3 (Orchestration)**
//!
//! Runs the four analyzers over a [`ScanContext`], joins their outputs into
//! one [`ClassOopMetrics`] per class, folds the records into file and project
//! aggregates and detects design smells on the finished report.
//!
//! ## What belongs here
//! * The outer join and threshold violation messages
//! * File grouping and report folding
//! * Design-smell predicates
//!
//! ## What does NOT belong here
//! * Metric formulas (use the analyzer crates)
//! * Filesystem traversal (use ckmetrics-scan)

#![forbid(unsafe_code)]

mod combine;
mod smells;

use ckmetrics_context::ScanContext;
use ckmetrics_settings::OopSettings;
use ckmetrics_types::{FactSet, FileFacts, FileOopAnalysis, OopReport, OopThresholds};
use tracing::{debug, warn};

pub use combine::{AnalyzerOutputs, combine_class, threshold_violations};
pub use smells::{detect_design_smells, god_classes, matches_smell};

/// Analyze an already built context.
///
/// Files keep their input order and only files with at least one analyzed
/// class appear. Classes inside a file are ordered by `(line, name)`.
pub fn analyze_context(ctx: &ScanContext, thresholds: &OopThresholds, scan_path: &str) -> OopReport {
    let outputs = AnalyzerOutputs::compute(ctx, thresholds);
    let mut report = OopReport::new(scan_path, *thresholds);

    for warning in ctx.warnings() {
        report.add_warning(warning.clone());
    }
    for view in ctx.classes() {
        if let Err(err) = view.class.validate() {
            let msg = format!("{}: malformed class: {err}", view.file.relative_path);
            warn!("{msg}");
            report.add_warning(msg);
        }
    }

    for analysis in file_analyses(ctx, &outputs, thresholds) {
        report.add_file_analysis(analysis);
    }
    report.sort_violations();

    debug!(
        files = report.total_files_scanned,
        classes = report.total_classes_analyzed,
        violations = report.total_violations,
        "oop analysis complete"
    );
    report
}

fn file_analyses(
    ctx: &ScanContext,
    outputs: &AnalyzerOutputs,
    thresholds: &OopThresholds,
) -> Vec<FileOopAnalysis> {
    let mut out = Vec::new();
    for file in ctx.files() {
        let mut analysis = FileOopAnalysis::new(file.path.clone(), file.relative_path.clone());
        for class in &file.classes {
            let Some(view) = ctx.lookup(&class.name) else {
                continue;
            };
            // Skip definitions shadowed by a later duplicate.
            if !std::ptr::eq(view.class, class) || !outputs.contains(&class.name) {
                continue;
            }
            analysis.add_class(combine_class(&view, outputs, thresholds));
        }
        if analysis.total_classes > 0 {
            out.push(analysis);
        }
    }
    out
}

/// Analyze facts gathered by the caller, using the thresholds in `settings`.
pub fn analyze_facts(facts: FactSet, settings: &OopSettings) -> OopReport {
    let ctx = ScanContext::new(facts);
    analyze_context(&ctx, &settings.thresholds(), "")
}

/// Analyze one file in isolation.
///
/// Bases and coupling targets defined in other files are unknown here, so
/// DIT and Ca only reflect this file.
pub fn analyze_file_facts(file: FileFacts, settings: &OopSettings) -> FileOopAnalysis {
    let path = file.path.clone();
    let rel = file.relative_path.clone();
    let report = analyze_facts(FactSet::new().with_file(file), settings);
    report
        .file_analyses
        .into_iter()
        .next()
        .unwrap_or_else(|| FileOopAnalysis::new(path, rel))
}
