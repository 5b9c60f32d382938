//! # ckmetrics-coupling
//!
//! **Tier 2 (Analyzer)**
//!
//! Builds the coupling digraph over the scanned universe and reports
//! CBO, afferent (Ca) and efferent (Ce) coupling and instability per class.
//!
//! CBO is reported as pure efferent coupling (`cbo == ce`), not the union of
//! incoming and outgoing edges.
//!
//! Names are matched by bare identifier, so two classes sharing a name in
//! different modules are conflated. The resulting overcount is accepted.
//!
//! ## What belongs here
//! * Coupling candidate collection from class facts
//! * Edge filtering and the reverse (afferent) index
//! * Instability and coupling-level classification
//!
//! ## What does NOT belong here
//! * Fact extraction
//! * Combination with other metrics (use ckmetrics-analysis)

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use ckmetrics_context::{ClassView, ScanContext, is_builtin_name, trailing_identifier};
use ckmetrics_math::guarded_ratio;
use ckmetrics_types::severity::coupling_severity;
use ckmetrics_types::{CouplingLevel, CouplingMetrics, OopThresholds};
use tracing::{debug, warn};

/// Every name a class mentions that could denote another type.
///
/// Bases, external call targets and annotations are reduced to their trailing
/// identifier. Instance-member names are never candidates.
pub fn coupling_candidates(view: &ClassView<'_>) -> BTreeSet<String> {
    let class = view.class;
    let mut names: BTreeSet<String> = class
        .base_names
        .iter()
        .map(|b| trailing_identifier(b).to_string())
        .collect();
    for method in &class.methods {
        names.extend(
            method
                .external_call_targets
                .iter()
                .map(|t| trailing_identifier(t).to_string()),
        );
        names.extend(method.referenced_names.iter().map(|n| n.trim().to_string()));
        names.extend(
            method
                .type_references
                .iter()
                .map(|t| trailing_identifier(t).to_string()),
        );
    }
    names.retain(|n| !n.is_empty());
    names
}

/// Candidates that survive filtering: known classes or imported names, minus
/// the class itself and builtins.
pub fn efferent_targets(ctx: &ScanContext, view: &ClassView<'_>) -> BTreeSet<String> {
    let own = view.name();
    coupling_candidates(view)
        .into_iter()
        .filter(|name| name != own && !is_builtin_name(name))
        .filter(|name| ctx.is_known_class(name) || view.file.imported_names.contains(name))
        .collect()
}

/// `ce / (ca + ce)`, 0 for an isolated class.
#[must_use]
pub fn calculate_instability(ca: usize, ce: usize) -> f64 {
    guarded_ratio(ce, ca + ce)
}

/// Coupling metrics for every well-formed class in the universe.
pub fn analyze_coupling(
    ctx: &ScanContext,
    thresholds: &OopThresholds,
) -> BTreeMap<String, CouplingMetrics> {
    let mut outgoing: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for view in ctx.classes() {
        if let Err(err) = view.class.validate_names() {
            warn!(class = view.name(), "coupling skipped: {err}");
            continue;
        }
        outgoing.insert(view.name().to_string(), efferent_targets(ctx, &view));
    }

    let mut incoming: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for (source, targets) in &outgoing {
        for target in targets {
            if outgoing.contains_key(target) {
                incoming
                    .entry(target.as_str())
                    .or_default()
                    .insert(source.clone());
            }
        }
    }

    let result: BTreeMap<String, CouplingMetrics> = outgoing
        .iter()
        .map(|(name, coupled_to)| {
            let coupled_from = incoming.get(name.as_str()).cloned().unwrap_or_default();
            let ce = coupled_to.len();
            let ca = coupled_from.len();
            let metrics = CouplingMetrics {
                class_name: name.clone(),
                cbo: ce,
                ca,
                ce,
                instability: calculate_instability(ca, ce),
                coupled_to: coupled_to.clone(),
                coupled_from,
                coupling_level: CouplingLevel::from_cbo(ce),
                severity: coupling_severity(ce, thresholds),
            };
            (name.clone(), metrics)
        })
        .collect();

    debug!(classes = result.len(), "coupling analysis complete");
    result
}

/// Classes whose CBO exceeds the threshold, highest first.
pub fn highly_coupled<'a>(
    metrics: &'a BTreeMap<String, CouplingMetrics>,
    thresholds: &OopThresholds,
) -> Vec<&'a CouplingMetrics> {
    let mut out: Vec<_> = metrics.values().filter(|m| m.cbo > thresholds.cbo).collect();
    out.sort_by(|a, b| b.cbo.cmp(&a.cbo).then_with(|| a.class_name.cmp(&b.class_name)));
    out
}
