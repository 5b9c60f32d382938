//! # ckmetrics-cohesion
//!
//! **Tier 2 (Analyzer)**
//!
//! Lack of Cohesion of Methods per class, in the Chidamber-Kemerer pair form
//! (LCOM) and the Henderson-Sellers form (LCOM-HS). Only regular methods (no
//! privacy marker) take part.
//!
//! A class with fewer than two regular methods or no attributes is defined as
//! perfectly cohesive (`lcom == lcom_hs == 0`).
//!
//! ## What belongs here
//! * Method/attribute usage matrix
//! * LCOM and LCOM-HS formulas
//! * Split suggestions for low-cohesion classes
//!
//! ## What does NOT belong here
//! * Combination with other metrics (use ckmetrics-analysis)

#![forbid(unsafe_code)]

mod split;

use std::collections::{BTreeMap, BTreeSet};

use ckmetrics_context::ScanContext;
use ckmetrics_math::{clamp_unit, guarded_ratio, pair_count};
use ckmetrics_types::severity::cohesion_severity;
use ckmetrics_types::{ClassFact, CohesionLevel, CohesionMetrics, OopThresholds};
use tracing::{debug, warn};

pub use split::{SPLIT_LCOM_FLOOR, SplitSuggestion, method_groups, suggest_splits};

/// Chidamber-Kemerer LCOM: the share of method pairs that touch no common
/// attribute. 0 when every pair shares, 1 when none do.
#[must_use]
pub fn lcom_ck(usage: &[&BTreeSet<String>]) -> f64 {
    let n = usage.len();
    if n < 2 {
        return 0.0;
    }
    let mut non_sharing = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if usage[i].is_disjoint(usage[j]) {
                non_sharing += 1;
            }
        }
    }
    guarded_ratio(non_sharing, pair_count(n))
}

/// Henderson-Sellers LCOM: `(m - Σ mA(a) / a) / (m - 1)`, clamped to `[0, 1]`.
#[must_use]
pub fn lcom_hs(usage: &[&BTreeSet<String>], attribute_count: usize) -> f64 {
    let m = usage.len();
    if m <= 1 || attribute_count == 0 {
        return 0.0;
    }
    let touches: usize = usage.iter().map(|attrs| attrs.len()).sum();
    let mean_methods_per_attr = touches as f64 / attribute_count as f64;
    clamp_unit((m as f64 - mean_methods_per_attr) / (m as f64 - 1.0))
}

/// Cohesion metrics for one class, or `None` when it has no methods.
pub fn class_cohesion(class: &ClassFact, thresholds: &OopThresholds) -> Option<CohesionMetrics> {
    if class.methods.is_empty() {
        return None;
    }
    let attributes = class.attributes();
    let per_method_attr_usage: BTreeMap<String, BTreeSet<String>> = class
        .methods
        .iter()
        .map(|m| {
            let used = m
                .accessed_attributes
                .intersection(&attributes)
                .cloned()
                .collect();
            (m.name.clone(), used)
        })
        .collect();

    let regular_methods: BTreeSet<String> =
        class.regular_methods().map(|m| m.name.clone()).collect();
    let regular: Vec<&BTreeSet<String>> = regular_methods
        .iter()
        .filter_map(|name| per_method_attr_usage.get(name))
        .collect();

    let (lcom, lcom_hs) = if regular.len() < 2 || attributes.is_empty() {
        (0.0, 0.0)
    } else {
        (lcom_ck(&regular), lcom_hs(&regular, attributes.len()))
    };

    Some(CohesionMetrics {
        class_name: class.name.clone(),
        lcom,
        lcom_hs,
        method_count: class.methods.len(),
        attribute_count: attributes.len(),
        per_method_attr_usage,
        regular_methods,
        cohesion_level: CohesionLevel::from_lcom(lcom),
        severity: cohesion_severity(lcom, thresholds),
    })
}

/// Cohesion metrics for every well-formed class that has methods.
pub fn analyze_cohesion(
    ctx: &ScanContext,
    thresholds: &OopThresholds,
) -> BTreeMap<String, CohesionMetrics> {
    let mut result = BTreeMap::new();
    for view in ctx.classes() {
        if let Err(err) = view.class.validate_names() {
            warn!(class = view.name(), "cohesion skipped: {err}");
            continue;
        }
        if let Some(metrics) = class_cohesion(view.class, thresholds) {
            result.insert(metrics.class_name.clone(), metrics);
        }
    }
    debug!(classes = result.len(), "cohesion analysis complete");
    result
}

/// Classes whose LCOM exceeds `threshold`, least cohesive first.
pub fn low_cohesion_classes(
    metrics: &BTreeMap<String, CohesionMetrics>,
    threshold: f64,
) -> Vec<&CohesionMetrics> {
    let mut out: Vec<_> = metrics.values().filter(|m| m.lcom > threshold).collect();
    out.sort_by(|a, b| b.lcom.total_cmp(&a.lcom).then_with(|| a.class_name.cmp(&b.class_name)));
    out
}
