//! # ckmetrics-rfc
//!
//! **Tier 2 (Analyzer)**
//!
//! Response For a Class (RFC) and Weighted Methods per Class (WMC).
//!
//! External call targets are reduced to their trailing identifier before
//! they join the called set, so `a.save` and `b.save` count once.
//!
//! ## What belongs here
//! * RFC/WMC per class
//! * Complexity hotspot and breakdown queries
//!
//! ## What does NOT belong here
//! * Computing cyclomatic complexity (that arrives with the facts)

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use ckmetrics_context::{ScanContext, trailing_identifier};
use ckmetrics_types::severity::rfc_severity;
use ckmetrics_types::{ClassFact, FactError, OopThresholds, RfcMetrics};
use serde::Serialize;
use tracing::{debug, warn};

/// One method ranked by complexity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodHotspot {
    pub class_name: String,
    pub method_name: String,
    pub complexity: u32,
}

/// Distinct trailing identifiers of every external call target in the class.
fn external_targets(class: &ClassFact) -> BTreeSet<String> {
    class
        .methods
        .iter()
        .flat_map(|m| m.external_call_targets.iter())
        .map(|t| trailing_identifier(t).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// RFC/WMC for one class. Fails when any method has complexity 0.
pub fn class_rfc(class: &ClassFact, thresholds: &OopThresholds) -> Result<RfcMetrics, FactError> {
    class.validate()?;

    let external = external_targets(class);
    let mut called: BTreeSet<String> = class
        .methods
        .iter()
        .flat_map(|m| m.self_called_methods.iter().cloned())
        .collect();
    called.extend(external.iter().cloned());

    let self_references: BTreeSet<&str> = class
        .methods
        .iter()
        .flat_map(|m| m.self_called_methods.iter().chain(m.accessed_attributes.iter()))
        .map(String::as_str)
        .collect();

    let per_method_complexity: BTreeMap<String, u32> = class
        .methods
        .iter()
        .map(|m| (m.name.clone(), m.cyclomatic_complexity))
        .collect();

    let method_count = class.methods.len();
    let wmc: usize = class
        .methods
        .iter()
        .map(|m| m.cyclomatic_complexity as usize)
        .sum();
    let rfc = method_count + called.len();

    Ok(RfcMetrics {
        class_name: class.name.clone(),
        rfc,
        wmc,
        method_count,
        called_methods: called,
        per_method_complexity,
        external_call_count: external.len(),
        self_reference_count: self_references.len(),
        severity: rfc_severity(rfc, wmc, thresholds),
    })
}

/// RFC/WMC for every class whose facts validate.
pub fn analyze_rfc(ctx: &ScanContext, thresholds: &OopThresholds) -> BTreeMap<String, RfcMetrics> {
    let mut result = BTreeMap::new();
    for view in ctx.classes() {
        match class_rfc(view.class, thresholds) {
            Ok(metrics) => {
                result.insert(metrics.class_name.clone(), metrics);
            }
            Err(err) => warn!(class = view.name(), "rfc skipped: {err}"),
        }
    }
    debug!(classes = result.len(), "rfc analysis complete");
    result
}

pub fn high_rfc_classes<'a>(
    metrics: &'a BTreeMap<String, RfcMetrics>,
    thresholds: &OopThresholds,
) -> Vec<&'a RfcMetrics> {
    let mut out: Vec<_> = metrics.values().filter(|m| m.rfc > thresholds.rfc).collect();
    out.sort_by(|a, b| b.rfc.cmp(&a.rfc).then_with(|| a.class_name.cmp(&b.class_name)));
    out
}

pub fn high_wmc_classes<'a>(
    metrics: &'a BTreeMap<String, RfcMetrics>,
    thresholds: &OopThresholds,
) -> Vec<&'a RfcMetrics> {
    let mut out: Vec<_> = metrics.values().filter(|m| m.wmc > thresholds.wmc).collect();
    out.sort_by(|a, b| b.wmc.cmp(&a.wmc).then_with(|| a.class_name.cmp(&b.class_name)));
    out
}

/// The `top_n` most complex methods across all classes.
///
/// Ties break on class name, then method name.
pub fn complexity_hotspots(
    metrics: &BTreeMap<String, RfcMetrics>,
    top_n: usize,
) -> Vec<MethodHotspot> {
    let mut all: Vec<MethodHotspot> = metrics
        .values()
        .flat_map(|m| {
            m.per_method_complexity
                .iter()
                .map(|(method, &complexity)| MethodHotspot {
                    class_name: m.class_name.clone(),
                    method_name: method.clone(),
                    complexity,
                })
        })
        .collect();
    all.sort_by(|a, b| {
        b.complexity
            .cmp(&a.complexity)
            .then_with(|| a.class_name.cmp(&b.class_name))
            .then_with(|| a.method_name.cmp(&b.method_name))
    });
    all.truncate(top_n);
    all
}

/// The `top_n` classes with the highest WMC, ties by class name.
pub fn wmc_hotspots(metrics: &BTreeMap<String, RfcMetrics>, top_n: usize) -> Vec<&RfcMetrics> {
    let mut out: Vec<_> = metrics.values().collect();
    out.sort_by(|a, b| b.wmc.cmp(&a.wmc).then_with(|| a.class_name.cmp(&b.class_name)));
    out.truncate(top_n);
    out
}

/// Methods of one class, most complex first.
pub fn method_complexity_breakdown(metrics: &RfcMetrics) -> Vec<(&str, u32)> {
    let mut out: Vec<(&str, u32)> = metrics
        .per_method_complexity
        .iter()
        .map(|(name, &c)| (name.as_str(), c))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    out
}
