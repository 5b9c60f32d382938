//! Outer join of the four analyzer outputs into [`ClassOopMetrics`].

use std::collections::BTreeMap;

use ckmetrics_cohesion::analyze_cohesion;
use ckmetrics_context::{ClassView, ScanContext};
use ckmetrics_coupling::analyze_coupling;
use ckmetrics_inheritance::analyze_inheritance;
use ckmetrics_rfc::analyze_rfc;
use ckmetrics_types::{
    ClassOopMetrics, CohesionMetrics, CouplingMetrics, InheritanceMetrics, OopThresholds,
    RfcMetrics,
};

/// Raw per-analyzer results for one scan, keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOutputs {
    pub coupling: BTreeMap<String, CouplingMetrics>,
    pub inheritance: BTreeMap<String, InheritanceMetrics>,
    pub cohesion: BTreeMap<String, CohesionMetrics>,
    pub rfc: BTreeMap<String, RfcMetrics>,
}

impl AnalyzerOutputs {
    /// Run every analyzer over `ctx`.
    pub fn compute(ctx: &ScanContext, thresholds: &OopThresholds) -> Self {
        Self {
            coupling: analyze_coupling(ctx, thresholds),
            inheritance: analyze_inheritance(ctx, thresholds),
            cohesion: analyze_cohesion(ctx, thresholds),
            rfc: analyze_rfc(ctx, thresholds),
        }
    }

    /// True when at least one analyzer reported `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.coupling.contains_key(name)
            || self.inheritance.contains_key(name)
            || self.cohesion.contains_key(name)
            || self.rfc.contains_key(name)
    }
}

/// One message per raw metric over its threshold.
pub fn threshold_violations(cls: &ClassOopMetrics, t: &OopThresholds) -> Vec<String> {
    let mut out = Vec::new();
    if cls.cbo > t.cbo {
        out.push(format!("CBO {} exceeds threshold {}", cls.cbo, t.cbo));
    }
    if cls.dit > t.dit {
        out.push(format!("DIT {} exceeds threshold {}", cls.dit, t.dit));
    }
    if cls.noc > t.noc {
        out.push(format!("NOC {} exceeds threshold {}", cls.noc, t.noc));
    }
    if cls.lcom > t.lcom {
        out.push(format!("LCOM {:.2} exceeds threshold {}", cls.lcom, t.lcom));
    }
    if cls.rfc > t.rfc {
        out.push(format!("RFC {} exceeds threshold {}", cls.rfc, t.rfc));
    }
    if cls.wmc > t.wmc {
        out.push(format!("WMC {} exceeds threshold {}", cls.wmc, t.wmc));
    }
    out
}

/// The unified record for one class. Absent analyzer entries default to zero.
pub fn combine_class(
    view: &ClassView<'_>,
    outputs: &AnalyzerOutputs,
    thresholds: &OopThresholds,
) -> ClassOopMetrics {
    let name = view.name();
    let mut cls = ClassOopMetrics {
        class_name: name.to_string(),
        file_path: view.file.path.clone(),
        relative_path: view.file.relative_path.clone(),
        line: view.class.location.line,
        end_line: view.class.location.end_line,
        ..ClassOopMetrics::default()
    };

    if let Some(c) = outputs.coupling.get(name) {
        cls.cbo = c.cbo;
        cls.ca = c.ca;
        cls.ce = c.ce;
        cls.instability = c.instability;
        cls.coupled_to = c.coupled_to.clone();
        cls.coupled_from = c.coupled_from.clone();
        cls.coupling_level = c.coupling_level;
        cls.coupling_severity = c.severity;
    }
    if let Some(i) = outputs.inheritance.get(name) {
        cls.dit = i.dit;
        cls.noc = i.noc;
        cls.base_classes = i.base_classes.clone();
        cls.direct_subclasses = i.direct_subclasses.clone();
        cls.ancestors = i.ancestors.clone();
        cls.inheritance_severity = i.severity;
    }
    let cohesion = outputs.cohesion.get(name);
    if let Some(h) = cohesion {
        cls.lcom = h.lcom;
        cls.lcom_hs = h.lcom_hs;
        cls.cohesion_level = h.cohesion_level;
        cls.cohesion_severity = h.severity;
        cls.attribute_count = h.attribute_count;
    }
    match outputs.rfc.get(name) {
        Some(r) => {
            cls.rfc = r.rfc;
            cls.wmc = r.wmc;
            cls.external_call_count = r.external_call_count;
            cls.self_reference_count = r.self_reference_count;
            cls.rfc_severity = r.severity;
            cls.method_count = r.method_count;
        }
        None => cls.method_count = cohesion.map_or(0, |h| h.method_count),
    }

    cls.overall_severity = cls.calculate_overall_severity();
    cls.violations = threshold_violations(&cls, thresholds);
    cls
}
