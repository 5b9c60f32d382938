//! Per-analyzer metric records and the unified per-class record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::severity::{CohesionLevel, CouplingLevel, Severity};

/// Coupling Between Objects for one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingMetrics {
    pub class_name: String,
    /// Efferent coupling reported as CBO.
    pub cbo: usize,
    pub ca: usize,
    pub ce: usize,
    /// `ce / (ca + ce)`, 0 when isolated.
    pub instability: f64,
    pub coupled_to: BTreeSet<String>,
    pub coupled_from: BTreeSet<String>,
    pub coupling_level: CouplingLevel,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritanceMetrics {
    pub class_name: String,
    pub dit: usize,
    pub noc: usize,
    /// Base names as written.
    pub base_classes: Vec<String>,
    pub direct_subclasses: Vec<String>,
    /// Resolvable ancestors, nearest first in depth-first order.
    pub ancestors: Vec<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohesionMetrics {
    pub class_name: String,
    pub lcom: f64,
    pub lcom_hs: f64,
    pub method_count: usize,
    pub attribute_count: usize,
    /// Method name to the class attributes it touches.
    pub per_method_attr_usage: BTreeMap<String, BTreeSet<String>>,
    /// Methods without the privacy marker; the ones LCOM is computed over.
    #[serde(default)]
    pub regular_methods: BTreeSet<String>,
    pub cohesion_level: CohesionLevel,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcMetrics {
    pub class_name: String,
    pub rfc: usize,
    pub wmc: usize,
    pub method_count: usize,
    pub called_methods: BTreeSet<String>,
    pub per_method_complexity: BTreeMap<String, u32>,
    /// Distinct external call targets by trailing identifier.
    pub external_call_count: usize,
    /// Distinct own members (methods and attributes) the class reaches through itself.
    pub self_reference_count: usize,
    pub severity: Severity,
}

/// Everything known about one class after combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassOopMetrics {
    pub class_name: String,
    pub file_path: String,
    pub relative_path: String,
    pub line: usize,
    pub end_line: usize,

    // Coupling
    pub cbo: usize,
    pub ca: usize,
    pub ce: usize,
    pub instability: f64,
    pub coupled_to: BTreeSet<String>,
    pub coupled_from: BTreeSet<String>,
    pub coupling_level: CouplingLevel,
    pub coupling_severity: Severity,

    // Inheritance
    pub dit: usize,
    pub noc: usize,
    pub base_classes: Vec<String>,
    pub direct_subclasses: Vec<String>,
    pub ancestors: Vec<String>,
    pub inheritance_severity: Severity,

    // Cohesion
    pub lcom: f64,
    pub lcom_hs: f64,
    pub cohesion_level: CohesionLevel,
    pub cohesion_severity: Severity,

    // Response
    pub rfc: usize,
    pub wmc: usize,
    pub external_call_count: usize,
    pub self_reference_count: usize,
    pub rfc_severity: Severity,

    pub method_count: usize,
    pub attribute_count: usize,

    pub overall_severity: Severity,
    pub violations: Vec<String>,
}

impl ClassOopMetrics {
    /// `relative_path:ClassName`, or the bare name when the path is unknown.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.relative_path.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}:{}", self.relative_path, self.class_name)
        }
    }

    /// Worst of the four component severities.
    #[must_use]
    pub fn calculate_overall_severity(&self) -> Severity {
        [
            self.coupling_severity,
            self.inheritance_severity,
            self.cohesion_severity,
            self.rfc_severity,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}
