//! # ckmetrics-types
//!
//! **Tier 0 (Analysis Contract)**
//!
//! Pure data structures for object-oriented design metrics. No I/O.
//!
//! ## What belongs here
//! * The fact model handed over by an external fact extractor
//! * Per-analyzer metric records and the unified per-class record
//! * File and project aggregates (`FileOopAnalysis`, `OopReport`)
//! * Classification enums and the threshold ladders that produce them
//!
//! ## What does NOT belong here
//! * Metric computation (use the analyzer crates)
//! * Report combination (use ckmetrics-analysis)
//! * File I/O operations

#![forbid(unsafe_code)]

pub mod facts;
pub mod metrics;
pub mod report;
pub mod severity;
pub mod smells;

use serde::{Deserialize, Serialize};

pub use facts::{ClassFact, FactError, FactSet, FileFacts, MethodFact, SourceLocation};
pub use metrics::{ClassOopMetrics, CohesionMetrics, CouplingMetrics, InheritanceMetrics, RfcMetrics};
pub use report::{FileOopAnalysis, OopReport};
pub use severity::{CohesionLevel, CouplingLevel, Severity};
pub use smells::{DesignSmell, DesignSmellReport};

/// Schema version for OOP metric reports.
/// v1: Initial coupling, inheritance, cohesion and RFC/WMC contract.
pub const OOP_SCHEMA_VERSION: u32 = 1;

/// Thresholds each metric is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OopThresholds {
    /// Coupling Between Objects.
    pub cbo: usize,
    /// Depth of Inheritance Tree.
    pub dit: usize,
    /// Number of Children.
    pub noc: usize,
    /// Lack of Cohesion of Methods (0-1).
    pub lcom: f64,
    /// Response For a Class.
    pub rfc: usize,
    /// Weighted Methods per Class.
    pub wmc: usize,
}

impl Default for OopThresholds {
    fn default() -> Self {
        Self {
            cbo: 10,
            dit: 5,
            noc: 10,
            lcom: 0.8,
            rfc: 50,
            wmc: 50,
        }
    }
}
