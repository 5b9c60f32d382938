//! Severity and level classification.
//!
//! Every analyzer grades its metric against a threshold with the same ratio
//! ladder: at most half the threshold is `info`, at most three quarters is
//! `low`, at most the threshold is `moderate`, at most `high_factor` times the
//! threshold is `high`, anything beyond is `critical`.

use std::fmt;

use ckmetrics_math::guarded_ratio;
use serde::{Deserialize, Serialize};

use crate::OopThresholds;

/// Upper bound of the `high` band for coupling, inheritance and RFC/WMC.
pub const DEFAULT_HIGH_FACTOR: f64 = 1.5;
/// Upper bound of the `high` band for cohesion.
pub const COHESION_HIGH_FACTOR: f64 = 1.25;

/// Severity of a metric breach, ordered `Info < Low < Moderate < High < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    /// Grade `value` against `threshold`.
    #[must_use]
    pub fn ladder(value: f64, threshold: f64, high_factor: f64) -> Self {
        if value <= threshold * 0.5 {
            Severity::Info
        } else if value <= threshold * 0.75 {
            Severity::Low
        } else if value <= threshold {
            Severity::Moderate
        } else if value <= threshold * high_factor {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    /// Sort key that puts `Critical` first.
    #[must_use]
    pub fn urgency_rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Moderate => 2,
            Severity::Low => 3,
            Severity::Info => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse coupling grade from the raw CBO value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingLevel {
    #[default]
    Excellent,
    Good,
    Moderate,
    High,
    Critical,
}

impl CouplingLevel {
    #[must_use]
    pub fn from_cbo(cbo: usize) -> Self {
        match cbo {
            0..=3 => CouplingLevel::Excellent,
            4..=6 => CouplingLevel::Good,
            7..=10 => CouplingLevel::Moderate,
            11..=15 => CouplingLevel::High,
            _ => CouplingLevel::Critical,
        }
    }
}

/// Coarse cohesion grade from the raw LCOM value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohesionLevel {
    #[default]
    Excellent,
    Good,
    Moderate,
    Low,
    Critical,
}

impl CohesionLevel {
    #[must_use]
    pub fn from_lcom(lcom: f64) -> Self {
        if lcom <= 0.2 {
            CohesionLevel::Excellent
        } else if lcom <= 0.4 {
            CohesionLevel::Good
        } else if lcom <= 0.6 {
            CohesionLevel::Moderate
        } else if lcom <= 0.8 {
            CohesionLevel::Low
        } else {
            CohesionLevel::Critical
        }
    }
}

#[must_use]
pub fn coupling_severity(cbo: usize, thresholds: &OopThresholds) -> Severity {
    Severity::ladder(cbo as f64, thresholds.cbo as f64, DEFAULT_HIGH_FACTOR)
}

/// The worse of the DIT and NOC ratios. A zero threshold contributes ratio 0.
#[must_use]
pub fn inheritance_severity(dit: usize, noc: usize, thresholds: &OopThresholds) -> Severity {
    let ratio = guarded_ratio(dit, thresholds.dit).max(guarded_ratio(noc, thresholds.noc));
    Severity::ladder(ratio, 1.0, DEFAULT_HIGH_FACTOR)
}

#[must_use]
pub fn cohesion_severity(lcom: f64, thresholds: &OopThresholds) -> Severity {
    Severity::ladder(lcom, thresholds.lcom, COHESION_HIGH_FACTOR)
}

/// The worse of the RFC and WMC ratios.
#[must_use]
pub fn rfc_severity(rfc: usize, wmc: usize, thresholds: &OopThresholds) -> Severity {
    let ratio = guarded_ratio(rfc, thresholds.rfc).max(guarded_ratio(wmc, thresholds.wmc));
    Severity::ladder(ratio, 1.0, DEFAULT_HIGH_FACTOR)
}
