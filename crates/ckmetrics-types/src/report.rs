//! File-level and project-level aggregates.
//!
//! Both aggregates keep running sums for their averages and recompute maxima
//! over the full current class set on every append.

use std::collections::BTreeMap;

use ckmetrics_math::{max_or_zero, mean};
use serde::{Deserialize, Serialize};

use crate::metrics::ClassOopMetrics;
use crate::severity::Severity;
use crate::{OOP_SCHEMA_VERSION, OopThresholds};

/// Running sums behind the averages. Not part of the serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Sums {
    cbo: usize,
    dit: usize,
    lcom: f64,
    rfc: usize,
    wmc: usize,
}

impl Sums {
    fn add(&mut self, cls: &ClassOopMetrics) {
        self.cbo += cls.cbo;
        self.dit += cls.dit;
        self.lcom += cls.lcom;
        self.rfc += cls.rfc;
        self.wmc += cls.wmc;
    }
}

/// OOP analysis for one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileOopAnalysis {
    pub file_path: String,
    pub relative_path: String,
    pub classes: Vec<ClassOopMetrics>,

    pub total_classes: usize,
    pub total_methods: usize,
    pub average_cbo: f64,
    pub average_dit: f64,
    pub average_lcom: f64,
    pub average_rfc: f64,
    pub average_wmc: f64,
    pub max_cbo: usize,
    pub max_dit: usize,
    pub max_noc: usize,
    pub max_lcom: f64,
    pub max_rfc: usize,
    pub max_wmc: usize,

    /// Classes in this file breaching at least one threshold.
    pub violations: Vec<ClassOopMetrics>,

    #[serde(skip)]
    sums: Sums,
}

impl FileOopAnalysis {
    pub fn new(file_path: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            relative_path: relative_path.into(),
            ..Self::default()
        }
    }

    /// Append a class and refresh the rollups.
    pub fn add_class(&mut self, cls: ClassOopMetrics) {
        self.sums.add(&cls);
        self.total_methods += cls.method_count;
        if cls.has_violations() {
            self.violations.push(cls.clone());
        }
        self.classes.push(cls);

        let n = self.classes.len();
        self.total_classes = n;
        self.average_cbo = mean(self.sums.cbo as f64, n);
        self.average_dit = mean(self.sums.dit as f64, n);
        self.average_lcom = mean(self.sums.lcom, n);
        self.average_rfc = mean(self.sums.rfc as f64, n);
        self.average_wmc = mean(self.sums.wmc as f64, n);

        self.max_cbo = self.classes.iter().map(|c| c.cbo).max().unwrap_or(0);
        self.max_dit = self.classes.iter().map(|c| c.dit).max().unwrap_or(0);
        self.max_noc = self.classes.iter().map(|c| c.noc).max().unwrap_or(0);
        self.max_lcom = max_or_zero(self.classes.iter().map(|c| c.lcom));
        self.max_rfc = self.classes.iter().map(|c| c.rfc).max().unwrap_or(0);
        self.max_wmc = self.classes.iter().map(|c| c.wmc).max().unwrap_or(0);
    }
}

/// Complete OOP analysis for one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OopReport {
    pub schema_version: u32,
    pub scan_path: String,
    pub thresholds: OopThresholds,

    pub file_analyses: Vec<FileOopAnalysis>,
    pub class_metrics: Vec<ClassOopMetrics>,
    /// Classes breaching any threshold, most severe first once sorted.
    pub violations: Vec<ClassOopMetrics>,

    pub total_files_scanned: usize,
    pub total_classes_analyzed: usize,
    pub total_violations: usize,

    pub average_cbo: f64,
    pub average_dit: f64,
    pub average_lcom: f64,
    pub average_rfc: f64,
    pub average_wmc: f64,

    pub max_cbo: usize,
    pub max_dit: usize,
    pub max_noc: usize,
    pub max_lcom: f64,
    pub max_rfc: usize,
    pub max_wmc: usize,

    /// Skipped units, duplicate names and malformed classes.
    pub warnings: Vec<String>,

    #[serde(skip)]
    sums: Sums,
}

impl OopReport {
    pub fn new(scan_path: impl Into<String>, thresholds: OopThresholds) -> Self {
        Self {
            schema_version: OOP_SCHEMA_VERSION,
            scan_path: scan_path.into(),
            thresholds,
            ..Self::default()
        }
    }

    /// Fold one file into the project totals.
    pub fn add_file_analysis(&mut self, analysis: FileOopAnalysis) {
        for cls in &analysis.classes {
            self.sums.add(cls);
        }
        self.class_metrics.extend(analysis.classes.iter().cloned());
        self.violations.extend(analysis.violations.iter().cloned());
        self.file_analyses.push(analysis);

        self.total_files_scanned = self.file_analyses.len();
        self.total_classes_analyzed = self.class_metrics.len();
        self.total_violations = self.violations.len();

        let n = self.total_classes_analyzed;
        if n == 0 {
            return;
        }
        self.average_cbo = mean(self.sums.cbo as f64, n);
        self.average_dit = mean(self.sums.dit as f64, n);
        self.average_lcom = mean(self.sums.lcom, n);
        self.average_rfc = mean(self.sums.rfc as f64, n);
        self.average_wmc = mean(self.sums.wmc as f64, n);

        self.max_cbo = self.class_metrics.iter().map(|c| c.cbo).max().unwrap_or(0);
        self.max_dit = self.class_metrics.iter().map(|c| c.dit).max().unwrap_or(0);
        self.max_noc = self.class_metrics.iter().map(|c| c.noc).max().unwrap_or(0);
        self.max_lcom = max_or_zero(self.class_metrics.iter().map(|c| c.lcom));
        self.max_rfc = self.class_metrics.iter().map(|c| c.rfc).max().unwrap_or(0);
        self.max_wmc = self.class_metrics.iter().map(|c| c.wmc).max().unwrap_or(0);
    }

    /// Stable sort of `violations`, critical first.
    pub fn sort_violations(&mut self) {
        self.violations
            .sort_by_key(|c| c.overall_severity.urgency_rank());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn has_violations(&self) -> bool {
        self.total_violations > 0
    }

    /// Percentage of analyzed classes without violations; 100 for an empty scan.
    #[must_use]
    pub fn compliance_rate(&self) -> f64 {
        if self.total_classes_analyzed == 0 {
            return 100.0;
        }
        let compliant = self
            .total_classes_analyzed
            .saturating_sub(self.total_violations);
        compliant as f64 / self.total_classes_analyzed as f64 * 100.0
    }

    /// Violations grouped under every severity, empty groups included.
    pub fn violations_by_severity(&self) -> BTreeMap<Severity, Vec<&ClassOopMetrics>> {
        let mut grouped: BTreeMap<Severity, Vec<&ClassOopMetrics>> =
            Severity::ALL.iter().map(|s| (*s, Vec::new())).collect();
        for v in &self.violations {
            grouped.entry(v.overall_severity).or_default().push(v);
        }
        grouped
    }

    pub fn coupling_violations(&self) -> Vec<&ClassOopMetrics> {
        let t = &self.thresholds;
        self.class_metrics.iter().filter(|c| c.cbo > t.cbo).collect()
    }

    pub fn inheritance_violations(&self) -> Vec<&ClassOopMetrics> {
        let t = &self.thresholds;
        self.class_metrics
            .iter()
            .filter(|c| c.dit > t.dit || c.noc > t.noc)
            .collect()
    }

    pub fn cohesion_violations(&self) -> Vec<&ClassOopMetrics> {
        let t = &self.thresholds;
        self.class_metrics
            .iter()
            .filter(|c| c.lcom > t.lcom)
            .collect()
    }

    pub fn rfc_violations(&self) -> Vec<&ClassOopMetrics> {
        let t = &self.thresholds;
        self.class_metrics
            .iter()
            .filter(|c| c.rfc > t.rfc || c.wmc > t.wmc)
            .collect()
    }
}
