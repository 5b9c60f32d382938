//! # ckmetrics-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Threshold and scan settings for the metrics engine. Every option has a
//! default, so an empty document is a valid configuration.
//!
//! ## What belongs here
//! * `OopSettings` with serde defaults
//! * TOML and JSON loading
//! * Validation of option values
//!
//! ## What does NOT belong here
//! * Path matching (use ckmetrics-exclude)
//! * Directory traversal (use ckmetrics-walk)
//! * Metric computation

#![forbid(unsafe_code)]

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ckmetrics_types::OopThresholds;

/// Directory and file fragments skipped unless configured otherwise.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "node_modules",
    ".pytest_cache",
    ".mypy_cache",
    "dist",
    "build",
];

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Options recognized by the engine and the scan workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OopSettings {
    pub cbo_threshold: usize,
    pub dit_threshold: usize,
    pub noc_threshold: usize,
    pub lcom_threshold: f64,
    pub rfc_threshold: usize,
    pub wmc_threshold: usize,

    /// Analyze conventionally named test files and directories too.
    pub include_tests: bool,

    /// Path fragments to skip.
    pub exclude_patterns: Vec<String>,

    /// File extensions handed to the fact extractor.
    pub include_extensions: Vec<String>,

    /// Don't respect ignore files (.gitignore, .ignore, etc.).
    pub no_ignore: bool,
}

impl Default for OopSettings {
    fn default() -> Self {
        let t = OopThresholds::default();
        Self {
            cbo_threshold: t.cbo,
            dit_threshold: t.dit,
            noc_threshold: t.noc,
            lcom_threshold: t.lcom,
            rfc_threshold: t.rfc,
            wmc_threshold: t.wmc,
            include_tests: false,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            include_extensions: vec![".py".to_string()],
            no_ignore: false,
        }
    }
}

impl OopSettings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.lcom_threshold.is_finite() || self.lcom_threshold < 0.0 {
            return Err(SettingsError::Invalid {
                field: "lcom_threshold".into(),
                reason: format!("must be a finite value >= 0, got {}", self.lcom_threshold),
            });
        }
        if self.include_extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(SettingsError::Invalid {
                field: "include_extensions".into(),
                reason: "entries must not be empty".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn thresholds(&self) -> OopThresholds {
        OopThresholds {
            cbo: self.cbo_threshold,
            dit: self.dit_threshold,
            noc: self.noc_threshold,
            lcom: self.lcom_threshold,
            rfc: self.rfc_threshold,
            wmc: self.wmc_threshold,
        }
    }

    /// Replace every threshold at once.
    pub fn with_thresholds(mut self, t: OopThresholds) -> Self {
        self.cbo_threshold = t.cbo;
        self.dit_threshold = t.dit;
        self.noc_threshold = t.noc;
        self.lcom_threshold = t.lcom;
        self.rfc_threshold = t.rfc;
        self.wmc_threshold = t.wmc;
        self
    }

    /// Extensions with a leading dot, lowercased.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.include_extensions
            .iter()
            .map(|e| {
                let e = e.trim().to_ascii_lowercase();
                if e.starts_with('.') { e } else { format!(".{e}") }
            })
            .collect()
    }
}
