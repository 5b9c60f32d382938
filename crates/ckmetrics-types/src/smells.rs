//! Design-smell vocabulary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named design anti-pattern detected from metric combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSmell {
    GodClass,
    DataClass,
    FeatureEnvy,
    DeepHierarchy,
    WideHierarchy,
    UnstableClass,
    Blob,
}

impl DesignSmell {
    pub const ALL: [DesignSmell; 7] = [
        DesignSmell::GodClass,
        DesignSmell::DataClass,
        DesignSmell::FeatureEnvy,
        DesignSmell::DeepHierarchy,
        DesignSmell::WideHierarchy,
        DesignSmell::UnstableClass,
        DesignSmell::Blob,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DesignSmell::GodClass => "god_class",
            DesignSmell::DataClass => "data_class",
            DesignSmell::FeatureEnvy => "feature_envy",
            DesignSmell::DeepHierarchy => "deep_hierarchy",
            DesignSmell::WideHierarchy => "wide_hierarchy",
            DesignSmell::UnstableClass => "unstable_class",
            DesignSmell::Blob => "blob",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DesignSmell::GodClass => "high coupling, low cohesion and high complexity",
            DesignSmell::DataClass => "many attributes with little behavior",
            DesignSmell::FeatureEnvy => "calls other classes more than it uses itself",
            DesignSmell::DeepHierarchy => "inheritance depth over threshold",
            DesignSmell::WideHierarchy => "direct subclasses over threshold",
            DesignSmell::UnstableClass => "depends on many classes while few depend on it",
            DesignSmell::Blob => "weighted method complexity over twice the threshold",
        }
    }
}

impl fmt::Display for DesignSmell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualified class names (`relative_path:ClassName`) affected by each smell.
///
/// Every smell kind has an entry, possibly empty. Names keep report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSmellReport {
    pub smells: BTreeMap<DesignSmell, Vec<String>>,
}

impl Default for DesignSmellReport {
    fn default() -> Self {
        Self {
            smells: DesignSmell::ALL.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }
}

impl DesignSmellReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, smell: DesignSmell, qualified_name: impl Into<String>) {
        self.smells
            .entry(smell)
            .or_default()
            .push(qualified_name.into());
    }

    pub fn affected(&self, smell: DesignSmell) -> &[String] {
        self.smells.get(&smell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn god_classes(&self) -> &[String] {
        self.affected(DesignSmell::GodClass)
    }

    /// Every smell a given class matched.
    pub fn smells_for(&self, qualified_name: &str) -> Vec<DesignSmell> {
        self.smells
            .iter()
            .filter(|(_, names)| names.iter().any(|n| n == qualified_name))
            .map(|(smell, _)| *smell)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.smells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
