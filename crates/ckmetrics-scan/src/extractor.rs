//! The seam between source files and the fact model.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ckmetrics_exclude::{has_extension, normalize_rel_path};
use ckmetrics_settings::OopSettings;
use ckmetrics_types::FileFacts;

/// Turns one source unit into [`FileFacts`].
///
/// Implementations are language front-ends. A failed extraction skips the
/// unit; it never aborts the scan.
pub trait FactExtractor {
    /// Whether the root-relative `relative` path is a unit this extractor reads.
    fn accepts(&self, relative: &Path) -> bool;

    /// The root-relative source file a unit describes. Exclusion and test-path
    /// rules are checked against this path.
    fn described_source(&self, relative: &Path) -> PathBuf {
        relative.to_path_buf()
    }

    /// Extract facts for the unit at `root/relative`.
    fn extract(&self, root: &Path, relative: &Path) -> Result<FileFacts>;
}

/// Suffix of the sidecar fact files read by [`JsonFactExtractor`].
pub const FACTS_SUFFIX: &str = ".facts.json";

/// Reads facts written by an out-of-process front-end.
///
/// For a source file `pkg/models.py` the front-end writes
/// `pkg/models.py.facts.json` holding one serialized [`FileFacts`]. Path
/// fields inside the document are replaced by the source location.
#[derive(Debug, Clone)]
pub struct JsonFactExtractor {
    extensions: Vec<String>,
}

impl Default for JsonFactExtractor {
    fn default() -> Self {
        Self::from_settings(&OopSettings::default())
    }
}

impl JsonFactExtractor {
    /// Accept sidecars of sources with one of the configured extensions.
    pub fn from_settings(settings: &OopSettings) -> Self {
        Self {
            extensions: settings.normalized_extensions(),
        }
    }

    /// The source path a sidecar describes, if `relative` is a sidecar.
    pub fn source_path(relative: &str) -> Option<&str> {
        relative
            .strip_suffix(FACTS_SUFFIX)
            .filter(|source| !source.is_empty() && !source.ends_with('/'))
    }
}

impl FactExtractor for JsonFactExtractor {
    fn accepts(&self, relative: &Path) -> bool {
        let rel = normalize_rel_path(&relative.to_string_lossy());
        Self::source_path(&rel).is_some_and(|source| has_extension(source, &self.extensions))
    }

    fn described_source(&self, relative: &Path) -> PathBuf {
        let rel = normalize_rel_path(&relative.to_string_lossy());
        PathBuf::from(Self::source_path(&rel).unwrap_or(&rel))
    }

    fn extract(&self, root: &Path, relative: &Path) -> Result<FileFacts> {
        let sidecar = root.join(relative);
        let content = std::fs::read_to_string(&sidecar)
            .with_context(|| format!("Failed to read {}", sidecar.display()))?;
        let mut facts: FileFacts = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse facts in {}", sidecar.display()))?;

        let rel = normalize_rel_path(&relative.to_string_lossy());
        let source = Self::source_path(&rel).unwrap_or(&rel).to_string();
        facts.path = root.join(&source).display().to_string();
        for class in &mut facts.classes {
            if class.location.file.is_empty() {
                class.location.file = source.clone();
            }
        }
        facts.relative_path = source;
        Ok(facts)
    }
}
