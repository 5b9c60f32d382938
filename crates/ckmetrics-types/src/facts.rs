//! Structural facts produced by a fact extractor.
//!
//! A fact extractor (any language front-end) reduces each source unit to the
//! records below. The engine never looks at source text; everything it knows
//! about a class comes from these facts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix that marks a member as private by convention.
pub const PRIVACY_MARKER: char = '_';

/// Malformed fact records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactError {
    #[error("class in {file} has an empty name")]
    EmptyClassName { file: String },

    #[error("class '{class}' has a method with an empty name")]
    EmptyMethodName { class: String },

    #[error("method '{class}.{method}' has cyclomatic complexity 0 (must be >= 1)")]
    ZeroComplexity { class: String, method: String },
}

/// Where a class is defined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    #[serde(default)]
    pub end_line: usize,
}

/// One method as extracted from source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MethodFactRecord")]
pub struct MethodFact {
    pub name: String,
    /// `false` when the name carries the privacy marker.
    pub is_public: bool,
    /// Attributes read or written through the enclosing instance.
    pub accessed_attributes: BTreeSet<String>,
    /// Methods invoked on the enclosing instance.
    pub self_called_methods: BTreeSet<String>,
    /// Call targets on some other receiver, possibly dotted.
    pub external_call_targets: BTreeSet<String>,
    /// Bare names read in the body (constructor calls, receivers such as `Other.method`).
    pub referenced_names: BTreeSet<String>,
    /// Names used in parameter, return and variable annotations.
    pub type_references: BTreeSet<String>,
    pub cyclomatic_complexity: u32,
}

/// Wire form of [`MethodFact`]. An omitted `is_public` follows the name.
#[derive(Deserialize)]
struct MethodFactRecord {
    name: String,
    #[serde(default)]
    is_public: Option<bool>,
    #[serde(default)]
    accessed_attributes: BTreeSet<String>,
    #[serde(default)]
    self_called_methods: BTreeSet<String>,
    #[serde(default)]
    external_call_targets: BTreeSet<String>,
    #[serde(default)]
    referenced_names: BTreeSet<String>,
    #[serde(default)]
    type_references: BTreeSet<String>,
    #[serde(default = "default_complexity")]
    cyclomatic_complexity: u32,
}

fn default_complexity() -> u32 {
    1
}

impl From<MethodFactRecord> for MethodFact {
    fn from(r: MethodFactRecord) -> Self {
        Self {
            is_public: r.is_public.unwrap_or_else(|| !r.name.starts_with(PRIVACY_MARKER)),
            name: r.name,
            accessed_attributes: r.accessed_attributes,
            self_called_methods: r.self_called_methods,
            external_call_targets: r.external_call_targets,
            referenced_names: r.referenced_names,
            type_references: r.type_references,
            cyclomatic_complexity: r.cyclomatic_complexity,
        }
    }
}

impl MethodFact {
    /// A method with no recorded accesses and complexity 1.
    ///
    /// Visibility follows the privacy-marker convention.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            is_public: !name.starts_with(PRIVACY_MARKER),
            name,
            accessed_attributes: BTreeSet::new(),
            self_called_methods: BTreeSet::new(),
            external_call_targets: BTreeSet::new(),
            referenced_names: BTreeSet::new(),
            type_references: BTreeSet::new(),
            cyclomatic_complexity: 1,
        }
    }

    pub fn accessing<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accessed_attributes
            .extend(attrs.into_iter().map(Into::into));
        self
    }

    pub fn calling_self<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_called_methods
            .extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn calling<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_call_targets
            .extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn referencing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn annotated_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_references
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.cyclomatic_complexity = complexity;
        self
    }

}

/// One class as extracted from source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFact {
    pub name: String,
    pub location: SourceLocation,
    /// Superclass names as written, possibly dotted (`module.Base`).
    #[serde(default)]
    pub base_names: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodFact>,
    /// Attributes assigned at class-body scope.
    #[serde(default)]
    pub class_attributes: BTreeSet<String>,
    /// Attributes the constructor assigns onto the instance.
    #[serde(default)]
    pub instance_attributes: BTreeSet<String>,
}

impl ClassFact {
    pub fn new(name: impl Into<String>, file: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            location: SourceLocation {
                file: file.into(),
                line,
                end_line: line,
            },
            base_names: Vec::new(),
            methods: Vec::new(),
            class_attributes: BTreeSet::new(),
            instance_attributes: BTreeSet::new(),
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_names.push(base.into());
        self
    }

    pub fn with_method(mut self, method: MethodFact) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_class_attribute(mut self, attr: impl Into<String>) -> Self {
        self.class_attributes.insert(attr.into());
        self
    }

    pub fn with_instance_attribute(mut self, attr: impl Into<String>) -> Self {
        self.instance_attributes.insert(attr.into());
        self
    }

    pub fn with_end_line(mut self, end_line: usize) -> Self {
        self.location.end_line = end_line;
        self
    }

    /// Class-level and instance-level attributes together.
    pub fn attributes(&self) -> BTreeSet<String> {
        self.class_attributes
            .union(&self.instance_attributes)
            .cloned()
            .collect()
    }

    /// Methods without the privacy marker.
    pub fn regular_methods(&self) -> impl Iterator<Item = &MethodFact> {
        self.methods.iter().filter(|m| m.is_public)
    }

    /// Check names are present and every method complexity is at least 1.
    pub fn validate(&self) -> Result<(), FactError> {
        self.validate_names()?;
        for method in &self.methods {
            if method.cyclomatic_complexity == 0 {
                return Err(FactError::ZeroComplexity {
                    class: self.name.clone(),
                    method: method.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The subset of [`ClassFact::validate`] that does not look at complexity.
    pub fn validate_names(&self) -> Result<(), FactError> {
        if self.name.trim().is_empty() {
            return Err(FactError::EmptyClassName {
                file: self.location.file.clone(),
            });
        }
        if self.methods.iter().any(|m| m.name.trim().is_empty()) {
            return Err(FactError::EmptyMethodName {
                class: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// All facts for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacts {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub relative_path: String,
    /// Names bound by imports in this file.
    #[serde(default)]
    pub imported_names: BTreeSet<String>,
    #[serde(default)]
    pub classes: Vec<ClassFact>,
}

impl FileFacts {
    pub fn new(path: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
            imported_names: BTreeSet::new(),
            classes: Vec::new(),
        }
    }

    pub fn with_import(mut self, name: impl Into<String>) -> Self {
        self.imported_names.insert(name.into());
        self
    }

    pub fn with_class(mut self, class: ClassFact) -> Self {
        self.classes.push(class);
        self
    }
}

/// The scanned universe: files in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    pub files: Vec<FileFacts>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: FileFacts) {
        self.files.push(file);
    }

    pub fn with_file(mut self, file: FileFacts) -> Self {
        self.files.push(file);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.files.iter().map(|f| f.classes.len()).sum()
    }
}
