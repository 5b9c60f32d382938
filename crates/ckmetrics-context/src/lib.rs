//! # ckmetrics-context
//!
//! **Tier 1 (Scan Context)**
//!
//! The explicit per-scan state every analyzer reads: the normalized fact set,
//! the project-wide class-name index, per-file imports and the DIT memo.
//! Owned by one scan invocation and dropped at its end.
//!
//! ## What belongs here
//! * Fact normalization (class ordering, duplicate resolution)
//! * Class-name lookup and attribution
//! * Caches shared across analyzers
//!
//! ## What does NOT belong here
//! * Metric formulas (use the analyzer crates)
//! * File I/O

#![forbid(unsafe_code)]

mod names;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use ckmetrics_types::{ClassFact, FactSet, FileFacts, MethodFact};
use tracing::warn;

pub use names::{is_builtin_name, trailing_identifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    file: usize,
    class: usize,
}

/// One class in the universe together with the file defining it.
#[derive(Debug, Clone, Copy)]
pub struct ClassView<'a> {
    pub file: &'a FileFacts,
    pub class: &'a ClassFact,
}

impl ClassView<'_> {
    pub fn name(&self) -> &str {
        &self.class.name
    }
}

/// The scanned universe for one run.
#[derive(Debug, Default)]
pub struct ScanContext {
    facts: FactSet,
    index: BTreeMap<String, Slot>,
    order: Vec<Slot>,
    warnings: Vec<String>,
    dit_memo: Mutex<BTreeMap<String, usize>>,
}

impl ScanContext {
    /// Normalize `facts` and index every class by name.
    ///
    /// Classes in each file are ordered by `(line, name)`. Nameless classes are
    /// dropped. When a class name is defined twice the later definition in
    /// input order wins, and when a method name repeats inside a class the
    /// later method wins. Each such case is recorded as a warning.
    pub fn new(mut facts: FactSet) -> Self {
        let mut warnings = Vec::new();

        for file in &mut facts.files {
            file.classes.retain(|class| match class.validate_names() {
                Ok(()) => true,
                Err(err) if class.name.trim().is_empty() => {
                    let msg = format!("{}: skipped class: {err}", file.relative_path);
                    warn!("{msg}");
                    warnings.push(msg);
                    false
                }
                Err(_) => true,
            });
            file.classes
                .sort_by(|a, b| (a.location.line, &a.name).cmp(&(b.location.line, &b.name)));
            for class in &mut file.classes {
                if let Some(msg) = dedupe_methods(class, &file.relative_path) {
                    warn!("{msg}");
                    warnings.push(msg);
                }
            }
        }

        let mut index: BTreeMap<String, Slot> = BTreeMap::new();
        for (fi, file) in facts.files.iter().enumerate() {
            for (ci, class) in file.classes.iter().enumerate() {
                let slot = Slot { file: fi, class: ci };
                if let Some(prev) = index.insert(class.name.clone(), slot) {
                    let prev_file = &facts.files[prev.file].relative_path;
                    let msg = format!(
                        "duplicate class name '{}': {}:{} replaces {}",
                        class.name, file.relative_path, class.location.line, prev_file
                    );
                    warn!("{msg}");
                    warnings.push(msg);
                }
            }
        }

        let winners: BTreeSet<(usize, usize)> =
            index.values().map(|s| (s.file, s.class)).collect();
        let order = winners
            .into_iter()
            .map(|(file, class)| Slot { file, class })
            .collect();

        Self {
            facts,
            index,
            order,
            warnings,
            dit_memo: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn facts(&self) -> &FactSet {
        &self.facts
    }

    pub fn files(&self) -> &[FileFacts] {
        &self.facts.files
    }

    /// Every distinct class, in file input order then `(line, name)`.
    pub fn classes(&self) -> impl Iterator<Item = ClassView<'_>> {
        self.order.iter().map(|slot| self.view(*slot))
    }

    pub fn class_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_known_class(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// The definition attributed to `name`.
    pub fn lookup(&self, name: &str) -> Option<ClassView<'_>> {
        self.index.get(name).map(|slot| self.view(*slot))
    }

    /// Resolve a base or call target as written to a known class name.
    pub fn resolve<'a>(&self, written: &'a str) -> Option<&'a str> {
        let name = trailing_identifier(written);
        self.is_known_class(name).then_some(name)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Previously computed inheritance depth for `name`.
    pub fn cached_dit(&self, name: &str) -> Option<usize> {
        self.memo().get(name).copied()
    }

    pub fn cache_dit(&self, name: &str, dit: usize) {
        self.memo().insert(name.to_string(), dit);
    }

    fn memo(&self) -> MutexGuard<'_, BTreeMap<String, usize>> {
        self.dit_memo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn view(&self, slot: Slot) -> ClassView<'_> {
        let file = &self.facts.files[slot.file];
        ClassView {
            file,
            class: &file.classes[slot.class],
        }
    }
}

/// Keep the last method of each name, in original position order of survivors.
fn dedupe_methods(class: &mut ClassFact, rel_path: &str) -> Option<String> {
    let mut last: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, m) in class.methods.iter().enumerate() {
        last.insert(m.name.as_str(), i);
    }
    if last.len() == class.methods.len() {
        return None;
    }
    let keep: BTreeSet<usize> = last.into_values().collect();
    let dropped = class.methods.len() - keep.len();
    let methods: Vec<MethodFact> = std::mem::take(&mut class.methods)
        .into_iter()
        .enumerate()
        .filter_map(|(i, m)| keep.contains(&i).then_some(m))
        .collect();
    class.methods = methods;
    Some(format!(
        "{rel_path}: class '{}' redefines {dropped} method(s); last definition kept",
        class.name
    ))
}
