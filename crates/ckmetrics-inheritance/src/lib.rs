//! # ckmetrics-inheritance
//!
//! **Tier 2 (Analyzer)**
//!
//! Depth of Inheritance Tree (DIT) and Number of Children (NOC) over the
//! scanned universe. Base names are resolved by trailing identifier; bases
//! outside the universe count as roots and add nothing to DIT.
//!
//! DIT resolution is cycle-safe. A class on an inheritance cycle has depth 0
//! and a class inheriting from a cycle member counts that member as depth 0.
//! Completed depths are memoized in the [`ScanContext`].
//!
//! ## What belongs here
//! * Children map, DIT, NOC and ancestor listing
//! * Inheritance tree and root-class queries
//!
//! ## What does NOT belong here
//! * Combination with other metrics (use ckmetrics-analysis)

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use ckmetrics_context::ScanContext;
use ckmetrics_types::severity::inheritance_severity;
use ckmetrics_types::{ClassFact, InheritanceMetrics, OopThresholds};
use tracing::{debug, warn};

/// Bases of `class` that name a class in the universe, in written order, once each.
pub fn resolvable_bases<'a>(ctx: &ScanContext, class: &'a ClassFact) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    class
        .base_names
        .iter()
        .filter_map(|b| ctx.resolve(b))
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Parent name to its direct subclasses, for every class in the universe.
///
/// Subclasses appear in universe order and at most once per parent.
pub fn children_map(ctx: &ScanContext) -> BTreeMap<String, Vec<String>> {
    let mut children: BTreeMap<String, Vec<String>> = ctx
        .classes()
        .map(|v| (v.name().to_string(), Vec::new()))
        .collect();
    for view in ctx.classes() {
        for parent in resolvable_bases(ctx, view.class) {
            if let Some(list) = children.get_mut(parent) {
                list.push(view.name().to_string());
            }
        }
    }
    children
}

/// Depth of the longest resolvable base chain above `name`.
pub fn calculate_dit(ctx: &ScanContext, name: &str) -> usize {
    let mut chain = Vec::new();
    dit_in_chain(ctx, name, &mut chain).0
}

/// Returns the depth and the chain members re-entered below `name` that are
/// still open above it. A non-empty open set means `name` sits on a cycle.
fn dit_in_chain(ctx: &ScanContext, name: &str, chain: &mut Vec<String>) -> (usize, BTreeSet<String>) {
    if let Some(dit) = ctx.cached_dit(name) {
        return (dit, BTreeSet::new());
    }
    if chain.iter().any(|c| c == name) {
        return (0, BTreeSet::from([name.to_string()]));
    }
    let Some(view) = ctx.lookup(name) else {
        return (0, BTreeSet::new());
    };

    chain.push(name.to_string());
    let mut deepest: Option<usize> = None;
    let mut open = BTreeSet::new();
    for base in resolvable_bases(ctx, view.class) {
        let (dit, reentered) = dit_in_chain(ctx, base, chain);
        deepest = Some(deepest.map_or(dit, |d| d.max(dit)));
        open.extend(reentered);
    }
    chain.pop();

    let on_cycle = !open.is_empty();
    open.remove(name);
    let dit = if on_cycle {
        warn!(class = name, "inheritance cycle; depth reported as 0");
        0
    } else {
        deepest.map_or(0, |d| d + 1)
    };
    ctx.cache_dit(name, dit);
    (dit, open)
}

/// Every resolvable ancestor of `name`, depth-first in discovery order,
/// each once, never `name` itself.
pub fn ancestors(ctx: &ScanContext, name: &str) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::from([name.to_string()]);
    let mut out = Vec::new();
    collect_ancestors(ctx, name, &mut seen, &mut out);
    out
}

fn collect_ancestors(ctx: &ScanContext, name: &str, seen: &mut BTreeSet<String>, out: &mut Vec<String>) {
    let Some(view) = ctx.lookup(name) else {
        return;
    };
    for base in resolvable_bases(ctx, view.class) {
        if seen.insert(base.to_string()) {
            out.push(base.to_string());
            collect_ancestors(ctx, base, seen, out);
        }
    }
}

/// Inheritance metrics for every well-formed class in the universe.
pub fn analyze_inheritance(
    ctx: &ScanContext,
    thresholds: &OopThresholds,
) -> BTreeMap<String, InheritanceMetrics> {
    let children = children_map(ctx);
    let mut result = BTreeMap::new();

    for view in ctx.classes() {
        if let Err(err) = view.class.validate_names() {
            warn!(class = view.name(), "inheritance skipped: {err}");
            continue;
        }
        let name = view.name();
        let dit = calculate_dit(ctx, name);
        let direct_subclasses = children.get(name).cloned().unwrap_or_default();
        let noc = direct_subclasses.len();
        result.insert(
            name.to_string(),
            InheritanceMetrics {
                class_name: name.to_string(),
                dit,
                noc,
                base_classes: view.class.base_names.clone(),
                direct_subclasses,
                ancestors: ancestors(ctx, name),
                severity: inheritance_severity(dit, noc, thresholds),
            },
        );
    }

    debug!(classes = result.len(), "inheritance analysis complete");
    result
}

/// Parents with at least one direct subclass.
pub fn inheritance_tree(
    metrics: &BTreeMap<String, InheritanceMetrics>,
) -> BTreeMap<String, Vec<String>> {
    metrics
        .values()
        .filter(|m| !m.direct_subclasses.is_empty())
        .map(|m| (m.class_name.clone(), m.direct_subclasses.clone()))
        .collect()
}

/// Classes without a base inside the universe, in universe order.
pub fn root_classes(ctx: &ScanContext) -> Vec<String> {
    ctx.classes()
        .filter(|v| resolvable_bases(ctx, v.class).is_empty())
        .map(|v| v.name().to_string())
        .collect()
}
