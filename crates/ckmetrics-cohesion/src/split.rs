//! Split suggestions for low-cohesion classes.
//!
//! Regular methods are nodes; two methods are connected when they touch a
//! common attribute. Each connected component with at least two methods is a
//! candidate class. Part numbers follow the component's position among all
//! components, singletons included.

use std::collections::{BTreeMap, BTreeSet};

use ckmetrics_types::CohesionMetrics;

/// LCOM below this is cohesive enough that no split is proposed.
pub const SPLIT_LCOM_FLOOR: f64 = 0.5;

/// A proposed extraction: a name and the methods that would move together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSuggestion {
    pub name: String,
    pub methods: BTreeSet<String>,
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}

/// Groups of `regular` methods connected through shared attributes, in order
/// of their alphabetically first member.
pub fn method_groups(
    usage: &BTreeMap<String, BTreeSet<String>>,
    regular: &BTreeSet<String>,
) -> Vec<BTreeSet<String>> {
    let methods: Vec<(&String, &BTreeSet<String>)> = usage
        .iter()
        .filter(|(name, _)| regular.contains(name.as_str()))
        .collect();

    let mut uf = UnionFind::new(methods.len());
    let mut by_attr: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, (_, attrs)) in methods.iter().enumerate() {
        for attr in attrs.iter() {
            match by_attr.get(attr.as_str()) {
                Some(&first) => uf.union(first, idx),
                None => {
                    by_attr.insert(attr.as_str(), idx);
                }
            }
        }
    }

    let mut groups: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    let mut root_order: Vec<usize> = Vec::new();
    for (idx, (name, _)) in methods.iter().enumerate() {
        let root = uf.find(idx);
        if !groups.contains_key(&root) {
            root_order.push(root);
        }
        groups.entry(root).or_default().insert((*name).clone());
    }
    root_order
        .into_iter()
        .filter_map(|root| groups.remove(&root))
        .collect()
}

/// Propose `<Class>Part<n>` extractions for a class with `lcom >= 0.5`.
pub fn suggest_splits(metrics: &CohesionMetrics) -> Vec<SplitSuggestion> {
    if metrics.lcom < SPLIT_LCOM_FLOOR {
        return Vec::new();
    }
    method_groups(&metrics.per_method_attr_usage, &metrics.regular_methods)
        .into_iter()
        .enumerate()
        .filter(|(_, g)| g.len() >= 2)
        .map(|(i, methods)| SplitSuggestion {
            name: format!("{}Part{}", metrics.class_name, i + 1),
            methods,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(rows: &[(&str, &[&str])]) -> BTreeMap<String, BTreeSet<String>> {
        rows.iter()
            .map(|(m, attrs)| {
                (
                    m.to_string(),
                    attrs.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect()
    }

    fn names(u: &BTreeMap<String, BTreeSet<String>>, skip: &[&str]) -> BTreeSet<String> {
        u.keys().filter(|k| !skip.contains(&k.as_str())).cloned().collect()
    }

    #[test]
    fn transitive_sharing_forms_one_group() {
        let u = usage(&[("a", &["x"]), ("b", &["x", "y"]), ("c", &["y"])]);
        assert_eq!(method_groups(&u, &names(&u, &[])).len(), 1);
    }

    #[test]
    fn non_regular_methods_are_not_grouped() {
        let u = usage(&[("_load", &["x"]), ("read", &["x"]), ("write", &["y"])]);
        let groups = method_groups(&u, &names(&u, &["_load"]));
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| !g.contains("_load")));
    }

    #[test]
    fn part_numbers_count_singleton_components() {
        let u = usage(&[("alpha", &["solo"]), ("beta", &["x"]), ("gamma", &["x"])]);
        let m = CohesionMetrics {
            class_name: "Mixed".into(),
            lcom: 0.67,
            regular_methods: names(&u, &[]),
            per_method_attr_usage: u,
            ..CohesionMetrics::default()
        };
        let got = suggest_splits(&m);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "MixedPart2");
    }

    #[test]
    fn cohesive_class_gets_no_suggestion() {
        let m = CohesionMetrics {
            class_name: "Tidy".into(),
            lcom: 0.2,
            per_method_attr_usage: usage(&[("a", &["x"]), ("b", &["y"])]),
            ..CohesionMetrics::default()
        };
        assert!(suggest_splits(&m).is_empty());
    }

    #[test]
    fn two_clusters_are_named_in_order() {
        let u = usage(&[
            ("load_user", &["users"]),
            ("save_user", &["users"]),
            ("render", &["template"]),
            ("send_mail", &["smtp"]),
            ("queue_mail", &["smtp"]),
        ]);
        let m = CohesionMetrics {
            class_name: "Manager".into(),
            lcom: 0.67,
            regular_methods: names(&u, &[]),
            per_method_attr_usage: u,
            ..CohesionMetrics::default()
        };
        let got = suggest_splits(&m);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "ManagerPart1");
        assert_eq!(
            got[0].methods,
            BTreeSet::from(["load_user".to_string(), "save_user".to_string()])
        );
        assert_eq!(got[1].name, "ManagerPart2");
        assert!(got[1].methods.contains("send_mail"));
    }
}
