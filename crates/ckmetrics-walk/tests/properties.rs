use std::fs;

use ckmetrics_walk::{WalkOptions, list_files};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_listing_is_sorted_and_complete(stems in prop::collection::btree_set("[a-z]{1,8}", 1..8)) {
        let dir = tempfile::tempdir().unwrap();
        for stem in &stems {
            fs::write(dir.path().join(format!("{stem}.py")), "").unwrap();
        }
        let files = list_files(dir.path(), &WalkOptions::default()).unwrap();
        let got: Vec<String> = files.iter().map(|p| p.to_string_lossy().to_string()).collect();
        let expected: Vec<String> = stems
            .iter()
            .map(|s| format!("{s}.py"))
            .collect();
        let mut sorted = got.clone();
        sorted.sort();
        prop_assert_eq!(&got, &sorted);
        prop_assert_eq!(got, expected);
    }
}
