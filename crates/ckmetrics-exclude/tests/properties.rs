use ckmetrics_exclude::{is_excluded, is_test_path, normalize_rel_path};
use proptest::prelude::*;

fn arb_component() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(path in "[a-z./\\\\]{0,30}") {
        let once = normalize_rel_path(&path);
        let twice = normalize_rel_path(&once);
        // Only one leading `./` is stripped per pass.
        if !once.starts_with("./") {
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn prop_component_pattern_matches_its_own_directory(
        prefix in prop::collection::vec(arb_component(), 0..3),
        dir in arb_component(),
        file in arb_component(),
    ) {
        let mut parts = prefix;
        parts.push(dir.clone());
        parts.push(format!("{file}.py"));
        let path = parts.join("/");
        prop_assert!(is_excluded(&path, &[dir]));
    }

    #[test]
    fn prop_no_patterns_excludes_nothing(path in "[a-z/]{1,30}") {
        prop_assert!(!is_excluded(&path, &[]));
    }

    #[test]
    fn prop_tests_directory_is_always_test_path(
        prefix in prop::collection::vec(arb_component(), 0..3),
        file in arb_component(),
    ) {
        let mut parts = prefix;
        parts.push("tests".to_string());
        parts.push(format!("{file}.py"));
        prop_assert!(is_test_path(&parts.join("/")));
    }
}
