use ckmetrics_rfc::class_rfc;
use ckmetrics_types::{ClassFact, MethodFact, OopThresholds};
use proptest::prelude::*;

fn arb_class() -> impl Strategy<Value = ClassFact> {
    prop::collection::btree_map(
        "[a-z]{1,6}",
        (
            1u32..20,
            prop::collection::btree_set("[a-z]{1,4}", 0..4),
            prop::collection::btree_set("([a-z]{1,3}\\.)?[a-z]{1,4}", 0..4),
        ),
        0..8,
    )
    .prop_map(|methods| {
        let mut class = ClassFact::new("Subject", "s.py", 1);
        for (name, (cc, selfs, ext)) in methods {
            class = class.with_method(
                MethodFact::new(name)
                    .with_complexity(cc)
                    .calling_self(selfs)
                    .calling(ext),
            );
        }
        class
    })
}

proptest! {
    #[test]
    fn prop_rfc_is_methods_plus_called(class in arb_class()) {
        let m = class_rfc(&class, &OopThresholds::default()).expect("valid");
        prop_assert_eq!(m.rfc, m.method_count + m.called_methods.len());
        prop_assert!(m.rfc >= m.method_count);
    }

    #[test]
    fn prop_wmc_at_least_method_count(class in arb_class()) {
        let m = class_rfc(&class, &OopThresholds::default()).expect("valid");
        prop_assert!(m.wmc >= m.method_count);
        let sum: u32 = m.per_method_complexity.values().sum();
        prop_assert_eq!(m.wmc, sum as usize);
    }

    #[test]
    fn prop_external_count_bounded_by_called(class in arb_class()) {
        let m = class_rfc(&class, &OopThresholds::default()).expect("valid");
        prop_assert!(m.external_call_count <= m.called_methods.len());
    }
}
