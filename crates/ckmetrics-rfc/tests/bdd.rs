//! BDD-style scenarios for RFC/WMC analysis.

use ckmetrics_context::ScanContext;
use ckmetrics_rfc::{
    analyze_rfc, complexity_hotspots, high_rfc_classes, high_wmc_classes, wmc_hotspots,
};
use ckmetrics_types::{ClassFact, FactSet, FileFacts, MethodFact, OopThresholds, Severity};

fn ctx(classes: Vec<ClassFact>) -> ScanContext {
    let mut file = FileFacts::new("/repo/app.py", "app.py");
    for c in classes {
        file = file.with_class(c);
    }
    ScanContext::new(FactSet::new().with_file(file))
}

// ============================================================================
// Scenario: a small service class
// ============================================================================

#[test]
fn given_service_with_calls_when_analyzed_then_rfc_counts_methods_and_distinct_calls() {
    // Given
    let class = ClassFact::new("Checkout", "app.py", 1)
        .with_method(
            MethodFact::new("pay")
                .calling_self(["validate"])
                .calling(["gateway.charge", "mailer.send"])
                .with_complexity(4),
        )
        .with_method(MethodFact::new("validate").with_complexity(3))
        .with_method(MethodFact::new("refund").calling(["gateway.charge"]));

    // When
    let m = analyze_rfc(&ctx(vec![class]), &OopThresholds::default());

    // Then: 3 methods + {validate, charge, send}
    let c = &m["Checkout"];
    assert_eq!(c.method_count, 3);
    assert_eq!(c.rfc, 6);
    assert_eq!(c.wmc, 8);
    assert_eq!(c.external_call_count, 2);
    assert_eq!(c.severity, Severity::Info);
}

// ============================================================================
// Scenario: malformed facts
// ============================================================================

#[test]
fn given_method_with_zero_complexity_when_analyzed_then_class_is_skipped() {
    // Given
    let bad = ClassFact::new("Bad", "app.py", 1).with_method(MethodFact::new("x").with_complexity(0));
    let good = ClassFact::new("Good", "app.py", 10).with_method(MethodFact::new("y"));

    // When
    let m = analyze_rfc(&ctx(vec![bad, good]), &OopThresholds::default());

    // Then
    assert!(!m.contains_key("Bad"));
    assert!(m.contains_key("Good"));
}

// ============================================================================
// Scenario: thresholds and hotspots
// ============================================================================

#[test]
fn given_complex_class_when_queried_then_it_is_flagged_and_ranked() {
    // Given
    let mut heavy = ClassFact::new("Engine", "app.py", 1);
    for i in 0..8 {
        heavy = heavy.with_method(MethodFact::new(format!("step{i}")).with_complexity(10));
    }
    let light = ClassFact::new("Tiny", "app.py", 200).with_method(MethodFact::new("go").with_complexity(12));
    let t = OopThresholds::default();

    // When
    let m = analyze_rfc(&ctx(vec![heavy, light]), &t);

    // Then: wmc 80 / 50 = 1.6 is critical
    assert_eq!(m["Engine"].wmc, 80);
    assert_eq!(m["Engine"].severity, Severity::Critical);
    assert_eq!(high_wmc_classes(&m, &t).len(), 1);
    assert!(high_rfc_classes(&m, &t).is_empty());

    let hot = complexity_hotspots(&m, 2);
    assert_eq!(hot.len(), 2);
    assert_eq!(hot[0].class_name, "Tiny");
    assert_eq!(hot[0].complexity, 12);
    assert_eq!(hot[1].method_name, "step0");

    let heavy: Vec<_> = wmc_hotspots(&m, 5).into_iter().map(|c| c.class_name.as_str()).collect();
    assert_eq!(heavy, ["Engine", "Tiny"]);
    assert_eq!(wmc_hotspots(&m, 1).len(), 1);
}
