//! BDD-style scenarios for coupling analysis.

use ckmetrics_context::ScanContext;
use ckmetrics_coupling::analyze_coupling;
use ckmetrics_types::{ClassFact, CouplingLevel, FactSet, FileFacts, MethodFact, OopThresholds, Severity};

fn services() -> FactSet {
    let service_a = ClassFact::new("ServiceA", "services.py", 1)
        .with_method(MethodFact::new("process").with_complexity(2));
    let service_b = ClassFact::new("ServiceB", "services.py", 10)
        .with_instance_attribute("service_a")
        .with_method(MethodFact::new("__init__").accessing(["service_a"]).referencing(["ServiceA"]))
        .with_method(
            MethodFact::new("run")
                .accessing(["service_a"])
                .calling(["self.service_a.process"]),
        );
    FactSet::new().with_file(
        FileFacts::new("/repo/services.py", "services.py")
            .with_class(service_a)
            .with_class(service_b),
    )
}

// ============================================================================
// Scenario: one service holding and calling another
// ============================================================================

#[test]
fn given_service_b_holding_service_a_when_analyzed_then_edge_is_counted_both_ways() {
    // Given
    let ctx = ScanContext::new(services());

    // When
    let m = analyze_coupling(&ctx, &OopThresholds::default());

    // Then
    let b = &m["ServiceB"];
    let a = &m["ServiceA"];
    assert!(b.ce >= 1);
    assert_eq!(b.cbo, b.ce);
    assert!(a.ca >= 1);
    assert!(b.coupled_to.contains("ServiceA"));
    assert!(a.coupled_from.contains("ServiceB"));
    assert_eq!(a.instability, 0.0);
    assert_eq!(b.instability, 1.0);
}

// ============================================================================
// Scenario: isolated classes
// ============================================================================

#[test]
fn given_class_without_references_when_analyzed_then_cbo_is_zero() {
    // Given
    let facts = FactSet::new().with_file(
        FileFacts::new("/repo/point.py", "point.py").with_class(
            ClassFact::new("Point", "point.py", 1)
                .with_instance_attribute("x")
                .with_method(MethodFact::new("norm").accessing(["x"])),
        ),
    );

    // When
    let m = analyze_coupling(&ScanContext::new(facts), &OopThresholds::default());

    // Then
    let p = &m["Point"];
    assert_eq!((p.cbo, p.ca, p.ce), (0, 0, 0));
    assert_eq!(p.instability, 0.0);
    assert_eq!(p.coupling_level, CouplingLevel::Excellent);
    assert_eq!(p.severity, Severity::Info);
}

// ============================================================================
// Scenario: hub class over threshold
// ============================================================================

#[test]
fn given_hub_referencing_many_classes_when_analyzed_then_severity_is_critical() {
    // Given
    let mut file = FileFacts::new("/repo/hub.py", "hub.py");
    let mut hub_method = MethodFact::new("wire");
    for i in 0..16 {
        let name = format!("Dep{i}");
        file = file.with_class(ClassFact::new(name.clone(), "hub.py", 100 + i));
        hub_method = hub_method.referencing([name]);
    }
    file = file.with_class(ClassFact::new("Hub", "hub.py", 1).with_method(hub_method));

    // When
    let m = analyze_coupling(
        &ScanContext::new(FactSet::new().with_file(file)),
        &OopThresholds::default(),
    );

    // Then
    assert_eq!(m["Hub"].cbo, 16);
    assert_eq!(m["Hub"].coupling_level, CouplingLevel::Critical);
    assert_eq!(m["Hub"].severity, Severity::Critical);
    assert_eq!(m["Dep0"].ca, 1);
}
