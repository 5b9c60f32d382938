//! Design-smell detection over a finished report.
//!
//! Every predicate is independent; a class may match several smells.

use ckmetrics_types::{ClassOopMetrics, DesignSmell, DesignSmellReport, OopReport, OopThresholds};

const DATA_CLASS_MAX_RFC: usize = 5;
const DATA_CLASS_MIN_ATTRIBUTES: usize = 5;
const DATA_CLASS_MAX_METHODS: usize = 3;
const UNSTABLE_MIN_INSTABILITY: f64 = 0.8;
const MIN_EFFERENT_FOR_SMELL: usize = 3;

/// Whether `cls` exhibits `smell` under `t`.
pub fn matches_smell(smell: DesignSmell, cls: &ClassOopMetrics, t: &OopThresholds) -> bool {
    match smell {
        DesignSmell::GodClass => cls.cbo > t.cbo && cls.lcom > t.lcom && cls.wmc > t.wmc,
        DesignSmell::DataClass => {
            cls.rfc < DATA_CLASS_MAX_RFC
                && cls.attribute_count > DATA_CLASS_MIN_ATTRIBUTES
                && cls.method_count < DATA_CLASS_MAX_METHODS
        }
        DesignSmell::FeatureEnvy => {
            cls.ce > MIN_EFFERENT_FOR_SMELL && cls.external_call_count > cls.self_reference_count
        }
        DesignSmell::DeepHierarchy => cls.dit > t.dit,
        DesignSmell::WideHierarchy => cls.noc > t.noc,
        DesignSmell::UnstableClass => {
            cls.instability > UNSTABLE_MIN_INSTABILITY && cls.ce > MIN_EFFERENT_FOR_SMELL
        }
        DesignSmell::Blob => cls.wmc > t.wmc.saturating_mul(2),
    }
}

/// Read-only pass over `report.class_metrics`, in report order.
pub fn detect_design_smells(report: &OopReport) -> DesignSmellReport {
    let mut smells = DesignSmellReport::new();
    for cls in &report.class_metrics {
        for smell in DesignSmell::ALL {
            if matches_smell(smell, cls, &report.thresholds) {
                smells.record(smell, cls.qualified_name());
            }
        }
    }
    smells
}

/// Classes combining high coupling, low cohesion and high complexity.
pub fn god_classes(report: &OopReport) -> Vec<&ClassOopMetrics> {
    report
        .class_metrics
        .iter()
        .filter(|c| matches_smell(DesignSmell::GodClass, c, &report.thresholds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_class_needs_many_attributes_and_little_behavior() {
        let t = OopThresholds::default();
        let mut cls = ClassOopMetrics {
            rfc: 2,
            attribute_count: 6,
            method_count: 1,
            ..ClassOopMetrics::default()
        };
        assert!(matches_smell(DesignSmell::DataClass, &cls, &t));
        cls.attribute_count = 5;
        assert!(!matches_smell(DesignSmell::DataClass, &cls, &t));
    }

    #[test]
    fn blob_is_twice_the_wmc_threshold() {
        let t = OopThresholds::default();
        let mut cls = ClassOopMetrics {
            wmc: 100,
            ..ClassOopMetrics::default()
        };
        assert!(!matches_smell(DesignSmell::Blob, &cls, &t));
        cls.wmc = 101;
        assert!(matches_smell(DesignSmell::Blob, &cls, &t));
    }

    #[test]
    fn feature_envy_compares_outside_calls_with_self_use() {
        let t = OopThresholds::default();
        let cls = ClassOopMetrics {
            ce: 4,
            external_call_count: 6,
            self_reference_count: 2,
            ..ClassOopMetrics::default()
        };
        assert!(matches_smell(DesignSmell::FeatureEnvy, &cls, &t));
        assert!(!matches_smell(DesignSmell::UnstableClass, &cls, &t));
    }

    #[test]
    fn unstable_needs_both_instability_and_efferent_count() {
        let t = OopThresholds::default();
        let mut cls = ClassOopMetrics {
            ce: 4,
            instability: 1.0,
            ..ClassOopMetrics::default()
        };
        assert!(matches_smell(DesignSmell::UnstableClass, &cls, &t));
        cls.ce = 3;
        assert!(!matches_smell(DesignSmell::UnstableClass, &cls, &t));
    }
}
