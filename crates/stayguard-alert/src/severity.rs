use stayguard_common::types::{Severity, SeverityThresholds};

/// Labels a deviation by its magnitude.
///
/// Without thresholds every deviation is `Info`. Boundaries are inclusive
/// and `critical` is checked first. Computed whether or not the rule
/// fires, so previews can show it.
pub fn classify(delta_percent: f64, thresholds: Option<&SeverityThresholds>) -> Severity {
    let Some(thresholds) = thresholds else {
        return Severity::Info;
    };

    let magnitude = delta_percent.abs();
    if magnitude >= thresholds.critical {
        Severity::Critical
    } else if magnitude >= thresholds.warning {
        Severity::Warning
    } else {
        Severity::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> SeverityThresholds {
        SeverityThresholds {
            warning: 10.0,
            critical: 20.0,
        }
    }

    #[test]
    fn no_thresholds_is_always_info() {
        for dp in [-500.0, -23.1, 0.0, 9.9, 1e9] {
            assert_eq!(classify(dp, None), Severity::Info);
        }
    }

    #[test]
    fn negative_deviation_classified_by_magnitude() {
        assert_eq!(classify(-23.1, Some(&thresholds())), Severity::Critical);
        assert_eq!(classify(-12.0, Some(&thresholds())), Severity::Warning);
        assert_eq!(classify(-3.0, Some(&thresholds())), Severity::Info);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(classify(10.0, Some(&thresholds())), Severity::Warning);
        assert_eq!(classify(20.0, Some(&thresholds())), Severity::Critical);
    }

    #[test]
    fn monotonic_in_magnitude() {
        let t = thresholds();
        let mut previous = Severity::Info;
        for step in 0..400 {
            let magnitude = step as f64 * 0.1;
            for sign in [1.0, -1.0] {
                let sev = classify(sign * magnitude, Some(&t));
                assert!(sev >= previous, "severity dropped at {magnitude}");
            }
            previous = classify(magnitude, Some(&t));
        }
        assert_eq!(previous, Severity::Critical);
    }

    #[test]
    fn equal_warning_and_critical() {
        let t = SeverityThresholds {
            warning: 15.0,
            critical: 15.0,
        };
        assert_eq!(classify(14.9, Some(&t)), Severity::Info);
        assert_eq!(classify(15.0, Some(&t)), Severity::Critical);
    }
}
