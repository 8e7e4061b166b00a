use stayguard_common::types::{ThresholdOperator, ThresholdType};

/// Outcome of comparing one observation with its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEvaluation {
    pub would_trigger: bool,
    pub delta: f64,
    pub delta_percent: f64,
}

/// `delta / baseline * 100`, or `0.0` when the baseline is zero.
pub fn delta_percent(delta: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    delta / baseline * 100.0
}

/// Decides whether a rule fires for one observation.
///
/// Relative thresholds compare `delta_percent` with `±threshold_value`;
/// absolute thresholds compare the raw metric value and ignore the
/// baseline. Comparisons are strict.
///
/// # Examples
///
/// ```
/// use stayguard_alert::threshold::evaluate;
/// use stayguard_common::types::{ThresholdOperator, ThresholdType};
///
/// let eval = evaluate(50.0, 65.0, ThresholdType::Relative, 15.0, ThresholdOperator::Below);
/// assert!(eval.would_trigger);
/// assert_eq!(eval.delta, -15.0);
/// assert!((eval.delta_percent + 23.08).abs() < 0.01);
/// ```
pub fn evaluate(
    metric_value: f64,
    baseline_value: f64,
    threshold_type: ThresholdType,
    threshold_value: f64,
    operator: ThresholdOperator,
) -> ThresholdEvaluation {
    let delta = metric_value - baseline_value;
    let delta_percent = delta_percent(delta, baseline_value);

    let would_trigger = match threshold_type {
        ThresholdType::Relative => {
            let bound = match operator {
                ThresholdOperator::Above => threshold_value,
                ThresholdOperator::Below => -threshold_value,
            };
            operator.check(delta_percent, bound)
        }
        ThresholdType::Absolute => operator.check(metric_value, threshold_value),
    };

    ThresholdEvaluation {
        would_trigger,
        delta,
        delta_percent,
    }
}
