//! Standard-error lookup with binomial fallback

use crate::config::MetricScale;
use crate::document::{self, TaskMetrics};

/// Standard error of `metric_name` in one task's metric table.
///
/// A numeric stderr reported by the harness is returned as is. Otherwise,
/// with more than one sample and a numeric point estimate, the binomial
/// estimate `sqrt(p(1-p)/n)` is computed in the probability domain and
/// mapped back onto the metric's scale. At p == 0 or p == 1 the estimate is
/// degenerate and `None` is returned.
pub fn estimate_stderr(
    task_metrics: &TaskMetrics,
    metric_name: &str,
    sample_count: Option<f64>,
    scale: MetricScale,
) -> Option<f64> {
    if let Some(reported) = task_metrics
        .get(&document::stderr_key(metric_name))
        .and_then(document::numeric)
    {
        return Some(reported);
    }

    let n = sample_count.filter(|n| *n > 1.0)?;
    let value = task_metrics
        .get(&document::value_key(metric_name))
        .and_then(document::numeric)?;

    let p = scale.to_probability(value);
    if p <= 0.0 || p >= 1.0 {
        return None;
    }
    Some(scale.from_probability((p * (1.0 - p) / n).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metrics(value: serde_json::Value) -> TaskMetrics {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_reported_stderr_wins() {
        let m = metrics(json!({"acc,none": 0.8, "acc_stderr,none": 0.05}));
        assert_eq!(
            estimate_stderr(&m, "acc", Some(1000.0), MetricScale::Unit),
            Some(0.05)
        );
        assert_eq!(estimate_stderr(&m, "acc", None, MetricScale::Unit), Some(0.05));
    }

    #[test]
    fn test_binomial_estimate_unit_scale() {
        let m = metrics(json!({"acc,none": 0.5, "acc_stderr,none": "N/A"}));
        let se = estimate_stderr(&m, "acc", Some(100.0), MetricScale::Unit).unwrap();
        assert!((se - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_binomial_estimate_percent_scale() {
        let m = metrics(json!({"f1,none": 60}));
        let se = estimate_stderr(&m, "f1", Some(100.0), MetricScale::Percent).unwrap();
        let expected = (0.6_f64 * 0.4 / 100.0).sqrt() * 100.0;
        assert!((se - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_estimate_without_samples() {
        let m = metrics(json!({"acc,none": 0.5}));
        assert_eq!(estimate_stderr(&m, "acc", None, MetricScale::Unit), None);
        assert_eq!(estimate_stderr(&m, "acc", Some(1.0), MetricScale::Unit), None);
    }

    #[test]
    fn test_degenerate_probabilities() {
        for v in [0.0, 100.0, 130.0] {
            let m = metrics(json!({"bleu,none": v}));
            assert_eq!(
                estimate_stderr(&m, "bleu", Some(500.0), MetricScale::Percent),
                None
            );
        }
        let m = metrics(json!({"acc,none": 1.0}));
        assert_eq!(estimate_stderr(&m, "acc", Some(500.0), MetricScale::Unit), None);
    }

    #[test]
    fn test_non_numeric_value_gives_no_estimate() {
        let m = metrics(json!({"acc,none": "broken"}));
        assert_eq!(estimate_stderr(&m, "acc", Some(100.0), MetricScale::Unit), None);
        assert_eq!(estimate_stderr(&m, "missing", Some(100.0), MetricScale::Unit), None);
    }
}
