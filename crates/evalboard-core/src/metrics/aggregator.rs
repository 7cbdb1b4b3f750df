//! Reduction of prompt-variant observations into metric summaries
//!
//! All statistics are computed from raw values. Rounding to six decimals
//! happens only when the summary is assembled.

use statrs::statistics::{Data, Distribution, Median};

use super::types::{MetricSummary, Observation, ObservationSet, ShotScores};

const OUTPUT_DECIMALS: usize = 6;

/// Summarize every metric of an observation set, keeping its order
pub fn summarize(observations: &ObservationSet) -> ShotScores {
    observations
        .iter()
        .filter_map(|(name, obs)| MetricSummary::from_observations(obs).map(|s| (name.clone(), s)))
        .collect()
}

impl MetricSummary {
    /// Reduce one metric's observations; `None` for an empty list
    pub fn from_observations(observations: &[Observation]) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }

        let values: Vec<f64> = observations.iter().map(|o| o.value).collect();
        let n = values.len();

        let max_idx = first_extreme(&values, |candidate, best| candidate > best);
        let min_idx = first_extreme(&values, |candidate, best| candidate < best);

        let data = Data::new(values.clone());
        let mean = data.mean()?;
        let median = data.median();
        let closest_idx = closest_to(&values, median);

        let mean_stderr = observations
            .iter()
            .map(|o| o.stderr)
            .collect::<Option<Vec<f64>>>()
            .map(|stderrs| stderrs.iter().map(|s| s * s).sum::<f64>().sqrt() / n as f64);

        // statrs std_dev is the sample deviation (n - 1)
        let (prompt_sd, prompt_mad) = if n >= 2 {
            let deviations: Vec<f64> = values.iter().map(|v| (v - median).abs()).collect();
            (data.std_dev()?, Data::new(deviations).median())
        } else {
            (0.0, 0.0)
        };

        Some(Self {
            max: round6(values[max_idx]),
            mean: round6(mean),
            median: round6(median),
            min: round6(values[min_idx]),
            max_prompt_idx: max_idx,
            max_stderr: observations[max_idx].stderr.map(round6),
            min_stderr: observations[min_idx].stderr.map(round6),
            mean_stderr: mean_stderr.map(round6),
            median_stderr: observations[closest_idx].stderr.map(round6),
            n_prompts: n,
            prompt_sd: round6(prompt_sd),
            prompt_mad: round6(prompt_mad),
        })
    }
}

/// Index of the first value that no later value beats
fn first_extreme(values: &[f64], beats: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if beats(v, values[best]) {
            best = i;
        }
    }
    best
}

/// Index of the first value nearest to `target`
fn closest_to(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = (values[0] - target).abs();
    for (i, &v) in values.iter().enumerate().skip(1) {
        let dist = (v - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Round to six decimal places via correctly rounded decimal formatting
pub(crate) fn round6(value: f64) -> f64 {
    format!("{:.*}", OUTPUT_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}
