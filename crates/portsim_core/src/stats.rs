//! Cross-path statistics: percentiles, confidence bands and risk metrics.
//!
//! Every helper returns 0 on empty input instead of failing.

use crate::model::{ConfidenceBand, SimulationPath, SimulationStatistics};

/// Percentiles reported per month in the confidence bands
pub const BAND_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Linear-interpolation percentile of an already sorted slice, `p` in [0, 100]
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let index = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    let lower_value = sorted[lower];
    let upper_value = sorted[upper];

    if lower == upper {
        return lower_value;
    }
    lower_value * (upper as f64 - index) + upper_value * (index - lower as f64)
}

/// Sort a copy of `values` ascending
fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolation percentile, `p` in [0, 100]; input order does not matter
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted(values), p)
}

#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[must_use]
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Population standard deviation (divisor n)
#[must_use]
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Largest peak-to-trough decline as a positive fraction of the running peak
/// (0.25 = 25% drawdown). Points where the peak is not positive contribute 0.
#[must_use]
pub fn max_drawdown(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    max_drawdown
}

/// One band per month `0..=horizon` over the total value of every path
#[must_use]
pub fn confidence_bands(paths: &[SimulationPath], horizon: u32) -> Vec<ConfidenceBand> {
    let mut column = Vec::with_capacity(paths.len());

    (0..=horizon)
        .map(|month| {
            column.clear();
            column.extend(
                paths
                    .iter()
                    .map(|p| p.total_at(month as usize).unwrap_or(0.0)),
            );
            column.sort_by(f64::total_cmp);

            let [p5, p25, median, p75, p95] =
                BAND_PERCENTILES.map(|p| percentile_sorted(&column, p));
            ConfidenceBand {
                month,
                p5,
                p25,
                median,
                p75,
                p95,
            }
        })
        .collect()
}

/// Fraction of paths whose final value is strictly below their final principal
#[must_use]
pub fn loss_probability(paths: &[SimulationPath]) -> f64 {
    if paths.is_empty() {
        return 0.0;
    }
    let losses = paths.iter().filter(|p| p.ends_in_loss()).count();
    losses as f64 / paths.len() as f64
}

/// Summarize an ensemble of paths
#[must_use]
pub fn calculate_statistics(
    paths: &[SimulationPath],
    confidence_bands: Vec<ConfidenceBand>,
) -> SimulationStatistics {
    let final_values = sorted(&paths.iter().map(|p| p.final_value).collect::<Vec<_>>());
    let returns = sorted(&paths.iter().map(|p| p.total_return).collect::<Vec<_>>());
    let drawdowns = sorted(&paths.iter().map(|p| p.max_drawdown).collect::<Vec<_>>());

    SimulationStatistics {
        final_value_mean: mean(&final_values),
        final_value_median: percentile_sorted(&final_values, 50.0),
        final_value_p5: percentile_sorted(&final_values, 5.0),
        final_value_p25: percentile_sorted(&final_values, 25.0),
        final_value_p75: percentile_sorted(&final_values, 75.0),
        final_value_p95: percentile_sorted(&final_values, 95.0),
        final_value_min: final_values.first().copied().unwrap_or(0.0),
        final_value_max: final_values.last().copied().unwrap_or(0.0),

        return_mean: mean(&returns),
        return_median: percentile_sorted(&returns, 50.0),
        return_p5: percentile_sorted(&returns, 5.0),
        return_p95: percentile_sorted(&returns, 95.0),

        max_drawdown_mean: mean(&drawdowns),
        max_drawdown_p95: percentile_sorted(&drawdowns, 95.0),
        loss_probability: loss_probability(paths),

        confidence_bands,
    }
}
