//! Simulation results
//!
//! Output types of the deterministic and Monte Carlo runners, plus the
//! configuration and progress handle of a Monte Carlo run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use super::state::{AssetState, SimulationPath};

/// Result of the single fixed-return projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeterministicResult {
    pub path: SimulationPath,
    /// States at months 0, 3, 6, ... for tabular display
    pub quarterly: Vec<AssetState>,
}

/// Percentile envelope of total value across all paths at one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub month: u32,
    pub p5: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
}

/// Distributional summary of a Monte Carlo ensemble
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    // Final value distribution
    pub final_value_mean: f64,
    pub final_value_median: f64,
    pub final_value_p5: f64,
    pub final_value_p25: f64,
    pub final_value_p75: f64,
    pub final_value_p95: f64,
    pub final_value_min: f64,
    pub final_value_max: f64,

    // Total return distribution
    pub return_mean: f64,
    pub return_median: f64,
    pub return_p5: f64,
    pub return_p95: f64,

    // Risk
    pub max_drawdown_mean: f64,
    pub max_drawdown_p95: f64,
    /// Fraction of paths ending below their contributed principal
    pub loss_probability: f64,

    /// One band per month, 0..=horizon
    pub confidence_bands: Vec<ConfidenceBand>,
}

/// All generated paths plus their statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub paths: Vec<SimulationPath>,
    pub statistics: SimulationStatistics,
    /// Master seed the run was generated from; rerunning with it reproduces the paths
    pub seed: u64,
}

/// Execution settings of a Monte Carlo run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Master seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Paths generated per batch. Each batch owns one RNG, so results for a
    /// given seed depend on this value but not on thread scheduling.
    pub batch_size: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            seed: None,
            batch_size: 100,
        }
    }
}

impl MonteCarloConfig {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }
}

/// Shared progress counter and cancellation flag for a running Monte Carlo job
#[derive(Debug, Clone, Default)]
pub struct MonteCarloProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl MonteCarloProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of finished paths
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn add_completed(&self, paths: usize) {
        self.completed.fetch_add(paths, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
