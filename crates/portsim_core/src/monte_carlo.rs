//! Monte Carlo ensemble of stochastic paths
//!
//! Paths are generated in fixed-size batches. A master `SmallRng` seeded from
//! the run seed hands one seed to every batch up front, and each batch threads
//! its own generator through all of its paths. Batches share nothing but the
//! immutable parameters, so with the `parallel` feature they fan out over rayon
//! and are merged, in batch order, only once all of them are done.

use std::time::Instant;

use rand::distr::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use crate::engine::{PathEngine, ReturnMode, StepReturns, monthly_log_params};
use crate::error::{Result, SimulationError};
use crate::model::{
    MonteCarloConfig, MonteCarloProgress, MonteCarloResult, SimulationParams, SimulationPath,
};
use crate::sampler::ReturnDistribution;
use crate::stats::{calculate_statistics, confidence_bands};

/// Monthly log-return distributions of both sleeves
#[derive(Debug, Clone, Copy)]
struct MonthlyReturns {
    growth: ReturnDistribution,
    stability: ReturnDistribution,
}

impl MonthlyReturns {
    fn from_params(params: &SimulationParams) -> Result<Self> {
        let (growth_mean, growth_vol) =
            monthly_log_params(params.growth_return, params.growth_volatility);
        let (stability_mean, stability_vol) =
            monthly_log_params(params.stability_return, params.stability_volatility);

        Ok(Self {
            growth: ReturnDistribution::new(growth_mean, growth_vol, params.normal_method)?,
            stability: ReturnDistribution::new(
                stability_mean,
                stability_vol,
                params.normal_method,
            )?,
        })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StepReturns {
        let growth = self.growth.sample(rng);
        let stability = self.stability.sample(rng);
        StepReturns::new(growth, stability)
    }
}

/// Generate one stochastic path, drawing every monthly return from `rng`
fn simulate_path<R: Rng + ?Sized>(
    engine: &PathEngine,
    returns: &MonthlyReturns,
    rng: &mut R,
) -> SimulationPath {
    engine.run(std::iter::repeat_with(|| returns.sample(rng)))
}

/// Unseeded run with the default batch layout
pub fn run_monte_carlo(params: &SimulationParams) -> Result<MonteCarloResult> {
    run_monte_carlo_with_config(params, &MonteCarloConfig::default())
}

pub fn run_monte_carlo_with_config(
    params: &SimulationParams,
    config: &MonteCarloConfig,
) -> Result<MonteCarloResult> {
    run_monte_carlo_with_progress(params, config, &MonteCarloProgress::new())
}

/// Run the ensemble, reporting finished paths through `progress`.
///
/// Cancellation is checked before each batch starts; a cancelled run returns
/// [`SimulationError::Cancelled`] and discards the paths generated so far.
pub fn run_monte_carlo_with_progress(
    params: &SimulationParams,
    config: &MonteCarloConfig,
    progress: &MonteCarloProgress,
) -> Result<MonteCarloResult> {
    params.check()?;

    let returns = MonthlyReturns::from_params(params)?;
    let engine = PathEngine::new(params, ReturnMode::Log);
    let seed = config.seed.unwrap_or_else(rand::random);
    let batch_size = config.batch_size.max(1);
    let num_paths = params.path_count;
    let num_batches = num_paths.div_ceil(batch_size);

    info!(
        paths = num_paths,
        horizon = params.horizon_months,
        batches = num_batches,
        seed,
        "starting Monte Carlo run"
    );
    let started = Instant::now();

    let mut master = SmallRng::seed_from_u64(seed);
    let batch_seeds: Vec<u64> = (0..num_batches).map(|_| master.next_u64()).collect();

    let run_batch = |i: usize| -> Result<Vec<SimulationPath>> {
        if progress.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }

        let mut rng = SmallRng::seed_from_u64(batch_seeds[i]);
        let size = if i == num_batches - 1 {
            num_paths - i * batch_size
        } else {
            batch_size
        };

        let batch: Vec<SimulationPath> = (0..size)
            .map(|_| simulate_path(&engine, &returns, &mut rng))
            .collect();
        progress.add_completed(batch.len());
        Ok(batch)
    };

    #[cfg(feature = "parallel")]
    let batches = (0..num_batches)
        .into_par_iter()
        .map(run_batch)
        .collect::<Result<Vec<_>>>();
    #[cfg(not(feature = "parallel"))]
    let batches = (0..num_batches).map(run_batch).collect::<Result<Vec<_>>>();

    let batches = batches.inspect_err(|e| debug!(error = %e, "Monte Carlo run aborted"))?;
    let paths: Vec<SimulationPath> = batches.into_iter().flatten().collect();

    let bands = confidence_bands(&paths, params.horizon_months);
    let statistics = calculate_statistics(&paths, bands);

    info!(
        paths = paths.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        median_final_value = statistics.final_value_median,
        loss_probability = statistics.loss_probability,
        "Monte Carlo run finished"
    );

    Ok(MonteCarloResult {
        paths,
        statistics,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimulationBuilder;

    #[test]
    fn test_zero_volatility_path_matches_constant_log_returns() {
        let params = SimulationBuilder::new()
            .growth(0.08, 0.0)
            .stability(0.03, 0.0)
            .paths(3)
            .build()
            .unwrap();
        let returns = MonthlyReturns::from_params(&params).unwrap();
        let engine = PathEngine::new(&params, ReturnMode::Log);
        let mut rng = SmallRng::seed_from_u64(9);

        let sampled = simulate_path(&engine, &returns, &mut rng);
        let expected = engine.run_constant(StepReturns::new(0.08 / 12.0, 0.03 / 12.0));
        assert_eq!(sampled, expected);
    }

    #[test]
    fn test_last_batch_is_partial() {
        let params = SimulationBuilder::new().paths(250).build().unwrap();
        let config = MonteCarloConfig {
            seed: Some(1),
            batch_size: 100,
        };
        let progress = MonteCarloProgress::new();
        let result = run_monte_carlo_with_progress(&params, &config, &progress).unwrap();

        assert_eq!(result.paths.len(), 250);
        assert_eq!(progress.completed(), 250);
        assert_eq!(result.seed, 1);
    }

    #[test]
    fn test_zero_batch_size_is_treated_as_one() {
        let params = SimulationBuilder::new().paths(5).build().unwrap();
        let config = MonteCarloConfig {
            seed: Some(3),
            batch_size: 0,
        };
        let result = run_monte_carlo_with_config(&params, &config).unwrap();
        assert_eq!(result.paths.len(), 5);
    }
}
