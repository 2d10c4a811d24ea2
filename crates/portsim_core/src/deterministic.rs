//! Single projection using the fixed expected returns

use tracing::debug;

use crate::engine::{PathEngine, ReturnMode, StepReturns, annual_to_monthly_return};
use crate::error::Result;
use crate::model::{DeterministicResult, SimulationParams};

/// Run the engine once with each sleeve compounding at its expected return.
///
/// Fully reproducible for identical inputs.
pub fn run_deterministic(params: &SimulationParams) -> Result<DeterministicResult> {
    params.check()?;

    let returns = StepReturns::new(
        annual_to_monthly_return(params.growth_return),
        annual_to_monthly_return(params.stability_return),
    );
    let engine = PathEngine::new(params, ReturnMode::Simple);
    let path = engine.run_constant(returns);
    let quarterly = path.quarterly_states();

    debug!(
        horizon = params.horizon_months,
        final_value = path.final_value,
        max_drawdown = path.max_drawdown,
        "deterministic projection finished"
    );

    Ok(DeterministicResult { path, quarterly })
}
