//! Two-sleeve portfolio projection library
//!
//! Projects the value of a portfolio split between a growth sleeve (equities)
//! and a stability sleeve (bonds) under monthly contributions and periodic
//! rebalancing. It provides:
//! - A deterministic projection compounding the expected returns
//! - A Monte Carlo ensemble sampling monthly log returns
//! - Percentile bands, drawdown and loss statistics over the ensemble
//! - Advisory parameter validation
//!
//! ```ignore
//! use portsim_core::{SimulationBuilder, MonteCarloConfig};
//!
//! let params = SimulationBuilder::new()
//!     .initial_capital(300_000.0)
//!     .weekly_contribution(1_000.0)
//!     .years(10)
//!     .build()?;
//!
//! let projection = portsim_core::run_deterministic(&params)?;
//! let ensemble = portsim_core::run_monte_carlo_with_config(&params, &MonteCarloConfig::seeded(42))?;
//! println!("p5 {:.0}", ensemble.statistics.final_value_p5);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod deterministic;
pub mod engine;
pub mod error;
pub mod monte_carlo;
pub mod sampler;
pub mod stats;
pub mod validation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use deterministic::run_deterministic;
pub use error::{ParamsError, SimulationError};
pub use model::{
    AssetState, ConfidenceBand, DeterministicResult, MonteCarloConfig, MonteCarloProgress,
    MonteCarloResult, SimulationBuilder, SimulationParams, SimulationPath, SimulationStatistics,
};
pub use monte_carlo::{run_monte_carlo, run_monte_carlo_with_config, run_monte_carlo_with_progress};
pub use sampler::NormalMethod;
pub use validation::{Severity, ValidationIssue, has_errors, validate};
