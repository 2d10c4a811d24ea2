mod params;
mod results;
mod state;

pub use params::{SimulationBuilder, SimulationParams, WEEKS_PER_MONTH};
pub use results::{
    ConfidenceBand, DeterministicResult, MonteCarloConfig, MonteCarloProgress, MonteCarloResult,
    SimulationStatistics,
};
pub use state::{AssetState, SimulationPath};
