//! Month-by-month stepping of a two-sleeve portfolio
//!
//! Both runners share this engine. One step, in order:
//! 1. grow each sleeve by its monthly return (`1 + r` or `exp(r)`)
//! 2. floor each sleeve at zero
//! 3. add the month's contribution, split by the contribution share
//! 4. on every `rebalance_period`-th month reset the split to the target share
//! 5. emit a new [`AssetState`]
//!
//! Contributions land at month end, after that month's return. Mid-month
//! contributions would accrue a partial return; that is not modelled.

use crate::model::{AssetState, SimulationParams, SimulationPath, WEEKS_PER_MONTH};

/// Convert an annual rate to the monthly rate that compounds back to it
#[must_use]
#[inline]
pub fn annual_to_monthly_return(annual_return: f64) -> f64 {
    (1.0 + annual_return).powf(1.0 / 12.0) - 1.0
}

/// Convert an annual rate to the quarterly rate that compounds back to it
#[must_use]
#[inline]
pub fn annual_to_quarterly_return(annual_return: f64) -> f64 {
    (1.0 + annual_return).powf(0.25) - 1.0
}

#[must_use]
#[inline]
pub fn weekly_to_monthly_contribution(weekly_amount: f64) -> f64 {
    weekly_amount * WEEKS_PER_MONTH
}

/// Monthly log-return mean and volatility for stochastic stepping.
///
/// The mean is linear (`annual / 12`) because it is applied in log space;
/// volatility scales with the square root of time.
#[must_use]
#[inline]
pub fn monthly_log_params(annual_return: f64, annual_volatility: f64) -> (f64, f64) {
    (annual_return / 12.0, annual_volatility / 12.0_f64.sqrt())
}

/// How a per-month return is applied to a sleeve value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnMode {
    /// `value * (1 + r)`
    Simple,
    /// `value * exp(r)`, `r` being a log return
    Log,
}

impl ReturnMode {
    #[inline]
    fn growth_factor(self, r: f64) -> f64 {
        match self {
            ReturnMode::Simple => 1.0 + r,
            ReturnMode::Log => r.exp(),
        }
    }
}

/// Returns of both sleeves for one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReturns {
    pub growth: f64,
    pub stability: f64,
}

impl StepReturns {
    #[must_use]
    pub fn new(growth: f64, stability: f64) -> Self {
        Self { growth, stability }
    }
}

/// Shared stepping logic, configured once per run from the parameters
#[derive(Debug, Clone)]
pub struct PathEngine {
    mode: ReturnMode,
    horizon: u32,
    initial: AssetState,
    monthly_contribution: f64,
    contribution_growth_share: f64,
    rebalance_period: u32,
    rebalance_target: f64,
}

impl PathEngine {
    #[must_use]
    pub fn new(params: &SimulationParams, mode: ReturnMode) -> Self {
        let capital = params.initial_capital;
        let initial = AssetState::new(
            0,
            capital * params.initial_growth_share,
            capital * (1.0 - params.initial_growth_share),
            capital,
        );

        Self {
            mode,
            horizon: params.horizon_months,
            initial,
            monthly_contribution: weekly_to_monthly_contribution(params.weekly_contribution),
            contribution_growth_share: params.contribution_growth_share,
            rebalance_period: params.rebalance_period,
            rebalance_target: params.rebalance_target_growth_share,
        }
    }

    /// Month 0: full initial capital, nothing applied yet
    #[must_use]
    pub fn initial_state(&self) -> AssetState {
        self.initial
    }

    /// Advance `prev` by one month
    #[must_use]
    pub fn step(&self, prev: &AssetState, returns: StepReturns) -> AssetState {
        let month = prev.month + 1;

        let mut growth = (prev.growth_value * self.mode.growth_factor(returns.growth)).max(0.0);
        let mut stability =
            (prev.stability_value * self.mode.growth_factor(returns.stability)).max(0.0);

        growth += self.monthly_contribution * self.contribution_growth_share;
        stability += self.monthly_contribution * (1.0 - self.contribution_growth_share);
        let principal = prev.cumulative_principal + self.monthly_contribution;

        if self.rebalance_period > 0 && month % self.rebalance_period == 0 {
            let total = growth + stability;
            growth = total * self.rebalance_target;
            stability = total * (1.0 - self.rebalance_target);
        }

        AssetState::new(month, growth, stability, principal)
    }

    /// Fold the engine over a stream of monthly returns.
    ///
    /// Consumes at most `horizon` items; the path holds the initial state plus
    /// one state per consumed item.
    pub fn run<I>(&self, returns: I) -> SimulationPath
    where
        I: IntoIterator<Item = StepReturns>,
    {
        let mut states = Vec::with_capacity(self.horizon as usize + 1);
        states.push(self.initial);
        states.extend(
            returns
                .into_iter()
                .take(self.horizon as usize)
                .scan(self.initial, |state, r| {
                    *state = self.step(state, r);
                    Some(*state)
                }),
        );

        SimulationPath::from_states(states)
    }

    /// Run with the same returns every month
    #[must_use]
    pub fn run_constant(&self, returns: StepReturns) -> SimulationPath {
        self.run(std::iter::repeat(returns))
    }
}
