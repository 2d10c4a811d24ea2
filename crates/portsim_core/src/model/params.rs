//! Simulation parameters
//!
//! `SimulationParams` is the immutable input of every run. The `Default`
//! implementation carries the reference parameter set, and `#[serde(default)]`
//! lets a partial YAML/JSON document fall back to it field by field.
//!
//! # Builder
//!
//! ```ignore
//! use portsim_core::model::SimulationBuilder;
//!
//! let params = SimulationBuilder::new()
//!     .initial_capital(250_000.0)
//!     .initial_growth_share(0.6)
//!     .weekly_contribution(500.0)
//!     .rebalance_every(12, 0.6)
//!     .horizon_months(120)
//!     .paths(2_000)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;
use crate::sampler::NormalMethod;

/// Weeks per year divided by months per year
pub const WEEKS_PER_MONTH: f64 = 52.0 / 12.0;

/// Complete input of a deterministic or Monte Carlo run
///
/// "Growth" is the higher-return, higher-volatility sleeve (equities),
/// "stability" the lower-return sleeve (bonds). All shares are the growth
/// sleeve's fraction of the respective amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub initial_capital: f64,
    pub initial_growth_share: f64,

    /// Contribution per week; converted to a monthly amount once per run
    pub weekly_contribution: f64,
    pub contribution_growth_share: f64,

    /// Annualized expected returns (0.1 = 10%)
    pub growth_return: f64,
    pub stability_return: f64,
    /// Annualized volatility (standard deviation)
    pub growth_volatility: f64,
    pub stability_volatility: f64,

    /// Months between rebalances, 0 disables rebalancing
    pub rebalance_period: u32,
    pub rebalance_target_growth_share: f64,

    pub horizon_months: u32,
    pub path_count: usize,

    pub normal_method: NormalMethod,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial_capital: 300_000.0,
            initial_growth_share: 0.3,
            weekly_contribution: 1_000.0,
            contribution_growth_share: 0.3,
            growth_return: 0.10,
            stability_return: 0.04,
            growth_volatility: 0.20,
            stability_volatility: 0.03,
            rebalance_period: 6,
            rebalance_target_growth_share: 0.3,
            horizon_months: 12,
            path_count: 1_000,
            normal_method: NormalMethod::default(),
        }
    }
}

impl SimulationParams {
    /// Monthly contribution derived from the weekly amount
    #[must_use]
    pub fn monthly_contribution(&self) -> f64 {
        self.weekly_contribution * WEEKS_PER_MONTH
    }

    /// Principal contributed over the whole horizon, initial capital included
    #[must_use]
    pub fn total_contribution(&self) -> f64 {
        self.initial_capital + self.monthly_contribution() * f64::from(self.horizon_months)
    }

    /// Precondition check run before every simulation.
    ///
    /// This rejects inputs that would otherwise produce silently wrong numbers.
    /// Softer, advisory checks live in [`crate::validation::validate`].
    pub fn check(&self) -> Result<(), ParamsError> {
        let finite = [
            ("initial_capital", self.initial_capital),
            ("initial_growth_share", self.initial_growth_share),
            ("weekly_contribution", self.weekly_contribution),
            ("contribution_growth_share", self.contribution_growth_share),
            ("growth_return", self.growth_return),
            ("stability_return", self.stability_return),
            ("growth_volatility", self.growth_volatility),
            ("stability_volatility", self.stability_volatility),
            (
                "rebalance_target_growth_share",
                self.rebalance_target_growth_share,
            ),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { field });
            }
        }

        let shares = [
            ("initial_growth_share", self.initial_growth_share),
            ("contribution_growth_share", self.contribution_growth_share),
            (
                "rebalance_target_growth_share",
                self.rebalance_target_growth_share,
            ),
        ];
        for (field, value) in shares {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::ShareOutOfRange { field, value });
            }
        }

        let non_negative = [
            ("initial_capital", self.initial_capital),
            ("weekly_contribution", self.weekly_contribution),
            ("growth_volatility", self.growth_volatility),
            ("stability_volatility", self.stability_volatility),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ParamsError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("growth_return", self.growth_return),
            ("stability_return", self.stability_return),
        ] {
            if value < -1.0 {
                return Err(ParamsError::ReturnBelowTotalLoss { field, value });
            }
        }

        if self.horizon_months == 0 {
            return Err(ParamsError::ZeroHorizon);
        }
        if self.path_count == 0 {
            return Err(ParamsError::ZeroPaths);
        }

        Ok(())
    }
}

/// Fluent builder over [`SimulationParams`], starting from the defaults
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    params: SimulationParams,
}

impl SimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing parameter set
    #[must_use]
    pub fn from_params(params: SimulationParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn initial_capital(mut self, amount: f64) -> Self {
        self.params.initial_capital = amount;
        self
    }

    #[must_use]
    pub fn initial_growth_share(mut self, share: f64) -> Self {
        self.params.initial_growth_share = share;
        self
    }

    #[must_use]
    pub fn weekly_contribution(mut self, amount: f64) -> Self {
        self.params.weekly_contribution = amount;
        self
    }

    #[must_use]
    pub fn contribution_growth_share(mut self, share: f64) -> Self {
        self.params.contribution_growth_share = share;
        self
    }

    /// Annual expected return and volatility of the growth sleeve
    #[must_use]
    pub fn growth(mut self, annual_return: f64, annual_volatility: f64) -> Self {
        self.params.growth_return = annual_return;
        self.params.growth_volatility = annual_volatility;
        self
    }

    /// Annual expected return and volatility of the stability sleeve
    #[must_use]
    pub fn stability(mut self, annual_return: f64, annual_volatility: f64) -> Self {
        self.params.stability_return = annual_return;
        self.params.stability_volatility = annual_volatility;
        self
    }

    /// Rebalance to `target_growth_share` every `period` months
    #[must_use]
    pub fn rebalance_every(mut self, period: u32, target_growth_share: f64) -> Self {
        self.params.rebalance_period = period;
        self.params.rebalance_target_growth_share = target_growth_share;
        self
    }

    #[must_use]
    pub fn no_rebalancing(mut self) -> Self {
        self.params.rebalance_period = 0;
        self
    }

    #[must_use]
    pub fn horizon_months(mut self, months: u32) -> Self {
        self.params.horizon_months = months;
        self
    }

    /// Alias for horizon in whole years
    #[must_use]
    pub fn years(self, years: u32) -> Self {
        self.horizon_months(years * 12)
    }

    #[must_use]
    pub fn paths(mut self, count: usize) -> Self {
        self.params.path_count = count;
        self
    }

    #[must_use]
    pub fn normal_method(mut self, method: NormalMethod) -> Self {
        self.params.normal_method = method;
        self
    }

    /// Finish the builder, running the precondition check
    pub fn build(self) -> Result<SimulationParams, ParamsError> {
        self.params.check()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_check() {
        assert_eq!(SimulationParams::default().check(), Ok(()));
    }

    #[test]
    fn test_total_contribution() {
        let params = SimulationParams::default();
        let expected = 300_000.0 + 1_000.0 * 52.0 / 12.0 * 12.0;
        assert!((params.total_contribution() - expected).abs() < 1e-9);
        assert!((params.total_contribution() - 352_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_builder_rejects_share_out_of_range() {
        let err = SimulationBuilder::new()
            .initial_growth_share(1.2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ParamsError::ShareOutOfRange {
                field: "initial_growth_share",
                value: 1.2
            }
        );
    }

    #[test]
    fn test_builder_rejects_zero_horizon_and_paths() {
        assert_eq!(
            SimulationBuilder::new().horizon_months(0).build(),
            Err(ParamsError::ZeroHorizon)
        );
        assert_eq!(
            SimulationBuilder::new().paths(0).build(),
            Err(ParamsError::ZeroPaths)
        );
    }

    #[test]
    fn test_check_rejects_nan_and_negative() {
        let mut params = SimulationParams {
            growth_return: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.check(),
            Err(ParamsError::NotFinite {
                field: "growth_return"
            })
        );

        params.growth_return = 0.1;
        params.stability_volatility = -0.01;
        assert!(matches!(
            params.check(),
            Err(ParamsError::Negative {
                field: "stability_volatility",
                ..
            })
        ));

        params.stability_volatility = 0.03;
        params.stability_return = -1.5;
        assert!(matches!(
            params.check(),
            Err(ParamsError::ReturnBelowTotalLoss { .. })
        ));
    }

    #[test]
    fn test_builder_years_and_rebalance() {
        let params = SimulationBuilder::new()
            .years(5)
            .rebalance_every(12, 0.6)
            .build()
            .unwrap();
        assert_eq!(params.horizon_months, 60);
        assert_eq!(params.rebalance_period, 12);
        assert_eq!(params.rebalance_target_growth_share, 0.6);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let params: SimulationParams =
            serde_json::from_str(r#"{"horizon_months": 24, "normal_method": "ziggurat"}"#)
                .unwrap();
        assert_eq!(params.horizon_months, 24);
        assert_eq!(params.normal_method, NormalMethod::Ziggurat);
        assert_eq!(params.initial_capital, 300_000.0);
    }
}
