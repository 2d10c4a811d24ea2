//! Per-month portfolio snapshots and the paths built from them

use serde::{Deserialize, Serialize};

use crate::stats::max_drawdown;

/// Portfolio state at the end of one month of one path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetState {
    /// 0 is the initial state, before any return or contribution
    pub month: u32,
    pub growth_value: f64,
    pub stability_value: f64,
    pub total_value: f64,
    /// growth / total, 0 when the portfolio is empty
    pub growth_share: f64,
    /// Principal contributed so far, initial capital included
    pub cumulative_principal: f64,
    pub profit: f64,
    /// profit / principal, 0 when nothing was contributed
    pub profit_rate: f64,
}

impl AssetState {
    /// Build a snapshot, deriving totals and ratios from the two sleeves
    #[must_use]
    pub fn new(
        month: u32,
        growth_value: f64,
        stability_value: f64,
        cumulative_principal: f64,
    ) -> Self {
        let total_value = growth_value + stability_value;
        let profit = total_value - cumulative_principal;
        Self {
            month,
            growth_value,
            stability_value,
            total_value,
            growth_share: if total_value > 0.0 {
                growth_value / total_value
            } else {
                0.0
            },
            cumulative_principal,
            profit,
            profit_rate: if cumulative_principal > 0.0 {
                profit / cumulative_principal
            } else {
                0.0
            },
        }
    }

    /// True when the portfolio is worth less than what was put in
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.total_value < self.cumulative_principal
    }
}

/// One trajectory: `horizon + 1` states plus derived summary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPath {
    pub states: Vec<AssetState>,
    pub final_value: f64,
    /// Largest peak-to-trough decline of total value, as a fraction of the peak
    pub max_drawdown: f64,
    /// Profit rate of the final state
    pub total_return: f64,
}

impl SimulationPath {
    #[must_use]
    pub fn from_states(states: Vec<AssetState>) -> Self {
        let totals: Vec<f64> = states.iter().map(|s| s.total_value).collect();
        let (final_value, total_return) = states
            .last()
            .map_or((0.0, 0.0), |s| (s.total_value, s.profit_rate));

        Self {
            max_drawdown: max_drawdown(&totals),
            states,
            final_value,
            total_return,
        }
    }

    #[must_use]
    pub fn final_state(&self) -> Option<&AssetState> {
        self.states.last()
    }

    /// Total value at `month`, if the path reaches that far
    #[must_use]
    pub fn total_at(&self, month: usize) -> Option<f64> {
        self.states.get(month).map(|s| s.total_value)
    }

    /// Final value strictly below final cumulative principal
    #[must_use]
    pub fn ends_in_loss(&self) -> bool {
        self.final_state().is_some_and(AssetState::is_loss)
    }

    /// States at months divisible by 3
    #[must_use]
    pub fn quarterly_states(&self) -> Vec<AssetState> {
        self.states
            .iter()
            .filter(|s| s.month % 3 == 0)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_derived_fields() {
        let state = AssetState::new(3, 60.0, 40.0, 80.0);
        assert_eq!(state.total_value, 100.0);
        assert_eq!(state.growth_share, 0.6);
        assert_eq!(state.profit, 20.0);
        assert_eq!(state.profit_rate, 0.25);
        assert!(!state.is_loss());
    }

    #[test]
    fn test_state_zero_guards() {
        let state = AssetState::new(0, 0.0, 0.0, 0.0);
        assert_eq!(state.growth_share, 0.0);
        assert_eq!(state.profit_rate, 0.0);
    }

    #[test]
    fn test_path_summary() {
        let states = vec![
            AssetState::new(0, 50.0, 50.0, 100.0),
            AssetState::new(1, 70.0, 50.0, 100.0),
            AssetState::new(2, 40.0, 50.0, 100.0),
        ];
        let path = SimulationPath::from_states(states);
        assert_eq!(path.final_value, 90.0);
        assert!((path.total_return - -0.1).abs() < 1e-12);
        assert!((path.max_drawdown - 0.25).abs() < 1e-12);
        assert!(path.ends_in_loss());
        assert_eq!(path.total_at(1), Some(120.0));
        assert_eq!(path.total_at(5), None);
    }

    #[test]
    fn test_empty_path() {
        let path = SimulationPath::from_states(Vec::new());
        assert_eq!(path.final_value, 0.0);
        assert_eq!(path.max_drawdown, 0.0);
        assert!(!path.ends_in_loss());
    }
}
