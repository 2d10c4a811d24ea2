//! Tests for the deterministic projection
//!
//! These tests verify that:
//! - The reference parameters produce the expected state layout
//! - Principal accumulates the derived monthly contribution
//! - Without contributions or rebalancing each sleeve compounds independently
//! - Monthly compounding reproduces the annual rate

use proptest::prelude::*;

use crate::deterministic::run_deterministic;
use crate::engine::{annual_to_monthly_return, weekly_to_monthly_contribution};
use crate::error::{ParamsError, SimulationError};
use crate::model::{SimulationBuilder, SimulationParams};

#[test]
fn test_reference_parameters_state_layout() {
    let result = run_deterministic(&SimulationParams::default()).unwrap();
    let states = &result.path.states;

    assert_eq!(states.len(), 13);
    assert_eq!(
        result.quarterly.iter().map(|s| s.month).collect::<Vec<_>>(),
        [0, 3, 6, 9, 12]
    );

    let initial = &states[0];
    assert_eq!(initial.month, 0);
    assert_eq!(initial.total_value, 300_000.0);
    assert_eq!(initial.growth_share, 0.3);
    assert_eq!(initial.cumulative_principal, 300_000.0);
    assert_eq!(initial.profit, 0.0);
    assert_eq!(initial.profit_rate, 0.0);
}

#[test]
fn test_principal_accumulates_monthly_contribution() {
    let params = SimulationParams::default();
    let result = run_deterministic(&params).unwrap();
    let last = result.path.final_state().unwrap();

    let expected = params.initial_capital
        + weekly_to_monthly_contribution(params.weekly_contribution) * 12.0;
    assert!((last.cumulative_principal - expected).abs() < 1e-6);
    assert_eq!(result.path.final_value, last.total_value);
    assert_eq!(result.path.total_return, last.profit_rate);
}

#[test]
fn test_sleeves_compound_without_contributions() {
    let params = SimulationBuilder::new()
        .weekly_contribution(0.0)
        .no_rebalancing()
        .build()
        .unwrap();
    let result = run_deterministic(&params).unwrap();

    let growth = 90_000.0 * (1.0 + annual_to_monthly_return(0.10)).powi(12);
    let stability = 210_000.0 * (1.0 + annual_to_monthly_return(0.04)).powi(12);
    let last = result.path.final_state().unwrap();

    assert!((last.total_value - (growth + stability)).abs() < 1e-6);
    // One year of monthly compounding equals one year at the annual rate
    assert!((last.total_value - (99_000.0 + 218_400.0)).abs() < 1e-6);
    assert_eq!(result.path.max_drawdown, 0.0);
}

#[test]
fn test_identical_inputs_give_identical_paths() {
    let params = SimulationBuilder::new().years(10).build().unwrap();
    let first = run_deterministic(&params).unwrap();
    let second = run_deterministic(&params).unwrap();
    assert_eq!(first.path, second.path);
    assert_eq!(first.quarterly, second.quarterly);
}

#[test]
fn test_quarterly_rows_for_uneven_horizon() {
    let params = SimulationBuilder::new().horizon_months(10).build().unwrap();
    let result = run_deterministic(&params).unwrap();
    assert_eq!(result.path.states.len(), 11);
    assert_eq!(
        result.quarterly.iter().map(|s| s.month).collect::<Vec<_>>(),
        [0, 3, 6, 9]
    );
}

#[test]
fn test_negative_return_produces_drawdown() {
    let params = SimulationBuilder::new()
        .weekly_contribution(0.0)
        .growth(-0.2, 0.2)
        .stability(-0.05, 0.03)
        .build()
        .unwrap();
    let result = run_deterministic(&params).unwrap();

    assert!(result.path.max_drawdown > 0.0);
    assert!(result.path.total_return < 0.0);
}

#[test]
fn test_invalid_params_abort_the_run() {
    let params = SimulationParams {
        rebalance_target_growth_share: -0.1,
        ..Default::default()
    };
    let err = run_deterministic(&params).unwrap_err();
    assert_eq!(
        err,
        SimulationError::InvalidParams(ParamsError::ShareOutOfRange {
            field: "rebalance_target_growth_share",
            value: -0.1,
        })
    );
}

proptest! {
    #[test]
    fn prop_monthly_rate_compounds_back_to_annual(annual in -0.99f64..2.0) {
        let monthly = annual_to_monthly_return(annual);
        let compounded = (1.0 + monthly).powi(12) - 1.0;
        prop_assert!((compounded - annual).abs() < 1e-9);
    }
}
