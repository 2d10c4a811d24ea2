//! Advisory parameter validation for front ends
//!
//! Unlike [`SimulationParams::check`], which only rejects inputs the engine
//! cannot handle, this reports everything a user should be told about,
//! including plausibility warnings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SimulationParams;

pub const MAX_HORIZON_MONTHS: u32 = 600;
pub const MIN_PATH_COUNT: usize = 100;
pub const MAX_PATH_COUNT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}: {} ({})", self.message, self.field)
    }
}

/// True if any issue blocks the run
#[must_use]
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}

fn share_in_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Collect every error and warning for `params`
#[must_use]
pub fn validate(params: &SimulationParams) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if params.initial_capital.is_nan() || params.initial_capital <= 0.0 {
        issues.push(ValidationIssue::error(
            "initial_capital",
            "initial capital must be greater than 0",
        ));
    }
    if !share_in_range(params.initial_growth_share) {
        issues.push(ValidationIssue::error(
            "initial_growth_share",
            "initial growth share must be between 0 and 1",
        ));
    }
    if params.weekly_contribution.is_nan() || params.weekly_contribution < 0.0 {
        issues.push(ValidationIssue::error(
            "weekly_contribution",
            "weekly contribution cannot be negative",
        ));
    }
    if !share_in_range(params.contribution_growth_share) {
        issues.push(ValidationIssue::error(
            "contribution_growth_share",
            "contribution growth share must be between 0 and 1",
        ));
    }
    if !share_in_range(params.rebalance_target_growth_share) {
        issues.push(ValidationIssue::error(
            "rebalance_target_growth_share",
            "rebalance target growth share must be between 0 and 1",
        ));
    }

    let growth_return = params.growth_return;
    if growth_return.is_nan() || growth_return < -1.0 {
        issues.push(ValidationIssue::error(
            "growth_return",
            "growth annual return cannot be below -100%",
        ));
    }
    if growth_return > 0.5 {
        issues.push(ValidationIssue::warning(
            "growth_return",
            "growth annual return above 50%, please confirm it is intended",
        ));
    }
    if growth_return > 0.2 {
        issues.push(ValidationIssue::warning(
            "growth_return",
            format!(
                "growth annual return of {:.0}% is optimistic",
                growth_return * 100.0
            ),
        ));
    }
    if growth_return > 0.3 {
        issues.push(ValidationIssue::warning(
            "growth_return",
            "annual returns above 30% are rarely sustainable",
        ));
    }

    if !(-0.5..=0.3).contains(&params.stability_return) {
        issues.push(ValidationIssue::error(
            "stability_return",
            "stability annual return must be between -50% and 30%",
        ));
    }
    if !(0.0..=1.0).contains(&params.growth_volatility) {
        issues.push(ValidationIssue::error(
            "growth_volatility",
            "growth volatility must be between 0% and 100%",
        ));
    }
    if !(0.0..=0.5).contains(&params.stability_volatility) {
        issues.push(ValidationIssue::error(
            "stability_volatility",
            "stability volatility must be between 0% and 50%",
        ));
    }

    if params.horizon_months == 0 || params.horizon_months > MAX_HORIZON_MONTHS {
        issues.push(ValidationIssue::error(
            "horizon_months",
            format!("horizon must be between 1 and {MAX_HORIZON_MONTHS} months"),
        ));
    }
    if !(MIN_PATH_COUNT..=MAX_PATH_COUNT).contains(&params.path_count) {
        issues.push(ValidationIssue::error(
            "path_count",
            format!("path count must be between {MIN_PATH_COUNT} and {MAX_PATH_COUNT}"),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_clean() {
        assert!(validate(&SimulationParams::default()).is_empty());
    }

    #[test]
    fn test_collects_every_error() {
        let params = SimulationParams {
            initial_capital: 0.0,
            initial_growth_share: 1.5,
            weekly_contribution: -1.0,
            horizon_months: 601,
            path_count: 50,
            ..Default::default()
        };
        let issues = validate(&params);
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();

        assert_eq!(
            fields,
            [
                "initial_capital",
                "initial_growth_share",
                "weekly_contribution",
                "horizon_months",
                "path_count"
            ]
        );
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_high_growth_return_warnings() {
        let params = SimulationParams {
            growth_return: 0.35,
            ..Default::default()
        };
        let issues = validate(&params);

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(!has_errors(&issues));
        assert_eq!(issues[0].message, "growth annual return of 35% is optimistic");
    }

    #[test]
    fn test_extreme_growth_return_is_still_only_a_warning() {
        let params = SimulationParams {
            growth_return: 0.6,
            ..Default::default()
        };
        let issues = validate(&params);
        assert_eq!(issues.len(), 3);
        assert!(!has_errors(&issues));
    }

    #[test]
    fn test_volatility_and_stability_ranges() {
        let params = SimulationParams {
            stability_return: 0.31,
            growth_volatility: 1.1,
            stability_volatility: 0.6,
            ..Default::default()
        };
        let fields: Vec<_> = validate(&params).iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            ["stability_return", "growth_volatility", "stability_volatility"]
        );
    }

    #[test]
    fn test_display() {
        let issue = ValidationIssue::error("path_count", "too few paths");
        assert_eq!(issue.to_string(), "error: too few paths (path_count)");
    }
}
