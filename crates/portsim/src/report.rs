//! Plain-text tables and the JSON document printed by the binary

use std::fmt::Write;

use jiff::civil::Date;
use portsim_core::{
    AssetState, DeterministicResult, MonteCarloResult, SimulationParams, SimulationStatistics,
};
use serde::Serialize;

use crate::util::format::{
    format_compact_currency, format_currency, format_currency_short, format_percentage,
    month_label,
};

/// Machine-readable output of one invocation. Monte Carlo paths are left out.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub start_month: String,
    pub params: &'a SimulationParams,
    pub deterministic: &'a DeterministicResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<JsonMonteCarlo<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonMonteCarlo<'a> {
    pub seed: u64,
    pub path_count: usize,
    pub statistics: &'a SimulationStatistics,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        start: Date,
        params: &'a SimulationParams,
        deterministic: &'a DeterministicResult,
        monte_carlo: Option<&'a MonteCarloResult>,
    ) -> Self {
        Self {
            start_month: month_label(start, 0),
            params,
            deterministic,
            monte_carlo: monte_carlo.map(|mc| JsonMonteCarlo {
                seed: mc.seed,
                path_count: mc.paths.len(),
                statistics: &mc.statistics,
            }),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn state_row(out: &mut String, start: Date, state: &AssetState) {
    let _ = writeln!(
        out,
        "{:<8} {:>14} {:>14} {:>14} {:>8} {:>14} {:>14} {:>8}",
        month_label(start, state.month),
        format_currency_short(state.growth_value),
        format_currency_short(state.stability_value),
        format_currency_short(state.total_value),
        format_percentage(state.growth_share),
        format_currency_short(state.cumulative_principal),
        format_currency_short(state.profit),
        format_percentage(state.profit_rate),
    );
}

/// Quarterly table of the deterministic projection plus a summary line
pub fn render_deterministic(start: Date, result: &DeterministicResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Deterministic projection");
    let _ = writeln!(
        out,
        "{:<8} {:>14} {:>14} {:>14} {:>8} {:>14} {:>14} {:>8}",
        "Month", "Growth", "Stability", "Total", "Growth%", "Principal", "Profit", "Return"
    );
    for state in &result.quarterly {
        state_row(&mut out, start, state);
    }

    if let Some(last) = result.path.final_state() {
        let _ = writeln!(
            out,
            "\nFinal value {}  profit {} ({})  max drawdown {}",
            format_currency(last.total_value),
            format_currency(last.profit),
            format_percentage(last.profit_rate),
            format_percentage(result.path.max_drawdown),
        );
    }
    out
}

/// Distribution summary and quarterly confidence bands of a Monte Carlo run
pub fn render_monte_carlo(start: Date, result: &MonteCarloResult) -> String {
    let stats = &result.statistics;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Monte Carlo ({} paths, seed {})",
        result.paths.len(),
        result.seed
    );
    let _ = writeln!(
        out,
        "Final value   mean {}  median {}",
        format_currency(stats.final_value_mean),
        format_currency(stats.final_value_median)
    );
    let _ = writeln!(
        out,
        "              p5 {}  p25 {}  p75 {}  p95 {}",
        format_compact_currency(stats.final_value_p5),
        format_compact_currency(stats.final_value_p25),
        format_compact_currency(stats.final_value_p75),
        format_compact_currency(stats.final_value_p95)
    );
    let _ = writeln!(
        out,
        "              min {}  max {}",
        format_compact_currency(stats.final_value_min),
        format_compact_currency(stats.final_value_max)
    );
    let _ = writeln!(
        out,
        "Total return  mean {}  median {}  p5 {}  p95 {}",
        format_percentage(stats.return_mean),
        format_percentage(stats.return_median),
        format_percentage(stats.return_p5),
        format_percentage(stats.return_p95)
    );
    let _ = writeln!(
        out,
        "Drawdown      mean {}  p95 {}",
        format_percentage(stats.max_drawdown_mean),
        format_percentage(stats.max_drawdown_p95)
    );
    let _ = writeln!(
        out,
        "Loss probability {}",
        format_percentage(stats.loss_probability)
    );

    let _ = writeln!(
        out,
        "\n{:<8} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Month", "p5", "p25", "Median", "p75", "p95"
    );
    for band in stats.confidence_bands.iter().filter(|b| b.month % 3 == 0) {
        let _ = writeln!(
            out,
            "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10}",
            month_label(start, band.month),
            format_compact_currency(band.p5),
            format_compact_currency(band.p25),
            format_compact_currency(band.median),
            format_compact_currency(band.p75),
            format_compact_currency(band.p95),
        );
    }
    out
}
