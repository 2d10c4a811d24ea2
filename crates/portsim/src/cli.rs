use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use portsim_core::NormalMethod;

#[derive(Parser, Debug)]
#[command(name = "portsim")]
#[command(about = "Project a two-sleeve portfolio with a deterministic run and a Monte Carlo ensemble")]
pub struct Args {
    /// YAML parameter file (default: <config dir>/portsim/params.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Simulation horizon in months
    #[arg(short, long)]
    pub months: Option<u32>,

    /// Number of Monte Carlo paths
    #[arg(short, long)]
    pub paths: Option<usize>,

    /// Master seed for a reproducible Monte Carlo run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Months between rebalances (0 disables rebalancing)
    #[arg(long)]
    pub rebalance_period: Option<u32>,

    /// Growth share restored on each rebalance
    #[arg(long)]
    pub rebalance_target: Option<f64>,

    /// Normal variate generator
    #[arg(long, value_enum)]
    pub normal_method: Option<NormalMethodArg>,

    /// Month of the opening balance, YYYY-MM (default: current month)
    #[arg(long)]
    pub start: Option<String>,

    /// Skip the Monte Carlo run
    #[arg(long)]
    pub deterministic_only: bool,

    /// Print results as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Print the default parameters as YAML and exit
    #[arg(long)]
    pub dump_defaults: bool,

    /// Write logs to <dir>/portsim.log instead of stderr
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalMethodArg {
    BoxMuller,
    Ziggurat,
}

impl From<NormalMethodArg> for NormalMethod {
    fn from(arg: NormalMethodArg) -> Self {
        match arg {
            NormalMethodArg::BoxMuller => NormalMethod::BoxMuller,
            NormalMethodArg::Ziggurat => NormalMethod::Ziggurat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "portsim",
            "--months",
            "120",
            "-p",
            "2000",
            "--seed",
            "7",
            "--normal-method",
            "ziggurat",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.months, Some(120));
        assert_eq!(args.paths, Some(2000));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.normal_method, Some(NormalMethodArg::Ziggurat));
        assert!(args.json);
        assert!(!args.deterministic_only);
        assert_eq!(args.log_level, "info");
    }
}
