use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use portsim::config::{apply_overrides, load_params, params_to_yaml, start_month};
use portsim::report::{JsonReport, render_deterministic, render_monte_carlo};
use portsim::{Args, init_logging};
use portsim_core::{
    MonteCarloConfig, has_errors, run_deterministic, run_monte_carlo_with_config, validate,
};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();

    if args.dump_defaults {
        print!("{}", params_to_yaml(&Default::default())?);
        return Ok(ExitCode::SUCCESS);
    }

    let _log_guard = init_logging(args.log_dir.as_deref(), &args.log_level)?;

    let params = load_params(args.config.as_deref()).wrap_err("failed to load parameters")?;
    let params = apply_overrides(params, &args);
    let start = start_month(&args)?;

    let issues = validate(&params);
    for issue in &issues {
        eprintln!("{issue}");
    }
    if has_errors(&issues) {
        let errors = issues.iter().filter(|i| i.is_error()).count();
        tracing::error!(errors, "invalid parameters");
        return Ok(ExitCode::FAILURE);
    }

    let deterministic = run_deterministic(&params).wrap_err("deterministic projection failed")?;

    let monte_carlo = if args.deterministic_only {
        None
    } else {
        let mc_config = MonteCarloConfig {
            seed: args.seed,
            ..Default::default()
        };
        Some(run_monte_carlo_with_config(&params, &mc_config).wrap_err("Monte Carlo run failed")?)
    };

    if args.json {
        let report = JsonReport::new(start, &params, &deterministic, monte_carlo.as_ref());
        println!("{}", report.to_json()?);
    } else {
        print!("{}", render_deterministic(start, &deterministic));
        if let Some(mc) = &monte_carlo {
            println!();
            print!("{}", render_monte_carlo(start, mc));
        }
    }

    tracing::info!("done");
    Ok(ExitCode::SUCCESS)
}
