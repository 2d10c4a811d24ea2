//! Parameter file loading and command-line overrides
//!
//! Parameters come from, in increasing precedence:
//! 1. Built-in defaults (`SimulationParams::default()`)
//! 2. A YAML file: `--config`, or `<config dir>/portsim/params.yaml` if it exists
//! 3. Individual command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use jiff::civil::Date;
use portsim_core::SimulationParams;

use crate::cli::Args;
use crate::util::format::parse_month;

pub const CONFIG_FILE_NAME: &str = "params.yaml";

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
    InvalidStart(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            ConfigError::InvalidStart(msg) => write!(f, "Invalid start month: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// `<config dir>/portsim/params.yaml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("portsim").join(CONFIG_FILE_NAME))
}

pub fn params_from_yaml(yaml: &str) -> Result<SimulationParams, ConfigError> {
    serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
}

pub fn params_to_yaml(params: &SimulationParams) -> Result<String, ConfigError> {
    serde_saphyr::to_string(params).map_err(|e| ConfigError::Serialize(e.to_string()))
}

fn read_params(path: &Path) -> Result<SimulationParams, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
    params_from_yaml(&content)
        .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
}

/// Load parameters from an explicit file, or from the default location.
///
/// An explicit path must exist. A missing default file silently yields the
/// built-in defaults.
pub fn load_params(explicit: Option<&Path>) -> Result<SimulationParams, ConfigError> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading parameters");
        return read_params(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "loading default parameter file");
            read_params(&path)
        }
        _ => Ok(SimulationParams::default()),
    }
}

/// Overlay the flags the user actually passed
pub fn apply_overrides(mut params: SimulationParams, args: &Args) -> SimulationParams {
    if let Some(months) = args.months {
        params.horizon_months = months;
    }
    if let Some(paths) = args.paths {
        params.path_count = paths;
    }
    if let Some(period) = args.rebalance_period {
        params.rebalance_period = period;
    }
    if let Some(target) = args.rebalance_target {
        params.rebalance_target_growth_share = target;
    }
    if let Some(method) = args.normal_method {
        params.normal_method = method.into();
    }
    params
}

/// Month of the opening balance: `--start`, or the current month
pub fn start_month(args: &Args) -> Result<Date, ConfigError> {
    match &args.start {
        Some(value) => {
            parse_month(value).map_err(|e| ConfigError::InvalidStart(format!("{value}: {e}")))
        }
        None => Ok(jiff::Zoned::now().date().first_of_month()),
    }
}
