//! Command-line front end for portsim_core

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod util;

pub use cli::Args;
pub use logging::init_logging;
