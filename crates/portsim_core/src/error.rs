use std::fmt;

/// Precondition failures detected before a run starts
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// A share/ratio field outside `[0, 1]`
    ShareOutOfRange { field: &'static str, value: f64 },
    /// A field that must not be negative
    Negative { field: &'static str, value: f64 },
    /// NaN or infinite input
    NotFinite { field: &'static str },
    /// Annual return below -100%
    ReturnBelowTotalLoss { field: &'static str, value: f64 },
    /// Horizon of zero months
    ZeroHorizon,
    /// Path count of zero
    ZeroPaths,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::ShareOutOfRange { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            }
            ParamsError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ParamsError::NotFinite { field } => write!(f, "{field} must be a finite number"),
            ParamsError::ReturnBelowTotalLoss { field, value } => {
                write!(f, "{field} cannot be below -100%, got {value}")
            }
            ParamsError::ZeroHorizon => write!(f, "simulation horizon must be at least 1 month"),
            ParamsError::ZeroPaths => write!(f, "path count must be at least 1"),
        }
    }
}

impl std::error::Error for ParamsError {}

/// Errors returned by the runners
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidParams(ParamsError),
    InvalidDistribution {
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
    /// Monte Carlo run was cancelled through its progress handle
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParams(e) => write!(f, "invalid parameters: {e}"),
            SimulationError::InvalidDistribution {
                mean,
                std_dev,
                reason,
            } => write!(
                f,
                "invalid normal parameters (mean={mean}, std_dev={std_dev}): {reason}"
            ),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamsError> for SimulationError {
    fn from(e: ParamsError) -> Self {
        SimulationError::InvalidParams(e)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
