//! Normal variates drawn from an injected uniform source.
//!
//! The uniform source is any [`rand::Rng`]; callers pass a seeded generator
//! for reproducible runs and the Monte Carlo runner threads one generator per
//! batch explicitly instead of touching a process-wide source.

use std::f64::consts::PI;

use rand::Rng;
use rand::distr::Distribution;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// How standard normal variates are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMethod {
    /// Box-Muller transform of two uniforms
    #[default]
    BoxMuller,
    /// Ziggurat sampler from `rand_distr`
    Ziggurat,
}

/// Uniform draw in (0, 1); an exact 0 is re-drawn so the logarithm stays finite
fn nonzero_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u != 0.0 {
            return u;
        }
    }
}

/// One standard normal draw via the Box-Muller transform
pub fn box_muller<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = nonzero_uniform(rng);
    let v = nonzero_uniform(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// One standard normal draw using `method`
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R, method: NormalMethod) -> f64 {
    match method {
        NormalMethod::BoxMuller => box_muller(rng),
        NormalMethod::Ziggurat => StandardNormal.sample(rng),
    }
}

/// `mean + std_dev * z` for a standard normal `z`
pub fn normal<R: Rng + ?Sized>(rng: &mut R, method: NormalMethod, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * standard_normal(rng, method)
}

/// Normal distribution of one sleeve's monthly log return
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnDistribution {
    mean: f64,
    std_dev: f64,
    method: NormalMethod,
}

impl ReturnDistribution {
    pub fn new(mean: f64, std_dev: f64, method: NormalMethod) -> Result<Self, SimulationError> {
        let reason = if !mean.is_finite() {
            Some("mean is not finite")
        } else if !std_dev.is_finite() {
            Some("standard deviation is not finite")
        } else if std_dev < 0.0 {
            Some("standard deviation is negative")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SimulationError::InvalidDistribution {
                mean,
                std_dev,
                reason,
            }),
            None => Ok(Self {
                mean,
                std_dev,
                method,
            }),
        }
    }
}

impl Distribution<f64> for ReturnDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        normal(rng, self.method, self.mean, self.std_dev)
    }
}
