//! Solver configuration
//!
//! Defaults reproduce the reference search: bracket [0, 5], price tolerance 1e-7.
//! The iteration cap is the only addition; it turns a search that cannot
//! converge into a NaN result instead of a hung thread.

use serde::{Deserialize, Serialize};
use std::env;

/// Upper end of the initial rate bracket (500%)
pub const DEFAULT_UPPER_GUESS: f64 = 5.0;

/// Lower end of the initial rate bracket
pub const DEFAULT_LOWER_GUESS: f64 = 0.0;

/// Maximum price residual accepted as a match
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Bisection steps before giving up with NaN
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Environment override for `max_iterations`
pub const MAX_ITERATIONS_ENV: &str = "BOND_SOLVER_MAX_ITERATIONS";

/// Environment override for `tolerance`
pub const TOLERANCE_ENV: &str = "BOND_SOLVER_TOLERANCE";

/// A usable price tolerance: finite and strictly positive
pub fn is_valid_tolerance(tolerance: f64) -> bool {
    tolerance.is_finite() && tolerance > 0.0
}

/// Configuration for the yield search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Starting upper rate (guess A)
    pub upper_guess: f64,

    /// Starting lower rate (guess B)
    pub lower_guess: f64,

    /// Price-space tolerance on |price(rate) - observed|
    pub tolerance: f64,

    /// Hard cap on bisection steps
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            upper_guess: DEFAULT_UPPER_GUESS,
            lower_guess: DEFAULT_LOWER_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Defaults, with `BOND_SOLVER_MAX_ITERATIONS` and `BOND_SOLVER_TOLERANCE`
    /// applied when they parse
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_iterations: u32 = env::var(MAX_ITERATIONS_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_iterations);

        let tolerance: f64 = env::var(TOLERANCE_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|t: &f64| is_valid_tolerance(*t))
            .unwrap_or(defaults.tolerance);

        Self {
            max_iterations,
            tolerance,
            ..defaults
        }
    }

    /// Replace the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replace the price tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
