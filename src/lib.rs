//! Bond Yield Calculator - present-value pricing and yield solving for
//! fixed annual-coupon bonds
//!
//! This library provides:
//! - Closed-form pricing with memoized coupon schedules
//! - Bisection yield solving with a memo of solved yields
//! - Parameter parsing, 7-decimal formatting and an interactive session
//! - Parallel CSV batch evaluation
//! - Known-answer reference scenarios

pub mod calculator;
pub mod console;
pub mod batch;
pub mod error;
pub mod scenario;

// Re-export commonly used types
pub use calculator::{BondCalculator, BondSpec, CalcMode, SolverConfig};
pub use console::ConsoleSession;
pub use error::{BatchError, InputError};
pub use scenario::{reference_scenarios, run_scenarios, Scenario, ScenarioOutcome};
