//! Batch evaluation of price and yield requests
//!
//! Rows are independent. Each rayon worker owns its own `BondCalculator`, so
//! memos are never shared between threads.

mod loader;
mod writer;

pub use loader::{load_requests, load_requests_from_reader};
pub use writer::{write_csv, write_json};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculator::{BondCalculator, BondSpec, CalcMode, SolverConfig};
use crate::console::format_result;

/// One input row: bond terms, the calculation and its input value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub coupon: f64,
    pub years: u16,
    pub face: f64,
    pub mode: CalcMode,
    /// Discount rate for `price`, market price for `yield`
    pub value: f64,
}

impl BatchRequest {
    pub fn bond(&self) -> BondSpec {
        BondSpec::new(self.coupon, self.years, self.face)
    }

    /// Evaluate against a caller-owned calculator
    pub fn evaluate(&self, calculator: &mut BondCalculator) -> BatchRow {
        let result = calculator.evaluate(self.mode, &self.bond(), self.value);
        BatchRow {
            coupon: self.coupon,
            years: self.years,
            face: self.face,
            mode: self.mode,
            value: self.value,
            result: (!result.is_nan()).then_some(result),
            display: format_result(self.mode, result),
        }
    }
}

/// One output row
///
/// `result` is `None` when no yield was found; it is written as an empty CSV
/// field or JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub coupon: f64,
    pub years: u16,
    pub face: f64,
    pub mode: CalcMode,
    pub value: f64,
    pub result: Option<f64>,
    pub display: String,
}

/// Evaluate every request in parallel, preserving input order
pub fn evaluate_batch(requests: &[BatchRequest], config: &SolverConfig) -> Vec<BatchRow> {
    requests
        .par_iter()
        .map_init(
            || BondCalculator::with_config(*config),
            |calculator, request| request.evaluate(calculator),
        )
        .collect()
}
