//! Pricing and yield engine
//!
//! `BondCalculator` owns the coupon-schedule memo and the yield memo. Both
//! operations take `&mut self`; for parallel work give each thread its own
//! calculator (see `batch::evaluate_batch`).
//!
//! # Example
//!
//! ```rust
//! use bond_yield_calculator::BondCalculator;
//!
//! let mut calc = BondCalculator::new();
//! let price = calc.price(0.10, 5, 1000.0, 0.15);
//! assert_eq!(price, 832.3922451);
//!
//! let y = calc.bond_yield(0.10, 5, 1000.0, price);
//! assert!((y - 0.15).abs() < 1e-6);
//! ```

mod config;
mod memo;
mod pricer;
mod solver;

pub use config::{
    is_valid_tolerance, SolverConfig, DEFAULT_LOWER_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
    DEFAULT_UPPER_GUESS, MAX_ITERATIONS_ENV, TOLERANCE_ENV,
};
pub use memo::{CouponMemo, CouponMemoKey, MemoStats, YieldMemo, YieldMemoKey};
pub use pricer::{coupon_cashflow, principal_value, round_half_up, DECIMAL_ACCURACY};
pub use solver::{approximate_yield, bisect, solve_yield, SearchOutcome};

use serde::{Deserialize, Serialize};

/// Annual-coupon bond terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Coupon rate as a fraction (0.10 = 10%)
    pub coupon: f64,
    /// Whole years to maturity, at most `u16::MAX`
    pub years: u16,
    /// Principal repaid at maturity
    pub face: f64,
}

impl BondSpec {
    pub fn new(coupon: f64, years: u16, face: f64) -> Self {
        Self { coupon, years, face }
    }

    /// Coupon payment per year
    pub fn cashflow(&self) -> f64 {
        coupon_cashflow(self.coupon, self.face)
    }
}

/// Which inverse problem a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMode {
    /// Value is a discount rate; result is a price
    Price,
    /// Value is a market price; result is a yield
    Yield,
}

/// Bond pricer and yield solver with process-lifetime memoization
#[derive(Debug, Default)]
pub struct BondCalculator {
    config: SolverConfig,
    coupons: CouponMemo,
    yields: YieldMemo,
}

impl BondCalculator {
    /// Calculator with the default solver configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Present value of the bond at discount `rate`, rounded to 7 places
    pub fn price(&mut self, coupon: f64, years: u16, face: f64, rate: f64) -> f64 {
        pricer::price(&mut self.coupons, coupon, years, face, rate)
    }

    /// Discount rate reproducing `price`, or NaN when none is found in the
    /// search bracket
    pub fn bond_yield(&mut self, coupon: f64, years: u16, face: f64, price: f64) -> f64 {
        if years == 0 {
            return 0.0;
        }

        let key = YieldMemoKey::new(coupon, years, face, price);
        if let Some(cached) = self.yields.lookup(&key) {
            return cached;
        }

        let coupons = &mut self.coupons;
        let solved = solve_yield(&self.config, |rate| {
            pricer::price(coupons, coupon, years, face, rate) - price
        });

        self.yields.insert(key, solved);
        solved
    }

    pub fn price_bond(&mut self, bond: &BondSpec, rate: f64) -> f64 {
        self.price(bond.coupon, bond.years, bond.face, rate)
    }

    pub fn yield_bond(&mut self, bond: &BondSpec, price: f64) -> f64 {
        self.bond_yield(bond.coupon, bond.years, bond.face, price)
    }

    /// Price at `value` or yield at `value`, depending on `mode`
    pub fn evaluate(&mut self, mode: CalcMode, bond: &BondSpec, value: f64) -> f64 {
        match mode {
            CalcMode::Price => self.price_bond(bond, value),
            CalcMode::Yield => self.yield_bond(bond, value),
        }
    }

    pub fn coupon_memo(&self) -> &CouponMemo {
        &self.coupons
    }

    pub fn yield_memo(&self) -> &YieldMemo {
        &self.yields
    }

    /// Drop every memoized schedule and yield
    ///
    /// Never called by the engine itself; for long-lived hosts that want to
    /// bound memory.
    pub fn clear_memos(&mut self) {
        self.coupons.clear();
        self.yields.clear();
    }
}
