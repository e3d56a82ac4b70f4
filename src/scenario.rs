//! Reference scenarios for checking a calculator build
//!
//! Known prices and yields with their accepted tolerance. Prices are expected
//! to match exactly after rounding; yields within 1e-5.

use crate::calculator::{BondCalculator, BondSpec, CalcMode};

/// One known-answer check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub mode: CalcMode,
    pub bond: BondSpec,
    /// Rate for price checks, price for yield checks
    pub input: f64,
    pub expected: f64,
    /// Accepted |actual - expected|; 0.0 means bit-exact
    pub tolerance: f64,
}

impl Scenario {
    const fn price(coupon: f64, years: u16, face: f64, rate: f64, expected: f64) -> Self {
        Self {
            mode: CalcMode::Price,
            bond: BondSpec { coupon, years, face },
            input: rate,
            expected,
            tolerance: 0.0,
        }
    }

    const fn bond_yield(coupon: f64, years: u16, face: f64, price: f64, expected: f64) -> Self {
        Self {
            mode: CalcMode::Yield,
            bond: BondSpec { coupon, years, face },
            input: price,
            expected,
            tolerance: 1e-5,
        }
    }

    pub fn run(&self, calculator: &mut BondCalculator) -> ScenarioOutcome {
        let actual = calculator.evaluate(self.mode, &self.bond, self.input);
        let passed = if self.tolerance == 0.0 {
            actual == self.expected
        } else {
            (actual - self.expected).abs() <= self.tolerance
        };

        ScenarioOutcome {
            scenario: *self,
            actual,
            passed,
        }
    }
}

/// Result of running one scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub actual: f64,
    pub passed: bool,
}

/// The known-answer set
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::price(0.10, 5, 1000.0, 0.15, 832.3922451),
        Scenario::price(0.15, 5, 1000.0, 0.15, 1000.0),
        Scenario::price(0.10, 5, 1000.0, 0.08, 1079.8542007),
        Scenario::price(0.0, 10, 500.0, 0.10, 192.7716447),
        Scenario::price(0.10, 10, 500.0, 0.0, 1000.0),
        Scenario::price(0.10, 0, 500.0, 0.10, 500.0),
        Scenario::price(0.10, 10, 0.0, 0.10, 0.0),
        Scenario::bond_yield(0.10, 5, 1000.0, 832.4, 0.1499974),
        Scenario::bond_yield(0.10, 5, 1000.0, 1000.0, 0.1),
        Scenario::bond_yield(0.10, 10, 500.0, 1000.0, 0.0),
        Scenario::bond_yield(0.10, 0, 1000.0, 1000.0, 0.0),
    ]
}

/// Run every reference scenario against one calculator
pub fn run_scenarios(calculator: &mut BondCalculator) -> Vec<ScenarioOutcome> {
    reference_scenarios()
        .iter()
        .map(|scenario| scenario.run(calculator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_reference_scenarios_pass() {
        let mut calc = BondCalculator::new();
        for outcome in run_scenarios(&mut calc) {
            assert!(
                outcome.passed,
                "{:?} {:?} {} -> {} (expected {})",
                outcome.scenario.mode,
                outcome.scenario.bond,
                outcome.scenario.input,
                outcome.actual,
                outcome.scenario.expected
            );
        }
    }

    #[test]
    fn test_failing_scenario_is_reported() {
        let wrong = Scenario::price(0.10, 5, 1000.0, 0.15, 832.0);
        let outcome = wrong.run(&mut BondCalculator::new());
        assert!(!outcome.passed);
        assert_eq!(outcome.actual, 832.3922451);
    }

    #[test]
    fn test_nan_yield_never_passes() {
        let impossible = Scenario::bond_yield(0.10, 5, 1000.0, 2000.0, 0.0);
        assert!(!impossible.run(&mut BondCalculator::new()).passed);
    }
}
