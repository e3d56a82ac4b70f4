//! Yield search by bisection on the price residual
//!
//! Used to invert the pricer: find r such that |price(r) - observed| < tolerance.

use log::{debug, trace, warn};

use super::config::SolverConfig;
use super::pricer::{round_half_up, DECIMAL_ACCURACY};

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// Residual within tolerance at `rate`
    Converged { rate: f64, iterations: u32 },
    /// Neither half of the bracket showed a sign change
    Stalled { iterations: u32 },
    /// Iteration cap reached
    Exhausted { iterations: u32 },
}

impl SearchOutcome {
    /// The solved rate, or NaN when the search failed
    pub fn rate(&self) -> f64 {
        match *self {
            SearchOutcome::Converged { rate, .. } => rate,
            SearchOutcome::Stalled { .. } | SearchOutcome::Exhausted { .. } => f64::NAN,
        }
    }

    pub fn iterations(&self) -> u32 {
        match *self {
            SearchOutcome::Converged { iterations, .. }
            | SearchOutcome::Stalled { iterations }
            | SearchOutcome::Exhausted { iterations } => iterations,
        }
    }
}

fn opposite_signs(a: f64, b: f64) -> bool {
    a * b < 0.0
}

/// Bisect `residual` between `config.upper_guess` and `config.lower_guess`
///
/// The endpoints are tested before the midpoint, so an exact root at a bracket
/// end is returned as-is. When neither sub-interval brackets a sign change the
/// bracket can never move again, and the search stops as `Stalled` instead of
/// spinning until the cap.
pub fn bisect<F>(config: &SolverConfig, mut residual: F) -> SearchOutcome
where
    F: FnMut(f64) -> f64,
{
    let tolerance = config.tolerance;
    let mut guess_a = config.upper_guess;
    let mut guess_b = config.lower_guess;
    let mut price_a = residual(guess_a);
    let mut price_b = residual(guess_b);

    for iteration in 1..=config.max_iterations {
        let guess_c = (guess_a + guess_b) / 2.0;
        let price_c = residual(guess_c);

        trace!(
            "iter {}: a={} ({}) b={} ({}) c={} ({})",
            iteration, guess_a, price_a, guess_b, price_b, guess_c, price_c
        );

        if price_a.abs() < tolerance {
            return SearchOutcome::Converged { rate: guess_a, iterations: iteration };
        }
        if price_b.abs() < tolerance {
            return SearchOutcome::Converged { rate: guess_b, iterations: iteration };
        }
        if price_c.abs() < tolerance {
            return SearchOutcome::Converged { rate: guess_c, iterations: iteration };
        }

        if opposite_signs(price_a, price_c) {
            guess_b = guess_c;
            price_b = price_c;
        } else if opposite_signs(price_b, price_c) {
            guess_a = guess_c;
            price_a = price_c;
        } else {
            return SearchOutcome::Stalled { iterations: iteration };
        }
    }

    SearchOutcome::Exhausted { iterations: config.max_iterations }
}

/// Solve for the rate that zeroes `residual`, NaN when no rate is found
pub fn solve_yield<F>(config: &SolverConfig, residual: F) -> f64
where
    F: FnMut(f64) -> f64,
{
    let outcome = bisect(config, residual);
    match outcome {
        SearchOutcome::Converged { rate, iterations } => {
            debug!("yield converged to {} after {} iterations", rate, iterations);
        }
        SearchOutcome::Stalled { iterations } => {
            warn!(
                "yield search stalled after {} iterations: no sign change in [{}, {}]",
                iterations, config.lower_guess, config.upper_guess
            );
        }
        SearchOutcome::Exhausted { iterations } => {
            warn!("yield search hit the {} iteration cap", iterations);
        }
    }
    outcome.rate()
}

/// Closed-form yield-to-maturity approximation
///
/// (cf + (face - price) / years) / ((face + price) / 2), rounded half-up to
/// 7 places. Zero years gives 0.0. Only a reference figure; the solver never
/// uses it.
pub fn approximate_yield(coupon: f64, years: u16, face: f64, price: f64) -> f64 {
    if years == 0 {
        return 0.0;
    }

    let cashflow = coupon * face;
    let estimate = (cashflow + (face - price) / f64::from(years)) / ((face + price) / 2.0);
    round_half_up(estimate, DECIMAL_ACCURACY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_root_inside_bracket() {
        let outcome = bisect(&SolverConfig::default(), |r| 1.0 - 2.0 * r);
        match outcome {
            SearchOutcome::Converged { rate, .. } => assert_abs_diff_eq!(rate, 0.5, epsilon = 1e-7),
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_root_at_lower_guess() {
        let outcome = bisect(&SolverConfig::default(), |r| -r);
        assert_eq!(outcome, SearchOutcome::Converged { rate: 0.0, iterations: 1 });
    }

    #[test]
    fn test_root_at_upper_guess() {
        let outcome = bisect(&SolverConfig::default(), |r| r - 5.0);
        assert_eq!(outcome, SearchOutcome::Converged { rate: 5.0, iterations: 1 });
    }

    #[test]
    fn test_no_sign_change_stalls() {
        let outcome = bisect(&SolverConfig::default(), |r| r + 1.0);
        assert_eq!(outcome, SearchOutcome::Stalled { iterations: 1 });
        assert!(outcome.rate().is_nan());
    }

    #[test]
    fn test_nan_residual_stalls() {
        let outcome = bisect(&SolverConfig::default(), |_| f64::NAN);
        assert!(matches!(outcome, SearchOutcome::Stalled { .. }));
    }

    #[test]
    fn test_iteration_cap() {
        let config = SolverConfig::default().with_max_iterations(3);
        let outcome = bisect(&config, |r| 1.0 - 3.0 * r);
        assert_eq!(outcome, SearchOutcome::Exhausted { iterations: 3 });
        assert!(solve_yield(&config, |r| 1.0 - 3.0 * r).is_nan());
    }

    #[test]
    fn test_zero_iteration_cap_returns_nan() {
        let config = SolverConfig::default().with_max_iterations(0);
        assert!(solve_yield(&config, |r| r - 5.0).is_nan());
    }

    #[test]
    fn test_approximate_yield() {
        // (100 + 167.6 / 5) / 916.2
        assert_abs_diff_eq!(approximate_yield(0.10, 5, 1000.0, 832.4), 0.1457324, epsilon = 1e-9);
        assert_abs_diff_eq!(approximate_yield(0.10, 5, 1000.0, 1000.0), 0.1, epsilon = 1e-12);
        assert_eq!(approximate_yield(0.10, 0, 1000.0, 900.0), 0.0);
    }
}
