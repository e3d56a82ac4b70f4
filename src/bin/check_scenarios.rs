//! Run the reference scenarios and print O/X per check
//!
//! Exits with status 1 if any scenario fails.

use bond_yield_calculator::calculator::CalcMode;
use bond_yield_calculator::console::{format_price, format_yield};
use bond_yield_calculator::{run_scenarios, BondCalculator, SolverConfig};

fn main() {
    env_logger::init();

    println!("Bond Yield Calculator - reference scenarios\n");

    let mut calc = BondCalculator::with_config(SolverConfig::from_env());
    let outcomes = run_scenarios(&mut calc);

    println!("{:<2} {:>5} {:>6} {:>5} {:>8} {:>11}   {:>16}   {:>16}",
        "", "Mode", "Coupon", "Years", "Face", "Input", "Result", "Expected");
    println!("{}", "-".repeat(84));

    for outcome in &outcomes {
        let s = &outcome.scenario;
        let (mode, actual, expected) = match s.mode {
            CalcMode::Price => ("price", format_price(outcome.actual), format_price(s.expected)),
            CalcMode::Yield => ("yield", format_yield(outcome.actual), format_yield(s.expected)),
        };
        println!("{:<2} {:>5} {:>6.2} {:>5} {:>8.1} {:>11.7}   {:>16}   {:>16}",
            if outcome.passed { "O" } else { "X" },
            mode,
            s.bond.coupon,
            s.bond.years,
            s.bond.face,
            s.input,
            actual,
            expected,
        );
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    println!("\n{} of {} scenarios passed", outcomes.len() - failed, outcomes.len());

    let coupon_stats = calc.coupon_memo().stats();
    let yield_stats = calc.yield_memo().stats();
    println!("Coupon memo: {} schedules, hit rate {:.1}%",
        calc.coupon_memo().len(), coupon_stats.hit_rate() * 100.0);
    println!("Yield memo:  {} entries, hit rate {:.1}%",
        calc.yield_memo().len(), yield_stats.hit_rate() * 100.0);

    if failed > 0 {
        std::process::exit(1);
    }
}
