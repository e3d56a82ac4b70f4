//! Bond Yield Calculator CLI
//!
//! Interactive by default; `price`, `yield` and `batch` run one-shot.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use bond_yield_calculator::batch::{evaluate_batch, load_requests, write_csv, write_json};
use bond_yield_calculator::calculator::{approximate_yield, is_valid_tolerance};
use bond_yield_calculator::console::{format_price, format_yield};
use bond_yield_calculator::{BondCalculator, ConsoleSession, SolverConfig};

#[derive(Parser)]
#[command(name = "bond_yield_calculator")]
#[command(author, version, about = "Fixed-coupon bond price and yield calculator", long_about = None)]
struct Cli {
    /// Bisection step cap for yield searches (default 200, or BOND_SOLVER_MAX_ITERATIONS)
    #[arg(long, global = true)]
    max_iterations: Option<u32>,

    /// Price tolerance for yield searches (default 1e-7, or BOND_SOLVER_TOLERANCE)
    #[arg(long, global = true, value_parser = parse_tolerance)]
    tolerance: Option<f64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Menu-driven session on stdin/stdout
    Interactive,

    /// Price a bond from a discount rate
    #[command(allow_negative_numbers = true)]
    Price {
        /// Coupon rate as a decimal (0.10 = 10%)
        coupon: f64,
        /// Whole years to maturity
        years: u16,
        /// Face value
        face: f64,
        /// Discount rate as a decimal
        rate: f64,
    },

    /// Solve for the yield implied by a price
    #[command(allow_negative_numbers = true)]
    Yield {
        /// Coupon rate as a decimal (0.10 = 10%)
        coupon: f64,
        /// Whole years to maturity
        years: u16,
        /// Face value
        face: f64,
        /// Market price
        price: f64,
    },

    /// Evaluate a CSV of requests (coupon,years,face,mode,value)
    Batch {
        /// Input CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: BatchFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BatchFormat {
    Csv,
    Json,
}

fn parse_tolerance(text: &str) -> Result<f64, String> {
    let tolerance: f64 = text.parse().map_err(|e| format!("{}", e))?;
    if is_valid_tolerance(tolerance) {
        Ok(tolerance)
    } else {
        Err(format!("tolerance must be a finite number above zero, got {}", text))
    }
}

fn solver_config(cli: &Cli) -> SolverConfig {
    let mut config = SolverConfig::from_env();
    if let Some(max_iterations) = cli.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(tolerance) = cli.tolerance {
        config = config.with_tolerance(tolerance);
    }
    config
}

fn run_batch(
    config: &SolverConfig,
    input: &Path,
    output: Option<&Path>,
    format: BatchFormat,
) -> Result<()> {
    let start = Instant::now();
    let requests = load_requests(input)
        .with_context(|| format!("Failed to load requests from {}", input.display()))?;
    info!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let rows = evaluate_batch(&requests, config);
    info!("Evaluated {} requests in {:?}", rows.len(), start.elapsed());

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        BatchFormat::Csv => write_csv(writer, &rows),
        BatchFormat::Json => write_json(writer, &rows),
    }
    .context("Failed to write batch results")?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = solver_config(&cli);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let stdin = io::stdin();
            let mut session = ConsoleSession::with_calculator(
                stdin.lock(),
                io::stdout(),
                BondCalculator::with_config(config),
            );
            session.run().context("Console session failed")?;
        }
        Command::Price { coupon, years, face, rate } => {
            let mut calc = BondCalculator::with_config(config);
            println!("{}", format_price(calc.price(coupon, years, face, rate)));
        }
        Command::Yield { coupon, years, face, price } => {
            let mut calc = BondCalculator::with_config(config);
            println!("{}", format_yield(calc.bond_yield(coupon, years, face, price)));
            println!(
                "Approx. YTM: {}",
                format_yield(approximate_yield(coupon, years, face, price))
            );
        }
        Command::Batch { input, output, format } => {
            run_batch(&config, &input, output.as_deref(), format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_flag_is_applied() {
        let args = ["bond_yield_calculator", "--tolerance", "1e-4", "price", "0.1", "5", "1000", "0.15"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(solver_config(&cli).tolerance, 1e-4);
    }

    #[test]
    fn test_unusable_tolerance_is_rejected() {
        for bad in ["0", "-1e-7", "NaN", "inf", "abc"] {
            let args = ["bond_yield_calculator", "--tolerance", bad, "interactive"];
            let parsed = Cli::try_parse_from(args);
            assert!(parsed.is_err(), "--tolerance {} accepted", bad);
        }
    }
}
