//! Interactive price/yield session over any line-based reader and writer

use std::io::{self, BufRead, Write};

use log::debug;

use super::format::format_result;
use super::parse::parse_parameters;
use crate::calculator::{BondCalculator, CalcMode};

/// Where the parameter prompt sends the user next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Menu,
    Quit,
}

/// Menu-driven calculator session
///
/// One `BondCalculator` serves the whole session, so coupon schedules and
/// solved yields carry over between requests.
pub struct ConsoleSession<R, W> {
    input: R,
    output: W,
    calculator: BondCalculator,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_calculator(input, output, BondCalculator::new())
    }

    pub fn with_calculator(input: R, output: W, calculator: BondCalculator) -> Self {
        Self {
            input,
            output,
            calculator,
        }
    }

    pub fn calculator(&self) -> &BondCalculator {
        &self.calculator
    }

    /// Hand back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Bond yield calculator")?;
        writeln!(self.output)?;

        loop {
            self.print_menu()?;

            let Some(choice) = self.read_line()? else {
                break;
            };
            writeln!(self.output)?;

            let mode = if choice.eq_ignore_ascii_case("q") {
                break;
            } else if choice.eq_ignore_ascii_case("p") {
                CalcMode::Price
            } else if choice.eq_ignore_ascii_case("y") {
                CalcMode::Yield
            } else {
                continue;
            };

            self.print_parameter_help(mode)?;
            if self.parameter_loop(mode)? == Next::Quit {
                break;
            }
        }

        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Select a calculation:")?;
        writeln!(self.output, "  p  bond price from a discount rate")?;
        writeln!(self.output, "  y  bond yield from a price")?;
        writeln!(self.output, "  q  quit")?;
        self.output.flush()
    }

    fn print_parameter_help(&mut self, mode: CalcMode) -> io::Result<()> {
        writeln!(self.output, "Enter the parameters separated by single spaces:")?;
        writeln!(self.output, "  coupon  coupon rate as a decimal")?;
        writeln!(self.output, "  years   whole years to maturity")?;
        writeln!(self.output, "  face    face value")?;
        match mode {
            CalcMode::Price => {
                writeln!(self.output, "  rate    discount rate as a decimal")?;
                writeln!(self.output, "  e.g.    0.10 5 1000.0 0.15")?;
            }
            CalcMode::Yield => {
                writeln!(self.output, "  price   market price of the bond")?;
                writeln!(self.output, "  e.g.    0.10 5 1000.0 832.3922451")?;
            }
        }
        writeln!(self.output, "Enter 'b' to go back to the menu or 'q' to quit")?;
        writeln!(self.output)?;
        self.output.flush()
    }

    fn parameter_loop(&mut self, mode: CalcMode) -> io::Result<Next> {
        let value_name = match mode {
            CalcMode::Price => "rate",
            CalcMode::Yield => "price",
        };

        loop {
            let Some(line) = self.read_line()? else {
                return Ok(Next::Quit);
            };
            writeln!(self.output)?;

            if line.eq_ignore_ascii_case("q") {
                return Ok(Next::Quit);
            }
            if line.eq_ignore_ascii_case("b") {
                return Ok(Next::Menu);
            }

            match parse_parameters(&line, value_name) {
                Ok(params) => {
                    let result = self.calculator.evaluate(mode, &params.bond, params.value);
                    debug!("{:?} {:?} {} -> {}", mode, params.bond, params.value, result);
                    writeln!(self.output, "{}", format_result(mode, result))?;
                    writeln!(self.output)?;
                    return Ok(Next::Menu);
                }
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    writeln!(self.output, "Please reenter parameters")?;
                    writeln!(self.output)?;
                }
            }
        }
    }

    /// Next line without its terminator, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::NO_YIELD_MESSAGE;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, ConsoleSession<Cursor<Vec<u8>>, Vec<u8>>) {
        let mut session = ConsoleSession::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        session.run().unwrap();
        let output = String::from_utf8(session.output.clone()).unwrap();
        (output, session)
    }

    #[test]
    fn test_price_then_quit() {
        let (output, _) = run_script("p\n0.10 5 1000.0 0.15\nq\n");
        assert!(output.starts_with("Bond yield calculator"));
        assert!(output.contains("832.3922451\n"));
    }

    #[test]
    fn test_yield_request() {
        let (output, _) = run_script("Y\n0.10 10 500 1000.0\nq\n");
        assert!(output.contains("0.0000000\n"));
    }

    #[test]
    fn test_unsolvable_yield_prints_message() {
        let (output, _) = run_script("y\n0.10 5 1000 2000\nq\n");
        assert!(output.contains(NO_YIELD_MESSAGE));
    }

    #[test]
    fn test_bad_input_asks_again() {
        let (output, _) = run_script("p\n0.10 5 1000\n0.10 five 1000 0.15\n0.10 5 1000.0 0.08\nq\n");
        assert_eq!(output.matches("Please reenter parameters").count(), 2);
        assert!(output.contains("got 3"));
        assert!(output.contains("'five'"));
        assert!(output.contains("1079.8542007\n"));
    }

    #[test]
    fn test_back_returns_to_menu() {
        let (output, _) = run_script("p\nb\ny\n0.10 5 1000 1000\nq\n");
        assert_eq!(output.matches("Select a calculation:").count(), 3);
        assert!(output.contains("0.1000000\n"));
    }

    #[test]
    fn test_quit_from_parameter_prompt() {
        let (output, _) = run_script("p\nQ\np\n");
        assert_eq!(output.matches("Select a calculation:").count(), 1);
    }

    #[test]
    fn test_unknown_choice_redisplays_menu() {
        let (output, _) = run_script("x\nq\n");
        assert_eq!(output.matches("Select a calculation:").count(), 2);
        assert!(!output.contains("Enter the parameters"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (output, _) = run_script("p\n");
        assert!(output.contains("Enter the parameters"));

        let (output, _) = run_script("");
        assert!(output.contains("Select a calculation:"));
    }

    #[test]
    fn test_memos_persist_across_requests() {
        let (_, session) = run_script("y\n0.10 5 1000 832.4\ny\n0.10 5 1000 832.4\nq\n");
        let stats = session.calculator().yield_memo().stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_windows_line_endings() {
        let (output, _) = run_script("p\r\n0.15 5 1000 0.15\r\nq\r\n");
        assert!(output.contains("1000.0000000\n"));
    }
}
