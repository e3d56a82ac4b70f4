//! Presentation layer: parameter parsing, result formatting and the
//! interactive session
//!
//! The engine only ever sees typed numbers; everything textual lives here.

mod format;
mod parse;
mod session;

pub use format::{format_price, format_result, format_yield, NO_YIELD_MESSAGE};
pub use parse::{parse_parameters, BondParameters};
pub use session::ConsoleSession;
