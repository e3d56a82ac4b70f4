//! Display formatting for engine results

use crate::calculator::{round_half_up, CalcMode, DECIMAL_ACCURACY};

/// Shown in place of a NaN yield
pub const NO_YIELD_MESSAGE: &str = "Could not compute the yield for the given parameters";

/// Price with 7 fixed decimals
pub fn format_price(price: f64) -> String {
    format!("{:.*}", DECIMAL_ACCURACY as usize, price)
}

/// Yield rounded half-up to 7 fixed decimals, or `NO_YIELD_MESSAGE` for NaN
pub fn format_yield(value: f64) -> String {
    if value.is_nan() {
        return NO_YIELD_MESSAGE.to_string();
    }
    format!(
        "{:.*}",
        DECIMAL_ACCURACY as usize,
        round_half_up(value, DECIMAL_ACCURACY)
    )
}

pub fn format_result(mode: CalcMode, value: f64) -> String {
    match mode {
        CalcMode::Price => format_price(value),
        CalcMode::Yield => format_yield(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(832.3922451), "832.3922451");
        assert_eq!(format_price(1000.0), "1000.0000000");
        assert_eq!(format_price(0.0), "0.0000000");
    }

    #[test]
    fn test_format_yield() {
        assert_eq!(format_yield(0.0), "0.0000000");
        assert_eq!(format_yield(0.149997412345), "0.1499974");
        assert_eq!(format_yield(0.00390625), "0.0039063");
        assert_eq!(format_yield(f64::NAN), NO_YIELD_MESSAGE);
        assert_eq!(
            format_yield(f64::NAN),
            "Could not compute the yield for the given parameters"
        );
    }

    #[test]
    fn test_format_result_by_mode() {
        assert_eq!(format_result(CalcMode::Price, 500.0), "500.0000000");
        assert_eq!(format_result(CalcMode::Yield, f64::NAN), NO_YIELD_MESSAGE);
    }
}
