//! Parameter line parsing
//!
//! A line holds exactly four fields separated by single spaces:
//! `coupon years face value`, where value is a rate (price mode) or a
//! price (yield mode).

use crate::calculator::BondSpec;
use crate::error::{InputError, InputResult};

/// Parsed bond terms plus the rate or price typed after them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondParameters {
    pub bond: BondSpec,
    pub value: f64,
}

fn parse_field<T: std::str::FromStr>(field: &'static str, text: &str) -> InputResult<T> {
    text.parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

fn parse_years(text: &str) -> InputResult<u16> {
    let years: u64 = parse_field("years", text)?;
    u16::try_from(years).map_err(|_| InputError::OutOfRange {
        field: "years",
        value: text.to_string(),
        max: u64::from(u16::MAX),
    })
}

/// Parse `coupon years face value`
///
/// The field count is checked before empty fields, so a doubled space in a
/// four-number line reports a count mismatch.
pub fn parse_parameters(line: &str, value_name: &'static str) -> InputResult<BondParameters> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(' ').collect();

    if fields.len() != 4 {
        return Err(InputError::WrongParameterCount(fields.len()));
    }
    if fields.iter().any(|f| f.is_empty()) {
        return Err(InputError::EmptyParameter);
    }

    let coupon: f64 = parse_field("coupon", fields[0])?;
    let years = parse_years(fields[1])?;
    let face: f64 = parse_field("face", fields[2])?;
    let value: f64 = parse_field(value_name, fields[3])?;

    Ok(BondParameters {
        bond: BondSpec::new(coupon, years, face),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let params = parse_parameters("0.10 5 1000.0 0.15\n", "rate").unwrap();
        assert_eq!(params.bond, BondSpec::new(0.10, 5, 1000.0));
        assert_eq!(params.value, 0.15);
    }

    #[test]
    fn test_negative_rate_is_accepted() {
        let params = parse_parameters("0.05 3 100 -0.02", "rate").unwrap();
        assert_eq!(params.value, -0.02);
    }

    #[test]
    fn test_wrong_count() {
        assert_eq!(
            parse_parameters("0.10 5 1000", "rate"),
            Err(InputError::WrongParameterCount(3))
        );
        assert_eq!(
            parse_parameters("0.10  5 1000 0.15", "rate"),
            Err(InputError::WrongParameterCount(5))
        );
    }

    #[test]
    fn test_empty_field() {
        assert_eq!(
            parse_parameters("0.10  5 1000", "price"),
            Err(InputError::EmptyParameter)
        );
        assert_eq!(
            parse_parameters("0.10 5 1000 ", "price"),
            Err(InputError::EmptyParameter)
        );
    }

    #[test]
    fn test_years_beyond_u16_are_out_of_range() {
        let longest = parse_parameters("0.10 65535 1000 0.15", "rate").unwrap();
        assert_eq!(longest.bond.years, u16::MAX);

        for years in ["65536", "4294967295"] {
            let line = format!("0.10 {} 1000 0.15", years);
            assert_eq!(
                parse_parameters(&line, "rate"),
                Err(InputError::OutOfRange { field: "years", value: years.into(), max: 65535 })
            );
        }
    }

    #[test]
    fn test_non_numeric_fields() {
        assert_eq!(
            parse_parameters("ten 5 1000 0.15", "rate"),
            Err(InputError::InvalidNumber { field: "coupon", value: "ten".into() })
        );
        // Years must be a whole, non-negative number
        assert_eq!(
            parse_parameters("0.10 5.5 1000 0.15", "rate"),
            Err(InputError::InvalidNumber { field: "years", value: "5.5".into() })
        );
        assert_eq!(
            parse_parameters("0.10 -5 1000 0.15", "rate"),
            Err(InputError::InvalidNumber { field: "years", value: "-5".into() })
        );
        assert_eq!(
            parse_parameters("0.10 5 1000 abc", "price"),
            Err(InputError::InvalidNumber { field: "price", value: "abc".into() })
        );
    }
}
