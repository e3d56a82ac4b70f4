//! Closed-form bond pricing
//!
//! price = face / (1 + r)^n + sum_{k=1..n} (coupon * face) / (1 + r)^k,
//! rounded half-up to 7 decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

use super::memo::CouponMemo;

/// Fractional digits kept in every computed price
pub const DECIMAL_ACCURACY: u32 = 7;

/// (1 + rate)^year
pub(crate) fn discount_factor(year: u16, rate: f64) -> f64 {
    (1.0 + rate).powi(i32::from(year))
}

/// Annual coupon payment
pub fn coupon_cashflow(coupon: f64, face: f64) -> f64 {
    coupon * face
}

/// Present value of the principal repaid at maturity
pub fn principal_value(years: u16, face: f64, rate: f64) -> f64 {
    face / discount_factor(years, rate)
}

/// Present value of all coupons, served from the schedule memo
pub fn coupon_value(memo: &mut CouponMemo, coupon: f64, years: u16, face: f64, rate: f64) -> f64 {
    memo.cumulative(coupon_cashflow(coupon, face), rate, years)
}

/// Bond price at `rate`
///
/// Zero years returns `face` untouched. `rate == -1` is not guarded and
/// yields an infinite or NaN price.
pub fn price(memo: &mut CouponMemo, coupon: f64, years: u16, face: f64, rate: f64) -> f64 {
    if years == 0 {
        return face;
    }

    let principal = principal_value(years, face, rate);
    let coupons = coupon_value(memo, coupon, years, face, rate);
    round_half_up(principal + coupons, DECIMAL_ACCURACY)
}

/// Round to `places` decimals, ties away from zero, on the exact decimal
/// expansion of `value`
///
/// Scaling by 10^places in binary would move ties; going through `Decimal`
/// keeps e.g. 0.00390625 -> 0.0039063. Non-finite values pass through.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        // Beyond Decimal's range every double is already an integer
        None => value,
    }
}
