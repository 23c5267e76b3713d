//! Core types and rounding rules

use rust_decimal::{Decimal, RoundingStrategy};

/// Money type. Decimal so cent values stay exact.
pub type Money = Decimal;

/// Fractional rate (0.1325 == 13.25%)
pub type Rate = Decimal;

/// Percentage already scaled by 100 (324.2 == 324.2%)
pub type Percentage = Decimal;

/// Identifier the caller uses to join purchases and sales
pub type CardId = String;

/// Decimal places kept on every monetary and percentage output
pub const OUTPUT_DP: u32 = 2;

/// Round to cents, half to even.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_DP, RoundingStrategy::MidpointNearestEven)
}

/// `numerator / denominator * 100`, or zero unless the denominator is positive.
///
/// A ratio too large to represent also gives zero.
pub fn pct_of(numerator: Decimal, denominator: Decimal) -> Percentage {
    if denominator > Decimal::ZERO {
        numerator
            .checked_div(denominator)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(round_cents)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Sum of amounts, saturating at `Decimal::MAX` / `Decimal::MIN`
pub fn sum_money<I>(amounts: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
