//! Sold comparables and their price statistics

use crate::types::{round_cents, sum_money, Money};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A comparable listing that sold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldComp {
    #[serde(default)]
    pub title: String,
    pub sold_price: Money,
    #[serde(default)]
    pub shipping_price: Money,
    #[serde(default)]
    pub sold_date: Option<NaiveDate>,
    #[serde(default)]
    pub condition: String,
}

impl SoldComp {
    pub fn new(sold_price: Money, sold_date: Option<NaiveDate>) -> Self {
        Self {
            title: String::new(),
            sold_price,
            shipping_price: Decimal::ZERO,
            sold_date,
            condition: String::new(),
        }
    }

    /// What the buyer paid including shipping
    pub fn total_price(&self) -> Money {
        self.sold_price.saturating_add(self.shipping_price)
    }
}

/// Summary of sold prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompStats {
    pub count: usize,
    pub median: Money,
    pub average: Money,
    pub min: Money,
    pub max: Money,
}

impl CompStats {
    /// Stats over sold prices (shipping excluded). All zero when empty.
    pub fn from_comps(comps: &[SoldComp]) -> Self {
        let mut prices: Vec<Money> = comps.iter().map(|c| c.sold_price).collect();
        if prices.is_empty() {
            return Self::default();
        }
        prices.sort();

        let count = prices.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            sum_money([prices[mid - 1], prices[mid]]) / Decimal::from(2)
        } else {
            prices[mid]
        };
        let total = sum_money(prices.iter().copied());

        Self {
            count,
            median: round_cents(median),
            average: round_cents(total / Decimal::from(count)),
            min: round_cents(prices[0]),
            max: round_cents(prices[count - 1]),
        }
    }
}

/// Comps sold within `days` days up to and including `as_of`.
///
/// Comps without a sold date are left out. A window reaching past the
/// earliest representable date covers everything up to `as_of`.
pub fn recent_comps(comps: &[SoldComp], as_of: NaiveDate, days: i64) -> Vec<SoldComp> {
    let since = Duration::try_days(days)
        .and_then(|window| as_of.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN);
    comps
        .iter()
        .filter(|c| matches!(c.sold_date, Some(d) if d >= since && d <= as_of))
        .cloned()
        .collect()
}
