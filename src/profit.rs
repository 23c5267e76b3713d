//! Profit engine - net proceeds, profit, margin and ROI for one sale

use crate::fees::{FeeBreakdown, FeeCalculator, FeeProfile};
use crate::types::{pct_of, round_cents, Money, Percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a single sale. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitResult {
    pub sale_price: Money,
    /// Shipping charged to the buyer
    pub shipping_charged: Money,
    #[serde(flatten)]
    pub fees: FeeBreakdown,
    /// Seller's outbound shipping expense
    pub shipping_cost: Money,
    pub cost_basis: Money,
    /// Sale amount after fees and seller shipping
    pub net_proceeds: Money,
    pub net_profit: Money,
    /// Profit as a share of the item price
    pub profit_margin_pct: Percentage,
    /// Profit as a share of the cost basis
    pub roi_pct: Percentage,
}

impl ProfitResult {
    pub fn total_sale_amount(&self) -> Money {
        self.fees.total_sale_amount
    }

    pub fn total_fees(&self) -> Money {
        self.fees.total_fees
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit > Decimal::ZERO
    }
}

/// Composes fees and cost basis into a [`ProfitResult`]
pub struct ProfitEngine;

impl ProfitEngine {
    /// Profit for selling at `sale_price`.
    ///
    /// Never fails. Inputs are rounded to cents, money fields saturate at the
    /// bounds of `Decimal`, and margin and ROI fall back to zero when their
    /// denominator is not positive.
    pub fn calculate(
        sale_price: Money,
        shipping_charged: Money,
        cost_basis: Money,
        shipping_cost: Money,
        profile: &FeeProfile,
        is_international: bool,
    ) -> ProfitResult {
        Self::calculate_with(
            sale_price,
            shipping_charged,
            cost_basis,
            shipping_cost,
            profile,
            is_international,
            None,
        )
    }

    /// [`ProfitEngine::calculate`] with a fixed per-order fee in place of the
    /// profile's tiers.
    pub fn calculate_with(
        sale_price: Money,
        shipping_charged: Money,
        cost_basis: Money,
        shipping_cost: Money,
        profile: &FeeProfile,
        is_international: bool,
        per_order_override: Option<Money>,
    ) -> ProfitResult {
        let sale_price = round_cents(sale_price);
        let shipping_charged = round_cents(shipping_charged);
        let fees = FeeCalculator::compute_fees_with(
            sale_price,
            shipping_charged,
            profile,
            is_international,
            per_order_override,
        );

        let shipping_cost = round_cents(shipping_cost);
        let cost_basis = round_cents(cost_basis);

        let net_proceeds = fees
            .total_sale_amount
            .saturating_sub(fees.total_fees)
            .saturating_sub(shipping_cost);
        let net_profit = net_proceeds.saturating_sub(cost_basis);

        ProfitResult {
            sale_price,
            shipping_charged,
            fees,
            shipping_cost,
            cost_basis,
            net_proceeds,
            net_profit,
            profit_margin_pct: pct_of(net_profit, sale_price),
            roi_pct: pct_of(net_profit, cost_basis),
        }
    }
}
