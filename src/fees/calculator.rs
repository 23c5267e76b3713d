//! Marketplace selling fees: tiered FVF, per-order flat fee, international surcharge

use crate::fees::profile::FeeProfile;
use crate::types::{round_cents, sum_money, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fees charged on one sale, each rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Item price plus shipping charged to the buyer
    pub total_sale_amount: Money,
    /// Tiered percentage (final value) fee
    pub fvf_amount: Money,
    /// Flat per-order fee
    pub per_order_fee: Money,
    /// International surcharge, zero for domestic sales
    pub intl_fee: Money,
    /// Sum of the three components
    pub total_fees: Money,
}

/// Stateless fee calculator over a [`FeeProfile`]
pub struct FeeCalculator;

impl FeeCalculator {
    /// Fees for a sale.
    ///
    /// The percentage fees are charged on `sale_price + shipping_charged`; the
    /// per-order tier is picked on `sale_price` alone. Both inputs are rounded
    /// to cents first.
    pub fn compute_fees(
        sale_price: Money,
        shipping_charged: Money,
        profile: &FeeProfile,
        is_international: bool,
    ) -> FeeBreakdown {
        Self::compute_fees_with(sale_price, shipping_charged, profile, is_international, None)
    }

    /// Same as [`FeeCalculator::compute_fees`] with an optional fixed per-order
    /// fee replacing the tier lookup.
    pub fn compute_fees_with(
        sale_price: Money,
        shipping_charged: Money,
        profile: &FeeProfile,
        is_international: bool,
        per_order_override: Option<Money>,
    ) -> FeeBreakdown {
        let sale_price = round_cents(sale_price);
        let total_sale_amount = sale_price.saturating_add(round_cents(shipping_charged));

        let fvf_amount = round_cents(Self::fvf_amount(total_sale_amount, profile));
        let per_order_fee = round_cents(
            per_order_override.unwrap_or_else(|| Self::per_order_fee(sale_price, profile)),
        );
        let intl_fee = round_cents(Self::intl_fee(total_sale_amount, profile, is_international));

        // components are rounded before summing, then the sum is rounded again
        let total_fees = round_cents(sum_money([fvf_amount, per_order_fee, intl_fee]));

        FeeBreakdown {
            total_sale_amount,
            fvf_amount,
            per_order_fee,
            intl_fee,
            total_fees,
        }
    }

    /// Unrounded tiered final value fee on the total sale amount.
    ///
    /// Saturates instead of overflowing.
    pub fn fvf_amount(total_sale_amount: Money, profile: &FeeProfile) -> Money {
        let cap = profile.fvf_cap_amount;
        if total_sale_amount <= cap {
            total_sale_amount.saturating_mul(profile.fvf_rate)
        } else {
            let above_cap = total_sale_amount
                .saturating_sub(cap)
                .saturating_mul(profile.fvf_rate_above_cap);
            cap.saturating_mul(profile.fvf_rate).saturating_add(above_cap)
        }
    }

    /// Per-order flat fee; the threshold belongs to the low tier
    pub fn per_order_fee(sale_price: Money, profile: &FeeProfile) -> Money {
        if sale_price <= profile.per_order_threshold {
            profile.per_order_fee_low
        } else {
            profile.per_order_fee_high
        }
    }

    fn intl_fee(total_sale_amount: Money, profile: &FeeProfile, is_international: bool) -> Money {
        if is_international {
            total_sale_amount.saturating_mul(profile.intl_fee_rate)
        } else {
            Decimal::ZERO
        }
    }
}
