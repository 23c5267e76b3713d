//! Offer comparison - rank candidate sale prices for the same card

use crate::fees::FeeProfile;
use crate::profit::{ProfitEngine, ProfitResult};
use crate::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub price: Money,
    /// Shipping the seller pays
    #[serde(default)]
    pub shipping_cost: Money,
    /// Shipping charged to the buyer
    #[serde(default)]
    pub shipping_charged: Money,
    #[serde(default)]
    pub is_international: bool,
    #[serde(default)]
    pub label: Option<String>,
}

impl Offer {
    pub fn new(price: Money, shipping_cost: Money) -> Self {
        Self {
            price,
            shipping_cost,
            shipping_charged: Decimal::ZERO,
            is_international: false,
            label: None,
        }
    }

    pub fn with_shipping_charged(mut self, shipping_charged: Money) -> Self {
        self.shipping_charged = shipping_charged;
        self
    }

    pub fn international(mut self) -> Self {
        self.is_international = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Caller label, or the price formatted as dollars
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("${:.2}", self.price))
    }
}

/// Accept/reject call on an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferDecision {
    Accept,
    Reject,
}

impl OfferDecision {
    /// Accept only when the offer makes money
    pub fn for_profit(net_profit: Money) -> Self {
        if net_profit > Decimal::ZERO {
            OfferDecision::Accept
        } else {
            OfferDecision::Reject
        }
    }
}

impl fmt::Display for OfferDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferDecision::Accept => write!(f, "ACCEPT"),
            OfferDecision::Reject => write!(f, "REJECT"),
        }
    }
}

/// One offer with its profit outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferAnalysis {
    pub label: String,
    pub offer: Offer,
    pub result: ProfitResult,
    pub recommendation: OfferDecision,
}

impl OfferAnalysis {
    pub fn net_profit(&self) -> Money {
        self.result.net_profit
    }
}

/// Runs the profit engine over offers and ranks them
pub struct OfferComparator;

impl OfferComparator {
    /// Evaluate a single offer against a cost basis
    pub fn analyze(offer: &Offer, cost_basis: Money, profile: &FeeProfile) -> OfferAnalysis {
        let result = ProfitEngine::calculate(
            offer.price,
            offer.shipping_charged,
            cost_basis,
            offer.shipping_cost,
            profile,
            offer.is_international,
        );

        OfferAnalysis {
            label: offer.display_label(),
            offer: offer.clone(),
            recommendation: OfferDecision::for_profit(result.net_profit),
            result,
        }
    }

    /// Evaluate every offer and rank by net profit, best first.
    ///
    /// The sort is stable: offers with equal profit keep their input order.
    pub fn compare(
        offers: &[Offer],
        cost_basis: Money,
        profile: &FeeProfile,
    ) -> Vec<OfferAnalysis> {
        let mut ranked: Vec<OfferAnalysis> = offers
            .iter()
            .map(|offer| Self::analyze(offer, cost_basis, profile))
            .collect();

        ranked.sort_by(|a, b| b.net_profit().cmp(&a.net_profit()));

        log::debug!(
            "Compared {} offers against cost basis {} ({} accepted)",
            ranked.len(),
            cost_basis,
            ranked
                .iter()
                .filter(|a| a.recommendation == OfferDecision::Accept)
                .count()
        );

        ranked
    }
}
