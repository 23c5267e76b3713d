//! Outbound shipping methods a seller can choose from

use crate::types::Money;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A shipping method and what it may carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub method_name: String,
    pub carrier: String,
    pub cost: Money,
    #[serde(default)]
    pub max_weight_oz: Option<Money>,
    /// Highest item value the method may be used for
    #[serde(default)]
    pub max_value: Option<Money>,
    /// Can carry a graded slab
    #[serde(default = "default_graded_eligible")]
    pub graded_eligible: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_graded_eligible() -> bool {
    true
}

impl ShippingOption {
    fn new(
        method_name: &str,
        carrier: &str,
        cost: Money,
        max_weight_oz: Money,
        max_value: Option<Money>,
        graded_eligible: bool,
        notes: &str,
    ) -> Self {
        Self {
            method_name: method_name.to_string(),
            carrier: carrier.to_string(),
            cost,
            max_weight_oz: Some(max_weight_oz),
            max_value,
            graded_eligible,
            notes: notes.to_string(),
        }
    }

    /// Whether this method may ship a card of the given kind and value
    pub fn is_eligible(&self, graded: bool, item_value: Money) -> bool {
        if graded && !self.graded_eligible {
            return false;
        }
        self.max_value.map_or(true, |max| item_value <= max)
    }
}

/// Standard envelope and Ground Advantage rates
pub fn default_shipping_options() -> Vec<ShippingOption> {
    vec![
        ShippingOption::new(
            "eBay Standard Envelope - 1oz",
            "eBay",
            dec!(0.56),
            dec!(1),
            Some(dec!(20)),
            false,
            "Raw cards only, max 3 cards",
        ),
        ShippingOption::new(
            "eBay Standard Envelope - 2oz",
            "eBay",
            dec!(1.03),
            dec!(2),
            Some(dec!(20)),
            false,
            "Raw cards only, max 8 cards",
        ),
        ShippingOption::new(
            "eBay Standard Envelope - 3oz",
            "eBay",
            dec!(1.30),
            dec!(3),
            Some(dec!(20)),
            false,
            "Raw cards only, max 15 cards",
        ),
        ShippingOption::new(
            "USPS Ground Advantage - 4oz (Commercial)",
            "USPS",
            dec!(4.63),
            dec!(4),
            None,
            true,
            "Bubble mailer, graded or raw",
        ),
        ShippingOption::new(
            "USPS Ground Advantage - 8oz (Commercial)",
            "USPS",
            dec!(5.13),
            dec!(8),
            None,
            true,
            "Small box, multiple graded cards",
        ),
        ShippingOption::new(
            "USPS Ground Advantage - 4oz (Retail)",
            "USPS",
            dec!(7.30),
            dec!(4),
            None,
            true,
            "At post office counter",
        ),
    ]
}

/// Cheapest method that can carry the card, first listed on a tie
pub fn cheapest_eligible(
    options: &[ShippingOption],
    graded: bool,
    item_value: Money,
) -> Option<&ShippingOption> {
    options
        .iter()
        .filter(|o| o.is_eligible(graded, item_value))
        .reduce(|best, o| if o.cost < best.cost { o } else { best })
}
