//! Marketplace fee and tax defaults
//!
//! Applied whenever a fee profile or configuration leaves a field out.

use crate::types::{Money, Rate};
use rust_decimal_macros::dec;

/// Final value fee below the cap (13.25%, payment processing included)
pub const DEFAULT_FVF_RATE: Rate = dec!(0.1325);

/// Total sale amount up to which the full FVF rate applies
pub const DEFAULT_FVF_CAP: Money = dec!(7500.00);

/// Marginal FVF rate above the cap
pub const DEFAULT_FVF_RATE_ABOVE_CAP: Rate = dec!(0.0235);

/// Per-order fee for item prices at or below the threshold
pub const DEFAULT_PER_ORDER_FEE_LOW: Money = dec!(0.30);

/// Per-order fee for item prices above the threshold
pub const DEFAULT_PER_ORDER_FEE_HIGH: Money = dec!(0.40);

/// Item price separating the low and high per-order fee
pub const DEFAULT_PER_ORDER_THRESHOLD: Money = dec!(10.00);

/// International surcharge on the total sale amount
pub const DEFAULT_INTL_FEE_RATE: Rate = dec!(0.0165);

/// Sales tax charged on purchases (Illinois state rate)
pub const DEFAULT_SALES_TAX_RATE: Rate = dec!(0.0625);

/// Seller shipping for a raw card (eBay Standard Envelope, 1oz)
pub const DEFAULT_RAW_SHIPPING_COST: Money = dec!(0.56);

/// Seller shipping for a graded slab (USPS Ground Advantage 4oz, commercial)
pub const DEFAULT_GRADED_SHIPPING_COST: Money = dec!(4.63);

/// Name of the profile marked default out of the box
pub const DEFAULT_PROFILE_NAME: &str = "eBay Standard (No Store)";

/// Marketplace the default profiles belong to
pub const DEFAULT_PLATFORM: &str = "eBay";
