//! Fee profiles - a marketplace's fee schedule as plain values

use crate::error::{CalcError, Result};
use crate::fees::constants::*;
use crate::types::{Money, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Named marketplace fee schedule.
///
/// Every numeric field falls back to the documented marketplace default when
/// it is missing from a serialized profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeProfile {
    /// Display name, also used for lookup
    #[serde(default = "default_profile_name")]
    pub profile_name: String,
    /// Marketplace the schedule belongs to
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Percentage fee up to the cap
    #[serde(default = "default_fvf_rate")]
    pub fvf_rate: Rate,
    /// Total sale amount where the lower rate starts
    #[serde(default = "default_fvf_cap")]
    pub fvf_cap_amount: Money,
    /// Percentage fee on the part above the cap
    #[serde(default = "default_fvf_rate_above_cap")]
    pub fvf_rate_above_cap: Rate,
    /// Flat fee when the item price is at or below the threshold
    #[serde(default = "default_per_order_fee_low")]
    pub per_order_fee_low: Money,
    /// Flat fee when the item price is above the threshold
    #[serde(default = "default_per_order_fee_high")]
    pub per_order_fee_high: Money,
    /// Item price separating the two flat fee tiers
    #[serde(default = "default_per_order_threshold")]
    pub per_order_threshold: Money,
    /// Surcharge on international sales
    #[serde(default = "default_intl_fee_rate")]
    pub intl_fee_rate: Rate,
    /// Whether this profile is preselected
    #[serde(default)]
    pub is_default: bool,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_fvf_rate() -> Rate {
    DEFAULT_FVF_RATE
}

fn default_fvf_cap() -> Money {
    DEFAULT_FVF_CAP
}

fn default_fvf_rate_above_cap() -> Rate {
    DEFAULT_FVF_RATE_ABOVE_CAP
}

fn default_per_order_fee_low() -> Money {
    DEFAULT_PER_ORDER_FEE_LOW
}

fn default_per_order_fee_high() -> Money {
    DEFAULT_PER_ORDER_FEE_HIGH
}

fn default_per_order_threshold() -> Money {
    DEFAULT_PER_ORDER_THRESHOLD
}

fn default_intl_fee_rate() -> Rate {
    DEFAULT_INTL_FEE_RATE
}

impl Default for FeeProfile {
    fn default() -> Self {
        Self {
            profile_name: default_profile_name(),
            platform: default_platform(),
            fvf_rate: DEFAULT_FVF_RATE,
            fvf_cap_amount: DEFAULT_FVF_CAP,
            fvf_rate_above_cap: DEFAULT_FVF_RATE_ABOVE_CAP,
            per_order_fee_low: DEFAULT_PER_ORDER_FEE_LOW,
            per_order_fee_high: DEFAULT_PER_ORDER_FEE_HIGH,
            per_order_threshold: DEFAULT_PER_ORDER_THRESHOLD,
            intl_fee_rate: DEFAULT_INTL_FEE_RATE,
            is_default: false,
        }
    }
}

impl FeeProfile {
    /// Profile with default fees under a new name
    pub fn named(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            ..Self::default()
        }
    }

    /// Replace the below-cap FVF rate
    pub fn with_fvf_rate(mut self, fvf_rate: Rate) -> Self {
        self.fvf_rate = fvf_rate;
        self
    }

    /// Mark this profile as the preselected one
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Check rates are non-negative fractions and amounts non-negative.
    ///
    /// The calculators never call this; it is for configuration loading.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("fvf_rate", self.fvf_rate),
            ("fvf_rate_above_cap", self.fvf_rate_above_cap),
            ("intl_fee_rate", self.intl_fee_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(self.invalid(format!("{field} must be between 0 and 1, got {rate}")));
            }
        }

        let amounts = [
            ("fvf_cap_amount", self.fvf_cap_amount),
            ("per_order_fee_low", self.per_order_fee_low),
            ("per_order_fee_high", self.per_order_fee_high),
            ("per_order_threshold", self.per_order_threshold),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(self.invalid(format!("{field} must not be negative, got {amount}")));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> CalcError {
        CalcError::InvalidFeeProfile {
            profile: self.profile_name.clone(),
            reason,
        }
    }
}

/// Built-in profiles: standard (default) and basic-store eBay sellers
pub fn default_fee_profiles() -> Vec<FeeProfile> {
    vec![
        FeeProfile::default().as_default(),
        FeeProfile::named("eBay Basic Store").with_fvf_rate(dec!(0.1275)),
    ]
}

/// Pick the profile marked default.
///
/// Falls back to the first profile, then to the built-in schedule.
/// More than one marked default is an error.
pub fn select_default(profiles: &[FeeProfile]) -> Result<FeeProfile> {
    let marked: Vec<&FeeProfile> = profiles.iter().filter(|p| p.is_default).collect();

    match marked.as_slice() {
        [] => Ok(profiles.first().cloned().unwrap_or_default()),
        [profile] => Ok((*profile).clone()),
        many => Err(CalcError::MultipleDefaultProfiles(
            many.iter().map(|p| p.profile_name.clone()).collect(),
        )),
    }
}

/// Find a profile by name (case-insensitive)
pub fn find_profile<'a>(profiles: &'a [FeeProfile], name: &str) -> Result<&'a FeeProfile> {
    profiles
        .iter()
        .find(|p| p.profile_name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CalcError::ProfileNotFound(name.to_string()))
}
