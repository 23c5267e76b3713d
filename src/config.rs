//! Calculator configuration
//!
//! Everything a caller might otherwise keep in a settings store: the tax
//! rate, fee profiles, default shipping costs and the shipping and grading
//! catalogs. Calculations never read this on their own; callers pick values
//! out of it and pass them in.

use crate::error::{CalcError, Result};
use crate::fees::constants::{
    DEFAULT_GRADED_SHIPPING_COST, DEFAULT_RAW_SHIPPING_COST, DEFAULT_SALES_TAX_RATE,
};
use crate::fees::profile::{default_fee_profiles, find_profile, select_default, FeeProfile};
use crate::grading::{default_grading_tiers, GradingTier};
use crate::shipping::{default_shipping_options, ShippingOption};
use crate::types::{Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_sales_tax_rate")]
    pub sales_tax_rate: Rate,
    #[serde(default = "default_raw_shipping_cost")]
    pub raw_shipping_cost: Money,
    #[serde(default = "default_graded_shipping_cost")]
    pub graded_shipping_cost: Money,
    #[serde(default = "default_fee_profiles")]
    pub fee_profiles: Vec<FeeProfile>,
    #[serde(default = "default_shipping_options")]
    pub shipping_options: Vec<ShippingOption>,
    #[serde(default = "default_grading_tiers")]
    pub grading_tiers: Vec<GradingTier>,
}

fn default_sales_tax_rate() -> Rate {
    DEFAULT_SALES_TAX_RATE
}

fn default_raw_shipping_cost() -> Money {
    DEFAULT_RAW_SHIPPING_COST
}

fn default_graded_shipping_cost() -> Money {
    DEFAULT_GRADED_SHIPPING_COST
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            sales_tax_rate: DEFAULT_SALES_TAX_RATE,
            raw_shipping_cost: DEFAULT_RAW_SHIPPING_COST,
            graded_shipping_cost: DEFAULT_GRADED_SHIPPING_COST,
            fee_profiles: default_fee_profiles(),
            shipping_options: default_shipping_options(),
            grading_tiers: default_grading_tiers(),
        }
    }
}

impl CalculatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CalculatorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!(
            "Loaded {} fee profiles from {}",
            config.fee_profiles.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load `path`, else the file at [`CalculatorConfig::default_path`], else defaults.
    ///
    /// An explicit path must exist. A broken file at the default location is an
    /// error too; a missing one is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load(config_path);
        }

        match Self::default_path() {
            Some(default_config) if default_config.exists() => Self::load(&default_config),
            _ => {
                log::debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// `~/.card-profit/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".card-profit").join("config.toml"))
    }

    /// Check the tax rate, shipping costs and every fee profile.
    ///
    /// At most one profile may be marked default.
    pub fn validate(&self) -> Result<()> {
        if self.sales_tax_rate < Decimal::ZERO || self.sales_tax_rate > Decimal::ONE {
            return Err(CalcError::ConfigError(format!(
                "sales_tax_rate must be between 0 and 1, got {}",
                self.sales_tax_rate
            )));
        }

        if self.raw_shipping_cost < Decimal::ZERO || self.graded_shipping_cost < Decimal::ZERO {
            return Err(CalcError::ConfigError(
                "shipping costs must not be negative".to_string(),
            ));
        }

        for profile in &self.fee_profiles {
            profile.validate()?;
        }

        select_default(&self.fee_profiles).map(|_| ())
    }

    /// The profile marked default (see [`select_default`])
    pub fn default_profile(&self) -> Result<FeeProfile> {
        select_default(&self.fee_profiles)
    }

    /// Profile by name, or the default profile when no name is given
    pub fn profile(&self, name: Option<&str>) -> Result<FeeProfile> {
        match name {
            Some(name) => find_profile(&self.fee_profiles, name).cloned(),
            None => self.default_profile(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = CalculatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_partial_profile_fields_default() {
        let config = CalculatorConfig::from_toml_str(
            r#"
            sales_tax_rate = 0.08

            [[fee_profiles]]
            profile_name = "Store"
            fvf_rate = 0.1275
            is_default = true
            "#,
        )
        .unwrap();

        assert_eq!(config.sales_tax_rate, dec!(0.08));
        assert_eq!(config.fee_profiles.len(), 1);

        let profile = config.default_profile().unwrap();
        assert_eq!(profile.profile_name, "Store");
        assert_eq!(profile.fvf_rate, dec!(0.1275));
        assert_eq!(profile.fvf_cap_amount, dec!(7500));
        assert_eq!(profile.per_order_threshold, dec!(10));
    }

    #[test]
    fn test_two_defaults_rejected() {
        let result = CalculatorConfig::from_toml_str(
            r#"
            [[fee_profiles]]
            profile_name = "A"
            is_default = true

            [[fee_profiles]]
            profile_name = "B"
            is_default = true
            "#,
        );
        assert!(matches!(result, Err(CalcError::MultipleDefaultProfiles(_))));
    }

    #[test]
    fn test_bad_tax_rate_rejected() {
        let result = CalculatorConfig::from_toml_str("sales_tax_rate = -0.5");
        assert!(matches!(result, Err(CalcError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = CalculatorConfig::from_toml_str("fee_profiles = 3");
        assert!(matches!(result, Err(CalcError::TomlError(_))));
    }

    #[test]
    fn test_profile_lookup() {
        let config = CalculatorConfig::default();
        assert_eq!(
            config.profile(Some("eBay Basic Store")).unwrap().fvf_rate,
            dec!(0.1275)
        );
        assert_eq!(config.profile(None).unwrap().fvf_rate, dec!(0.1325));
        assert!(matches!(
            config.profile(Some("Nope")),
            Err(CalcError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "graded_shipping_cost = 5.13").unwrap();

        let config = CalculatorConfig::load(file.path()).unwrap();
        assert_eq!(config.graded_shipping_cost, dec!(5.13));
        assert_eq!(config.raw_shipping_cost, dec!(0.56));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            CalculatorConfig::load_or_default(Some(&missing)),
            Err(CalcError::IoError(_))
        ));
    }
}
