//! Grading services and their price tiers

use crate::error::{CalcError, Result};
use crate::types::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A grading company's service level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingTier {
    pub company: String,
    pub tier_name: String,
    pub cost_per_card: Money,
    /// Quoted turnaround in days
    pub turnaround_days: u32,
    /// Highest declared value the tier accepts
    pub max_declared_value: Money,
}

impl GradingTier {
    pub fn new(
        company: &str,
        tier_name: &str,
        cost_per_card: Money,
        turnaround_days: u32,
        max_declared_value: Money,
    ) -> Self {
        Self {
            company: company.to_string(),
            tier_name: tier_name.to_string(),
            cost_per_card,
            turnaround_days,
            max_declared_value,
        }
    }

    /// Whether a card declared at `value` may be submitted at this tier
    pub fn accepts_value(&self, value: Money) -> bool {
        value <= self.max_declared_value
    }

    pub fn to_option(&self) -> GradingOption {
        GradingOption {
            company: self.company.clone(),
            tier: self.tier_name.clone(),
            cost: self.cost_per_card,
        }
    }
}

/// Company/tier/cost triple fed to the breakeven analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingOption {
    pub company: String,
    #[serde(default)]
    pub tier: String,
    pub cost: Money,
}

impl GradingOption {
    pub fn new(company: impl Into<String>, tier: impl Into<String>, cost: Money) -> Self {
        Self {
            company: company.into(),
            tier: tier.into(),
            cost,
        }
    }
}

impl From<&GradingTier> for GradingOption {
    fn from(tier: &GradingTier) -> Self {
        tier.to_option()
    }
}

/// Published PSA, BGS, SGC and CGC tiers
pub fn default_grading_tiers() -> Vec<GradingTier> {
    vec![
        GradingTier::new("PSA", "Value", dec!(24.00), 150, dec!(499)),
        GradingTier::new("PSA", "Regular", dec!(40.00), 30, dec!(999)),
        GradingTier::new("PSA", "Express", dec!(75.00), 5, dec!(2499)),
        GradingTier::new("PSA", "Super Express", dec!(150.00), 2, dec!(4999)),
        GradingTier::new("BGS", "Base", dec!(14.95), 70, dec!(499)),
        GradingTier::new("BGS", "Standard", dec!(35.00), 20, dec!(999)),
        GradingTier::new("SGC", "Regular", dec!(24.00), 15, dec!(499)),
        GradingTier::new("SGC", "Express", dec!(50.00), 5, dec!(2499)),
        GradingTier::new("CGC", "Bulk (25+)", dec!(12.00), 42, dec!(250)),
        GradingTier::new("CGC", "Economy", dec!(15.00), 30, dec!(250)),
        GradingTier::new("CGC", "Standard", dec!(18.00), 20, dec!(499)),
    ]
}

/// Tiers that accept a card declared at `value`, cheapest first
pub fn tiers_for_value(tiers: &[GradingTier], value: Money) -> Vec<&GradingTier> {
    let mut eligible: Vec<&GradingTier> = tiers.iter().filter(|t| t.accepts_value(value)).collect();
    eligible.sort_by(|a, b| a.cost_per_card.cmp(&b.cost_per_card));
    eligible
}

/// Distinct company names in catalog order
pub fn companies(tiers: &[GradingTier]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for tier in tiers {
        if !names.contains(&tier.company.as_str()) {
            names.push(&tier.company);
        }
    }
    names
}

/// Tiers offered by `company` (case-insensitive), in catalog order
pub fn tiers_for_company<'a>(
    tiers: &'a [GradingTier],
    company: &str,
) -> Result<Vec<&'a GradingTier>> {
    let known = companies(tiers);
    if !known.iter().any(|name| name.eq_ignore_ascii_case(company)) {
        return Err(CalcError::UnknownGradingCompany {
            name: company.to_string(),
            known: known.into_iter().map(str::to_string).collect(),
        });
    }

    Ok(tiers
        .iter()
        .filter(|tier| tier.company.eq_ignore_ascii_case(company))
        .collect())
}

/// Total submission cost for `count` cards at a tier
pub fn submission_cost(tier: &GradingTier, count: u32) -> Money {
    tier.cost_per_card.saturating_mul(Decimal::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let tiers = default_grading_tiers();
        assert_eq!(tiers.len(), 11);
        assert_eq!(companies(&tiers), vec!["PSA", "BGS", "SGC", "CGC"]);
    }

    #[test]
    fn test_tiers_for_value() {
        let tiers = default_grading_tiers();

        let cheap = tiers_for_value(&tiers, dec!(100));
        assert_eq!(cheap.len(), 11);
        assert_eq!(cheap[0].tier_name, "Bulk (25+)");

        let pricey = tiers_for_value(&tiers, dec!(3000));
        assert_eq!(pricey.len(), 1);
        assert_eq!(pricey[0].tier_name, "Super Express");
    }

    #[test]
    fn test_value_at_limit_is_accepted() {
        let tier = GradingTier::new("PSA", "Value", dec!(24), 150, dec!(499));
        assert!(tier.accepts_value(dec!(499)));
        assert!(!tier.accepts_value(dec!(499.01)));
    }

    #[test]
    fn test_to_option() {
        let tier = GradingTier::new("BGS", "Base", dec!(14.95), 70, dec!(499));
        let option = GradingOption::from(&tier);
        assert_eq!(option, GradingOption::new("BGS", "Base", dec!(14.95)));
    }

    #[test]
    fn test_tiers_for_company() {
        let tiers = default_grading_tiers();

        let cgc = tiers_for_company(&tiers, "cgc").unwrap();
        let names: Vec<&str> = cgc.iter().map(|t| t.tier_name.as_str()).collect();
        assert_eq!(names, vec!["Bulk (25+)", "Economy", "Standard"]);

        let err = tiers_for_company(&tiers, "Beckett").unwrap_err();
        assert!(matches!(err, CalcError::UnknownGradingCompany { .. }));
        assert!(err.to_string().contains("PSA, BGS, SGC, CGC"));
    }

    #[test]
    fn test_submission_cost() {
        let tier = GradingTier::new("CGC", "Bulk (25+)", dec!(12), 42, dec!(250));
        assert_eq!(submission_cost(&tier, 25), dec!(300));
    }
}
