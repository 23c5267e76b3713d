//! Grade-vs-raw breakeven analysis
//!
//! Compares selling a card raw today against paying to grade it and selling
//! the slab, and derives the graded price at which both come out even.
//!
//! The breakeven price solves
//!
//! ```text
//! price * (1 - fvf_rate) - per_order_fee_high - graded_shipping - graded_cost_basis = raw_profit
//! ```
//!
//! It assumes the high per-order tier and the below-cap FVF rate, so it is
//! exact only when the true breakeven price lands in that tier and under the
//! cap. Everywhere else it is a conservative estimate.

use crate::fees::FeeProfile;
use crate::grading::GradingOption;
use crate::profit::{ProfitEngine, ProfitResult};
use crate::types::{pct_of, round_cents, sum_money, Money, Percentage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grade-or-not call for one grading option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradingDecision {
    #[serde(rename = "GRADE")]
    Grade,
    #[serde(rename = "SELL RAW")]
    SellRaw,
}

impl fmt::Display for GradingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingDecision::Grade => write!(f, "GRADE"),
            GradingDecision::SellRaw => write!(f, "SELL RAW"),
        }
    }
}

/// Scenario inputs shared by every grading option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakevenInputs {
    pub raw_cost_basis: Money,
    /// Expected raw sale price
    pub raw_market_value: Money,
    /// Expected sale price once graded
    pub graded_market_value: Money,
    #[serde(default)]
    pub expected_grade: String,
    /// Seller shipping for the raw card
    pub raw_shipping_cost: Money,
    /// Seller shipping for the slab
    pub graded_shipping_cost: Money,
}

/// Outcome of grading with one option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakevenResult {
    pub option: GradingOption,
    pub expected_grade: String,
    /// Sell raw now
    pub raw: ProfitResult,
    /// Grade, then sell
    pub graded: ProfitResult,
    pub raw_cost_basis: Money,
    pub graded_cost_basis: Money,
    /// Graded sale price where grading matches selling raw, never below zero
    pub breakeven_graded_price: Money,
    pub grading_extra_profit: Money,
    /// Extra profit relative to the grading cost
    pub grading_roi_pct: Percentage,
    pub recommendation: GradingDecision,
}

impl BreakevenResult {
    pub fn raw_profit(&self) -> Money {
        self.raw.net_profit
    }

    pub fn graded_profit(&self) -> Money {
        self.graded.net_profit
    }

    /// How far above the raw market value the slab has to sell to break even
    pub fn breakeven_premium(&self) -> Money {
        self.breakeven_graded_price.saturating_sub(self.raw.sale_price)
    }
}

/// Runs the raw and graded scenarios through the profit engine
pub struct BreakevenAnalyzer;

impl BreakevenAnalyzer {
    /// Compare selling raw against grading with a single option
    pub fn compare_single(
        inputs: &BreakevenInputs,
        option: &GradingOption,
        profile: &FeeProfile,
    ) -> BreakevenResult {
        let raw = ProfitEngine::calculate(
            inputs.raw_market_value,
            Decimal::ZERO,
            inputs.raw_cost_basis,
            inputs.raw_shipping_cost,
            profile,
            false,
        );

        let graded_cost_basis = round_cents(inputs.raw_cost_basis.saturating_add(option.cost));
        let graded = ProfitEngine::calculate(
            inputs.graded_market_value,
            Decimal::ZERO,
            graded_cost_basis,
            inputs.graded_shipping_cost,
            profile,
            false,
        );

        let breakeven_graded_price = Self::breakeven_graded_price(
            raw.net_profit,
            graded_cost_basis,
            inputs.graded_shipping_cost,
            profile,
        );

        let grading_extra_profit = graded.net_profit.saturating_sub(raw.net_profit);
        let recommendation = if graded.net_profit > raw.net_profit {
            GradingDecision::Grade
        } else {
            GradingDecision::SellRaw
        };

        BreakevenResult {
            option: option.clone(),
            expected_grade: inputs.expected_grade.clone(),
            raw_cost_basis: raw.cost_basis,
            graded_cost_basis,
            breakeven_graded_price,
            grading_extra_profit,
            grading_roi_pct: pct_of(grading_extra_profit, option.cost),
            recommendation,
            raw,
            graded,
        }
    }

    /// Compare every grading option, best graded profit first.
    ///
    /// The sort is stable: options with equal graded profit keep input order.
    pub fn compare_multi(
        inputs: &BreakevenInputs,
        options: &[GradingOption],
        profile: &FeeProfile,
    ) -> Vec<BreakevenResult> {
        let mut ranked: Vec<BreakevenResult> = options
            .iter()
            .map(|option| Self::compare_single(inputs, option, profile))
            .collect();

        ranked.sort_by(|a, b| b.graded_profit().cmp(&a.graded_profit()));

        if let Some(best) = ranked.first() {
            log::debug!(
                "Best of {} grading options: {} {} ({}, graded profit {})",
                ranked.len(),
                best.option.company,
                best.option.tier,
                best.recommendation,
                best.graded_profit()
            );
        }

        ranked
    }

    /// Graded sale price at which grading profit equals `raw_profit`.
    ///
    /// Zero when the FVF rate leaves nothing of the sale price (rate >= 1).
    /// A price too large to represent saturates at `Decimal::MAX`.
    pub fn breakeven_graded_price(
        raw_profit: Money,
        graded_cost_basis: Money,
        graded_shipping_cost: Money,
        profile: &FeeProfile,
    ) -> Money {
        let kept_share = Decimal::ONE.saturating_sub(profile.fvf_rate);
        if kept_share <= Decimal::ZERO {
            log::warn!(
                "FVF rate {} of profile '{}' leaves no breakeven price",
                profile.fvf_rate,
                profile.profile_name
            );
            return Decimal::ZERO;
        }

        let required = sum_money([
            raw_profit,
            profile.per_order_fee_high,
            round_cents(graded_shipping_cost),
            graded_cost_basis,
        ]);
        if required <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        required
            .checked_div(kept_share)
            .map(round_cents)
            .unwrap_or(Decimal::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs(raw_cost: Money, raw_value: Money, graded_value: Money) -> BreakevenInputs {
        BreakevenInputs {
            raw_cost_basis: raw_cost,
            raw_market_value: raw_value,
            graded_market_value: graded_value,
            expected_grade: "10".to_string(),
            raw_shipping_cost: dec!(0.56),
            graded_shipping_cost: dec!(4.63),
        }
    }

    #[test]
    fn test_grading_profitable() {
        let profile = FeeProfile::default();
        let psa = GradingOption::new("PSA", "Value", dec!(24));
        let case = inputs(dec!(10), dec!(30), dec!(150));
        let result = BreakevenAnalyzer::compare_single(&case, &psa, &profile);

        assert_eq!(result.raw_profit(), dec!(15.06));
        assert_eq!(result.graded_profit(), dec!(91.09));
        assert_eq!(result.graded_cost_basis, dec!(34));
        assert_eq!(result.grading_extra_profit, dec!(76.03));
        assert_eq!(result.grading_roi_pct, dec!(316.79));
        // (15.06 + 0.40 + 4.63 + 34) / 0.8675
        assert_eq!(result.breakeven_graded_price, dec!(62.35));
        assert_eq!(result.recommendation, GradingDecision::Grade);
    }

    #[test]
    fn test_sell_raw_when_grading_not_worth_it() {
        let profile = FeeProfile::default();
        let psa = GradingOption::new("PSA", "Value", dec!(24));
        let case = inputs(dec!(10), dec!(20), dec!(25));
        let result = BreakevenAnalyzer::compare_single(&case, &psa, &profile);

        assert_eq!(result.recommendation, GradingDecision::SellRaw);
        assert!(result.grading_extra_profit < Decimal::ZERO);
    }

    #[test]
    fn test_breakeven_price_is_above_raw() {
        let profile = FeeProfile::default();
        let psa = GradingOption::new("PSA", "Value", dec!(24));
        let case = inputs(dec!(5), dec!(15), dec!(80));
        let result = BreakevenAnalyzer::compare_single(&case, &psa, &profile);

        assert_eq!(result.breakeven_graded_price, dec!(47.35));
        assert!(result.breakeven_premium() > Decimal::ZERO);
    }

    #[test]
    fn test_free_grading_has_zero_roi() {
        let profile = FeeProfile::default();
        let free = GradingOption::new("Promo", "", dec!(0));
        let case = inputs(dec!(10), dec!(30), dec!(60));
        let result = BreakevenAnalyzer::compare_single(&case, &free, &profile);
        assert_eq!(result.grading_roi_pct, Decimal::ZERO);
    }

    #[test]
    fn test_breakeven_clamped_to_zero() {
        let profile = FeeProfile::default();
        let price =
            BreakevenAnalyzer::breakeven_graded_price(dec!(-500), dec!(10), dec!(4.63), &profile);
        assert_eq!(price, Decimal::ZERO);
    }

    #[test]
    fn test_full_fee_rate_has_no_breakeven() {
        let profile = FeeProfile::named("Confiscatory").with_fvf_rate(dec!(1));
        let price =
            BreakevenAnalyzer::breakeven_graded_price(dec!(5), dec!(10), dec!(4.63), &profile);
        assert_eq!(price, Decimal::ZERO);
    }

    #[test]
    fn test_multi_sorted_by_graded_profit() {
        let profile = FeeProfile::default();
        let options = vec![
            GradingOption::new("PSA", "Value", dec!(24)),
            GradingOption::new("BGS", "Standard", dec!(35)),
            GradingOption::new("CGC", "Economy", dec!(15)),
        ];

        let case = inputs(dec!(10), dec!(20), dec!(100));
        let ranked = BreakevenAnalyzer::compare_multi(&case, &options, &profile);
        let companies: Vec<&str> = ranked.iter().map(|r| r.option.company.as_str()).collect();
        assert_eq!(companies, vec!["CGC", "PSA", "BGS"]);

        let profits: Vec<Money> = ranked.iter().map(|r| r.graded_profit()).collect();
        let mut sorted = profits.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(profits, sorted);
    }

    #[test]
    fn test_multi_ties_keep_input_order() {
        let profile = FeeProfile::default();
        let options = vec![
            GradingOption::new("PSA", "Value", dec!(24)),
            GradingOption::new("SGC", "Regular", dec!(24)),
        ];

        let case = inputs(dec!(10), dec!(20), dec!(100));
        let ranked = BreakevenAnalyzer::compare_multi(&case, &options, &profile);
        assert_eq!(ranked[0].option.company, "PSA");
        assert_eq!(ranked[1].option.company, "SGC");
    }

    #[test]
    fn test_decision_serializes_with_space() {
        let json = serde_json::to_string(&GradingDecision::SellRaw).unwrap();
        assert_eq!(json, "\"SELL RAW\"");
    }

    #[test]
    fn test_extreme_values_do_not_fail() {
        let profile = FeeProfile::default();
        let psa = GradingOption::new("PSA", "Super Express", Decimal::MAX);
        let case = inputs(Decimal::MAX, Decimal::MAX, Decimal::new(1, 28));
        let result = BreakevenAnalyzer::compare_single(&case, &psa, &profile);

        assert_eq!(result.graded_cost_basis, Decimal::MAX);
        assert_eq!(result.recommendation, GradingDecision::SellRaw);
        assert!(result.breakeven_graded_price >= Decimal::ZERO);
    }

    #[test]
    fn test_unrepresentable_breakeven_saturates() {
        let profile = FeeProfile::default();
        let price = BreakevenAnalyzer::breakeven_graded_price(
            Decimal::MAX,
            Decimal::ZERO,
            Decimal::ZERO,
            &profile,
        );
        assert_eq!(price, Decimal::MAX);
    }

    #[test]
    fn test_negative_fee_rate_does_not_fail() {
        let profile = FeeProfile::named("Broken").with_fvf_rate(Decimal::MIN);
        let price =
            BreakevenAnalyzer::breakeven_graded_price(dec!(5), dec!(10), dec!(4.63), &profile);
        assert!(price >= Decimal::ZERO);
    }
}
