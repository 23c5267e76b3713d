//! Cost basis - what it took to acquire a card

use crate::types::{round_cents, sum_money, Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total acquisition cost of an item and its parts.
///
/// Every component is rounded to cents and `total_cost_basis` is their exact
/// sum, saturating at the bounds of `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBasis {
    pub purchase_price: Money,
    pub sales_tax: Money,
    /// Shipping paid to get the card delivered
    pub shipping_paid: Money,
    pub grading_cost: Money,
    pub total_cost_basis: Money,
}

impl CostBasis {
    /// Build from already-known components (e.g. a stored purchase)
    pub fn from_parts(
        purchase_price: Money,
        sales_tax: Money,
        shipping_paid: Money,
        grading_cost: Money,
    ) -> Self {
        let purchase_price = round_cents(purchase_price);
        let sales_tax = round_cents(sales_tax);
        let shipping_paid = round_cents(shipping_paid);
        let grading_cost = round_cents(grading_cost);

        Self {
            purchase_price,
            sales_tax,
            shipping_paid,
            grading_cost,
            total_cost_basis: sum_money([
                purchase_price,
                sales_tax,
                shipping_paid,
                grading_cost,
            ]),
        }
    }
}

/// Turns purchase inputs into a [`CostBasis`]
pub struct CostBasisCalculator;

impl CostBasisCalculator {
    /// Compute the cost basis of a purchase.
    ///
    /// When `tax_already_included` is set the tax is assumed to be part of
    /// `purchase_price` and no separate tax is added. Negative inputs are not
    /// rejected and flow through the arithmetic.
    pub fn compute(
        purchase_price: Money,
        tax_rate: Rate,
        tax_already_included: bool,
        shipping_paid: Money,
        grading_cost: Money,
    ) -> CostBasis {
        let sales_tax = if tax_already_included {
            Decimal::ZERO
        } else {
            purchase_price.saturating_mul(tax_rate)
        };

        CostBasis::from_parts(purchase_price, sales_tax, shipping_paid, grading_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cost_basis_with_tax() {
        let basis =
            CostBasisCalculator::compute(dec!(100), dec!(0.0625), false, dec!(5), dec!(24));

        assert_eq!(basis.sales_tax, dec!(6.25));
        assert_eq!(basis.total_cost_basis, dec!(135.25));
    }

    #[test]
    fn test_cost_basis_tax_included() {
        let basis = CostBasisCalculator::compute(dec!(100), dec!(0.0625), true, dec!(0), dec!(0));

        assert_eq!(basis.sales_tax, Decimal::ZERO);
        assert_eq!(basis.total_cost_basis, dec!(100));
    }

    #[test]
    fn test_tax_rounds_half_to_even() {
        // 10 * 0.0625 = 0.625
        let basis = CostBasisCalculator::compute(dec!(10), dec!(0.0625), false, dec!(0), dec!(0));
        assert_eq!(basis.sales_tax, dec!(0.62));
        assert_eq!(basis.total_cost_basis, dec!(10.62));
    }

    #[test]
    fn test_components_sum_to_total() {
        let basis =
            CostBasisCalculator::compute(dec!(33.33), dec!(0.0625), false, dec!(1.03), dec!(14.95));
        let sum = basis.purchase_price + basis.sales_tax + basis.shipping_paid + basis.grading_cost;
        assert_eq!(sum, basis.total_cost_basis);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let basis = CostBasisCalculator::compute(dec!(-10), dec!(0), false, dec!(0), dec!(0));
        assert_eq!(basis.total_cost_basis, dec!(-10));
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let basis =
            CostBasisCalculator::compute(Decimal::MAX, dec!(0.0625), false, dec!(5), dec!(0));
        assert_eq!(basis.total_cost_basis, Decimal::MAX);

        let basis =
            CostBasisCalculator::compute(Decimal::MIN, Decimal::MAX, false, dec!(0), dec!(0));
        assert_eq!(basis.sales_tax, Decimal::MIN);
        assert_eq!(basis.total_cost_basis, Decimal::MIN);
    }
}
