//! Portfolio tracking over purchase and sale records

use crate::cost_basis::CostBasis;
use crate::profit::ProfitResult;
use crate::types::{pct_of, round_cents, sum_money, CardId, Money, Percentage};
use chrono::NaiveDate;
use hashbrown::HashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded card purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub card_id: CardId,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Money,
    #[serde(default)]
    pub sales_tax_paid: Money,
    #[serde(default)]
    pub shipping_paid: Money,
    #[serde(default)]
    pub grading_cost: Money,
    #[serde(default)]
    pub source: String,
}

impl Purchase {
    pub fn new(card_id: impl Into<CardId>, purchase_price: Money, sales_tax_paid: Money) -> Self {
        Self {
            card_id: card_id.into(),
            purchase_date: None,
            purchase_price,
            sales_tax_paid,
            shipping_paid: Decimal::ZERO,
            grading_cost: Decimal::ZERO,
            source: String::new(),
        }
    }

    pub fn cost_basis(&self) -> CostBasis {
        CostBasis::from_parts(
            self.purchase_price,
            self.sales_tax_paid,
            self.shipping_paid,
            self.grading_cost,
        )
    }

    /// Price + tax + shipping + grading
    pub fn total_cost_basis(&self) -> Money {
        self.cost_basis().total_cost_basis
    }
}

/// A recorded card sale. Fees and proceeds are stored as computed at sale time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub card_id: CardId,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    pub sale_price: Money,
    #[serde(default)]
    pub shipping_charged: Money,
    #[serde(default)]
    pub shipping_cost: Money,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub total_fees: Option<Money>,
    #[serde(default)]
    pub net_proceeds: Option<Money>,
}

impl Sale {
    /// A sale known only by its price and net proceeds. Fees stay unrecorded.
    pub fn new(card_id: impl Into<CardId>, sale_price: Money, net_proceeds: Money) -> Self {
        Self {
            card_id: card_id.into(),
            sale_date: None,
            sale_price,
            shipping_charged: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            platform: String::new(),
            total_fees: None,
            net_proceeds: Some(net_proceeds),
        }
    }

    /// Record a sale from the profit engine's output
    pub fn from_result(
        card_id: impl Into<CardId>,
        sale_date: Option<NaiveDate>,
        platform: impl Into<String>,
        result: &ProfitResult,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            sale_date,
            sale_price: result.sale_price,
            shipping_charged: result.shipping_charged,
            shipping_cost: result.shipping_cost,
            platform: platform.into(),
            total_fees: Some(result.total_fees()),
            net_proceeds: Some(result.net_proceeds),
        }
    }

    /// Recorded net proceeds, zero when never recorded
    pub fn net_proceeds_or_zero(&self) -> Money {
        self.net_proceeds.unwrap_or(Decimal::ZERO)
    }
}

/// Portfolio-level totals, recomputed from scratch on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_invested: Money,
    pub total_revenue: Money,
    pub total_profit: Money,
    pub overall_roi_pct: Percentage,
    pub cards_purchased: usize,
    pub cards_sold: usize,
    /// Purchased minus sold; negative if more sales than purchases were supplied
    pub cards_in_inventory: i64,
    pub avg_profit_per_card: Money,
}

impl std::fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Portfolio Summary:")?;
        writeln!(f, "  Total Invested:     ${:.2}", self.total_invested)?;
        writeln!(f, "  Total Revenue:      ${:.2}", self.total_revenue)?;
        writeln!(f, "  Total Profit:       ${:.2}", self.total_profit)?;
        writeln!(f, "  Overall ROI:        {:.2}%", self.overall_roi_pct)?;
        writeln!(f, "  Cards Purchased:    {}", self.cards_purchased)?;
        writeln!(f, "  Cards Sold:         {}", self.cards_sold)?;
        writeln!(f, "  In Inventory:       {}", self.cards_in_inventory)?;
        writeln!(f, "  Avg Profit / Card:  ${:.2}", self.avg_profit_per_card)?;
        Ok(())
    }
}

/// A purchase joined to its sale, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPerformance {
    pub card_id: CardId,
    pub cost_basis: Money,
    pub sale_price: Option<Money>,
    pub net_proceeds: Option<Money>,
    pub net_profit: Option<Money>,
    pub roi_pct: Option<Percentage>,
}

impl ItemPerformance {
    pub fn is_sold(&self) -> bool {
        self.sale_price.is_some()
    }
}

/// Reduces purchase and sale records into summaries
pub struct PortfolioAggregator;

impl PortfolioAggregator {
    /// Portfolio totals.
    ///
    /// Profit is total revenue minus total invested capital across all
    /// records, not the sum of per-item profits: unsold inventory counts
    /// against it.
    pub fn summarize(purchases: &[Purchase], sales: &[Sale]) -> PortfolioSummary {
        let total_invested = sum_money(purchases.iter().map(Purchase::total_cost_basis));
        let total_revenue = sum_money(
            sales
                .iter()
                .map(|sale| round_cents(sale.net_proceeds_or_zero())),
        );
        let total_profit = total_revenue.saturating_sub(total_invested);

        let cards_purchased = purchases.len();
        let cards_sold = sales.len();

        let avg_profit_per_card = if cards_sold > 0 {
            total_profit
                .checked_div(Decimal::from(cards_sold))
                .map(round_cents)
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        let summary = PortfolioSummary {
            total_invested: round_cents(total_invested),
            total_revenue: round_cents(total_revenue),
            total_profit: round_cents(total_profit),
            overall_roi_pct: pct_of(total_profit, total_invested),
            cards_purchased,
            cards_sold,
            cards_in_inventory: cards_purchased as i64 - cards_sold as i64,
            avg_profit_per_card,
        };

        log::debug!(
            "Summarized {} purchases and {} sales: profit {}",
            cards_purchased,
            cards_sold,
            summary.total_profit
        );

        summary
    }

    /// Join every purchase to the sale of the same card, in purchase order.
    ///
    /// When a card has several sale records the last one wins.
    pub fn item_performance(purchases: &[Purchase], sales: &[Sale]) -> Vec<ItemPerformance> {
        let sales_by_card: HashMap<&str, &Sale> = sales
            .iter()
            .map(|sale| (sale.card_id.as_str(), sale))
            .collect();

        purchases
            .iter()
            .map(|purchase| {
                let cost_basis = purchase.total_cost_basis();
                let sale = sales_by_card.get(purchase.card_id.as_str());
                let net_proceeds = sale.map(|s| s.net_proceeds_or_zero());
                let net_profit = net_proceeds.map(|proceeds| proceeds.saturating_sub(cost_basis));

                ItemPerformance {
                    card_id: purchase.card_id.clone(),
                    cost_basis,
                    sale_price: sale.map(|s| s.sale_price),
                    net_proceeds,
                    net_profit,
                    roi_pct: net_profit.map(|profit| pct_of(profit, cost_basis)),
                }
            })
            .collect()
    }
}
