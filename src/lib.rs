//! # card_profit
//!
//! Profit, fee and ROI engine for collectible card sales.
//!
//! Given a marketplace fee profile, shipping costs, sales tax and grading
//! costs, the engine works out what a sale actually nets, ranks competing
//! offers, decides whether grading a card pays off and rolls a purchase/sale
//! history up into portfolio totals. Every calculation is a pure function of
//! its arguments; money is kept as [`rust_decimal::Decimal`] and rounded to
//! cents half-to-even.
//!
//! ## Example
//!
//! ```rust
//! use card_profit::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let profile = FeeProfile::default();
//! let basis = CostBasisCalculator::compute(dec!(10), dec!(0.0625), false, dec!(0), dec!(0));
//! let result = ProfitEngine::calculate(
//!     dec!(50),
//!     dec!(0),
//!     basis.total_cost_basis,
//!     dec!(0.56),
//!     &profile,
//!     false,
//! );
//!
//! assert_eq!(result.total_fees(), dec!(7.02));
//! assert!(result.is_profitable());
//! ```

pub mod breakeven;
pub mod comps;
pub mod config;
pub mod cost_basis;
pub mod error;
pub mod fees;
pub mod grading;
pub mod offers;
pub mod portfolio;
pub mod profit;
pub mod shipping;
pub mod types;

pub mod prelude {
    //! Commonly used types
    pub use crate::breakeven::{
        BreakevenAnalyzer, BreakevenInputs, BreakevenResult, GradingDecision,
    };
    pub use crate::comps::{CompStats, SoldComp};
    pub use crate::config::CalculatorConfig;
    pub use crate::cost_basis::{CostBasis, CostBasisCalculator};
    pub use crate::error::{CalcError, Result};
    pub use crate::fees::{FeeBreakdown, FeeCalculator, FeeProfile};
    pub use crate::grading::{GradingOption, GradingTier};
    pub use crate::offers::{Offer, OfferAnalysis, OfferComparator, OfferDecision};
    pub use crate::portfolio::{
        ItemPerformance, PortfolioAggregator, PortfolioSummary, Purchase, Sale,
    };
    pub use crate::profit::{ProfitEngine, ProfitResult};
    pub use crate::shipping::ShippingOption;
    pub use crate::types::*;
}
