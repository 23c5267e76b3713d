//! Fees module - fee profiles, defaults and the fee calculator

pub mod calculator;
pub mod constants;
pub mod profile;

pub use calculator::{FeeBreakdown, FeeCalculator};
pub use profile::{default_fee_profiles, find_profile, select_default, FeeProfile};
