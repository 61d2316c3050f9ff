//! Core betting math: odds conversion, settlement and bankroll sizing

pub mod bankroll;
pub mod odds;
pub mod settlement;

// Re-export commonly used types
pub use bankroll::{
    limit_level, recommended_unit_size, BankrollLimits, LimitLevel, LimitReport, RiskTolerance,
};
pub use odds::{american_to_decimal, decimal_to_american, implied_probability, payout_from_odds};
pub use settlement::{settle_in_ledger, settlement_payout};
