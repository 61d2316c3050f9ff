//! Betledger - sports betting ledger analytics
//!
//! This library provides:
//! - American/decimal odds conversion and payout calculation
//! - Bet settlement with user payout overrides
//! - ROI over calendar timeframes, bankroll curves and drawdown
//! - Per-sport (or bet type / odds range) performance breakdowns
//! - ROI trends and win/loss streak analysis
//!
//! # Example
//!
//! ```
//! use betledger::analytics::{compute_roi, Timeframe};
//! use betledger::core::odds::payout_from_odds;
//! use betledger::models::{Bet, BetResult};
//! use chrono::NaiveDate;
//!
//! let mut bet = Bet::new(1, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 100.0, 150.0);
//! bet.settle(BetResult::Win, None).unwrap();
//! assert_eq!(bet.payout, payout_from_odds(100.0, 150.0).unwrap());
//!
//! let roi = compute_roi(&[bet], Timeframe::All);
//! assert_eq!(roi.roi, 150.0);
//! ```

pub mod analytics;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod timeframe;

// Re-export commonly used types
pub use analytics::{
    compute_bankroll_series, compute_category_performance, compute_roi, compute_roi_trend,
    compute_streaks, compute_summary,
};
pub use config::AnalyticsConfig;
pub use crate::core::{american_to_decimal, payout_from_odds, settlement_payout};
pub use error::LedgerError;
pub use models::{Bet, BetResult};
pub use timeframe::Timeframe;
