//! Aggregations over a user's bets
//!
//! Every function here is a pure transform of a bet slice: input order does
//! not matter, nothing is mutated, and empty input yields zeroed output.

pub mod bankroll;
pub mod performance;
pub mod roi;
pub mod streaks;
pub mod summary;
pub mod trend;

pub use bankroll::{
    compute_bankroll_series, max_drawdown, BankrollPoint, Drawdown, DEFAULT_STARTING_BANKROLL,
};
pub use performance::{
    compute_category_performance, compute_performance_by, CategoryPerformance, Dimension,
};
pub use roi::{compute_roi, compute_roi_at, filter_timeframe, local_today, RoiSummary, Timeframe};
pub use streaks::{
    compute_streaks, compute_streaks_with, CurrentStreak, StreakReport, StreakSegment, StreakType,
    STREAK_HISTORY_LEN,
};
pub use summary::{compute_summary, LedgerSummary};
pub use trend::{
    compute_roi_trend, compute_roi_trend_with, Granularity, TrendPoint, WEEKLY_TREND_MAX_BETS,
};
