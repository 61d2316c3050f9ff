//! Bankroll curve
//!
//! Replays bets in date order against a starting balance and reports the
//! balance after each one, plus the deepest drawdown along the way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{sorted_chronologically, Bet};

pub const DEFAULT_STARTING_BANKROLL: f64 = 1000.0;

/// One point on the bankroll curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankrollPoint {
    pub date: NaiveDate,
    pub bankroll: f64,
    /// Bankroll minus the starting balance
    pub profit: f64,
}

/// Largest peak-to-trough fall of the bankroll
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    pub amount: f64,
    /// Fraction of the peak balance (0.25 = 25%)
    pub pct: f64,
}

/// Bankroll after each bet, preceded by a starting point on the first bet's
/// date. Empty when there are no bets.
pub fn compute_bankroll_series(bets: &[Bet], starting_bankroll: f64) -> Vec<BankrollPoint> {
    let sorted = sorted_chronologically(bets);
    let first = match sorted.first() {
        Some(bet) => bet.date,
        None => return Vec::new(),
    };

    let mut series = Vec::with_capacity(sorted.len() + 1);
    series.push(BankrollPoint {
        date: first,
        bankroll: starting_bankroll,
        profit: 0.0,
    });

    let mut balance = starting_bankroll;
    for bet in sorted {
        // Pushes and open bets leave the balance unchanged
        balance += bet.profit();
        series.push(BankrollPoint {
            date: bet.date,
            bankroll: balance,
            profit: balance - starting_bankroll,
        });
    }

    debug!(points = series.len(), final_bankroll = balance, "computed bankroll series");
    series
}

/// Deepest drawdown over a bankroll series
pub fn max_drawdown(series: &[BankrollPoint]) -> Drawdown {
    let mut peak = f64::MIN;
    let mut worst = Drawdown::default();

    for point in series {
        if point.bankroll > peak {
            peak = point.bankroll;
        }
        let drawdown = peak - point.bankroll;
        if drawdown > worst.amount {
            worst = Drawdown {
                amount: drawdown,
                pct: if peak > 0.0 { drawdown / peak } else { 0.0 },
            };
        }
    }

    worst
}
