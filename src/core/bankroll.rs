//! Bankroll Management
//!
//! Unit sizing from a risk tolerance and exposure checks against wagering
//! limits.
//!
//! Unit size:
//!     unit = round(bankroll * pct)
//!
//! Where pct is 1% (conservative), 2% (moderate) or 5% (aggressive).
//!
//! Limit usage is graded by percent of the limit consumed:
//!     >= 90% danger, >= 70% warning, otherwise safe

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Bet;
use crate::timeframe::Timeframe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Fraction of bankroll per unit
    pub fn unit_pct(self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.01,
            RiskTolerance::Moderate => 0.02,
            RiskTolerance::Aggressive => 0.05,
        }
    }
}

/// Recommended stake for one unit, rounded to a whole amount
pub fn recommended_unit_size(current_bankroll: f64, tolerance: RiskTolerance) -> f64 {
    (current_bankroll * tolerance.unit_pct()).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitLevel {
    Safe,
    Warning,
    Danger,
}

/// Grade how much of `limit` has been used by `current`
pub fn limit_level(current: f64, limit: f64) -> LimitLevel {
    if limit <= 0.0 {
        return if current > 0.0 {
            LimitLevel::Danger
        } else {
            LimitLevel::Safe
        };
    }

    let pct = current / limit * 100.0;
    if pct >= 90.0 {
        LimitLevel::Danger
    } else if pct >= 70.0 {
        LimitLevel::Warning
    } else {
        LimitLevel::Safe
    }
}

/// Wagering limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankrollLimits {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub max_bet_size: f64,
    /// Monthly net loss at which to stop betting
    pub stop_loss: f64,
}

impl Default for BankrollLimits {
    fn default() -> Self {
        Self {
            daily: 100.0,
            weekly: 500.0,
            monthly: 2000.0,
            max_bet_size: 50.0,
            stop_loss: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitStatus {
    pub wagered: f64,
    pub limit: f64,
    pub level: LimitLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitReport {
    pub daily: LimitStatus,
    pub weekly: LimitStatus,
    pub monthly: LimitStatus,
    /// Bets staked above `max_bet_size`
    pub oversized_bets: Vec<i64>,
    pub monthly_net_profit: f64,
    pub stop_loss_hit: bool,
}

impl BankrollLimits {
    /// Check a ledger against these limits as of `today`
    pub fn check(&self, bets: &[Bet], today: NaiveDate) -> LimitReport {
        let wagered_in =
            |tf: Timeframe| -> f64 { tf.window(bets, today).map(|b| b.amount_risked).sum() };
        let status = |wagered: f64, limit: f64| LimitStatus {
            wagered,
            limit,
            level: limit_level(wagered, limit),
        };

        let monthly_net_profit: f64 = Timeframe::Month
            .window(bets, today)
            .map(Bet::profit)
            .sum();

        LimitReport {
            daily: status(wagered_in(Timeframe::Day), self.daily),
            weekly: status(wagered_in(Timeframe::Week), self.weekly),
            monthly: status(wagered_in(Timeframe::Month), self.monthly),
            oversized_bets: bets
                .iter()
                .filter(|b| b.amount_risked > self.max_bet_size)
                .map(|b| b.id)
                .collect(),
            monthly_net_profit,
            stop_loss_hit: monthly_net_profit <= -self.stop_loss,
        }
    }
}
