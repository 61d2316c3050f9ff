//! Dashboard summary
//!
//! Open bets count toward totals and stake size but never toward profit.

use serde::{Deserialize, Serialize};

use crate::models::{Bet, BetResult};

/// Headline figures for a ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_bets: usize,
    pub completed_bets: usize,
    pub open_bets: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    /// Percent of completed bets won (pushes count as completed)
    pub win_rate: f64,
    pub total_wagered: f64,
    pub net_profit: f64,
    pub roi_percent: f64,
    pub average_bet_size: f64,
}

pub fn compute_summary(bets: &[Bet]) -> LedgerSummary {
    if bets.is_empty() {
        return LedgerSummary::default();
    }

    let count = |r: BetResult| bets.iter().filter(|b| b.result == r).count();
    let wins = count(BetResult::Win);
    let losses = count(BetResult::Loss);
    let pushes = count(BetResult::Push);
    let open_bets = count(BetResult::Pending);

    let total_bets = bets.len();
    let completed_bets = total_bets - open_bets;
    let total_wagered: f64 = bets.iter().map(|b| b.amount_risked).sum();
    let net_profit: f64 = bets.iter().map(Bet::profit).sum();

    LedgerSummary {
        total_bets,
        completed_bets,
        open_bets,
        wins,
        losses,
        pushes,
        win_rate: if completed_bets > 0 {
            wins as f64 / completed_bets as f64 * 100.0
        } else {
            0.0
        },
        total_wagered,
        net_profit,
        roi_percent: if total_wagered > 0.0 {
            net_profit / total_wagered * 100.0
        } else {
            0.0
        },
        average_bet_size: total_wagered / total_bets as f64,
    }
}
