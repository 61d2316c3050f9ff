//! Performance breakdown by category
//!
//! Bets without a label for the chosen dimension are left out rather than
//! pooled under a catch-all bucket. Open bets are ignored entirely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::models::{Bet, BetResult};

/// Field a breakdown groups on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Sport,
    BetType,
    OddsRange,
}

impl Dimension {
    fn key(self, bet: &Bet) -> Option<String> {
        match self {
            Dimension::Sport => bet.sport_label().map(str::to_string),
            Dimension::BetType => bet.bet_type_label().map(str::to_string),
            Dimension::OddsRange => Some(odds_range(bet.odds).to_string()),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Sport => f.write_str("sport"),
            Dimension::BetType => f.write_str("bet type"),
            Dimension::OddsRange => f.write_str("odds range"),
        }
    }
}

/// Bucket label for an American price
pub fn odds_range(odds: f64) -> &'static str {
    if odds <= -200.0 {
        "heavy favorite (<= -200)"
    } else if odds < -100.0 {
        "favorite (-199..-101)"
    } else if odds <= 100.0 {
        "even (-100..+100)"
    } else {
        "underdog (> +100)"
    }
}

/// Results for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    /// Percent of settled bets won
    pub win_rate: f64,
    /// Percent
    pub roi: f64,
    pub total_bets: usize,
    pub profit: f64,
    pub wagered: f64,
}

#[derive(Default)]
struct Tally {
    wins: usize,
    losses: usize,
    pushes: usize,
    profit: f64,
    wagered: f64,
}

/// Breakdown by sport
pub fn compute_category_performance(bets: &[Bet]) -> Vec<CategoryPerformance> {
    compute_performance_by(bets, Dimension::Sport)
}

/// Breakdown by any dimension, sorted by category name
pub fn compute_performance_by(bets: &[Bet], dimension: Dimension) -> Vec<CategoryPerformance> {
    let mut grouped: BTreeMap<String, Tally> = BTreeMap::new();

    for bet in bets.iter().filter(|b| b.is_settled()) {
        let key = match dimension.key(bet) {
            Some(key) => key,
            None => continue,
        };

        let tally = grouped.entry(key).or_default();
        tally.wagered += bet.amount_risked;
        tally.profit += bet.profit();
        match bet.result {
            BetResult::Win => tally.wins += 1,
            BetResult::Loss => tally.losses += 1,
            BetResult::Push => tally.pushes += 1,
            BetResult::Pending => {}
        }
    }

    debug!(%dimension, categories = grouped.len(), "computed performance breakdown");

    grouped
        .into_iter()
        .map(|(category, t)| {
            let total_bets = t.wins + t.losses + t.pushes;
            CategoryPerformance {
                category,
                wins: t.wins,
                losses: t.losses,
                pushes: t.pushes,
                win_rate: if total_bets > 0 {
                    t.wins as f64 / total_bets as f64 * 100.0
                } else {
                    0.0
                },
                roi: if t.wagered > 0.0 {
                    t.profit / t.wagered * 100.0
                } else {
                    0.0
                },
                total_bets,
                profit: t.profit,
                wagered: t.wagered,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{settled, with_sport};

    fn create_test_bets() -> Vec<Bet> {
        vec![
            with_sport(settled(1, "2024-01-01", 100.0, BetResult::Win, 250.0), "NBA"),
            with_sport(settled(2, "2024-01-02", 50.0, BetResult::Loss, 0.0), "NBA"),
            with_sport(settled(3, "2024-01-03", 20.0, BetResult::Push, 20.0), "NBA"),
            with_sport(settled(4, "2024-01-04", 110.0, BetResult::Win, 210.0), " NFL "),
            // No sport: must not show up anywhere
            settled(5, "2024-01-05", 500.0, BetResult::Loss, 0.0),
            with_sport(settled(6, "2024-01-06", 30.0, BetResult::Loss, 0.0), ""),
        ]
    }

    #[test]
    fn test_empty() {
        assert!(compute_category_performance(&[]).is_empty());
    }

    #[test]
    fn test_by_sport() {
        let perf = compute_category_performance(&create_test_bets());
        assert_eq!(perf.len(), 2);

        let nba = &perf[0];
        assert_eq!(nba.category, "NBA");
        assert_eq!((nba.wins, nba.losses, nba.pushes), (1, 1, 1));
        assert_eq!(nba.total_bets, 3);
        assert_eq!(nba.wagered, 170.0);
        assert_eq!(nba.profit, 100.0);
        assert!((nba.win_rate - 33.3333).abs() < 0.001);
        assert!((nba.roi - 100.0 / 170.0 * 100.0).abs() < 1e-9);

        let nfl = &perf[1];
        assert_eq!(nfl.category, "NFL");
        assert_eq!(nfl.wins, 1);
        assert_eq!(nfl.profit, 100.0);
        assert_eq!(nfl.win_rate, 100.0);
    }

    #[test]
    fn test_unlabelled_bets_are_excluded() {
        let perf = compute_category_performance(&create_test_bets());
        assert!(perf.iter().all(|p| p.category != "Other" && !p.category.is_empty()));
        let wagered: f64 = perf.iter().map(|p| p.wagered).sum();
        assert_eq!(wagered, 280.0);
    }

    #[test]
    fn test_pending_bets_add_nothing() {
        let bets = vec![
            with_sport(settled(1, "2024-01-01", 100.0, BetResult::Loss, 0.0), "MLB"),
            with_sport(settled(2, "2024-01-02", 900.0, BetResult::Pending, 0.0), "MLB"),
            with_sport(settled(3, "2024-01-03", 40.0, BetResult::Pending, 0.0), "NHL"),
        ];

        let perf = compute_category_performance(&bets);
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].wagered, 100.0);
        assert_eq!(perf[0].total_bets, 1);
        assert_eq!(perf[0].roi, -100.0);
    }

    #[test]
    fn test_by_bet_type() {
        let mut bets = create_test_bets();
        bets[0].bet_type = Some("moneyline".to_string());
        bets[1].bet_type = Some("spread".to_string());
        bets[3].bet_type = Some("moneyline".to_string());

        let perf = compute_performance_by(&bets, Dimension::BetType);
        assert_eq!(perf.len(), 2);
        assert_eq!(perf[0].category, "moneyline");
        assert_eq!(perf[0].wins, 2);
        assert_eq!(perf[1].category, "spread");
        assert_eq!(perf[1].losses, 1);
    }

    #[test]
    fn test_by_odds_range_covers_every_settled_bet() {
        let mut bets = create_test_bets();
        bets[0].odds = 150.0;
        bets[1].odds = -250.0;
        bets[2].odds = 100.0;

        let perf = compute_performance_by(&bets, Dimension::OddsRange);
        let total: usize = perf.iter().map(|p| p.total_bets).sum();
        assert_eq!(total, 6);
        assert!(perf.iter().any(|p| p.category.starts_with("underdog")));
        assert!(perf.iter().any(|p| p.category.starts_with("heavy favorite")));
    }

    #[test]
    fn test_odds_range_boundaries() {
        assert_eq!(odds_range(-200.0), "heavy favorite (<= -200)");
        assert_eq!(odds_range(-110.0), "favorite (-199..-101)");
        assert_eq!(odds_range(-100.0), "even (-100..+100)");
        assert_eq!(odds_range(100.0), "even (-100..+100)");
        assert_eq!(odds_range(101.0), "underdog (> +100)");
    }

    #[test]
    fn test_breakdown_is_repeatable() {
        let bets = create_test_bets();
        let before = bets.clone();

        for dimension in [Dimension::Sport, Dimension::BetType, Dimension::OddsRange] {
            let first = compute_performance_by(&bets, dimension);
            let second = compute_performance_by(&bets, dimension);
            assert_eq!(first, second);
        }
        assert_eq!(bets, before);
    }
}
