//! ROI over a calendar timeframe

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::{Bet, BetResult};
pub use crate::timeframe::{local_today, Timeframe};

/// ROI summary for one timeframe
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiSummary {
    /// Percent
    pub roi: f64,
    pub total_risked: f64,
    pub total_won: f64,
    pub count: usize,
    pub timeframe: Timeframe,
}

/// Bets dated on or after the timeframe's cutoff
pub fn filter_timeframe(bets: &[Bet], timeframe: Timeframe, today: NaiveDate) -> Vec<Bet> {
    timeframe.window(bets, today).cloned().collect()
}

/// ROI for the timeframe relative to the local date
pub fn compute_roi(bets: &[Bet], timeframe: Timeframe) -> RoiSummary {
    compute_roi_at(bets, timeframe, local_today())
}

/// ROI for the timeframe relative to `today`
///
/// Every bet in the window counts toward `count` and `total_risked`,
/// pending ones included; only winning payouts count toward `total_won`.
pub fn compute_roi_at(bets: &[Bet], timeframe: Timeframe, today: NaiveDate) -> RoiSummary {
    let window: Vec<&Bet> = timeframe.window(bets, today).collect();

    let total_risked: f64 = window.iter().map(|b| b.amount_risked).sum();
    let total_won: f64 = window
        .iter()
        .filter(|b| b.result == BetResult::Win)
        .map(|b| b.payout)
        .sum();

    let roi = if total_risked > 0.0 {
        (total_won - total_risked) / total_risked * 100.0
    } else {
        0.0
    };

    debug!(%timeframe, bets = window.len(), "computed roi");

    RoiSummary {
        roi,
        total_risked,
        total_won,
        count: window.len(),
        timeframe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, settled};

    #[test]
    fn test_empty_roi_is_zero() {
        for tf in [
            Timeframe::Day,
            Timeframe::Week,
            Timeframe::Month,
            Timeframe::Year,
            Timeframe::All,
        ] {
            let summary = compute_roi_at(&[], tf, date("2024-05-15"));
            assert_eq!(summary.roi, 0.0);
            assert_eq!(summary.total_risked, 0.0);
            assert_eq!(summary.total_won, 0.0);
            assert_eq!(summary.count, 0);
            assert_eq!(summary.timeframe, tf);
        }
    }

    #[test]
    fn test_roi_all() {
        let bets = vec![
            settled(1, "2023-02-01", 100.0, BetResult::Win, 250.0),
            settled(2, "2024-05-14", 50.0, BetResult::Loss, 0.0),
        ];

        let summary = compute_roi_at(&bets, Timeframe::All, date("2024-05-15"));
        assert_eq!(summary.total_risked, 150.0);
        assert_eq!(summary.total_won, 250.0);
        assert_eq!(summary.count, 2);
        assert!((summary.roi - 66.6667).abs() < 0.001);
    }

    #[test]
    fn test_roi_window_counts_pending_and_push() {
        let bets = vec![
            settled(1, "2023-12-31", 100.0, BetResult::Win, 250.0),
            settled(2, "2024-05-13", 40.0, BetResult::Push, 40.0),
            settled(3, "2024-05-14", 60.0, BetResult::Pending, 0.0),
            settled(4, "2024-05-15", 100.0, BetResult::Win, 190.0),
        ];

        let summary = compute_roi_at(&bets, Timeframe::Week, date("2024-05-15"));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_risked, 200.0);
        assert_eq!(summary.total_won, 190.0);
        assert!((summary.roi + 5.0).abs() < 1e-9);

        let year = compute_roi_at(&bets, Timeframe::Year, date("2024-05-15"));
        assert_eq!(year.count, 3);
        let day = compute_roi_at(&bets, Timeframe::Day, date("2024-05-15"));
        assert_eq!(day.count, 1);
    }

    #[test]
    fn test_roi_serializes_camel_case() {
        let summary = compute_roi_at(&[], Timeframe::Month, date("2024-05-15"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["timeframe"], "month");
        assert_eq!(json["totalRisked"], 0.0);
        assert!(json.get("totalWon").is_some());
    }

    #[test]
    fn test_filter_timeframe_does_not_mutate_input() {
        let bets = vec![
            settled(1, "2024-04-30", 10.0, BetResult::Loss, 0.0),
            settled(2, "2024-05-02", 10.0, BetResult::Loss, 0.0),
        ];
        let before = bets.clone();
        let window = filter_timeframe(&bets, Timeframe::Month, date("2024-05-15"));
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, 2);
        assert_eq!(bets, before);
    }
}
