//! Win/loss streak analysis
//!
//! Pushes and open bets are invisible here: a streak is a maximal run of
//! consecutive wins or losses in date order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{sorted_chronologically, Bet, BetResult};

/// Number of most recent streaks kept in the history
pub const STREAK_HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Win,
    Loss,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStreak {
    #[serde(rename = "type")]
    pub kind: StreakType,
    pub count: usize,
    /// Oldest bet in the run
    pub start_date: Option<NaiveDate>,
    /// Most recent bet in the run
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinStreakRecord {
    pub count: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossStreakRecord {
    pub count: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Absolute amount lost over the run
    pub loss: f64,
}

/// One segment of the streak history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSegment {
    #[serde(rename = "type")]
    pub kind: StreakType,
    pub count: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub net_result: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    pub current_streak: CurrentStreak,
    pub longest_win_streak: WinStreakRecord,
    pub longest_loss_streak: LossStreakRecord,
    /// Most recent segments, oldest first
    pub streak_history: Vec<StreakSegment>,
}

fn streak_type(result: BetResult) -> StreakType {
    match result {
        BetResult::Win => StreakType::Win,
        BetResult::Loss => StreakType::Loss,
        BetResult::Push | BetResult::Pending => StreakType::None,
    }
}

pub fn compute_streaks(bets: &[Bet]) -> StreakReport {
    compute_streaks_with(bets, STREAK_HISTORY_LEN)
}

/// Streak analysis keeping the last `history_len` segments
pub fn compute_streaks_with(bets: &[Bet], history_len: usize) -> StreakReport {
    let chronological: Vec<&Bet> = sorted_chronologically(bets)
        .into_iter()
        .filter(|b| matches!(b.result, BetResult::Win | BetResult::Loss))
        .collect();

    if chronological.is_empty() {
        return StreakReport::default();
    }

    let current_streak = current_streak(&chronological);
    let segments = segments(&chronological);

    let mut longest_win_streak = WinStreakRecord::default();
    let mut longest_loss_streak = LossStreakRecord::default();

    // Strict comparison: the earliest of equally long streaks is kept
    for seg in &segments {
        match seg.kind {
            StreakType::Win if seg.count > longest_win_streak.count => {
                longest_win_streak = WinStreakRecord {
                    count: seg.count,
                    start_date: Some(seg.start_date),
                    end_date: Some(seg.end_date),
                    profit: seg.net_result,
                };
            }
            StreakType::Loss if seg.count > longest_loss_streak.count => {
                longest_loss_streak = LossStreakRecord {
                    count: seg.count,
                    start_date: Some(seg.start_date),
                    end_date: Some(seg.end_date),
                    loss: seg.net_result.abs(),
                };
            }
            _ => {}
        }
    }

    debug!(
        settled = chronological.len(),
        segments = segments.len(),
        "computed streaks"
    );

    let skip = segments.len().saturating_sub(history_len);
    let streak_history = segments.into_iter().skip(skip).collect();

    StreakReport {
        current_streak,
        longest_win_streak,
        longest_loss_streak,
        streak_history,
    }
}

/// Run ending at the most recent bet. `bets` must be non-empty and
/// chronological.
fn current_streak(bets: &[&Bet]) -> CurrentStreak {
    let mut recent_first = bets.iter().rev();
    let latest = match recent_first.next() {
        Some(bet) => bet,
        None => return CurrentStreak::default(),
    };

    let mut streak = CurrentStreak {
        kind: streak_type(latest.result),
        count: 1,
        start_date: Some(latest.date),
        end_date: Some(latest.date),
    };

    for bet in recent_first {
        if bet.result != latest.result {
            break;
        }
        streak.count += 1;
        streak.start_date = Some(bet.date);
    }

    streak
}

/// Split chronological win/loss bets into maximal same-result runs
fn segments(bets: &[&Bet]) -> Vec<StreakSegment> {
    let mut segments: Vec<StreakSegment> = Vec::new();

    for bet in bets {
        let kind = streak_type(bet.result);
        match segments.last_mut() {
            Some(seg) if seg.kind == kind => {
                seg.count += 1;
                seg.end_date = bet.date;
                seg.net_result += bet.profit();
            }
            _ => segments.push(StreakSegment {
                kind,
                count: 1,
                start_date: bet.date,
                end_date: bet.date,
                net_result: bet.profit(),
            }),
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, settled};

    use crate::models::BetResult::{Loss, Pending, Push, Win};

    /// One bet per day starting 2024-03-01, stake 100, wins paying 200
    fn sequence(results: &[BetResult]) -> Vec<Bet> {
        results
            .iter()
            .enumerate()
            .map(|(i, &result)| {
                let payout = if result == Win { 200.0 } else { 0.0 };
                let mut bet = settled(i as i64 + 1, "2024-03-01", 100.0, result, payout);
                bet.date = bet.date + chrono::Duration::days(i as i64);
                bet
            })
            .collect()
    }

    #[test]
    fn test_empty() {
        let report = compute_streaks(&[]);
        assert_eq!(report.current_streak.kind, StreakType::None);
        assert_eq!(report.current_streak.count, 0);
        assert_eq!(report.longest_win_streak.count, 0);
        assert_eq!(report.longest_loss_streak.count, 0);
        assert!(report.streak_history.is_empty());
    }

    #[test]
    fn test_only_pushes_and_pending() {
        let report = compute_streaks(&sequence(&[Push, Pending, Push]));
        assert_eq!(report, StreakReport::default());
    }

    #[test]
    fn test_win_win_loss_win() {
        let bets = sequence(&[Win, Win, Loss, Win]);
        let report = compute_streaks(&bets);

        assert_eq!(report.current_streak.kind, StreakType::Win);
        assert_eq!(report.current_streak.count, 1);
        assert_eq!(report.current_streak.start_date, Some(date("2024-03-04")));

        assert_eq!(report.longest_win_streak.count, 2);
        assert_eq!(report.longest_win_streak.start_date, Some(date("2024-03-01")));
        assert_eq!(report.longest_win_streak.end_date, Some(date("2024-03-02")));
        assert_eq!(report.longest_win_streak.profit, 200.0);

        assert_eq!(report.longest_loss_streak.count, 1);
        assert_eq!(report.longest_loss_streak.loss, 100.0);

        let shape: Vec<(StreakType, usize)> = report
            .streak_history
            .iter()
            .map(|s| (s.kind, s.count))
            .collect();
        assert_eq!(
            shape,
            vec![
                (StreakType::Win, 2),
                (StreakType::Loss, 1),
                (StreakType::Win, 1)
            ]
        );
    }

    #[test]
    fn test_current_streak_spans_run() {
        let report = compute_streaks(&sequence(&[Win, Loss, Loss, Loss]));
        assert_eq!(report.current_streak.kind, StreakType::Loss);
        assert_eq!(report.current_streak.count, 3);
        assert_eq!(report.current_streak.start_date, Some(date("2024-03-02")));
        assert_eq!(report.current_streak.end_date, Some(date("2024-03-04")));
    }

    #[test]
    fn test_pushes_do_not_break_streaks() {
        let report = compute_streaks(&sequence(&[Win, Push, Win, Pending, Win]));
        assert_eq!(report.current_streak.count, 3);
        assert_eq!(report.streak_history.len(), 1);
        assert_eq!(report.longest_win_streak.count, 3);
    }

    #[test]
    fn test_longest_tie_keeps_first() {
        let report = compute_streaks(&sequence(&[Win, Win, Loss, Loss, Win, Win, Loss, Loss]));

        assert_eq!(report.longest_win_streak.count, 2);
        assert_eq!(report.longest_win_streak.start_date, Some(date("2024-03-01")));
        assert_eq!(report.longest_loss_streak.count, 2);
        assert_eq!(report.longest_loss_streak.start_date, Some(date("2024-03-03")));
        assert_eq!(report.longest_loss_streak.loss, 200.0);
    }

    #[test]
    fn test_history_keeps_last_ten_in_order() {
        let results: Vec<BetResult> = (0..12)
            .map(|i| if i % 2 == 0 { Win } else { Loss })
            .collect();
        let report = compute_streaks(&sequence(&results));

        assert_eq!(report.streak_history.len(), STREAK_HISTORY_LEN);
        // Segments 0 and 1 dropped; oldest kept is the third bet
        assert_eq!(report.streak_history[0].start_date, date("2024-03-03"));
        assert_eq!(report.streak_history[9].start_date, date("2024-03-12"));

        let short = compute_streaks_with(&sequence(&results), 3);
        assert_eq!(short.streak_history.len(), 3);
        assert_eq!(short.streak_history[2].start_date, date("2024-03-12"));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut bets = sequence(&[Win, Win, Loss, Win]);
        let expected = compute_streaks(&bets);
        bets.reverse();
        assert_eq!(compute_streaks(&bets), expected);
        assert_eq!(compute_streaks(&bets), expected);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(compute_streaks(&sequence(&[Loss]))).unwrap();
        assert_eq!(json["currentStreak"]["type"], "loss");
        assert_eq!(json["longestLossStreak"]["loss"], 100.0);
        assert_eq!(json["streakHistory"][0]["netResult"], -100.0);

        let empty = serde_json::to_value(compute_streaks(&[])).unwrap();
        assert_eq!(empty["currentStreak"]["type"], "none");
    }
}
