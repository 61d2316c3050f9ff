//! Periodic ROI trend with running cumulative ROI

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::Bet;

/// Ledgers up to this size are grouped by week, larger ones by month
pub const WEEKLY_TREND_MAX_BETS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// Weekly for small ledgers, monthly otherwise
    #[default]
    Auto,
    Weekly,
    Monthly,
}

/// ROI for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// `YYYY-MM` for months, the week's Sunday as `YYYY-MM-DD` for weeks
    pub period: String,
    pub roi: f64,
    #[serde(rename = "cumulativeROI")]
    pub cumulative_roi: f64,
    pub bets_count: usize,
    pub profit: f64,
    pub wagered: f64,
}

/// Sunday that starts the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn period_key(date: NaiveDate, weekly: bool) -> String {
    if weekly {
        week_start(date).format("%Y-%m-%d").to_string()
    } else {
        format!("{}-{:02}", date.year(), date.month())
    }
}

/// Trend with automatic granularity
pub fn compute_roi_trend(bets: &[Bet]) -> Vec<TrendPoint> {
    compute_roi_trend_with(bets, Granularity::Auto, WEEKLY_TREND_MAX_BETS)
}

pub fn compute_roi_trend_with(
    bets: &[Bet],
    granularity: Granularity,
    max_weekly_bets: usize,
) -> Vec<TrendPoint> {
    if bets.is_empty() {
        return Vec::new();
    }

    let weekly = match granularity {
        Granularity::Auto => bets.len() <= max_weekly_bets,
        Granularity::Weekly => true,
        Granularity::Monthly => false,
    };

    // Keys are zero-padded dates, so lexicographic order is chronological
    let mut groups: BTreeMap<String, Vec<&Bet>> = BTreeMap::new();
    for bet in bets {
        groups.entry(period_key(bet.date, weekly)).or_default().push(bet);
    }

    debug!(
        bets = bets.len(),
        periods = groups.len(),
        weekly,
        "computed roi trend"
    );

    let mut cumulative_profit = 0.0;
    let mut cumulative_wagered = 0.0;

    groups
        .into_iter()
        .map(|(period, group)| {
            let wagered: f64 = group.iter().map(|b| b.amount_risked).sum();
            let profit: f64 = group.iter().map(|b| b.profit()).sum();

            cumulative_profit += profit;
            cumulative_wagered += wagered;

            TrendPoint {
                period,
                roi: if wagered > 0.0 {
                    profit / wagered * 100.0
                } else {
                    0.0
                },
                cumulative_roi: if cumulative_wagered > 0.0 {
                    cumulative_profit / cumulative_wagered * 100.0
                } else {
                    0.0
                },
                bets_count: group.len(),
                profit,
                wagered,
            }
        })
        .collect()
}
