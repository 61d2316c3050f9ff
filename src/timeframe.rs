//! Calendar reporting windows
//!
//! Every window is anchored on a "today" date supplied by the caller, so the
//! same ledger gives the same answer in tests and at the terminal.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::Bet;

/// Reporting window, anchored on "today" in local time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    /// Since the start of today
    Day,
    /// Since the most recent Sunday
    Week,
    /// Since the first of the month
    Month,
    /// Since January 1
    Year,
    /// Rolling window of the last N days
    LastDays(u32),
    #[default]
    All,
}

impl Timeframe {
    /// Parse a timeframe tag. Unknown tags fall back to `All`.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        match tag.as_str() {
            "day" => Timeframe::Day,
            "week" => Timeframe::Week,
            "month" => Timeframe::Month,
            "year" => Timeframe::Year,
            _ => tag
                .strip_suffix('d')
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .map(Timeframe::LastDays)
                .unwrap_or(Timeframe::All),
        }
    }

    /// Earliest date included in the window, `None` for no lower bound
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Timeframe::Day => Some(today),
            Timeframe::Week => {
                let since_sunday = today.weekday().num_days_from_sunday() as i64;
                Some(today - Duration::days(since_sunday))
            }
            Timeframe::Month => today.with_day(1),
            Timeframe::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Timeframe::LastDays(n) => Some(today - Duration::days(n as i64)),
            Timeframe::All => None,
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.cutoff(today).map_or(true, |cutoff| date >= cutoff)
    }

    /// Bets dated inside the window, in input order
    pub fn window<'a>(
        self,
        bets: &'a [Bet],
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Bet> + 'a {
        bets.iter().filter(move |b| self.contains(b.date, today))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Day => f.write_str("day"),
            Timeframe::Week => f.write_str("week"),
            Timeframe::Month => f.write_str("month"),
            Timeframe::Year => f.write_str("year"),
            Timeframe::LastDays(n) => write!(f, "{}d", n),
            Timeframe::All => f.write_str("all"),
        }
    }
}

impl Serialize for Timeframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Local calendar date
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
