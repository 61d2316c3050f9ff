use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Outcome of a bet. A freshly logged bet is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    Win,
    Loss,
    Push,
    #[default]
    #[serde(rename = "", alias = "pending")]
    Pending,
}

impl BetResult {
    pub fn is_settled(self) -> bool {
        self != BetResult::Pending
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BetResult::Win => "win",
            BetResult::Loss => "loss",
            BetResult::Push => "push",
            BetResult::Pending => "pending",
        }
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetResult {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(BetResult::Win),
            "loss" => Ok(BetResult::Loss),
            "push" => Ok(BetResult::Push),
            "" | "pending" => Ok(BetResult::Pending),
            other => Err(LedgerError::InvalidResult(other.to_string())),
        }
    }
}

/// A single logged bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, alias = "bet_type", skip_serializing_if = "Option::is_none")]
    pub bet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(alias = "amount_risked")]
    pub amount_risked: f64,
    /// American odds (e.g. +150, -110)
    pub odds: f64,
    #[serde(default)]
    pub result: BetResult,
    #[serde(default)]
    pub payout: f64,
}

impl Bet {
    /// Create a pending bet with no labels
    pub fn new(id: i64, date: NaiveDate, amount_risked: f64, odds: f64) -> Self {
        Self {
            id,
            date,
            description: String::new(),
            sport: None,
            bet_type: None,
            notes: None,
            amount_risked,
            odds,
            result: BetResult::Pending,
            payout: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.result.is_settled()
    }

    /// Net profit of the bet: payout minus stake on a win, the lost stake on
    /// a loss, zero otherwise.
    pub fn profit(&self) -> f64 {
        match self.result {
            BetResult::Win => self.payout - self.amount_risked,
            BetResult::Loss => -self.amount_risked,
            BetResult::Push | BetResult::Pending => 0.0,
        }
    }

    /// Sport label, trimmed; `None` when missing or blank
    pub fn sport_label(&self) -> Option<&str> {
        non_blank(self.sport.as_deref())
    }

    /// Bet type label, trimmed; `None` when missing or blank
    pub fn bet_type_label(&self) -> Option<&str> {
        non_blank(self.bet_type.as_deref())
    }
}

fn non_blank(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|s| !s.is_empty())
}

/// Sort bets chronologically. Bets on the same date are ordered by id.
pub fn sorted_chronologically(bets: &[Bet]) -> Vec<&Bet> {
    let mut sorted: Vec<&Bet> = bets.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    sorted
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_result_from_str() {
        assert_eq!("win".parse::<BetResult>().unwrap(), BetResult::Win);
        assert_eq!(" LOSS ".parse::<BetResult>().unwrap(), BetResult::Loss);
        assert_eq!("push".parse::<BetResult>().unwrap(), BetResult::Push);
        assert_eq!("".parse::<BetResult>().unwrap(), BetResult::Pending);
        assert_eq!("pending".parse::<BetResult>().unwrap(), BetResult::Pending);
        assert!("void".parse::<BetResult>().is_err());
    }

    #[test]
    fn test_profit_by_result() {
        assert_eq!(settled(1, "2024-01-01", 100.0, BetResult::Win, 250.0).profit(), 150.0);
        assert_eq!(settled(2, "2024-01-01", 50.0, BetResult::Loss, 0.0).profit(), -50.0);
        assert_eq!(settled(3, "2024-01-01", 50.0, BetResult::Push, 50.0).profit(), 0.0);
        // Payout on an open bet is not meaningful yet
        assert_eq!(settled(4, "2024-01-01", 50.0, BetResult::Pending, 90.0).profit(), 0.0);
    }

    #[test]
    fn test_bet_deserialization_camel_and_snake() {
        let json = r#"[
            {"id": 1, "date": "2024-03-02", "amountRisked": 100, "odds": 150, "result": "win", "payout": 250, "sport": "NBA"},
            {"id": 2, "date": "2024-03-03", "amount_risked": 50, "odds": -110, "result": "", "bet_type": "spread"},
            {"id": 3, "date": "2024-03-04", "amountRisked": 20, "odds": 120}
        ]"#;

        let bets: Vec<Bet> = serde_json::from_str(json).unwrap();
        assert_eq!(bets.len(), 3);
        assert_eq!(bets[0].result, BetResult::Win);
        assert_eq!(bets[0].sport_label(), Some("NBA"));
        assert_eq!(bets[1].amount_risked, 50.0);
        assert_eq!(bets[1].result, BetResult::Pending);
        assert_eq!(bets[1].bet_type_label(), Some("spread"));
        assert_eq!(bets[2].result, BetResult::Pending);
        assert_eq!(bets[2].payout, 0.0);
    }

    #[test]
    fn test_pending_serializes_as_empty_string() {
        let bet = Bet::new(7, date("2024-05-01"), 10.0, 100.0);
        let json = serde_json::to_value(&bet).unwrap();
        assert_eq!(json["result"], "");
        assert_eq!(json["amountRisked"], 10.0);
        assert!(json.get("sport").is_none());
    }

    #[test]
    fn test_blank_labels_are_none() {
        let mut bet = Bet::new(1, date("2024-05-01"), 10.0, 100.0);
        bet.sport = Some("   ".to_string());
        assert_eq!(bet.sport_label(), None);
        bet.sport = Some(" NFL ".to_string());
        assert_eq!(bet.sport_label(), Some("NFL"));
    }

    #[test]
    fn test_sorted_chronologically_ties_by_id() {
        let bets = vec![
            settled(3, "2024-01-02", 10.0, BetResult::Win, 20.0),
            settled(2, "2024-01-01", 10.0, BetResult::Loss, 0.0),
            settled(1, "2024-01-02", 10.0, BetResult::Loss, 0.0),
        ];
        let ids: Vec<i64> = sorted_chronologically(&bets).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
