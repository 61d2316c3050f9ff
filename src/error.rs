use thiserror::Error;

use crate::models::Bet;

/// Ledger error types
#[derive(Debug, Error)]
pub enum LedgerError {
    /// American odds of zero (or NaN/inf) have no defined payout
    #[error("Invalid American odds: {0} (must be non-zero)")]
    InvalidOdds(f64),

    #[error("Invalid decimal odds: {0} (must be greater than 1)")]
    InvalidDecimalOdds(f64),

    #[error("Invalid stake: {0} (must be positive)")]
    InvalidStake(f64),

    #[error("Invalid payout: {0} (must be a number >= 0)")]
    InvalidPayout(f64),

    #[error("Invalid bet result: {0:?}")]
    InvalidResult(String),

    #[error("A bet can only be settled to win, loss or push")]
    NotSettleable,

    #[error("Bet not found: {0}")]
    BetNotFound(i64),

    #[error("Invalid bet {id}: {reason}")]
    Validation { id: i64, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation functions
pub fn validate_odds(odds: f64) -> Result<(), LedgerError> {
    if odds == 0.0 || !odds.is_finite() {
        return Err(LedgerError::InvalidOdds(odds));
    }
    Ok(())
}

pub fn validate_stake(amount_risked: f64) -> Result<(), LedgerError> {
    if !(amount_risked > 0.0 && amount_risked.is_finite()) {
        return Err(LedgerError::InvalidStake(amount_risked));
    }
    Ok(())
}

pub fn validate_payout(payout: f64) -> Result<(), LedgerError> {
    if !(payout >= 0.0 && payout.is_finite()) {
        return Err(LedgerError::InvalidPayout(payout));
    }
    Ok(())
}

/// Check a bet record at the input boundary, before any aggregation sees it
pub fn validate_bet(bet: &Bet) -> Result<(), LedgerError> {
    validate_stake(bet.amount_risked)
        .and_then(|_| validate_odds(bet.odds))
        .and_then(|_| validate_payout(bet.payout))
        .map_err(|e| LedgerError::Validation {
            id: bet.id,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bet(amount_risked: f64, odds: f64) -> Bet {
        Bet::new(
            42,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount_risked,
            odds,
        )
    }

    #[test]
    fn test_validate_odds_valid() {
        assert!(validate_odds(150.0).is_ok());
        assert!(validate_odds(-110.0).is_ok());
        assert!(validate_odds(100.0).is_ok());
    }

    #[test]
    fn test_validate_odds_invalid() {
        assert!(validate_odds(0.0).is_err());
        assert!(validate_odds(f64::NAN).is_err());
        assert!(validate_odds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_stake() {
        assert!(validate_stake(0.01).is_ok());
        assert!(validate_stake(0.0).is_err());
        assert!(validate_stake(-5.0).is_err());
        assert!(validate_stake(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_payout() {
        assert!(validate_payout(0.0).is_ok());
        assert!(validate_payout(12.5).is_ok());
        assert!(matches!(
            validate_payout(-10.0),
            Err(LedgerError::InvalidPayout(_))
        ));
        assert!(validate_payout(f64::NAN).is_err());
        assert!(validate_payout(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_bet() {
        assert!(validate_bet(&bet(100.0, -110.0)).is_ok());

        match validate_bet(&bet(100.0, 0.0)) {
            Err(LedgerError::Validation { id, reason }) => {
                assert_eq!(id, 42);
                assert!(reason.contains("odds"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(validate_bet(&bet(-1.0, 150.0)).is_err());

        let mut negative_payout = bet(10.0, 150.0);
        negative_payout.payout = -3.0;
        assert!(validate_bet(&negative_payout).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InvalidOdds(0.0);
        assert!(err.to_string().contains("Invalid American odds"));

        let err = LedgerError::BetNotFound(7);
        assert_eq!(err.to_string(), "Bet not found: 7");
    }
}
