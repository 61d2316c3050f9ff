//! American Odds Conversion
//!
//! American odds are quoted per 100 units:
//!     +150  -> a 100 stake wins 150 (underdog)
//!     -110  -> a 110 stake wins 100 (favorite)
//!
//! Decimal odds are the total return multiplier:
//!     payout = stake * decimal
//!
//! Zero is not a valid American price and is rejected instead of being
//! mapped to even money.

use crate::error::{validate_odds, validate_stake, LedgerError};

/// Convert American odds to decimal odds
///
/// # Examples
/// ```
/// use betledger::core::odds::american_to_decimal;
/// assert_eq!(american_to_decimal(150.0).unwrap(), 2.5);
/// assert!((american_to_decimal(-110.0).unwrap() - 1.909).abs() < 0.001);
/// assert!(american_to_decimal(0.0).is_err());
/// ```
pub fn american_to_decimal(odds: f64) -> Result<f64, LedgerError> {
    validate_odds(odds)?;

    if odds > 0.0 {
        Ok(odds / 100.0 + 1.0)
    } else {
        Ok(100.0 / odds.abs() + 1.0)
    }
}

/// Convert decimal odds back to American odds
///
/// Decimal odds of 2.0 and above map to positive prices, anything between
/// 1.0 and 2.0 to negative prices.
pub fn decimal_to_american(decimal: f64) -> Result<f64, LedgerError> {
    if !(decimal > 1.0 && decimal.is_finite()) {
        return Err(LedgerError::InvalidDecimalOdds(decimal));
    }

    if decimal >= 2.0 {
        Ok((decimal - 1.0) * 100.0)
    } else {
        Ok(-100.0 / (decimal - 1.0))
    }
}

/// Total amount returned (stake + profit) when a bet at `odds` wins
///
/// # Examples
/// ```
/// use betledger::core::odds::payout_from_odds;
/// assert_eq!(payout_from_odds(100.0, 150.0).unwrap(), 250.0);
/// assert_eq!(payout_from_odds(110.0, -110.0).unwrap(), 210.0);
/// ```
pub fn payout_from_odds(amount_risked: f64, odds: f64) -> Result<f64, LedgerError> {
    validate_stake(amount_risked)?;
    validate_odds(odds)?;

    if odds > 0.0 {
        Ok(amount_risked + amount_risked * odds / 100.0)
    } else {
        Ok(amount_risked + amount_risked * 100.0 / odds.abs())
    }
}

/// Break-even win probability implied by a price (no vig removal)
pub fn implied_probability(odds: f64) -> Result<f64, LedgerError> {
    Ok(1.0 / american_to_decimal(odds)?)
}
