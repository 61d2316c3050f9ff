//! Bet settlement
//!
//! Payout precedence when a bet moves to a result:
//!     1. explicit payout from the user, taken verbatim (must be >= 0)
//!     2. win  -> stake at the stored odds
//!     3. loss -> 0
//!     4. push -> stake returned

use tracing::debug;

use super::odds::payout_from_odds;
use crate::error::{validate_payout, validate_stake, LedgerError};
use crate::models::{Bet, BetResult};

/// Payout for a bet settled to `result`
pub fn settlement_payout(
    amount_risked: f64,
    odds: f64,
    result: BetResult,
    explicit_payout: Option<f64>,
) -> Result<f64, LedgerError> {
    if result == BetResult::Pending {
        return Err(LedgerError::NotSettleable);
    }

    // User override: may even be below the stake (e.g. a partial cash-out)
    if let Some(payout) = explicit_payout {
        validate_payout(payout)?;
        return Ok(payout);
    }

    match result {
        BetResult::Win => payout_from_odds(amount_risked, odds),
        BetResult::Loss => Ok(0.0),
        BetResult::Push => Ok(amount_risked),
        BetResult::Pending => Err(LedgerError::NotSettleable),
    }
}

impl Bet {
    /// Settle the bet to a terminal result
    ///
    /// Leaves the bet untouched on error. Settling again with the same
    /// arguments produces the same record.
    pub fn settle(
        &mut self,
        result: BetResult,
        explicit_payout: Option<f64>,
    ) -> Result<(), LedgerError> {
        validate_stake(self.amount_risked)?;
        let payout = settlement_payout(self.amount_risked, self.odds, result, explicit_payout)?;

        debug!(
            bet_id = self.id,
            %result,
            payout,
            overridden = explicit_payout.is_some(),
            "settled bet"
        );

        self.result = result;
        self.payout = payout;
        Ok(())
    }
}

/// Settle the bet with `id` inside a ledger
pub fn settle_in_ledger(
    bets: &mut [Bet],
    id: i64,
    result: BetResult,
    explicit_payout: Option<f64>,
) -> Result<&Bet, LedgerError> {
    let bet = bets
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or(LedgerError::BetNotFound(id))?;
    bet.settle(result, explicit_payout)?;
    Ok(bet)
}
