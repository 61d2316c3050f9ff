//! Ledger file loading and saving
//!
//! A ledger file is a JSON array of bet records, as exported by the betting
//! API (`amountRisked`) or dumped straight from the database (`amount_risked`).

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{validate_bet, LedgerError};
use crate::models::Bet;

/// Parse and validate a ledger from a JSON string
pub fn parse_bets(json: &str) -> Result<Vec<Bet>, LedgerError> {
    let bets: Vec<Bet> = serde_json::from_str(json)?;

    for bet in &bets {
        if let Err(e) = validate_bet(bet) {
            warn!(bet_id = bet.id, "rejected ledger record: {}", e);
            return Err(e);
        }
    }

    Ok(bets)
}

/// Load and validate a ledger file
pub fn load_bets<P: AsRef<Path>>(path: P) -> Result<Vec<Bet>, LedgerError> {
    let content = fs::read_to_string(path.as_ref())?;
    let bets = parse_bets(&content)?;
    info!("Loaded {} bets from {:?}", bets.len(), path.as_ref());
    Ok(bets)
}

/// Append a bet to the ledger under the next free id
///
/// The id on `bet` is replaced by `max(id) + 1`. A settled result gets its
/// payout from the settlement rules; an open bet is stored with payout 0.
pub fn add_bet(
    bets: &mut Vec<Bet>,
    mut bet: Bet,
    explicit_payout: Option<f64>,
) -> Result<&Bet, LedgerError> {
    bet.id = bets.iter().map(|b| b.id).max().map_or(1, |id| id + 1);
    bet.payout = 0.0;
    validate_bet(&bet)?;

    let result = bet.result;
    if result.is_settled() {
        bet.settle(result, explicit_payout)?;
    } else if explicit_payout.is_some() {
        warn!(bet_id = bet.id, "ignoring payout on an open bet");
    }

    info!(bet_id = bet.id, result = %bet.result, "added bet");
    let index = bets.len();
    bets.push(bet);
    Ok(&bets[index])
}

/// Write a ledger back to disk as pretty-printed JSON
pub fn save_bets<P: AsRef<Path>>(path: P, bets: &[Bet]) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(bets)?;
    fs::write(path.as_ref(), json)?;
    info!("Saved {} bets to {:?}", bets.len(), path.as_ref());
    Ok(())
}
