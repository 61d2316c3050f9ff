//! Ledger persistence

pub mod ledger;

pub use ledger::{add_bet, load_bets, parse_bets, save_bets};
