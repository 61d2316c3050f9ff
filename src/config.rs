//! Analytics configuration, loaded from an optional TOML file

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::analytics::{DEFAULT_STARTING_BANKROLL, STREAK_HISTORY_LEN, WEEKLY_TREND_MAX_BETS};
use crate::core::bankroll::{BankrollLimits, RiskTolerance};
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Balance the bankroll curve starts from
    pub starting_bankroll: f64,
    /// Trend reports group by week up to this many bets
    pub weekly_trend_max_bets: usize,
    /// Streak segments kept in the history
    pub streak_history_len: usize,
    pub risk_tolerance: RiskTolerance,
    pub limits: BankrollLimits,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            starting_bankroll: DEFAULT_STARTING_BANKROLL,
            weekly_trend_max_bets: WEEKLY_TREND_MAX_BETS,
            streak_history_len: STREAK_HISTORY_LEN,
            risk_tolerance: RiskTolerance::default(),
            limits: BankrollLimits::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, LedgerError> {
        let config: Self =
            toml::from_str(content).map_err(|e| LedgerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Report every problem at once rather than the first one found
    pub fn validate(&self) -> Result<(), LedgerError> {
        let mut issues: Vec<String> = Vec::new();

        if !self.starting_bankroll.is_finite() || self.starting_bankroll < 0.0 {
            issues.push("starting_bankroll must be a number >= 0".into());
        }
        if self.streak_history_len == 0 {
            issues.push("streak_history_len must be > 0".into());
        }

        let limits = [
            ("limits.daily", self.limits.daily),
            ("limits.weekly", self.limits.weekly),
            ("limits.monthly", self.limits.monthly),
            ("limits.max_bet_size", self.limits.max_bet_size),
            ("limits.stop_loss", self.limits.stop_loss),
        ];
        for (name, value) in limits {
            if !value.is_finite() || value < 0.0 {
                issues.push(format!("{name} must be a number >= 0"));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::Config(issues.join("; ")))
        }
    }
}
