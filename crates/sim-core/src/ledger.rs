//! Ledger and timeline records plus categorized running statistics.

use serde::{Deserialize, Serialize};

/// Statistic category attached to a ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Business,
    Lifestyle,
    Charity,
    Events,
    Interest,
    Debt,
}

/// One immutable state-changing action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Strictly increasing sequence number.
    pub seq: u64,
    /// Simulated day when recorded.
    pub day: u32,
    pub title: String,
    pub wallet_delta: f64,
    pub asset_delta: f64,
    /// Net worth right after the entry was applied.
    pub net_worth: f64,
}

/// Narrative log line used for milestone storytelling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub day: u32,
    pub title: String,
    pub net_worth: f64,
    pub high_net: f64,
}

/// Cumulative totals keyed by ledger tag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Signed weekly business results.
    pub business_net: f64,
    /// Lifestyle spending, including savings drawn by the liquidity guard.
    pub lifestyle_spent: f64,
    pub charity_given: f64,
    /// Signed event results.
    pub events_net: f64,
    pub interest_earned: f64,
    /// Debt interest and repayments.
    pub debt_paid: f64,
    /// Windfall withholding plus property tax.
    pub taxes_paid: f64,
}

impl Stats {
    /// Fold one entry's deltas into the category named by `tag`.
    pub fn accumulate(&mut self, tag: Tag, wallet_delta: f64, asset_delta: f64) {
        match tag {
            Tag::Lifestyle => self.lifestyle_spent += wallet_delta.abs(),
            Tag::Debt => self.debt_paid += wallet_delta.abs(),
            Tag::Business => self.business_net += wallet_delta,
            Tag::Events => self.events_net += wallet_delta,
            Tag::Charity => self.charity_given += wallet_delta.abs(),
            Tag::Interest => self.interest_earned += asset_delta.max(wallet_delta.max(0.0)),
        }
    }
}
