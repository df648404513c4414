//! The single logging path for every wallet- or asset-affecting action.

use crate::liquidity;
use crate::portfolio::recompute_totals;
use crate::session::Session;
use sim_core::{LedgerEntry, Tag};
use tracing::debug;

/// Optional side effects of a ledger entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordOptions {
    pub tag: Option<Tag>,
    pub happiness: f64,
    pub reputation: f64,
    /// Extra reputation granted with charity spending.
    pub reputation_gain: f64,
}

impl RecordOptions {
    pub fn tagged(tag: Tag) -> Self {
        Self {
            tag: Some(tag),
            ..Self::default()
        }
    }

    pub fn happiness(mut self, delta: f64) -> Self {
        self.happiness = delta;
        self
    }

    pub fn reputation(mut self, delta: f64) -> Self {
        self.reputation = delta;
        self
    }

    pub fn reputation_gain(mut self, gain: f64) -> Self {
        self.reputation_gain = gain;
        self
    }
}

impl Session {
    /// Append a ledger entry, apply `wallet_delta`, enforce liquidity and
    /// re-derive totals. Returns the resulting net worth.
    ///
    /// `asset_delta` is informational: asset values are already updated by
    /// the caller before recording.
    pub(crate) fn record(
        &mut self,
        title: impl Into<String>,
        wallet_delta: f64,
        asset_delta: f64,
        opts: RecordOptions,
    ) -> f64 {
        let title = title.into();
        let state = &mut self.state;
        let cfg = &self.config;

        state.wallet += wallet_delta;
        let coverage = liquidity::enforce(state, cfg);
        let net = recompute_totals(state, cfg.share_price);

        state.net_samples.push_back(net);
        while state.net_samples.len() > cfg.net_sample_window {
            state.net_samples.pop_front();
        }

        state.happiness = (state.happiness + opts.happiness).clamp(0.0, 100.0);
        state.reputation = (state.reputation + opts.reputation).max(0.0);
        if let Some(tag) = opts.tag {
            // The guard already booked savings it drew as lifestyle spending.
            let booked = match tag {
                Tag::Lifestyle => (wallet_delta + coverage.from_savings).min(0.0),
                _ => wallet_delta,
            };
            state.stats.accumulate(tag, booked, asset_delta);
            if tag == Tag::Charity && opts.reputation_gain > 0.0 {
                state.reputation += opts.reputation_gain;
            }
        }

        state.next_seq += 1;
        debug!(seq = state.next_seq, day = state.day, %title, wallet_delta, asset_delta, net, "ledger");
        state.ledger.push_back(LedgerEntry {
            seq: state.next_seq,
            day: state.day,
            title,
            wallet_delta,
            asset_delta,
            net_worth: net,
        });
        while state.ledger.len() > cfg.ledger_cap {
            state.ledger.pop_front();
        }

        self.notify_changed();
        net
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Catalog, PlayerState, SimConfig};

    fn session(wallet: f64, savings: f64) -> Session {
        Session::new(
            PlayerState::with_balances(wallet, savings),
            Catalog::default(),
            SimConfig {
                ledger_cap: 3,
                net_sample_window: 2,
                ..SimConfig::default()
            },
        )
    }

    #[test]
    fn entries_are_sequenced_and_capped() {
        let mut s = session(100.0, 0.0);
        for i in 0..5 {
            s.record(format!("e{i}"), 1.0, 0.0, RecordOptions::default());
        }
        let seqs: Vec<u64> = s.state().ledger.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, [3, 4, 5]);
        assert_eq!(s.state().ledger.back().unwrap().net_worth, 105.0);
        assert_eq!(s.state().net_samples.len(), 2);
    }

    #[test]
    fn overspending_draws_savings_then_debt() {
        let mut s = session(100.0, 50.0);
        let net = s.record("splurge", -400.0, 0.0, RecordOptions::tagged(Tag::Lifestyle));
        let st = s.state();
        assert_eq!(st.wallet, 0.0);
        assert_eq!(st.savings, 0.0);
        assert_eq!(st.debt, 250.0);
        assert_eq!(net, -250.0);
        assert_eq!(st.stats.lifestyle_spent, 400.0);
    }

    #[test]
    fn lifestyle_paid_from_savings_is_counted_once() {
        let mut s = session(0.0, 10_000.0);
        s.record("burn", -3_000.0, 0.0, RecordOptions::tagged(Tag::Lifestyle));
        assert_eq!(s.state().savings, 7_000.0);
        assert_eq!(s.state().stats.lifestyle_spent, 3_000.0);
    }

    #[test]
    fn guard_draws_from_untagged_spending_still_count() {
        let mut s = session(0.0, 500.0);
        s.record("impulse buy", -200.0, 0.0, RecordOptions::default());
        assert_eq!(s.state().stats.lifestyle_spent, 200.0);
    }

    #[test]
    fn happiness_and_reputation_are_clamped() {
        let mut s = session(0.0, 0.0);
        s.record("joy", 0.0, 0.0, RecordOptions::default().happiness(500.0));
        assert_eq!(s.state().happiness, 100.0);
        s.record("shame", 0.0, 0.0, RecordOptions::default().reputation(-10.0));
        assert_eq!(s.state().reputation, 0.0);
    }

    #[test]
    fn charity_gain_applies_only_with_charity_tag() {
        let mut s = session(1_000.0, 0.0);
        s.record(
            "gift",
            -100.0,
            0.0,
            RecordOptions::tagged(Tag::Charity).reputation_gain(2.0),
        );
        s.record("other", 0.0, 0.0, RecordOptions::default().reputation_gain(5.0));
        assert_eq!(s.state().reputation, 2.0);
        assert_eq!(s.state().stats.charity_given, 100.0);
    }
}
