//! Bankruptcy detection.

use crate::ledger::RecordOptions;
use crate::observer::Notice;
use crate::portfolio::total_assets;
use crate::session::Session;
use sim_core::{GameOverSummary, PlayerState, SimConfig};
use tracing::info;

/// The terminal predicate, kept exactly as the game defines it even where the
/// clauses overlap.
pub fn is_bankrupt(state: &PlayerState, cfg: &SimConfig) -> bool {
    state.wallet <= 0.0
        && state.savings <= 0.0
        && total_assets(state, cfg.share_price) <= cfg.game_over_asset_floor
        && state.debt >= state.net_worth
        && state.net_worth <= 0.0
}

impl Session {
    /// Fires at most once per session; play continues afterwards.
    pub(crate) fn check_game_over(&mut self) {
        if self.state.flags.game_over_shown || !is_bankrupt(&self.state, &self.config) {
            return;
        }
        let summary = GameOverSummary {
            final_net_worth: self.state.net_worth,
            high_net: self.state.high_net,
            days_survived: self.state.day.saturating_sub(1),
        };
        self.state.flags.game_over_shown = true;
        self.state.game_over = Some(summary.clone());
        info!(day = self.state.day, net = summary.final_net_worth, "bankrupt");
        self.record("Bankruptcy", 0.0, 0.0, RecordOptions::default());
        let cap = self.config.timeline_cap;
        self.state.push_timeline("Went bankrupt", cap);
        self.announce(Notice::GameOver(summary));
    }

    /// Terminal statistics once bankruptcy has been declared.
    pub fn game_over(&self) -> Option<&GameOverSummary> {
        self.state.game_over.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Catalog, EntityId, Loan};

    fn broke_with_debt(principal: f64) -> PlayerState {
        let mut st = PlayerState::with_balances(0.0, 0.0);
        st.loans.push(Loan {
            id: EntityId(1),
            principal,
            rate_annual: 0.12,
            overdraft: true,
        });
        st
    }

    #[test]
    fn broke_and_indebted_is_bankrupt() {
        let s = Session::new(broke_with_debt(1_000.0), Catalog::default(), SimConfig::default());
        assert!(is_bankrupt(s.state(), s.config()));
    }

    #[test]
    fn any_savings_keeps_the_game_alive() {
        let mut st = broke_with_debt(1_000.0);
        st.savings = 1.0;
        let s = Session::new(st, Catalog::default(), SimConfig::default());
        assert!(!is_bankrupt(s.state(), s.config()));
    }

    #[test]
    fn fires_exactly_once() {
        let mut s = Session::new(broke_with_debt(500.0), Catalog::default(), SimConfig::default());
        s.check_game_over();
        s.check_game_over();
        let entries = s
            .state()
            .ledger
            .iter()
            .filter(|e| e.title == "Bankruptcy")
            .count();
        assert_eq!(entries, 1);
        let summary = s.game_over().unwrap();
        assert_eq!(summary.final_net_worth, -500.0);
        assert_eq!(summary.days_survived, 0);
    }
}
