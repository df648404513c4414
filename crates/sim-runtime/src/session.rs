//! The owned, injectable simulation session.

use crate::observer::{Notice, Observer};
use crate::portfolio::{self, Breakdown};
use sim_core::{
    Catalog, PayoutKind, PlayerProfile, PlayerState, RandomSource, SeededRandom, SimConfig,
};
use sim_econ::{event_boost, plan_windfall, EconError};
use std::fmt;
use tracing::info;

/// How a new game starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindfallSetup {
    pub name: String,
    pub home_state: String,
    pub goal: String,
    /// Gross prize before withholding.
    pub amount: f64,
    pub payout: PayoutKind,
}

/// One player's simulation: state, catalog, tuning, randomness and observers.
///
/// Every mutation goes through a method on this type, one command at a time.
pub struct Session {
    pub(crate) state: PlayerState,
    pub(crate) config: SimConfig,
    pub(crate) catalog: Catalog,
    pub(crate) rng: Box<dyn RandomSource + Send>,
    pub(crate) observers: Vec<Box<dyn Observer>>,
    pub(crate) notices: Vec<Notice>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("day", &self.state.day)
            .field("net_worth", &self.state.net_worth)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Session over `state` with a generator seeded from `config.rng_seed`.
    pub fn new(state: PlayerState, catalog: Catalog, config: SimConfig) -> Self {
        let rng = Box::new(SeededRandom::new(config.rng_seed));
        Self::with_rng(state, catalog, config, rng)
    }

    /// Session drawing randomness from `rng`.
    pub fn with_rng(
        state: PlayerState,
        catalog: Catalog,
        config: SimConfig,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        let mut session = Self {
            state,
            config,
            catalog,
            rng,
            observers: Vec::new(),
            notices: Vec::new(),
        };
        session.state.event_boost = event_boost(&session.state.lifestyle);
        portfolio::recompute_totals(&mut session.state, session.config.share_price);
        session
    }

    /// Start a new game from a prize, splitting it into taxes, savings and wallet.
    pub fn from_windfall(
        setup: &WindfallSetup,
        catalog: Catalog,
        config: SimConfig,
    ) -> Result<Self, EconError> {
        let plan = plan_windfall(setup.amount, &setup.home_state, setup.payout)?;
        let mut state = PlayerState::with_balances(
            sim_core::money::from_decimal(plan.wallet),
            sim_core::money::from_decimal(plan.savings),
        );
        state.profile = PlayerProfile {
            id: None,
            name: setup.name.trim().to_string(),
            home_state: setup.home_state.trim().to_ascii_uppercase(),
            goal: setup.goal.trim().to_string(),
            starting_amount: setup.amount.max(0.0),
            payout: setup.payout,
        };
        state.stats.taxes_paid = sim_core::money::from_decimal(plan.taxes());
        let mut session = Self::new(state, catalog, config);
        info!(net = %plan.net, taxes = %plan.taxes(), "new game started");
        session.record(
            "Game ready. Buy assets to begin!",
            0.0,
            0.0,
            Default::default(),
        );
        let cap = session.config.timeline_cap;
        session.state.push_timeline("Claimed the prize", cap);
        Ok(session)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the purchasable catalog, e.g. after the provider refreshes.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Swap in a fresh generator seeded with `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Box::new(SeededRandom::new(seed));
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Notices raised by the most recent command.
    pub fn last_notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn breakdown(&self) -> Breakdown {
        portfolio::breakdown(&self.state, self.config.share_price)
    }

    pub fn total_assets(&self) -> f64 {
        portfolio::total_assets(&self.state, self.config.share_price)
    }

    pub fn total_debt(&self) -> f64 {
        portfolio::total_debt(&self.state)
    }

    pub(crate) fn begin_command(&mut self) {
        self.notices.clear();
    }

    /// Run the one-shot detectors, then repaint.
    pub(crate) fn finish_command(&mut self) {
        self.evaluate_milestones();
        self.evaluate_achievements();
        self.check_game_over();
        self.notify_changed();
    }

    pub(crate) fn notify_changed(&mut self) {
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }

    pub(crate) fn announce(&mut self, notice: Notice) {
        for observer in &mut self.observers {
            observer.notice(&notice);
        }
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windfall_start_splits_prize() {
        let setup = WindfallSetup {
            name: " Ada ".into(),
            home_state: "mi".into(),
            goal: "Retire early".into(),
            amount: 1_000_000.0,
            payout: PayoutKind::Lump,
        };
        let s = Session::from_windfall(&setup, Catalog::default(), SimConfig::default()).unwrap();
        let st = s.state();
        assert_eq!(st.wallet, 574_000.0);
        assert_eq!(st.savings, 143_500.0);
        assert_eq!(st.stats.taxes_paid, 282_500.0);
        assert_eq!(st.profile.name, "Ada");
        assert_eq!(st.profile.home_state, "MI");
        assert_eq!(st.net_worth, 717_500.0);
        assert_eq!(st.high_net, 717_500.0);
        assert_eq!(st.ledger.len(), 1);
        assert_eq!(st.timeline.len(), 1);
    }

    #[test]
    fn new_session_derives_totals() {
        let s = Session::new(
            PlayerState::with_balances(250.0, 750.0),
            Catalog::default(),
            SimConfig::default(),
        );
        assert_eq!(s.state().net_worth, 1_000.0);
        assert_eq!(s.state().high_net, 1_000.0);
        assert_eq!(s.total_assets(), 0.0);
    }
}
