//! Time advancement: the fixed-order batch that moves the calendar forward.

use crate::ledger::RecordOptions;
use crate::observer::Notice;
use crate::session::Session;
use sim_core::{coerce_days, Tag};
use sim_econ::{lifestyle_happiness, loan_interest, prorate_monthly, savings_interest};
use tracing::debug;

/// Summary of one `advance_time` batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvanceReport {
    /// Days actually advanced after coercion.
    pub days: u32,
    pub day: u32,
    pub net_worth: f64,
    pub high_net: f64,
    /// Ledger entries appended during the batch.
    pub entries: usize,
    pub events: usize,
    pub notices: Vec<Notice>,
}

impl Session {
    /// Advance the simulation by `days`, rounded and coerced to at least one.
    pub fn advance_time(&mut self, days: f64) -> AdvanceReport {
        self.begin_command();
        let d = coerce_days(days, self.config.max_advance_days);
        let seq_before = self.state.next_seq;
        if self.state.flags.game_over_shown {
            self.state.flags.played_after_game_over = true;
        }

        self.state.day = self.state.day.saturating_add(d);
        self.apply_lifestyle(d);
        self.drift_assets(d);
        self.accrue_savings(d);
        self.accrue_debt_interest(d);
        for _ in 0..d / 7 {
            self.business_week();
        }
        for _ in 0..d / 30 {
            self.charity_month();
        }
        let events = self.roll_events(d);
        self.finish_command();

        debug!(days = d, day = self.state.day, net = self.state.net_worth, "advanced");
        AdvanceReport {
            days: d,
            day: self.state.day,
            net_worth: self.state.net_worth,
            high_net: self.state.high_net,
            entries: usize::try_from(self.state.next_seq - seq_before).unwrap_or(usize::MAX),
            events,
            notices: self.notices.clone(),
        }
    }

    fn apply_lifestyle(&mut self, days: u32) {
        let monthly = self.state.lifestyle.total();
        let support = self.state.household_support();
        if monthly >= self.config.high_lifestyle_monthly {
            self.state.high_lifestyle_days = self.state.high_lifestyle_days.saturating_add(days);
        } else {
            self.state.high_lifestyle_days = 0;
        }
        let spend = prorate_monthly(monthly + support, days);
        let mood = lifestyle_happiness(monthly, self.state.debt, days);
        if spend == 0.0 && mood == 0.0 {
            return;
        }
        self.record(
            format!("Lifestyle & household ({days}d)"),
            -spend,
            0.0,
            RecordOptions::tagged(Tag::Lifestyle).happiness(mood),
        );
    }

    fn accrue_savings(&mut self, days: u32) {
        let interest = savings_interest(self.state.savings, self.state.apy, days);
        if interest == 0.0 || !interest.is_finite() {
            return;
        }
        self.state.savings = (self.state.savings + interest).max(0.0);
        self.record(
            format!("Savings interest ({days}d)"),
            0.0,
            interest,
            RecordOptions::tagged(Tag::Interest),
        );
    }

    fn accrue_debt_interest(&mut self, days: u32) {
        let interest: f64 = self
            .state
            .loans
            .iter()
            .map(|l| loan_interest(l.principal, l.rate_annual, days))
            .sum();
        if interest <= 0.0 {
            return;
        }
        self.record(
            format!("Debt interest ({days}d)"),
            -interest,
            0.0,
            RecordOptions::tagged(Tag::Debt),
        );
    }

    fn charity_month(&mut self) {
        if self.state.charities.is_empty() {
            return;
        }
        let drain: f64 = self.state.charities.iter().map(|c| c.monthly_drain).sum();
        let gain = self.config.charity_rep_per_month * self.state.charities.len() as f64;
        self.record(
            "Charities: monthly program spend",
            -drain,
            0.0,
            RecordOptions::tagged(Tag::Charity).reputation_gain(gain),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{
        Catalog, Charity, EntityId, FamilyMember, Lifestyle, Loan, PlayerState, ScriptedRandom,
        SimConfig,
    };

    fn session(state: PlayerState) -> Session {
        Session::with_rng(
            state,
            Catalog::default(),
            SimConfig::default(),
            Box::new(ScriptedRandom::constant(0.99)),
        )
    }

    #[test]
    fn non_positive_days_advance_one() {
        let mut s = session(PlayerState::with_balances(10.0, 0.0));
        assert_eq!(s.advance_time(0.0).days, 1);
        assert_eq!(s.advance_time(-7.0).days, 1);
        assert_eq!(s.advance_time(f64::NAN).days, 1);
        assert_eq!(s.state().day, 4);
        assert_eq!(s.advance_time(2.6).day, 7);
    }

    #[test]
    fn huge_advances_clamp_to_config_limit() {
        let mut s = Session::with_rng(
            PlayerState::with_balances(10.0, 0.0),
            Catalog::default(),
            SimConfig {
                max_advance_days: 60,
                ..SimConfig::default()
            },
            Box::new(ScriptedRandom::constant(0.99)),
        );
        let report = s.advance_time(1.0e12);
        assert_eq!(report.days, 60);
        assert_eq!(report.day, 61);
    }

    #[test]
    fn lifestyle_and_household_are_prorated() {
        let mut st = PlayerState::with_balances(100_000.0, 0.0);
        st.lifestyle = Lifestyle {
            burn: 2_000.0,
            security: 500.0,
            travel: 300.0,
            staff: 200.0,
        };
        st.household.push(FamilyMember {
            name: "Sam".into(),
            monthly_support: 1_000.0,
        });
        let mut s = session(st);
        s.advance_time(15.0);
        assert!((s.state().wallet - 98_000.0).abs() < 1e-6);
        assert!((s.state().stats.lifestyle_spent - 2_000.0).abs() < 1e-6);
        // 3000/10000 * 15/30
        assert!((s.state().happiness - 50.15).abs() < 1e-9);
    }

    #[test]
    fn savings_interest_is_simple_daily() {
        let mut st = PlayerState::with_balances(0.0, 36_500.0);
        st.apy = 10.0;
        let mut s = session(st);
        s.advance_time(10.0);
        assert!((s.state().savings - 36_600.0).abs() < 1e-6);
        assert!((s.state().stats.interest_earned - 100.0).abs() < 1e-6);
    }

    #[test]
    fn debt_interest_draws_savings_without_compounding() {
        let mut st = PlayerState::with_balances(0.0, 1_000.0);
        st.apy = 0.0;
        st.loans.push(Loan {
            id: EntityId(1),
            principal: 12_000.0,
            rate_annual: 0.12,
            overdraft: false,
        });
        let mut s = session(st);
        s.advance_time(30.0);
        let st = s.state();
        assert!((st.savings - 880.0).abs() < 1e-6);
        assert_eq!(st.debt, 12_000.0);
        assert!((st.stats.debt_paid - 120.0).abs() < 1e-6);
    }

    #[test]
    fn charities_drain_monthly_and_build_reputation() {
        let mut st = PlayerState::with_balances(10_000.0, 0.0);
        st.charities.push(Charity {
            id: EntityId(1),
            name: "Food bank".into(),
            monthly_drain: 1_000.0,
            reputation: 5.0,
        });
        let mut s = session(st);
        s.advance_time(29.0);
        assert_eq!(s.state().wallet, 10_000.0);
        s.advance_time(60.0);
        assert_eq!(s.state().wallet, 8_000.0);
        assert_eq!(s.state().reputation, 1.0);
        assert_eq!(s.state().stats.charity_given, 2_000.0);
    }

    #[test]
    fn playing_on_after_bankruptcy_is_tracked() {
        let mut st = PlayerState::with_balances(0.0, 0.0);
        st.flags.game_over_shown = true;
        let mut s = session(st);
        s.advance_time(1.0);
        assert!(s.state().flags.played_after_game_over);
    }
}
