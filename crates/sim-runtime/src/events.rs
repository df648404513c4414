//! Random life events drawn from a fixed pool.

use crate::ledger::RecordOptions;
use crate::observer::Notice;
use crate::session::Session;
use sim_core::{PlayerState, Tag};
use sim_econ::event_probability;
use tracing::debug;

const SECURITY_SCARE: &str = "Security scare";

/// What a single event does to the player.
#[derive(Clone, Debug, PartialEq)]
pub struct EventOutcome {
    pub title: String,
    pub wallet_delta: f64,
    /// Informational; events settle in cash and never revalue assets.
    pub asset_delta: f64,
    pub happiness: f64,
    pub reputation: f64,
    pub tag: Tag,
}

impl EventOutcome {
    fn cash(title: &str, wallet_delta: f64) -> Self {
        Self {
            title: title.to_string(),
            wallet_delta,
            asset_delta: 0.0,
            happiness: 0.0,
            reputation: 0.0,
            tag: Tag::Events,
        }
    }

    fn mood(mut self, happiness: f64, reputation: f64) -> Self {
        self.happiness = happiness;
        self.reputation = reputation;
        self
    }

    fn tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }
}

type Generator = fn(&PlayerState) -> EventOutcome;

fn items_value(state: &PlayerState) -> f64 {
    state.items.iter().map(|i| i.value).sum()
}

fn market_boom(s: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Market boom (collectors pay 2%)", items_value(s) * 0.02).mood(2.0, 0.0)
}

fn market_dip(s: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Market dip (margin call on 2%)", -items_value(s) * 0.02).mood(-2.0, 0.0)
}

fn storm_repair(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Storm repair", -2_500.0).mood(-3.0, 0.0)
}

fn medical_bill(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Medical bill", -1_800.0).mood(-4.0, 0.0)
}

fn airline_voucher(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Airline voucher", 400.0).mood(1.0, 0.0)
}

fn car_repair(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Car repair", -1_200.0).mood(-1.0, 0.0)
}

fn business_surge(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Business surge +$5k", 5_000.0)
        .mood(2.0, 0.0)
        .tag(Tag::Business)
}

fn break_in(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Security scare: break-in attempt", -15_000.0).mood(-8.0, 0.0)
}

fn viral_praise(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Viral praise for your generosity", 0.0).mood(3.0, 5.0)
}

fn tabloid_scandal(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Tabloid scandal", 0.0).mood(-5.0, -4.0)
}

fn long_lost_relative(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Long-lost relative asks for a loan", -3_000.0).mood(-2.0, 0.0)
}

fn charity_gala(_: &PlayerState) -> EventOutcome {
    EventOutcome::cash("Charity gala table", -2_000.0)
        .mood(2.0, 3.0)
        .tag(Tag::Charity)
}

static POOL: [Generator; 12] = [
    market_boom,
    market_dip,
    storm_repair,
    medical_bill,
    airline_voucher,
    car_repair,
    business_surge,
    break_in,
    viral_praise,
    tabloid_scandal,
    long_lost_relative,
    charity_gala,
];

/// Number of distinct events in the pool.
pub fn pool_size() -> usize {
    POOL.len()
}

impl Session {
    /// One independent trial per day when events are enabled.
    pub(crate) fn roll_events(&mut self, days: u32) -> usize {
        if !self.state.show_events {
            return 0;
        }
        let p = event_probability(self.state.event_boost, &self.config.events);
        let mut fired = 0;
        for _ in 0..days {
            if self.rng.chance(p) {
                self.fire_event(false);
                fired += 1;
            }
        }
        fired
    }

    /// Fire one event immediately, skipping the mitigation roll.
    pub fn trigger_event(&mut self) -> EventOutcome {
        self.begin_command();
        let outcome = self.fire_event(true);
        self.finish_command();
        outcome
    }

    fn fire_event(&mut self, forced: bool) -> EventOutcome {
        let generator = POOL[self.rng.pick(POOL.len())];
        let mut outcome = generator(&self.state);
        let cfg = &self.config.events;
        if !forced
            && self.state.lifestyle.security >= cfg.security_threshold
            && outcome.title.starts_with(SECURITY_SCARE)
            && self.rng.chance(0.5)
        {
            debug!(title = %outcome.title, "security staff mitigated event");
            outcome = EventOutcome::cash("Security team stopped a break-in", -cfg.mitigation_cost);
        }
        let opts = RecordOptions {
            tag: Some(outcome.tag),
            happiness: outcome.happiness,
            reputation: outcome.reputation,
            reputation_gain: 0.0,
        };
        self.record(
            format!("Event: {}", outcome.title),
            outcome.wallet_delta,
            outcome.asset_delta,
            opts,
        );
        self.announce(Notice::Event(outcome.title.clone()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Catalog, Lifestyle, ScriptedRandom, SimConfig};

    fn session(draws: Vec<f64>, lifestyle: Lifestyle) -> Session {
        let mut st = PlayerState::with_balances(100_000.0, 0.0);
        st.lifestyle = lifestyle;
        st.show_events = true;
        Session::with_rng(
            st,
            Catalog::default(),
            SimConfig::default(),
            Box::new(ScriptedRandom::new(draws)),
        )
    }

    fn slot(index: usize) -> f64 {
        (index as f64 + 0.5) / POOL.len() as f64
    }

    #[test]
    fn disabled_events_never_roll() {
        let mut s = session(vec![0.0], Lifestyle::default());
        s.state.show_events = false;
        assert_eq!(s.roll_events(30), 0);
        assert!(s.state().ledger.is_empty());
    }

    #[test]
    fn daily_trials_follow_probability() {
        // Trial draw 0.01 fires, the pick lands on the airline voucher.
        let mut s = session(vec![0.01, slot(4)], Lifestyle::default());
        assert_eq!(s.roll_events(3), 3);
        assert_eq!(s.state().wallet, 101_200.0);
        assert_eq!(s.state().stats.events_net, 1_200.0);
        assert_eq!(s.last_notices().len(), 3);
    }

    #[test]
    fn security_spend_can_mitigate_scares() {
        let guarded = Lifestyle {
            security: 10_000.0,
            ..Lifestyle::default()
        };
        // trial, pick break-in, mitigation coin flip
        let mut s = session(vec![0.01, slot(7), 0.1], guarded);
        assert_eq!(s.roll_events(1), 1);
        assert_eq!(s.state().wallet, 99_500.0);
        assert!(s.state().ledger[0].title.contains("Security team"));
    }

    #[test]
    fn forced_events_bypass_mitigation() {
        let guarded = Lifestyle {
            security: 50_000.0,
            ..Lifestyle::default()
        };
        let mut s = session(vec![slot(7), 0.1], guarded);
        let outcome = s.trigger_event();
        assert_eq!(outcome.wallet_delta, -15_000.0);
        assert_eq!(s.state().wallet, 85_000.0);
    }

    #[test]
    fn scandal_never_drops_reputation_below_zero() {
        let mut s = session(vec![slot(9)], Lifestyle::default());
        s.trigger_event();
        assert_eq!(s.state().reputation, 0.0);
    }
}
