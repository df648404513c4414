//! The singleton Player State owned by a session.

use crate::assets::{Car, EntityId, House, Item};
use crate::business::Business;
use crate::finance::{Charity, Loan};
use crate::ledger::{LedgerEntry, Stats, TimelineEntry};
use crate::money::sanitize_amount;
use crate::progress::{Achievement, Milestone};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// How the prize was paid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutKind {
    #[default]
    Lump,
    Annuity,
}

/// Who is playing. The id is assigned by the leaderboard on first submission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub id: Option<String>,
    pub name: String,
    /// Two-letter state code used for withholding.
    pub home_state: String,
    pub goal: String,
    /// Gross prize before taxes.
    pub starting_amount: f64,
    pub payout: PayoutKind,
}

/// Independent monthly spending sliders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifestyle {
    pub burn: f64,
    pub security: f64,
    pub travel: f64,
    pub staff: f64,
}

impl Lifestyle {
    pub fn total(&self) -> f64 {
        self.burn + self.security + self.travel + self.staff
    }

    /// Coerce every slider to a finite non-negative amount.
    pub fn sanitized(self) -> Self {
        Self {
            burn: sanitize_amount(self.burn),
            security: sanitize_amount(self.security),
            travel: sanitize_amount(self.travel),
            staff: sanitize_amount(self.staff),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,
    #[serde(default)]
    pub monthly_support: f64,
}

/// Permanent session flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    pub ever_had_debt: bool,
    pub used_import: bool,
    pub used_email: bool,
    pub submitted_leaderboard: bool,
    pub game_over_shown: bool,
    pub played_after_game_over: bool,
}

/// Terminal statistics captured at bankruptcy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub final_net_worth: f64,
    pub high_net: f64,
    pub days_survived: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub profile: PlayerProfile,
    /// Non-negative after every public operation.
    pub wallet: f64,
    pub savings: f64,
    /// Cached sum of loan principals.
    pub debt: f64,
    pub net_worth: f64,
    /// Running maximum of net worth.
    pub high_net: f64,
    /// Clamped to `[0, 100]`.
    pub happiness: f64,
    /// Floored at zero.
    pub reputation: f64,
    /// Simulated day, starting at 1.
    pub day: u32,
    pub start_date: NaiveDate,
    /// Savings APY in percent.
    pub apy: f64,
    /// Inflation in percent.
    pub inflation: f64,
    /// Sentiment scalar derived from lifestyle spend.
    pub event_boost: f64,
    pub lifestyle: Lifestyle,
    pub show_events: bool,
    pub cars: Vec<Car>,
    pub houses: Vec<House>,
    pub items: Vec<Item>,
    pub businesses: Vec<Business>,
    pub charities: Vec<Charity>,
    pub loans: Vec<Loan>,
    pub household: Vec<FamilyMember>,
    pub ledger: VecDeque<LedgerEntry>,
    pub next_seq: u64,
    pub timeline: VecDeque<TimelineEntry>,
    pub net_samples: VecDeque<f64>,
    pub stats: Stats,
    pub milestones: BTreeSet<Milestone>,
    pub achievements: BTreeSet<Achievement>,
    pub flags: Flags,
    pub game_over: Option<GameOverSummary>,
    /// Consecutive simulated days at or above the high-lifestyle threshold.
    pub high_lifestyle_days: u32,
    pub next_id: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            profile: PlayerProfile::default(),
            wallet: 0.0,
            savings: 0.0,
            debt: 0.0,
            net_worth: 0.0,
            high_net: 0.0,
            happiness: 50.0,
            reputation: 0.0,
            day: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            apy: 4.5,
            inflation: 2.5,
            event_boost: 0.0,
            lifestyle: Lifestyle::default(),
            show_events: false,
            cars: Vec::new(),
            houses: Vec::new(),
            items: Vec::new(),
            businesses: Vec::new(),
            charities: Vec::new(),
            loans: Vec::new(),
            household: Vec::new(),
            ledger: VecDeque::new(),
            next_seq: 0,
            timeline: VecDeque::new(),
            net_samples: VecDeque::new(),
            stats: Stats::default(),
            milestones: BTreeSet::new(),
            achievements: BTreeSet::new(),
            flags: Flags::default(),
            game_over: None,
            high_lifestyle_days: 0,
            next_id: 1,
        }
    }
}

impl PlayerState {
    /// Fresh state holding the given balances.
    pub fn with_balances(wallet: f64, savings: f64) -> Self {
        Self {
            wallet: sanitize_amount(wallet),
            savings: sanitize_amount(savings),
            ..Self::default()
        }
    }

    /// Hand out the next unique entity id.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Calendar date of the current simulated day.
    pub fn current_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.day.saturating_sub(1))))
            .unwrap_or(self.start_date)
    }

    /// Monthly support owed to the household.
    pub fn household_support(&self) -> f64 {
        self.household.iter().map(|m| m.monthly_support).sum()
    }

    /// Append a narrative line, evicting the oldest beyond `cap`.
    pub fn push_timeline(&mut self, title: impl Into<String>, cap: usize) {
        self.timeline.push_back(TimelineEntry {
            day: self.day,
            title: title.into(),
            net_worth: self.net_worth,
            high_net: self.high_net,
        });
        while self.timeline.len() > cap {
            self.timeline.pop_front();
        }
    }

    /// Copy with ledger/timeline trimmed to the most recent `tail` entries.
    pub fn with_tails(&self, tail: usize) -> Self {
        let mut out = self.clone();
        while out.ledger.len() > tail {
            out.ledger.pop_front();
        }
        while out.timeline.len() > tail {
            out.timeline.pop_front();
        }
        out
    }
}
