//! One-shot milestone and achievement detection.

use crate::observer::Notice;
use crate::session::Session;
use sim_core::{Achievement, GrowthStage, Milestone, PlayerState, SimConfig};
use tracing::info;

const DAYS_1Y: u32 = 365;
const DAYS_5Y: u32 = 5 * 365;
const DAYS_10Y: u32 = 10 * 365;

/// Whether `milestone` currently holds. Net-worth thresholds read the live
/// figure; peak thresholds read the high-water mark.
pub fn milestone_reached(m: Milestone, s: &PlayerState, cfg: &SimConfig) -> bool {
    let survived = s.day.saturating_sub(1);
    match m {
        Milestone::NetWorth10M => s.net_worth >= 10_000_000.0,
        Milestone::NetWorth50M => s.net_worth >= 50_000_000.0,
        Milestone::NetWorth100M => s.net_worth >= 100_000_000.0,
        Milestone::PeakNetWorth250M => s.high_net >= 250_000_000.0,
        Milestone::PeakNetWorth1B => s.high_net >= 1_000_000_000.0,
        Milestone::CharityGiven100K => s.stats.charity_given >= 100_000.0,
        Milestone::CharityGiven1M => s.stats.charity_given >= 1_000_000.0,
        Milestone::WentPublic => s.businesses.iter().any(|b| b.ipo),
        Milestone::Survived1Year => survived >= DAYS_1Y,
        Milestone::Survived5Years => survived >= DAYS_5Y,
        Milestone::Survived10Years => survived >= DAYS_10Y,
        Milestone::DebtFree => s.flags.ever_had_debt && s.loans.is_empty(),
        Milestone::HighRoller => s.high_lifestyle_days >= cfg.high_lifestyle_days,
    }
}

pub fn achievement_earned(a: Achievement, s: &PlayerState) -> bool {
    match a {
        Achievement::FirstCar => !s.cars.is_empty(),
        Achievement::Garage => s.cars.len() >= 5,
        Achievement::FirstHome => !s.houses.is_empty(),
        Achievement::Landlord => s.houses.iter().any(|h| h.rented),
        Achievement::PropertyPortfolio => s.houses.len() >= 3,
        Achievement::Collector => s.items.len() >= 5,
        Achievement::Founder => !s.businesses.is_empty(),
        Achievement::BoardReady => s.businesses.iter().any(|b| b.stage >= GrowthStage::Board),
        Achievement::FullBoard => s.businesses.iter().any(|b| b.board_full()),
        Achievement::WallStreet => s.businesses.iter().any(|b| b.ipo),
        Achievement::Philanthropist => !s.charities.is_empty(),
        Achievement::Respected => s.reputation >= 50.0,
        Achievement::Legend => s.reputation >= 200.0,
        Achievement::Family => s.household.len() >= 3,
        Achievement::Importer => s.flags.used_import,
        Achievement::Messenger => s.flags.used_email,
        Achievement::Ranked => s.flags.submitted_leaderboard,
        Achievement::Comeback => s.flags.played_after_game_over,
    }
}

impl Session {
    pub(crate) fn evaluate_milestones(&mut self) {
        for m in Milestone::ALL {
            if self.state.milestones.contains(&m) || !milestone_reached(m, &self.state, &self.config) {
                continue;
            }
            self.state.milestones.insert(m);
            info!(milestone = ?m, day = self.state.day, "milestone reached");
            let cap = self.config.timeline_cap;
            self.state.push_timeline(format!("Milestone: {}", m.message()), cap);
            self.announce(Notice::Milestone(m));
        }
    }

    pub(crate) fn evaluate_achievements(&mut self) {
        for a in Achievement::ALL {
            if self.state.achievements.contains(&a) || !achievement_earned(a, &self.state) {
                continue;
            }
            self.state.achievements.insert(a);
            info!(achievement = a.title(), "achievement unlocked");
            self.announce(Notice::Achievement(a));
        }
    }
}
