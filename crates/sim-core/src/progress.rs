//! Fixed catalogs of one-shot milestones and achievements.

use serde::{Deserialize, Serialize};

/// Story milestones, each logged to the timeline exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Milestone {
    NetWorth10M,
    NetWorth50M,
    NetWorth100M,
    PeakNetWorth250M,
    PeakNetWorth1B,
    CharityGiven100K,
    CharityGiven1M,
    WentPublic,
    Survived1Year,
    Survived5Years,
    Survived10Years,
    DebtFree,
    HighRoller,
}

impl Milestone {
    pub const ALL: [Milestone; 13] = [
        Milestone::NetWorth10M,
        Milestone::NetWorth50M,
        Milestone::NetWorth100M,
        Milestone::PeakNetWorth250M,
        Milestone::PeakNetWorth1B,
        Milestone::CharityGiven100K,
        Milestone::CharityGiven1M,
        Milestone::WentPublic,
        Milestone::Survived1Year,
        Milestone::Survived5Years,
        Milestone::Survived10Years,
        Milestone::DebtFree,
        Milestone::HighRoller,
    ];

    pub fn message(self) -> &'static str {
        match self {
            Milestone::NetWorth10M => "Net worth passed $10M",
            Milestone::NetWorth50M => "Net worth passed $50M",
            Milestone::NetWorth100M => "Net worth passed $100M",
            Milestone::PeakNetWorth250M => "Peak net worth reached $250M",
            Milestone::PeakNetWorth1B => "Peak net worth reached $1B",
            Milestone::CharityGiven100K => "Gave $100K to charity",
            Milestone::CharityGiven1M => "Gave $1M to charity",
            Milestone::WentPublic => "Took a company public",
            Milestone::Survived1Year => "Survived one year",
            Milestone::Survived5Years => "Survived five years",
            Milestone::Survived10Years => "Survived ten years",
            Milestone::DebtFree => "Paid off every debt",
            Milestone::HighRoller => "Lived large for a whole season",
        }
    }
}

/// Broader badge catalog, re-evaluated after every action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstCar,
    Garage,
    FirstHome,
    Landlord,
    PropertyPortfolio,
    Collector,
    Founder,
    BoardReady,
    FullBoard,
    WallStreet,
    Philanthropist,
    Respected,
    Legend,
    Family,
    Importer,
    Messenger,
    Ranked,
    Comeback,
}

impl Achievement {
    pub const ALL: [Achievement; 18] = [
        Achievement::FirstCar,
        Achievement::Garage,
        Achievement::FirstHome,
        Achievement::Landlord,
        Achievement::PropertyPortfolio,
        Achievement::Collector,
        Achievement::Founder,
        Achievement::BoardReady,
        Achievement::FullBoard,
        Achievement::WallStreet,
        Achievement::Philanthropist,
        Achievement::Respected,
        Achievement::Legend,
        Achievement::Family,
        Achievement::Importer,
        Achievement::Messenger,
        Achievement::Ranked,
        Achievement::Comeback,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstCar => "First Wheels",
            Achievement::Garage => "Five-Car Garage",
            Achievement::FirstHome => "Homeowner",
            Achievement::Landlord => "Landlord",
            Achievement::PropertyPortfolio => "Property Portfolio",
            Achievement::Collector => "Collector",
            Achievement::Founder => "Founder",
            Achievement::BoardReady => "Board Ready",
            Achievement::FullBoard => "Full Board",
            Achievement::WallStreet => "Wall Street",
            Achievement::Philanthropist => "Philanthropist",
            Achievement::Respected => "Respected",
            Achievement::Legend => "Legend",
            Achievement::Family => "Full House",
            Achievement::Importer => "Time Traveler",
            Achievement::Messenger => "Messenger",
            Achievement::Ranked => "On the Board",
            Achievement::Comeback => "Comeback",
        }
    }
}
