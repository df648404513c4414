//! Tunable constants for a simulation session.

use serde::{Deserialize, Serialize};

/// Inclusive band for a randomized market multiplier applied on sale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleBand {
    pub min: f64,
    pub max: f64,
}

impl SaleBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Market multipliers per sellable asset class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleConfig {
    pub car: SaleBand,
    pub house: SaleBand,
    pub item: SaleBand,
}

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            car: SaleBand::new(0.95, 1.05),
            house: SaleBand::new(0.90, 1.10),
            item: SaleBand::new(0.85, 1.15),
        }
    }
}

/// Thresholds and rates that drive business growth stages and boards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Headcount that makes a business board-ready.
    pub employees_threshold: u32,
    /// Weekly revenue that makes a business board-ready.
    pub revenue_threshold: f64,
    /// Seats allocated when the Board stage is reached.
    pub initial_seats: u32,
    /// Headcount that expands the board.
    pub expansion_employees: u32,
    /// Weekly revenue that expands the board.
    pub expansion_revenue: f64,
    /// Seat count after expansion.
    pub expanded_seats: u32,
    /// Weekly recruiting overhead per empty seat.
    pub vacancy_overhead_weekly: f64,
    /// Baseline weekly organic revenue growth.
    pub organic_growth_weekly: f64,
    /// Extra weekly growth per filled seat.
    pub growth_per_director: f64,
    /// Revenue multiplier bump per hire.
    pub hire_revenue_bump: f64,
    /// Revenue multiplier cut per fire.
    pub fire_revenue_cut: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            employees_threshold: 25,
            revenue_threshold: 200_000.0,
            initial_seats: 3,
            expansion_employees: 60,
            expansion_revenue: 500_000.0,
            expanded_seats: 5,
            vacancy_overhead_weekly: 250.0,
            organic_growth_weekly: 0.002,
            growth_per_director: 0.0005,
            hire_revenue_bump: 0.015,
            fire_revenue_cut: 0.015,
        }
    }
}

/// Random event frequency and mitigation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub base_probability: f64,
    pub boost_weight: f64,
    pub min_probability: f64,
    pub max_probability: f64,
    /// Monthly security spend at which scares may be mitigated.
    pub security_threshold: f64,
    /// Wallet cost charged instead of a mitigated scare.
    pub mitigation_cost: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            base_probability: 0.08,
            boost_weight: 0.1,
            min_probability: 0.02,
            max_probability: 0.35,
            security_threshold: 10_000.0,
            mitigation_cost: 500.0,
        }
    }
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the default deterministic RNG.
    pub rng_seed: u64,
    /// Maximum ledger entries retained (oldest evicted first).
    pub ledger_cap: usize,
    /// Maximum timeline entries retained.
    pub timeline_cap: usize,
    /// Rolling window of net-worth samples kept for trend display.
    pub net_sample_window: usize,
    /// Ledger/timeline tail length written into snapshots.
    pub snapshot_tail: usize,
    /// Annual rate for loans opened by the liquidity guard.
    pub default_loan_rate: f64,
    /// Loans below this principal are considered repaid.
    pub loan_epsilon: f64,
    /// Fixed nominal price of one share of a public business.
    pub share_price: f64,
    /// Minimum weekly revenue to go public.
    pub ipo_revenue_threshold: f64,
    /// Weekly revenue backing each issued share.
    pub ipo_revenue_per_share: f64,
    /// Annual dividend yield set at IPO.
    pub dividend_yield: f64,
    /// Reputation gained per charity per simulated month.
    pub charity_rep_per_month: f64,
    /// Monthly lifestyle total that counts as high spending.
    pub high_lifestyle_monthly: f64,
    /// Consecutive days of high spending needed for the milestone.
    pub high_lifestyle_days: u32,
    /// Total assets at or below this count as nothing left.
    pub game_over_asset_floor: f64,
    /// Longest single advance; larger requests are clamped to it.
    pub max_advance_days: u32,
    pub board: BoardConfig,
    pub sale: SaleConfig,
    pub events: EventConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            ledger_cap: 200,
            timeline_cap: 100,
            net_sample_window: 30,
            snapshot_tail: 50,
            default_loan_rate: 0.12,
            loan_epsilon: 0.01,
            share_price: 10.0,
            ipo_revenue_threshold: 200_000.0,
            ipo_revenue_per_share: 80.0,
            dividend_yield: 0.02,
            charity_rep_per_month: 0.5,
            high_lifestyle_monthly: 50_000.0,
            high_lifestyle_days: 90,
            game_over_asset_floor: 1.0,
            max_advance_days: 36_500,
            board: BoardConfig::default(),
            sale: SaleConfig::default(),
            events: EventConfig::default(),
        }
    }
}
