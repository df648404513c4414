//! Operating businesses, their growth stages, and boards.

use crate::assets::EntityId;
use crate::catalog::BusinessDef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal maturity stage. Only ever moves forward.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GrowthStage {
    #[default]
    Growth,
    Board,
    Public,
}

impl GrowthStage {
    /// Map a catalog growth level onto a stage; level 3 and above is board-ready.
    pub fn from_level(level: u8) -> Self {
        if level >= 3 {
            GrowthStage::Board
        } else {
            GrowthStage::Growth
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GrowthStage::Growth => "Growth",
            GrowthStage::Board => "Board",
            GrowthStage::Public => "IPO",
        };
        f.write_str(s)
    }
}

/// A seated director and their annual compensation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub name: String,
    pub annual_comp: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: EntityId,
    pub name: String,
    /// Headcount, never below one.
    pub employees: u32,
    pub salary_per_employee_annual: f64,
    pub weekly_revenue: f64,
    pub gross_margin: f64,
    pub fixed_weekly_costs: f64,
    pub stage: GrowthStage,
    /// One-way flag set at IPO.
    pub ipo: bool,
    /// Outstanding shares; meaningful only once public.
    pub shares: u64,
    pub dividend_yield: f64,
    /// Seats allocated at the Board stage; zero means no board.
    #[serde(default)]
    pub board_seats: u32,
    #[serde(default)]
    pub board: Vec<Director>,
    #[serde(default)]
    pub ceo: Option<String>,
}

impl Business {
    pub fn from_def(id: EntityId, def: &BusinessDef) -> Self {
        Self {
            id,
            name: def.name.clone(),
            employees: def.employees.max(1),
            salary_per_employee_annual: def.salary_per_employee_annual,
            weekly_revenue: def.weekly_revenue,
            gross_margin: def.gross_margin,
            fixed_weekly_costs: def.fixed_weekly_costs,
            stage: GrowthStage::from_level(def.growth_level),
            ipo: false,
            shares: 0,
            dividend_yield: 0.0,
            board_seats: 0,
            board: Vec::new(),
            ceo: None,
        }
    }

    pub fn has_board(&self) -> bool {
        self.board_seats > 0
    }

    pub fn vacant_seats(&self) -> u32 {
        let filled = u32::try_from(self.board.len()).unwrap_or(u32::MAX);
        self.board_seats.saturating_sub(filled)
    }

    pub fn board_full(&self) -> bool {
        self.has_board() && self.vacant_seats() == 0
    }
}
