//! Business operations: weekly books, growth stages, staffing, boards and IPOs.

use crate::error::Rejection;
use crate::ledger::RecordOptions;
use crate::observer::Notice;
use crate::session::Session;
use sim_core::{BoardConfig, Business, Director, EntityId, GrowthStage, Tag};
use sim_econ::{ipo_shares, organic_growth_factor, weekly_books};
use tracing::{debug, info};

/// Result of a successful `ipo` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IpoOutcome {
    Listed { shares: u64 },
    /// The business was already public; nothing changed.
    AlreadyPublic,
}

/// Raise `business` to the Board stage once it crosses either readiness
/// threshold, and size its board. Returns true on the transition into Board.
pub fn advance_stage(business: &mut Business, cfg: &BoardConfig) -> bool {
    let mut promoted = false;
    if business.stage < GrowthStage::Board
        && (business.employees >= cfg.employees_threshold
            || business.weekly_revenue >= cfg.revenue_threshold)
    {
        business.stage = GrowthStage::Board;
        promoted = true;
    }
    if business.stage >= GrowthStage::Board && business.board_seats == 0 {
        business.board_seats = cfg.initial_seats;
    }
    if business.has_board()
        && (business.employees >= cfg.expansion_employees
            || business.weekly_revenue >= cfg.expansion_revenue)
    {
        business.board_seats = business.board_seats.max(cfg.expanded_seats);
    }
    promoted
}

impl Session {
    /// Close one week of books for every business and log the combined net.
    pub(crate) fn business_week(&mut self) {
        if self.state.businesses.is_empty() {
            return;
        }
        let board = self.config.board.clone();
        let share_price = self.config.share_price;
        let mut net = 0.0;
        let mut promoted = Vec::new();
        for b in &mut self.state.businesses {
            let books = weekly_books(b, share_price, board.vacancy_overhead_weekly);
            net += books.net;
            b.weekly_revenue *= organic_growth_factor(
                board.organic_growth_weekly,
                board.growth_per_director,
                b.board.len(),
            );
            if advance_stage(b, &board) {
                promoted.push(b.name.clone());
            }
        }
        if net != 0.0 {
            self.record("Businesses: weekly net", net, 0.0, RecordOptions::tagged(Tag::Business));
        }
        for name in promoted {
            self.announce(Notice::BoardReady(name));
        }
    }

    fn business_index(&self, id: EntityId) -> Result<usize, Rejection> {
        self.state
            .businesses
            .iter()
            .position(|b| b.id == id)
            .ok_or(Rejection::UnknownBusiness(id))
    }

    /// Add one employee; revenue gets a small productivity bump.
    pub fn hire(&mut self, id: EntityId) -> Result<u32, Rejection> {
        self.begin_command();
        let i = self.business_index(id)?;
        let board = &self.config.board;
        let b = &mut self.state.businesses[i];
        b.employees += 1;
        b.weekly_revenue *= 1.0 + board.hire_revenue_bump;
        let promoted = advance_stage(b, board);
        let (name, employees) = (b.name.clone(), b.employees);
        self.record(format!("{name}: Hired 1"), 0.0, 0.0, RecordOptions::default());
        if promoted {
            self.announce(Notice::BoardReady(name));
        }
        self.finish_command();
        Ok(employees)
    }

    /// Remove one employee. Refused at the one-employee floor.
    pub fn fire(&mut self, id: EntityId) -> Result<u32, Rejection> {
        self.begin_command();
        let i = self.business_index(id)?;
        let cut = self.config.board.fire_revenue_cut;
        let b = &mut self.state.businesses[i];
        if b.employees <= 1 {
            debug!(%id, "fire refused at employee floor");
            return Err(Rejection::EmployeeFloor);
        }
        b.employees -= 1;
        b.weekly_revenue *= 1.0 - cut;
        let (name, employees) = (b.name.clone(), b.employees);
        self.record(format!("{name}: Fired 1"), 0.0, 0.0, RecordOptions::default());
        self.finish_command();
        Ok(employees)
    }

    /// Take a business public. Calling it on a public business changes nothing.
    pub fn ipo(&mut self, id: EntityId) -> Result<IpoOutcome, Rejection> {
        self.begin_command();
        let i = self.business_index(id)?;
        if self.state.businesses[i].ipo {
            return Ok(IpoOutcome::AlreadyPublic);
        }
        // Readiness is probed on a copy so a refusal leaves the business as it was.
        let mut probe = self.state.businesses[i].clone();
        let promoted = advance_stage(&mut probe, &self.config.board);
        let threshold = self.config.ipo_revenue_threshold;
        if probe.stage < GrowthStage::Board || probe.weekly_revenue < threshold {
            debug!(%id, stage = %probe.stage, revenue = probe.weekly_revenue, "ipo refused");
            return Err(Rejection::IpoIneligible {
                stage: probe.stage,
                weekly_revenue: probe.weekly_revenue,
                threshold,
            });
        }
        probe.ipo = true;
        probe.stage = GrowthStage::Public;
        probe.shares = ipo_shares(probe.weekly_revenue, self.config.ipo_revenue_per_share);
        probe.dividend_yield = self.config.dividend_yield;
        let (name, shares) = (probe.name.clone(), probe.shares);
        self.state.businesses[i] = probe;
        info!(%id, %name, shares, "went public");
        if promoted {
            self.announce(Notice::BoardReady(name.clone()));
        }
        self.record(format!("{name}: Went public (IPO)!"), 0.0, 0.0, RecordOptions::default());
        self.announce(Notice::WentPublic(name));
        self.finish_command();
        Ok(IpoOutcome::Listed { shares })
    }

    /// Seat a director on a business that has reached the Board stage.
    pub fn add_board_member(&mut self, id: EntityId, director: Director) -> Result<usize, Rejection> {
        self.begin_command();
        let i = self.business_index(id)?;
        let name = director.name.trim().to_string();
        if name.is_empty() {
            return Err(Rejection::BlankName);
        }
        let b = &mut self.state.businesses[i];
        if !b.has_board() {
            return Err(Rejection::NoBoard(b.name.clone()));
        }
        if b.board_full() {
            return Err(Rejection::BoardFull(b.name.clone()));
        }
        let annual_comp = sim_core::money::sanitize_amount(director.annual_comp);
        b.board.push(Director { name: name.clone(), annual_comp });
        let (biz, seated) = (b.name.clone(), b.board.len());
        self.record(format!("{biz}: {name} joined the board"), 0.0, 0.0, RecordOptions::default());
        self.finish_command();
        Ok(seated)
    }

    pub fn set_ceo(&mut self, id: EntityId, name: &str) -> Result<(), Rejection> {
        self.begin_command();
        let i = self.business_index(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::BlankName);
        }
        let b = &mut self.state.businesses[i];
        b.ceo = Some(name.to_string());
        let biz = b.name.clone();
        self.record(format!("{biz}: {name} named CEO"), 0.0, 0.0, RecordOptions::default());
        self.finish_command();
        Ok(())
    }
}
