//! The player-facing command surface.
//!
//! Every command either completes and leaves the wallet non-negative, or
//! returns a [`Rejection`] without touching state.

use crate::business::advance_stage;
use crate::error::{ImportError, Rejection};
use crate::ledger::RecordOptions;
use crate::observer::Notice;
use crate::portfolio::recompute_totals;
use crate::session::Session;
use persistence::{LeaderboardAck, LeaderboardPayload, PersistError};
use sim_core::money::{round_cents, sanitize_amount};
use sim_core::{
    validate_state, AssetClass, Business, Car, Charity, EntityId, FamilyMember, House, Item,
    Lifestyle, Loan, SaleBand, Tag,
};
use sim_econ::event_boost;
use tracing::{debug, info};

/// What a sale realized.
#[derive(Clone, Debug, PartialEq)]
pub struct SaleReceipt {
    pub class: AssetClass,
    pub name: String,
    pub book_value: f64,
    pub price: f64,
}

impl Session {
    fn require_wallet(&self, needed: f64) -> Result<(), Rejection> {
        if self.state.wallet < needed {
            debug!(needed, available = self.state.wallet, "insufficient funds");
            return Err(Rejection::InsufficientFunds {
                needed,
                available: self.state.wallet,
            });
        }
        Ok(())
    }

    /// Buy a catalog entry by class and name.
    pub fn buy(&mut self, class: AssetClass, name: &str) -> Result<EntityId, Rejection> {
        self.begin_command();
        let unknown = || Rejection::UnknownCatalogEntry {
            class,
            name: name.to_string(),
        };
        let price = self
            .catalog
            .price_of(class, name)
            .map(sanitize_amount)
            .ok_or_else(unknown)?;
        self.require_wallet(price)?;

        let mut opts = RecordOptions::default();
        let mut asset_delta = price;
        let mut promoted = None;
        let id = match class {
            AssetClass::Car => {
                let def = self.catalog.car(name).ok_or_else(unknown)?;
                let id = self.state.allocate_id();
                self.state.cars.push(Car::from_def(id, def));
                id
            }
            AssetClass::House => {
                let def = self.catalog.house(name).ok_or_else(unknown)?;
                let id = self.state.allocate_id();
                self.state.houses.push(House::from_def(id, def));
                id
            }
            AssetClass::Item => {
                let def = self.catalog.item(name).ok_or_else(unknown)?;
                let id = self.state.allocate_id();
                self.state.items.push(Item::from_def(id, def));
                id
            }
            AssetClass::Business => {
                let def = self.catalog.business(name).ok_or_else(unknown)?;
                let mut b = Business::from_def(self.state.allocate_id(), def);
                if advance_stage(&mut b, &self.config.board) {
                    promoted = Some(b.name.clone());
                }
                asset_delta = 0.0;
                let id = b.id;
                self.state.businesses.push(b);
                id
            }
            AssetClass::Charity => {
                let def = self.catalog.charity(name).ok_or_else(unknown)?;
                let grant = sanitize_amount(def.reputation);
                let id = self.state.allocate_id();
                self.state.charities.push(Charity {
                    id,
                    name: def.name.clone(),
                    monthly_drain: sanitize_amount(def.monthly_drain),
                    reputation: grant,
                });
                opts = RecordOptions::tagged(Tag::Charity).reputation(grant);
                asset_delta = 0.0;
                id
            }
        };
        self.record(format!("Bought {name} ({class})"), -price, asset_delta, opts);
        if let Some(biz) = promoted {
            self.announce(Notice::BoardReady(biz));
        }
        self.finish_command();
        Ok(id)
    }

    /// Sell an owned car, house or item at a randomized market multiplier.
    pub fn sell(&mut self, id: EntityId) -> Result<SaleReceipt, Rejection> {
        self.begin_command();
        let sale = &self.config.sale;
        let (class, band, name, book_value) =
            if let Some(i) = self.state.cars.iter().position(|c| c.id == id) {
                let c = self.state.cars.remove(i);
                (AssetClass::Car, sale.car, c.name, c.value)
            } else if let Some(i) = self.state.houses.iter().position(|h| h.id == id) {
                let h = self.state.houses.remove(i);
                (AssetClass::House, sale.house, h.name, h.value)
            } else if let Some(i) = self.state.items.iter().position(|it| it.id == id) {
                let it = self.state.items.remove(i);
                (AssetClass::Item, sale.item, it.name, it.value)
            } else {
                return Err(Rejection::UnknownAsset(id));
            };
        let price = round_cents(book_value * self.market_multiplier(band));
        self.record(format!("Sold {name}"), price, -book_value, RecordOptions::default());
        self.finish_command();
        Ok(SaleReceipt {
            class,
            name,
            book_value,
            price,
        })
    }

    fn market_multiplier(&mut self, band: SaleBand) -> f64 {
        let (lo, hi) = if band.min <= band.max {
            (band.min, band.max)
        } else {
            (band.max, band.min)
        };
        self.rng.range(lo, hi)
    }

    /// Flip a house between personal use and for rent. Returns the new flag.
    pub fn toggle_rent(&mut self, id: EntityId) -> Result<bool, Rejection> {
        self.begin_command();
        let house = self
            .state
            .houses
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(Rejection::UnknownHouse(id))?;
        house.rented = !house.rented;
        let rented = house.rented;
        let title = format!(
            "{}: set {}",
            house.name,
            if rented { "For Rent" } else { "Personal Use" }
        );
        self.record(title, 0.0, 0.0, RecordOptions::default());
        self.finish_command();
        Ok(rented)
    }

    /// Move cash from the wallet into savings.
    pub fn deposit(&mut self, amount: f64) -> Result<(), Rejection> {
        self.begin_command();
        let amount = sanitize_amount(amount);
        if amount == 0.0 {
            return Err(Rejection::InvalidAmount);
        }
        self.require_wallet(amount)?;
        self.state.savings += amount;
        self.record("Deposit to savings", -amount, 0.0, RecordOptions::default());
        self.finish_command();
        Ok(())
    }

    /// Move cash from savings into the wallet.
    pub fn withdraw(&mut self, amount: f64) -> Result<(), Rejection> {
        self.begin_command();
        let amount = sanitize_amount(amount);
        if amount == 0.0 {
            return Err(Rejection::InvalidAmount);
        }
        if self.state.savings < amount {
            return Err(Rejection::InsufficientSavings {
                needed: amount,
                available: self.state.savings,
            });
        }
        self.state.savings -= amount;
        self.record("Withdraw from savings", amount, 0.0, RecordOptions::default());
        self.finish_command();
        Ok(())
    }

    /// Borrow `amount` at an annual `rate` (e.g. `0.08`). A malformed rate
    /// falls back to the configured default.
    pub fn take_loan(&mut self, amount: f64, rate_annual: f64) -> Result<EntityId, Rejection> {
        self.begin_command();
        let amount = sanitize_amount(amount);
        if amount == 0.0 {
            return Err(Rejection::InvalidAmount);
        }
        let rate_annual = if rate_annual.is_finite() && rate_annual >= 0.0 {
            rate_annual
        } else {
            self.config.default_loan_rate
        };
        let id = self.state.allocate_id();
        self.state.loans.push(Loan {
            id,
            principal: amount,
            rate_annual,
            overdraft: false,
        });
        self.state.flags.ever_had_debt = true;
        self.record(
            format!("Took loan at {:.2}%/yr", rate_annual * 100.0),
            amount,
            0.0,
            RecordOptions::default(),
        );
        self.finish_command();
        Ok(id)
    }

    /// Pay down debt, oldest loan first. Returns the debt remaining.
    pub fn pay_debt(&mut self, amount: f64) -> Result<f64, Rejection> {
        self.begin_command();
        if self.state.loans.is_empty() {
            return Err(Rejection::NothingToPay);
        }
        let amount = sanitize_amount(amount);
        if amount == 0.0 {
            return Err(Rejection::InvalidAmount);
        }
        let pay = amount.min(self.total_debt());
        self.require_wallet(pay)?;

        let mut left = pay;
        for loan in &mut self.state.loans {
            let part = left.min(loan.principal);
            loan.principal -= part;
            left -= part;
            if left <= 0.0 {
                break;
            }
        }
        let epsilon = self.config.loan_epsilon;
        self.state.loans.retain(|l| l.principal >= epsilon);
        self.record("Paid down debt", -pay, 0.0, RecordOptions::tagged(Tag::Debt));
        self.finish_command();
        Ok(self.state.debt)
    }

    /// Found a custom charity. A blank name becomes "My Foundation".
    pub fn create_charity(
        &mut self,
        name: &str,
        seed: f64,
        monthly_drain: f64,
        reputation: f64,
    ) -> Result<EntityId, Rejection> {
        self.begin_command();
        let name = match name.trim() {
            "" => "My Foundation",
            n => n,
        };
        let seed = sanitize_amount(seed);
        let grant = sanitize_amount(reputation);
        self.require_wallet(seed)?;
        let id = self.state.allocate_id();
        self.state.charities.push(Charity {
            id,
            name: name.to_string(),
            monthly_drain: sanitize_amount(monthly_drain),
            reputation: grant,
        });
        self.record(
            format!("Created charity: {name}"),
            -seed,
            0.0,
            RecordOptions::tagged(Tag::Charity).reputation(grant),
        );
        self.finish_command();
        Ok(id)
    }

    /// Close a charity, withdrawing its reputation grant (never below zero).
    pub fn close_charity(&mut self, id: EntityId) -> Result<(), Rejection> {
        self.begin_command();
        let i = self
            .state
            .charities
            .iter()
            .position(|c| c.id == id)
            .ok_or(Rejection::UnknownCharity(id))?;
        let charity = self.state.charities.remove(i);
        self.state.reputation = (self.state.reputation - charity.reputation).max(0.0);
        self.record(
            format!("Closed charity: {}", charity.name),
            0.0,
            0.0,
            RecordOptions::default(),
        );
        self.finish_command();
        Ok(())
    }

    /// Replace the monthly lifestyle sliders. Malformed values become zero.
    pub fn set_lifestyle(&mut self, lifestyle: Lifestyle) {
        self.begin_command();
        self.state.lifestyle = lifestyle.sanitized();
        self.state.event_boost = event_boost(&self.state.lifestyle);
        self.finish_command();
    }

    /// Savings APY in percent.
    pub fn set_apy(&mut self, apy: f64) {
        self.state.apy = sanitize_amount(apy);
        self.notify_changed();
    }

    /// Inflation in percent; may be negative.
    pub fn set_inflation(&mut self, inflation: f64) {
        self.state.inflation = if inflation.is_finite() { inflation } else { 0.0 };
        self.notify_changed();
    }

    pub fn set_show_events(&mut self, enabled: bool) {
        self.state.show_events = enabled;
        self.notify_changed();
    }

    /// Add a household member with a monthly support cost. Returns household size.
    pub fn add_family_member(&mut self, name: &str, monthly_support: f64) -> Result<usize, Rejection> {
        self.begin_command();
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::BlankName);
        }
        self.state.household.push(FamilyMember {
            name: name.to_string(),
            monthly_support: sanitize_amount(monthly_support),
        });
        self.finish_command();
        Ok(self.state.household.len())
    }

    pub fn mark_email_shared(&mut self) {
        self.begin_command();
        self.state.flags.used_email = true;
        self.finish_command();
    }

    /// Snapshot payload for a leaderboard submission.
    pub fn leaderboard_payload(&self) -> Result<LeaderboardPayload, PersistError> {
        LeaderboardPayload::from_state(&self.state, self.config.snapshot_tail)
    }

    /// Record a leaderboard reply; the first successful one assigns the id.
    pub fn apply_leaderboard_ack(&mut self, ack: &LeaderboardAck) {
        if !ack.ok {
            return;
        }
        self.begin_command();
        self.state.flags.submitted_leaderboard = true;
        if self.state.profile.id.is_none() {
            self.state.profile.id = ack.id.clone();
        }
        self.finish_command();
    }

    pub fn export_json(&self) -> Result<String, PersistError> {
        persistence::export_json(&self.state, self.config.snapshot_tail)
    }

    /// Merge a JSON snapshot into the session. On any failure the session is
    /// left exactly as it was.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        self.begin_command();
        let mut next = persistence::merge_import(&self.state, json)?;
        next.lifestyle = next.lifestyle.sanitized();
        for member in &mut next.household {
            member.monthly_support = sanitize_amount(member.monthly_support);
        }
        if next.happiness.is_finite() {
            next.happiness = next.happiness.clamp(0.0, 100.0);
        }
        validate_state(&next)?;
        next.flags.used_import = true;
        next.high_net = next.high_net.max(self.state.high_net);
        recompute_totals(&mut next, self.config.share_price);
        self.state = next;
        self.state.event_boost = event_boost(&self.state.lifestyle);
        info!(day = self.state.day, net = self.state.net_worth, "snapshot imported");
        self.finish_command();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{
        CarDef, Catalog, CharityDef, GrowthStage, PlayerState, ScriptedRandom, SimConfig,
    };

    fn catalog() -> Catalog {
        Catalog {
            cars: vec![CarDef {
                name: "Coupe".into(),
                desc: String::new(),
                price: 40_000.0,
                dep_rate_annual: 0.1,
                maint_monthly: 500.0,
            }],
            charity: vec![CharityDef {
                name: "Food Bank".into(),
                desc: String::new(),
                price: 5_000.0,
                monthly_drain: 100.0,
                reputation: 10.0,
            }],
            ..Catalog::default()
        }
    }

    fn session(wallet: f64, draw: f64) -> Session {
        Session::with_rng(
            PlayerState::with_balances(wallet, 0.0),
            catalog(),
            SimConfig::default(),
            Box::new(ScriptedRandom::constant(draw)),
        )
    }

    #[test]
    fn buy_moves_cash_into_assets() {
        let mut s = session(100_000.0, 0.5);
        let id = s.buy(AssetClass::Car, "Coupe").unwrap();
        assert_eq!(s.state().wallet, 60_000.0);
        assert_eq!(s.total_assets(), 40_000.0);
        assert_eq!(s.state().net_worth, 100_000.0);
        assert_eq!(s.state().cars[0].id, id);
    }

    #[test]
    fn unaffordable_or_unknown_purchases_change_nothing() {
        let mut s = session(1_000.0, 0.5);
        let before = s.state().clone();
        assert!(matches!(
            s.buy(AssetClass::Car, "Coupe"),
            Err(Rejection::InsufficientFunds { .. })
        ));
        assert!(matches!(
            s.buy(AssetClass::House, "Castle"),
            Err(Rejection::UnknownCatalogEntry { .. })
        ));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn sale_uses_market_band() {
        let mut s = session(100_000.0, 1.0);
        let id = s.buy(AssetClass::Car, "Coupe").unwrap();
        let receipt = s.sell(id).unwrap();
        assert!(receipt.price > 41_999.0 && receipt.price <= 42_000.0);
        assert!(s.state().cars.is_empty());
        assert_eq!(s.sell(id), Err(Rejection::UnknownAsset(id)));
    }

    #[test]
    fn savings_transfers_are_policed() {
        let mut s = session(500.0, 0.5);
        assert_eq!(s.deposit(f64::NAN), Err(Rejection::InvalidAmount));
        assert_eq!(s.deposit(-5.0), Err(Rejection::InvalidAmount));
        assert!(s.deposit(600.0).is_err());
        s.deposit(200.0).unwrap();
        assert_eq!((s.state().wallet, s.state().savings), (300.0, 200.0));
        assert!(matches!(s.withdraw(201.0), Err(Rejection::InsufficientSavings { .. })));
        s.withdraw(50.0).unwrap();
        assert_eq!((s.state().wallet, s.state().savings), (350.0, 150.0));
    }

    #[test]
    fn paying_debt_clears_oldest_first_and_trims_dust() {
        let mut s = session(0.0, 0.5);
        let first = s.take_loan(1_000.0, 0.08).unwrap();
        s.take_loan(500.0, f64::NAN).unwrap();
        assert_eq!(s.state().loans[1].rate_annual, SimConfig::default().default_loan_rate);
        assert_eq!(s.state().debt, 1_500.0);
        let left = s.pay_debt(999.995).unwrap();
        assert!(s.state().loans.iter().all(|l| l.id != first));
        assert!((left - 500.0).abs() < 1e-9);
        assert_eq!(s.pay_debt(10_000.0), Ok(0.0));
        assert!(s.state().loans.is_empty());
        assert_eq!(s.pay_debt(1.0), Err(Rejection::NothingToPay));
        assert!(s.state().milestones.contains(&sim_core::Milestone::DebtFree));
    }

    #[test]
    fn closing_charity_floors_reputation() {
        let mut s = session(100_000.0, 0.5);
        let id = s.create_charity("  ", 1_000.0, 100.0, 10.0).unwrap();
        assert_eq!(s.state().charities[0].name, "My Foundation");
        assert_eq!(s.state().reputation, 10.0);
        s.state.reputation = 4.0;
        s.close_charity(id).unwrap();
        assert_eq!(s.state().reputation, 0.0);
        assert_eq!(s.close_charity(id), Err(Rejection::UnknownCharity(id)));
    }

    #[test]
    fn catalog_charity_grants_reputation() {
        let mut s = session(10_000.0, 0.5);
        s.buy(AssetClass::Charity, "Food Bank").unwrap();
        assert_eq!(s.state().reputation, 10.0);
        assert_eq!(s.state().stats.charity_given, 5_000.0);
        assert_eq!(s.total_assets(), 0.0);
    }

    #[test]
    fn failed_import_leaves_state_alone() {
        let mut s = session(1_000.0, 0.5);
        let before = s.state().clone();
        assert!(s.import_json("not json").is_err());
        assert!(s.import_json(r#"{"wallet": -5}"#).is_err());
        assert_eq!(s.state(), &before);
        s.import_json(r#"{"savings": 250}"#).unwrap();
        assert_eq!(s.state().savings, 250.0);
        assert_eq!(s.state().net_worth, 1_250.0);
        assert!(s.state().flags.used_import);
    }

    #[test]
    fn import_coerces_sliders_and_keeps_the_peak() {
        let mut s = session(1_000.0, 0.99);
        let peak = s.state().high_net;
        s.import_json(
            r#"{"lifestyle": {"burn": -300000, "travel": 200}, "happiness": 900, "high_net": 5}"#,
        )
        .unwrap();
        let st = s.state();
        assert_eq!(st.lifestyle.burn, 0.0);
        assert_eq!(st.lifestyle.travel, 200.0);
        assert_eq!(st.happiness, 100.0);
        assert_eq!(st.high_net, peak);
        s.advance_time(30.0);
        assert!((s.state().wallet - 800.0).abs() < 1e-6);
    }

    #[test]
    fn import_rejects_a_business_without_staff() {
        let mut s = session(0.0, 0.5);
        let before = s.state().clone();
        let ghost = Business {
            id: EntityId(7),
            name: "Ghost Co".into(),
            employees: 0,
            salary_per_employee_annual: 0.0,
            weekly_revenue: 0.0,
            gross_margin: 0.5,
            fixed_weekly_costs: 0.0,
            stage: GrowthStage::Growth,
            ipo: false,
            shares: 0,
            dividend_yield: 0.0,
            board_seats: 0,
            board: Vec::new(),
            ceo: None,
        };
        let json = serde_json::json!({ "businesses": [ghost] }).to_string();
        assert!(s.import_json(&json).is_err());
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn leaderboard_ack_assigns_id_once() {
        let mut s = session(0.0, 0.5);
        s.apply_leaderboard_ack(&LeaderboardAck { ok: true, id: Some("abc".into()) });
        s.apply_leaderboard_ack(&LeaderboardAck { ok: true, id: Some("xyz".into()) });
        assert_eq!(s.state().profile.id.as_deref(), Some("abc"));
        assert!(s.state().flags.submitted_leaderboard);
    }
}
