#![deny(warnings)]

//! Core domain models and invariants for Windfall.
//!
//! This crate defines the serializable Player State, its owned entities, the
//! purchasable catalog, and validation helpers that guard basic invariants.
//! It performs no simulation itself.

pub mod assets;
pub mod business;
pub mod catalog;
pub mod config;
pub mod finance;
pub mod ledger;
pub mod money;
pub mod progress;
pub mod rng;
pub mod state;

pub use assets::{Car, EntityId, House, Item};
pub use business::{Business, Director, GrowthStage};
pub use catalog::{AssetClass, BusinessDef, CarDef, Catalog, CharityDef, HouseDef, ItemDef};
pub use config::{BoardConfig, EventConfig, SaleBand, SaleConfig, SimConfig};
pub use finance::{Charity, Loan};
pub use ledger::{LedgerEntry, Stats, Tag, TimelineEntry};
pub use progress::{Achievement, Milestone};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{
    FamilyMember, Flags, GameOverSummary, Lifestyle, PayoutKind, PlayerProfile, PlayerState,
};

use std::collections::BTreeSet;
use thiserror::Error;

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be finite.
    #[error("non-finite numeric value in {0}")]
    NonFinite(&'static str),
    /// Price, balance or cost must be non-negative.
    #[error("negative monetary value in {0}")]
    NegativeMoney(&'static str),
    /// Names must be unique within a catalog section.
    #[error("duplicate {class} entry: {name}")]
    DuplicateName { class: AssetClass, name: String },
    /// Names must not be blank.
    #[error("blank name in {0}")]
    BlankName(AssetClass),
    /// Rate outside the range the drift rules accept.
    #[error("rate out of range in {0}")]
    RateOutOfRange(&'static str),
    /// Day counter starts at 1.
    #[error("day must be >= 1")]
    DayBeforeStart,
    /// Every business keeps at least one employee.
    #[error("business {0} has no employees")]
    NoEmployees(String),
}

fn money(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeMoney(field));
    }
    Ok(())
}

fn finite(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite(field))
    }
}

fn unique<'a>(
    class: AssetClass,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ValidationError::BlankName(class));
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateName {
                class,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate a catalog: unique names per class, non-negative prices, usable rates.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    for class in AssetClass::ALL {
        unique(class, catalog.names(class))?;
    }
    for c in &catalog.cars {
        money(c.price, "car price")?;
        money(c.maint_monthly, "car maintenance")?;
        if !(0.0..1.0).contains(&c.dep_rate_annual) {
            return Err(ValidationError::RateOutOfRange("car depreciation"));
        }
    }
    for h in &catalog.houses {
        money(h.price, "house price")?;
        money(h.rent_monthly, "house rent")?;
        money(h.upkeep_monthly, "house upkeep")?;
        money(h.prop_tax_rate_annual, "house tax rate")?;
        finite(h.app_rate_annual, "house appreciation")?;
    }
    for i in &catalog.items {
        money(i.price, "item price")?;
        money(i.upkeep_monthly, "item upkeep")?;
        finite(i.rate_annual, "item return")?;
        if i.rate_annual <= -1.0 {
            return Err(ValidationError::RateOutOfRange("item return"));
        }
        if !(0.0..1.0).contains(&i.volatility_monthly) {
            return Err(ValidationError::RateOutOfRange("item volatility"));
        }
    }
    for b in &catalog.biz {
        money(b.price, "business price")?;
        money(b.salary_per_employee_annual, "business salary")?;
        money(b.weekly_revenue, "business revenue")?;
        money(b.fixed_weekly_costs, "business fixed costs")?;
        if !(0.0..=1.0).contains(&b.gross_margin) {
            return Err(ValidationError::RateOutOfRange("business margin"));
        }
    }
    for c in &catalog.charity {
        money(c.price, "charity seed")?;
        money(c.monthly_drain, "charity drain")?;
        money(c.reputation, "charity reputation")?;
    }
    Ok(())
}

/// Validate a Player State, e.g. one produced by importing a snapshot.
pub fn validate_state(state: &PlayerState) -> Result<(), ValidationError> {
    money(state.wallet, "wallet")?;
    money(state.savings, "savings")?;
    money(state.reputation, "reputation")?;
    finite(state.happiness, "happiness")?;
    if !(0.0..=100.0).contains(&state.happiness) {
        return Err(ValidationError::RateOutOfRange("happiness"));
    }
    let l = &state.lifestyle;
    money(l.burn, "burn")?;
    money(l.security, "security")?;
    money(l.travel, "travel")?;
    money(l.staff, "staff")?;
    for member in &state.household {
        money(member.monthly_support, "household support")?;
    }
    finite(state.apy, "apy")?;
    finite(state.inflation, "inflation")?;
    finite(state.high_net, "high net")?;
    if state.day == 0 {
        return Err(ValidationError::DayBeforeStart);
    }
    for loan in &state.loans {
        money(loan.principal, "loan principal")?;
        finite(loan.rate_annual, "loan rate")?;
    }
    for car in &state.cars {
        money(car.value, "car value")?;
    }
    for house in &state.houses {
        money(house.value, "house value")?;
    }
    for item in &state.items {
        money(item.value, "item value")?;
    }
    for b in &state.businesses {
        finite(b.weekly_revenue, "business revenue")?;
        if b.employees == 0 {
            return Err(ValidationError::NoEmployees(b.name.clone()));
        }
    }
    Ok(())
}

/// Coerce a requested advance to a whole number of days in `1..=max_days`.
/// Non-finite input counts as one day.
pub fn coerce_days(raw: f64, max_days: u32) -> u32 {
    let max_days = max_days.max(1);
    if !raw.is_finite() {
        return 1;
    }
    let rounded = raw.round();
    if rounded < 1.0 {
        1
    } else if rounded >= f64::from(max_days) {
        max_days
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn car(name: &str, price: f64) -> CarDef {
        CarDef {
            name: name.to_string(),
            desc: String::new(),
            price,
            dep_rate_annual: 0.1,
            maint_monthly: 500.0,
        }
    }

    #[test]
    fn catalog_rejects_duplicates_and_negative_prices() {
        let mut cat = Catalog {
            cars: vec![car("Sedan", 40_000.0), car("Sedan", 50_000.0)],
            ..Catalog::default()
        };
        assert_eq!(
            validate_catalog(&cat),
            Err(ValidationError::DuplicateName {
                class: AssetClass::Car,
                name: "Sedan".into()
            })
        );
        cat.cars = vec![car("Sedan", -1.0)];
        assert_eq!(
            validate_catalog(&cat),
            Err(ValidationError::NegativeMoney("car price"))
        );
        cat.cars = vec![car("Sedan", 40_000.0)];
        assert!(validate_catalog(&cat).is_ok());
    }

    #[test]
    fn catalog_parses_provider_json() {
        let json = r#"{
            "cars": [{"name":"Roadster","price":90000,"dep_rate_annual":0.15,"maint_monthly":800}],
            "biz": [{"name":"Cafe","price":250000,"employees":6,"salary_per_employee_annual":38000,
                     "weekly_revenue":18000,"gross_margin":0.55,"fixed_weekly_costs":2500}]
        }"#;
        let cat: Catalog = serde_json::from_str(json).unwrap();
        validate_catalog(&cat).unwrap();
        assert_eq!(cat.price_of(AssetClass::Car, "Roadster"), Some(90_000.0));
        assert_eq!(cat.business("Cafe").unwrap().growth_level, 1);
        assert!(cat.items.is_empty());
    }

    #[test]
    fn state_snapshot_roundtrip_and_partial_parse() {
        let mut s = PlayerState::with_balances(1_000.0, 250.0);
        s.profile.name = "Ada".into();
        s.milestones.insert(Milestone::DebtFree);
        let json = serde_json::to_string(&s).unwrap();
        let back: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);

        let partial: PlayerState = serde_json::from_str(r#"{"wallet": 5.0}"#).unwrap();
        assert_eq!(partial.wallet, 5.0);
        assert_eq!(partial.day, 1);
        assert_eq!(partial.happiness, 50.0);
    }

    #[test]
    fn state_validation_catches_negative_wallet() {
        let mut s = PlayerState::default();
        assert!(validate_state(&s).is_ok());
        s.wallet = -1.0;
        assert_eq!(
            validate_state(&s),
            Err(ValidationError::NegativeMoney("wallet"))
        );
        s.wallet = 0.0;
        s.day = 0;
        assert_eq!(validate_state(&s), Err(ValidationError::DayBeforeStart));
    }

    #[test]
    fn state_rejects_bad_sliders_and_moods() {
        let mut s = PlayerState::with_balances(0.0, 0.0);
        s.lifestyle.burn = -300_000.0;
        assert_eq!(
            validate_state(&s),
            Err(ValidationError::NegativeMoney("burn"))
        );
        s.lifestyle.burn = 0.0;
        s.happiness = 900.0;
        assert_eq!(
            validate_state(&s),
            Err(ValidationError::RateOutOfRange("happiness"))
        );
    }

    #[test]
    fn zero_and_negative_days_become_one() {
        assert_eq!(coerce_days(0.0, 365), 1);
        assert_eq!(coerce_days(-7.0, 365), 1);
        assert_eq!(coerce_days(f64::NAN, 365), 1);
        assert_eq!(coerce_days(6.6, 365), 7);
    }

    #[test]
    fn huge_advances_are_capped() {
        assert_eq!(coerce_days(1.0e12, 36_500), 36_500);
        assert_eq!(coerce_days(f64::INFINITY, 36_500), 1);
        assert_eq!(coerce_days(10.0, 0), 1);
    }

    proptest! {
        #[test]
        fn coerced_days_at_least_one(raw in -1.0e6f64..1.0e6) {
            let d = coerce_days(raw, 36_500);
            prop_assert!((1..=36_500).contains(&d));
            if raw >= 1.5 && raw < 36_500.0 {
                prop_assert_eq!(f64::from(d), raw.round());
            }
        }
    }
}
