#![allow(dead_code)]

use sim_core::{
    BusinessDef, CarDef, Catalog, CharityDef, HouseDef, ItemDef, PlayerState, ScriptedRandom,
    SimConfig,
};
use sim_runtime::Session;

pub fn catalog() -> Catalog {
    Catalog {
        cars: vec![CarDef {
            name: "Sedan".into(),
            desc: "Reliable four-door".into(),
            price: 40_000.0,
            dep_rate_annual: 0.10,
            maint_monthly: 500.0,
        }],
        houses: vec![HouseDef {
            name: "Lake House".into(),
            desc: String::new(),
            price: 350_000.0,
            app_rate_annual: 0.04,
            rent_monthly: 2_400.0,
            prop_tax_rate_annual: 0.012,
            upkeep_monthly: 600.0,
        }],
        items: vec![ItemDef {
            name: "Watch".into(),
            desc: String::new(),
            price: 12_000.0,
            rate_annual: 0.03,
            upkeep_monthly: 20.0,
            volatility_monthly: 0.05,
        }],
        biz: vec![
            BusinessDef {
                name: "Food Truck".into(),
                desc: String::new(),
                price: 60_000.0,
                employees: 3,
                salary_per_employee_annual: 38_000.0,
                weekly_revenue: 6_000.0,
                gross_margin: 0.6,
                fixed_weekly_costs: 400.0,
                growth_level: 1,
            },
            BusinessDef {
                name: "Logistics Co".into(),
                desc: String::new(),
                price: 2_000_000.0,
                employees: 25,
                salary_per_employee_annual: 60_000.0,
                weekly_revenue: 250_000.0,
                gross_margin: 0.3,
                fixed_weekly_costs: 20_000.0,
                growth_level: 1,
            },
        ],
        charity: vec![CharityDef {
            name: "Library Fund".into(),
            desc: String::new(),
            price: 25_000.0,
            monthly_drain: 1_000.0,
            reputation: 10.0,
        }],
    }
}

/// Session with events off and a fixed random draw.
pub fn session(state: PlayerState) -> Session {
    Session::with_rng(
        state,
        catalog(),
        SimConfig::default(),
        Box::new(ScriptedRandom::constant(0.5)),
    )
}
