//! Purchasable definitions supplied by the external catalog provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog sections, named the way the catalog provider names them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    #[serde(rename = "cars")]
    Car,
    #[serde(rename = "houses")]
    House,
    #[serde(rename = "items")]
    Item,
    #[serde(rename = "biz")]
    Business,
    #[serde(rename = "charity")]
    Charity,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Car,
        AssetClass::House,
        AssetClass::Item,
        AssetClass::Business,
        AssetClass::Charity,
    ];

    /// Section key used by the catalog provider.
    pub fn key(self) -> &'static str {
        match self {
            AssetClass::Car => "cars",
            AssetClass::House => "houses",
            AssetClass::Item => "items",
            AssetClass::Business => "biz",
            AssetClass::Charity => "charity",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarDef {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub price: f64,
    /// Annual depreciation, e.g. 0.10 = 10%/yr.
    pub dep_rate_annual: f64,
    pub maint_monthly: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HouseDef {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub price: f64,
    pub app_rate_annual: f64,
    pub rent_monthly: f64,
    pub prop_tax_rate_annual: f64,
    pub upkeep_monthly: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub price: f64,
    pub rate_annual: f64,
    pub upkeep_monthly: f64,
    #[serde(default)]
    pub volatility_monthly: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessDef {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub price: f64,
    pub employees: u32,
    pub salary_per_employee_annual: f64,
    pub weekly_revenue: f64,
    pub gross_margin: f64,
    pub fixed_weekly_costs: f64,
    /// Ordinal maturity level; 3 or more means board-ready.
    #[serde(default = "default_growth_level")]
    pub growth_level: u8,
}

fn default_growth_level() -> u8 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharityDef {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// Seed donation paid on creation.
    pub price: f64,
    pub monthly_drain: f64,
    pub reputation: f64,
}

/// Ordered purchasable definitions per asset class.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub cars: Vec<CarDef>,
    pub houses: Vec<HouseDef>,
    pub items: Vec<ItemDef>,
    pub biz: Vec<BusinessDef>,
    pub charity: Vec<CharityDef>,
}

impl Catalog {
    pub fn car(&self, name: &str) -> Option<&CarDef> {
        self.cars.iter().find(|d| d.name == name)
    }

    pub fn house(&self, name: &str) -> Option<&HouseDef> {
        self.houses.iter().find(|d| d.name == name)
    }

    pub fn item(&self, name: &str) -> Option<&ItemDef> {
        self.items.iter().find(|d| d.name == name)
    }

    pub fn business(&self, name: &str) -> Option<&BusinessDef> {
        self.biz.iter().find(|d| d.name == name)
    }

    pub fn charity(&self, name: &str) -> Option<&CharityDef> {
        self.charity.iter().find(|d| d.name == name)
    }

    /// Price of a named entry, if present.
    pub fn price_of(&self, class: AssetClass, name: &str) -> Option<f64> {
        match class {
            AssetClass::Car => self.car(name).map(|d| d.price),
            AssetClass::House => self.house(name).map(|d| d.price),
            AssetClass::Item => self.item(name).map(|d| d.price),
            AssetClass::Business => self.business(name).map(|d| d.price),
            AssetClass::Charity => self.charity(name).map(|d| d.price),
        }
    }

    /// Entry names of one section, in catalog order.
    pub fn names(&self, class: AssetClass) -> Vec<&str> {
        match class {
            AssetClass::Car => self.cars.iter().map(|d| d.name.as_str()).collect(),
            AssetClass::House => self.houses.iter().map(|d| d.name.as_str()).collect(),
            AssetClass::Item => self.items.iter().map(|d| d.name.as_str()).collect(),
            AssetClass::Business => self.biz.iter().map(|d| d.name.as_str()).collect(),
            AssetClass::Charity => self.charity.iter().map(|d| d.name.as_str()).collect(),
        }
    }
}
