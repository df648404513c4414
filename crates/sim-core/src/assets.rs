//! Owned portfolio assets. Values change only through their class drift rule.

use crate::catalog::{CarDef, HouseDef, ItemDef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity generated when an entity is acquired.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A depreciating vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: EntityId,
    pub name: String,
    /// Current market value.
    pub value: f64,
    pub dep_rate_annual: f64,
    pub maint_monthly: f64,
}

impl Car {
    pub fn from_def(id: EntityId, def: &CarDef) -> Self {
        Self {
            id,
            name: def.name.clone(),
            value: def.price,
            dep_rate_annual: def.dep_rate_annual,
            maint_monthly: def.maint_monthly,
        }
    }
}

/// Real estate; may be rented out for income.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: EntityId,
    pub name: String,
    pub value: f64,
    pub app_rate_annual: f64,
    pub rent_monthly: f64,
    pub prop_tax_rate_annual: f64,
    pub upkeep_monthly: f64,
    /// Listed for rent rather than personal use.
    #[serde(default)]
    pub rented: bool,
}

impl House {
    pub fn from_def(id: EntityId, def: &HouseDef) -> Self {
        Self {
            id,
            name: def.name.clone(),
            value: def.price,
            app_rate_annual: def.app_rate_annual,
            rent_monthly: def.rent_monthly,
            prop_tax_rate_annual: def.prop_tax_rate_annual,
            upkeep_monthly: def.upkeep_monthly,
            rented: false,
        }
    }
}

/// Collectibles and other holdings with an expected return and optional volatility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub value: f64,
    pub rate_annual: f64,
    pub upkeep_monthly: f64,
    #[serde(default)]
    pub volatility_monthly: f64,
}

impl Item {
    pub fn from_def(id: EntityId, def: &ItemDef) -> Self {
        Self {
            id,
            name: def.name.clone(),
            value: def.price,
            rate_annual: def.rate_annual,
            upkeep_monthly: def.upkeep_monthly,
            volatility_monthly: def.volatility_monthly,
        }
    }
}
