//! Recurring commitments: charities and loans.

use crate::assets::EntityId;
use serde::{Deserialize, Serialize};

/// A philanthropic commitment draining the wallet monthly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Charity {
    pub id: EntityId,
    pub name: String,
    pub monthly_drain: f64,
    /// Reputation granted on creation and withdrawn on closure.
    pub reputation: f64,
}

/// Outstanding borrowing. Interest is paid from the wallet, never capitalized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: EntityId,
    pub principal: f64,
    /// Annual rate, e.g. 0.08 = 8%/yr.
    pub rate_annual: f64,
    /// Opened automatically to cover a wallet shortfall.
    #[serde(default)]
    pub overdraft: bool,
}
