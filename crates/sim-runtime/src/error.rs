use persistence::PersistError;
use sim_core::{AssetClass, EntityId, GrowthStage, ValidationError};
use thiserror::Error;

/// A command refused by policy. Refusals never mutate state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    #[error("not enough wallet funds: need {needed:.2}, have {available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("not enough savings: need {needed:.2}, have {available:.2}")]
    InsufficientSavings { needed: f64, available: f64 },
    #[error("no {class} entry named {name:?} in the catalog")]
    UnknownCatalogEntry { class: AssetClass, name: String },
    #[error("asset {0} is not owned")]
    UnknownAsset(EntityId),
    #[error("house {0} is not owned")]
    UnknownHouse(EntityId),
    #[error("business {0} is not owned")]
    UnknownBusiness(EntityId),
    #[error("charity {0} does not exist")]
    UnknownCharity(EntityId),
    #[error("cannot go below 1 employee")]
    EmployeeFloor,
    #[error("need Board level and {threshold:.0}/wk revenue to IPO (at {stage}, {weekly_revenue:.0}/wk)")]
    IpoIneligible {
        stage: GrowthStage,
        weekly_revenue: f64,
        threshold: f64,
    },
    #[error("{0} has no board yet")]
    NoBoard(String),
    #[error("every board seat at {0} is filled")]
    BoardFull(String),
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("name must not be blank")]
    BlankName,
    #[error("there is no debt to pay")]
    NothingToPay,
}

/// Importing a snapshot failed; the session is left untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("imported state is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// The session task behind a handle is gone.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("session queue is closed")]
    Closed,
    #[error("session dropped the command before replying")]
    Dropped,
}
