#![deny(warnings)]

//! Simulation runtime for Windfall.
//!
//! A [`Session`] owns one player's state, the catalog, tuning and a random
//! source. Time advancement, asset drift, business operations, random
//! events, milestone tracking and the bankruptcy check all run as methods on
//! it, and every wallet or asset change is routed through the ledger so net
//! worth and statistics stay consistent. [`driver`] moves a session onto a
//! task behind a serialized command queue.

mod business;
mod clock;
mod commands;
pub mod driver;
mod error;
mod events;
mod game_over;
mod ledger;
mod lifecycle;
pub mod liquidity;
mod observer;
pub mod portfolio;
mod progress;
mod session;

pub use business::{advance_stage, IpoOutcome};
pub use clock::AdvanceReport;
pub use commands::SaleReceipt;
pub use driver::{spawn, AutoAdvance, SessionHandle};
pub use error::{DriverError, ImportError, Rejection};
pub use events::{pool_size, EventOutcome};
pub use game_over::is_bankrupt;
pub use observer::{Notice, Observer};
pub use portfolio::Breakdown;
pub use progress::{achievement_earned, milestone_reached};
pub use session::{Session, WindfallSetup};
