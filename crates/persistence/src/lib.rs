#![deny(warnings)]

//! Persistence layer: JSON snapshots, compact local saves and the
//! SQLite-backed leaderboard.

pub mod leaderboard;
pub mod save;
pub mod snapshot;

pub use leaderboard::{LeaderboardAck, LeaderboardPayload, LeaderboardRow, SqliteLeaderboard};
pub use snapshot::{export_json, export_value, merge_import};

use thiserror::Error;

/// Failures at the storage boundary. None of these touch in-memory state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot must be a JSON object")]
    NotAnObject,
    #[error("save file is corrupt: {0}")]
    Save(#[from] bincode::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Returns the default SQLite URL used for the local leaderboard.
pub fn default_sqlite_url() -> &'static str {
    "sqlite://./saves/leaderboard.db"
}
