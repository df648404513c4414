//! Leaderboard payloads and a SQLite store that upserts them by player id.

use crate::snapshot::export_value;
use crate::PersistError;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sim_core::money::{from_decimal, to_cents};
use sim_core::PlayerState;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// What a client submits to the leaderboard. Money is rounded to cents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardPayload {
    /// Assigned by the first acknowledgement; `None` on first submission.
    pub id: Option<String>,
    pub name: String,
    pub home_state: String,
    pub goal: String,
    pub wallet: Decimal,
    pub savings: Decimal,
    pub net: Decimal,
    pub rep: f64,
    pub day: u32,
    /// Monthly lifestyle total.
    pub lifestyle: Decimal,
    pub happiness: f64,
    pub high_net: Decimal,
    pub taxes_paid: Decimal,
    pub charity_given: Decimal,
    /// Full snapshot with trimmed ledger and timeline tails.
    pub state: serde_json::Value,
}

impl LeaderboardPayload {
    pub fn from_state(state: &PlayerState, tail: usize) -> Result<Self, PersistError> {
        Ok(Self {
            id: state.profile.id.clone(),
            name: state.profile.name.clone(),
            home_state: state.profile.home_state.clone(),
            goal: state.profile.goal.clone(),
            wallet: to_cents(state.wallet),
            savings: to_cents(state.savings),
            net: to_cents(state.net_worth),
            rep: state.reputation,
            day: state.day,
            lifestyle: to_cents(state.lifestyle.total()),
            happiness: state.happiness,
            high_net: to_cents(state.high_net),
            taxes_paid: to_cents(state.stats.taxes_paid),
            charity_given: to_cents(state.stats.charity_given),
            state: export_value(state, tail)?,
        })
    }
}

/// Reply to a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardAck {
    pub ok: bool,
    pub id: Option<String>,
}

/// One ranked row.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct LeaderboardRow {
    pub id: String,
    pub name: String,
    pub state: String,
    pub net: f64,
    pub high_net: f64,
    pub rep: f64,
    pub day: i64,
    pub updated: String,
}

pub struct SqliteLeaderboard {
    pool: SqlitePool,
}

fn new_player_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

fn display_name(name: &str, id: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        let tail: String = id.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("Player {tail}")
    } else {
        name.to_string()
    }
}

impl SqliteLeaderboard {
    /// Open (creating if missing) the database at `url` and apply migrations.
    pub async fn connect(url: &str) -> Result<Self, PersistError> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .filter(|p| !p.starts_with(":memory:"));
        if let Some(parent) = path.and_then(|p| std::path::Path::new(p).parent()) {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        Self::open(opts).await
    }

    /// Private in-memory store, used by tests and dry runs.
    pub async fn in_memory() -> Result<Self, PersistError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::open(opts).await
    }

    async fn open(opts: SqliteConnectOptions) -> Result<Self, PersistError> {
        // A single long-lived connection keeps in-memory databases alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert or update the player's row. New players get a fresh id.
    pub async fn submit(&self, p: &LeaderboardPayload) -> Result<LeaderboardAck, PersistError> {
        let id = p
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_player_id);
        let home_state = if p.home_state.trim().is_empty() {
            "Unknown"
        } else {
            p.home_state.as_str()
        };
        let last_state = serde_json::to_string(&p.state)?;
        sqlx::query(
            "INSERT INTO players (
                id, name, state, wallet, savings, net, rep, updated,
                goal, day, lifestyle, happiness, high_net, taxes_paid, charity_given, last_state
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                state = excluded.state,
                wallet = excluded.wallet,
                savings = excluded.savings,
                net = excluded.net,
                rep = excluded.rep,
                updated = excluded.updated,
                goal = excluded.goal,
                day = excluded.day,
                lifestyle = excluded.lifestyle,
                happiness = excluded.happiness,
                high_net = excluded.high_net,
                taxes_paid = excluded.taxes_paid,
                charity_given = excluded.charity_given,
                last_state = excluded.last_state",
        )
        .bind(&id)
        .bind(display_name(&p.name, &id))
        .bind(home_state)
        .bind(from_decimal(p.wallet))
        .bind(from_decimal(p.savings))
        .bind(from_decimal(p.net))
        .bind(p.rep)
        .bind(Utc::now().to_rfc3339())
        .bind(&p.goal)
        .bind(i64::from(p.day))
        .bind(from_decimal(p.lifestyle))
        .bind(p.happiness)
        .bind(from_decimal(p.high_net))
        .bind(from_decimal(p.taxes_paid))
        .bind(from_decimal(p.charity_given))
        .bind(last_state)
        .execute(&self.pool)
        .await?;
        info!(%id, net = %p.net, "leaderboard updated");
        Ok(LeaderboardAck { ok: true, id: Some(id) })
    }

    /// Highest current net worth first.
    pub async fn top(&self, limit: u32) -> Result<Vec<LeaderboardRow>, PersistError> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            "SELECT id, name, state, net, high_net, rep, day, updated
             FROM players ORDER BY net DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        debug!(rows = rows.len(), "leaderboard read");
        Ok(rows)
    }

    /// Stored snapshot for a player, if any.
    pub async fn last_state(&self, id: &str) -> Result<Option<serde_json::Value>, PersistError> {
        let raw: Option<Option<String>> =
            sqlx::query_scalar("SELECT last_state FROM players WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        match raw.flatten() {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }
}
