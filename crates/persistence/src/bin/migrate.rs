#![deny(warnings)]

use persistence::{default_sqlite_url, SqliteLeaderboard};

/// Create (or upgrade) the leaderboard database and print the current top ten.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| default_sqlite_url().to_string());
    let board = SqliteLeaderboard::connect(&url).await?;
    let rows = board.top(10).await?;
    println!("DB migrated at {} ({} ranked players)", url, rows.len());
    for (rank, row) in rows.iter().enumerate() {
        println!("{:>3}. {:<24} {:>16.2}  day {}", rank + 1, row.name, row.net, row.day);
    }
    Ok(())
}
