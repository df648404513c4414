#![deny(warnings)]

//! Headless Windfall driver: claim a prize, run a scripted stretch of time
//! and print the resulting KPIs.

use anyhow::{bail, Context, Result};
use persistence::save::{read_save, write_save};
use persistence::SqliteLeaderboard;
use sim_core::{
    validate_catalog, validate_state, AssetClass, Catalog, PayoutKind, PlayerState, SimConfig,
};
use sim_runtime::{Notice, Observer, Session, WindfallSetup};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug)]
struct Args {
    amount: f64,
    home_state: String,
    payout: PayoutKind,
    name: String,
    goal: String,
    days: f64,
    step: f64,
    seed: Option<u64>,
    events: bool,
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    buys: Vec<String>,
    import: Option<PathBuf>,
    load: Option<PathBuf>,
    export: Option<PathBuf>,
    save: Option<PathBuf>,
    leaderboard: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            amount: 1_000_000.0,
            home_state: "MI".into(),
            payout: PayoutKind::Lump,
            name: "Player".into(),
            goal: String::new(),
            days: 365.0,
            step: 30.0,
            seed: None,
            events: true,
            config: None,
            catalog: None,
            buys: Vec::new(),
            import: None,
            load: None,
            export: None,
            save: None,
            leaderboard: None,
        }
    }
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = || it.next().with_context(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--amount" => args.amount = value()?.parse()?,
            "--state" => args.home_state = value()?,
            "--payout" => {
                args.payout = match value()?.as_str() {
                    "lump" => PayoutKind::Lump,
                    "annuity" => PayoutKind::Annuity,
                    other => bail!("unknown payout {other:?} (lump|annuity)"),
                }
            }
            "--name" => args.name = value()?,
            "--goal" => args.goal = value()?,
            "--days" => args.days = value()?.parse()?,
            "--step" => args.step = value()?.parse()?,
            "--seed" => args.seed = Some(value()?.parse()?),
            "--no-events" => args.events = false,
            "--config" => args.config = Some(value()?.into()),
            "--catalog" => args.catalog = Some(value()?.into()),
            "--buy" => args.buys.push(value()?),
            "--import" => args.import = Some(value()?.into()),
            "--load" => args.load = Some(value()?.into()),
            "--export" => args.export = Some(value()?.into()),
            "--save" => args.save = Some(value()?.into()),
            "--leaderboard" => args.leaderboard = Some(value()?),
            "--version" => {
                println!(
                    "windfall {} ({} built {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("GIT_SHA"),
                    env!("BUILD_DATE")
                );
                return Ok(None);
            }
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    Ok(Some(args))
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(serde_yaml::from_str(&text)?)
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("reading catalog {}", p.display()))?,
        None => BUILTIN_CATALOG.to_string(),
    };
    let catalog: Catalog = serde_json::from_str(&text)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

async fn load_state(path: &Path) -> Result<PlayerState> {
    let state = read_save(path)
        .await
        .with_context(|| format!("loading {}", path.display()))?;
    validate_state(&state).with_context(|| format!("invalid save {}", path.display()))?;
    Ok(state)
}

/// Mirrors notices into the log.
struct LogObserver;

impl Observer for LogObserver {
    fn notice(&mut self, notice: &Notice) {
        info!(target: "windfall", "{}", notice.message());
    }
}

fn buy_all(session: &mut Session, entries: &[String]) {
    for entry in entries {
        let Some((key, name)) = entry.split_once(':') else {
            warn!(%entry, "expected class:name");
            continue;
        };
        let Some(class) = AssetClass::from_key(key) else {
            warn!(%key, "unknown asset class");
            continue;
        };
        match session.buy(class, name) {
            Ok(id) => info!(%id, %class, name, "bought"),
            Err(reason) => warn!(%reason, "purchase refused"),
        }
    }
}

fn print_kpis(session: &Session) {
    let st = session.state();
    let bd = session.breakdown();
    println!(
        "Day {} ({}) | wallet: ${:.2} | savings: ${:.2} | assets: ${:.2} | debt: ${:.2}",
        st.day,
        st.current_date(),
        st.wallet,
        st.savings,
        bd.total(),
        st.debt
    );
    println!(
        "KPI | net: ${:.2} | peak: ${:.2} | happiness: {:.1} | reputation: {:.1} | taxes: ${:.2} | charity: ${:.2}",
        st.net_worth,
        st.high_net,
        st.happiness,
        st.reputation,
        st.stats.taxes_paid,
        st.stats.charity_given
    );
    println!(
        "Portfolio | cars: ${:.2} | houses: ${:.2} | items: ${:.2} | equity: ${:.2} | businesses: {}",
        bd.cars,
        bd.houses,
        bd.items,
        bd.business_equity,
        st.businesses.len()
    );
    for m in &st.milestones {
        println!("Milestone | {}", m.message());
    }
    println!("Achievements | {}", st.achievements.len());
    if let Some(end) = session.game_over() {
        println!(
            "GAME OVER | final net: ${:.2} | peak: ${:.2} | days: {}",
            end.final_net_worth, end.high_net, end.days_survived
        );
    }
}

/// Submit to the leaderboard first so the assigned player id lands in the
/// exported snapshot and the save file.
async fn publish(session: &mut Session, args: &Args) -> Result<()> {
    if let Some(url) = &args.leaderboard {
        let submitted = async {
            let board = SqliteLeaderboard::connect(url).await?;
            let ack = board.submit(&session.leaderboard_payload()?).await?;
            Ok::<_, persistence::PersistError>((board, ack))
        }
        .await;
        match submitted {
            Ok((board, ack)) => {
                session.apply_leaderboard_ack(&ack);
                println!("Leaderboard | ok: {} | id: {}", ack.ok, ack.id.as_deref().unwrap_or("-"));
                for (rank, row) in board.top(5).await?.iter().enumerate() {
                    println!("{:>3}. {:<20} ${:.2}", rank + 1, row.name, row.net);
                }
            }
            Err(err) => warn!(%err, "could not update leaderboard"),
        }
    }
    if let Some(path) = &args.export {
        tokio::fs::write(path, session.export_json()?).await?;
        info!(path = %path.display(), "exported snapshot");
    }
    if let Some(path) = &args.save {
        write_save(path, session.state()).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::DEBUG)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };
    info!(amount = args.amount, state = %args.home_state, days = args.days, "starting CLI");

    let mut config = load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    let catalog = load_catalog(args.catalog.as_ref())?;

    let mut session = match &args.load {
        Some(path) => Session::new(load_state(path).await?, catalog, config),
        None => {
            let setup = WindfallSetup {
                name: args.name.clone(),
                home_state: args.home_state.clone(),
                goal: args.goal.clone(),
                amount: args.amount,
                payout: args.payout,
            };
            Session::from_windfall(&setup, catalog, config)?
        }
    };
    session.add_observer(Box::new(LogObserver));

    if let Some(path) = &args.import {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => {
                if let Err(err) = session.import_json(&json) {
                    warn!(%err, "import failed; keeping current game");
                }
            }
            Err(err) => warn!(%err, path = %path.display(), "could not read import"),
        }
    }

    session.set_show_events(args.events);
    buy_all(&mut session, &args.buys);

    let (handle, task) = sim_runtime::spawn(session);
    let step = args.step.max(1.0);
    let mut remaining = args.days.max(0.0).round();
    while remaining > 0.0 {
        let days = remaining.min(step);
        let report = handle.advance(days).await?;
        info!(
            day = report.day,
            net = report.net_worth,
            entries = report.entries,
            events = report.events,
            "advanced"
        );
        remaining -= f64::from(report.days);
    }
    drop(handle);
    let mut session = task.await?;

    print_kpis(&session);

    publish(&mut session, &args).await?;
    Ok(())
}
