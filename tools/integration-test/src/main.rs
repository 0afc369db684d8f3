//! End-to-end season run: results feed files, league scoring, persistence export.
//!
//! Usage: `integration-test [FEED_DIR] [DATA_DIR]`
//!
//! Without a feed directory a sample season is written to a temporary
//! directory first. The league is configured from the environment (see
//! `LeagueConfig::from_env`), a `.env` file is honored.

mod logging;

use anyhow::{ensure, Context, Result};
use event_results::feed::event_file_name;
use event_results::{EventResult, FeedRow, JsonFileFeed, Outcome, PdgaNumber};
use league::{League, LeagueConfig, LeagueError};
use persistence::{archive_event_results, LocalJsonExporter, PersistenceConfig, PersistenceExporter};
use player_registry::Player;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

const SAMPLE_PLAYERS: [(u32, &str, u32); 6] = [
    (27523, "paul mcbeth", 1050),
    (45971, "calvin heimburg", 1043),
    (38008, "ricky wysocki", 1046),
    (75412, "gannon buhr", 1041),
    (37817, "eagle mcmahon", 1038),
    (50670, "isaac robinson", 1036),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::initialize_logging();

    println!("🥏 Starting Disc Golf Fantasy League integration run");

    let config = LeagueConfig::from_env().context("loading league configuration")?;
    let season = config.season;

    let mut args = std::env::args().skip(1);
    let scratch = TempDir::new()?;
    let feed_dir = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => {
            let dir = scratch.path().join("feed");
            seed_sample_season(&dir, season).await?;
            dir
        }
    };
    let data_dir = args.next().map(PathBuf::from).unwrap_or_else(|| scratch.path().join("data"));

    // Step 1: load the season's results
    println!("\n📥 Step 1: Loading {season} results from {}", feed_dir.display());
    let feed = JsonFileFeed::new(&feed_dir);
    let events = feed.load_season(season).await.context("loading season results")?;
    println!("✅ Loaded {} events", events.len());

    // Step 2: build the league
    println!("\n🏗️  Step 2: Building league");
    let mut league = League::new(config)?;
    register_players(&mut league, &events)?;
    draft_teams(&mut league)?;
    for team in league.teams() {
        println!(
            "   {} ({}): {} rostered, {} active",
            team.name,
            team.owner,
            team.roster().len(),
            team.roster().active_count()
        );
    }

    // Step 3: score every event
    println!("\n🧮 Step 3: Scoring events");
    let persistence_config = PersistenceConfig::new(&data_dir);
    for event in &events {
        let report = league.ingest_event(event)?;
        println!(
            "   {}: {} scored, {} not played, {} data errors",
            report.event_name, report.scored, report.not_played, report.data_errors
        );

        match archive_event_results(persistence_config.events_dir(), event).await {
            Ok(path) => info!("Archived {} to {}", event, path.display()),
            Err(e) => warn!("Could not archive {}: {}", event, e),
        }
    }

    if let Some(first) = events.first() {
        match league.ingest_event(first) {
            Err(LeagueError::DuplicateEvent(name)) => println!("✅ Re-ingesting {name} was rejected"),
            other => anyhow::bail!("re-ingesting {first} should be rejected, got {other:?}"),
        }
    }

    // Step 4: report
    println!("\n📊 Step 4: Season report");
    for summary in league.season_summaries() {
        println!("{summary}\n");
    }
    let team_names: Vec<String> = league.teams().iter().map(|team| team.name.clone()).collect();
    for name in &team_names {
        let all = league.team_aggregate(name, false)?;
        let active = league.team_aggregate(name, true)?;
        println!("   {name}: roster [{all}] active [{active}]");
    }

    // Step 5: export
    println!("\n💾 Step 5: Exporting to {}", data_dir.display());
    let rows = league.export_rows();
    let exporter = LocalJsonExporter::new(persistence_config)?;
    let written = exporter.export(&rows).await?;
    let reloaded = if rows.is_empty() { Vec::new() } else { exporter.load_season(season).await? };
    ensure!(written == rows.len(), "exporter wrote {written} of {} rows", rows.len());
    ensure!(reloaded == rows, "exported season does not match the league's rows");
    println!("✅ Exported {written} rows");

    println!("\n🎉 Integration run complete");
    Ok(())
}

/// Register every player that appears in the season's results
fn register_players(league: &mut League, events: &[EventResult]) -> Result<()> {
    for event in events {
        for row in event.rows() {
            if league.registry().contains(row.pdga_number) {
                continue;
            }
            let mut player = Player::new(row.pdga_number, &row.name);
            if let Some(rating) = row.rating {
                player = player.with_rating(rating);
            }
            league.register_player(player)?;
        }
    }
    info!("Registered {} players", league.registry().len());
    Ok(())
}

/// Split registered players between two teams in snake order
fn draft_teams(league: &mut League) -> Result<()> {
    league.create_team("Alex", "Chain Bangers")?;
    league.create_team("Sam", "Tree Kickers")?;

    let mut pool: Vec<(PdgaNumber, u32)> =
        league.registry().players().map(|p| (p.pdga_number, p.rating.unwrap_or(0))).collect();
    pool.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let order = ["Chain Bangers", "Tree Kickers", "Tree Kickers", "Chain Bangers"];
    for (pick, (number, _)) in pool.into_iter().enumerate() {
        let team = order[pick % order.len()];
        match league.add_to_team(team, number) {
            Ok(()) => {}
            Err(LeagueError::Roster(e)) => {
                warn!("{} not drafted by {}: {}", number, team, e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Write a small season of results as feed documents under `dir/<season>/`
async fn seed_sample_season(dir: &Path, season: i32) -> Result<()> {
    let season_dir = dir.join(season.to_string());
    tokio::fs::create_dir_all(&season_dir).await?;

    let row = |index: usize, outcome: Outcome| {
        let (number, name, rating) = SAMPLE_PLAYERS[index];
        FeedRow::new(number, name, outcome).with_rating(rating)
    };

    let events = vec![
        EventResult::new(
            "Las Vegas Challenge",
            season,
            vec![
                row(0, Outcome::Placed(1)),
                row(1, Outcome::Placed(2)),
                row(2, Outcome::Dnf),
                row(3, Outcome::Placed(3)),
                row(4, Outcome::Error),
            ],
        )?,
        EventResult::new(
            "Waco Annual Charity Open",
            season,
            vec![
                row(1, Outcome::Placed(1)),
                row(5, Outcome::Placed(2)),
                row(0, Outcome::Placed(4)),
                row(2, Outcome::Placed(3)),
            ],
        )?,
        EventResult::new(
            "Champions Cup",
            season,
            vec![row(3, Outcome::Placed(1)), row(4, Outcome::Placed(2)), row(5, Outcome::Dnf)],
        )?,
    ];

    for event in &events {
        let path = season_dir.join(event_file_name(event.name()));
        tokio::fs::write(&path, serde_json::to_string_pretty(event)?).await?;
    }
    info!("Seeded {} sample events in {}", events.len(), season_dir.display());
    Ok(())
}
