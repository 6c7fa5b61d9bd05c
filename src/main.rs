//! Crush command-line runner (default binary).
//!
//! Reads and updates saved progress, and plays levels headlessly with instant
//! settles, reporting completed levels back to the progress file.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crush::core::BoardConfig;
use crush::progress::{JsonFileBackend, ProgressStore, StoreConfig};
use crush::session::Session;

use cli::{Args, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match args.progress_file {
        Some(path) => StoreConfig::with_path(path),
        None => StoreConfig::from_env(),
    };
    let backend = JsonFileBackend::open(&config.path)
        .with_context(|| format!("opening progress at {}", config.path.display()))?;
    let mut store = ProgressStore::with_standard_levels(backend);

    match args.command {
        Command::Levels => print_levels(&store),
        Command::Progress => print_progress(&store),
        Command::Reset => {
            store.reset_progress()?;
            println!("progress reset");
        }
        Command::Play {
            level,
            seed,
            max_turns,
            json,
        } => play(&mut store, level, seed, max_turns, json)?,
    }
    Ok(())
}

fn print_levels(store: &ProgressStore<JsonFileBackend>) {
    println!(
        "{:>5} {:>7} {:>6} {:>16} {:>7} {:>6}",
        "level", "target", "moves", "stars at", "best", "stars"
    );
    for (level, progress) in store.catalog().iter().zip(store.all_progress()) {
        let thresholds = format!(
            "{}/{}/{}",
            level.stars.one, level.stars.two, level.stars.three
        );
        let stars = if progress.is_unlocked {
            "*".repeat(progress.stars as usize)
        } else {
            "locked".to_string()
        };
        println!(
            "{:>5} {:>7} {:>6} {:>16} {:>7} {:>6}",
            level.number,
            level.target_score,
            level.max_moves,
            thresholds,
            progress.best_score,
            stars
        );
    }
}

fn print_progress(store: &ProgressStore<JsonFileBackend>) {
    println!(
        "stars:     {}/{}",
        store.total_stars(),
        store.max_possible_stars()
    );
    println!(
        "completed: {}/{}",
        store.completed_count(),
        store.total_levels()
    );
    println!(
        "unlocked:  {}/{}",
        store.unlocked_count(),
        store.total_levels()
    );
}

fn play(
    store: &mut ProgressStore<JsonFileBackend>,
    number: u32,
    seed: Option<u32>,
    max_turns: u32,
    json: bool,
) -> Result<()> {
    let Some(level) = store.level(number).copied() else {
        bail!("no level {} (levels are 1-{})", number, store.total_levels());
    };
    if !store.progress_for(number).is_some_and(|p| p.is_unlocked) {
        bail!("level {} is locked", number);
    }

    let mut config = BoardConfig::from_env();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::new(level, &config).context("building board")?;
    let phase = session.play_until_done(max_turns);
    let completion = session.report(store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session.engine().snapshot())?);
        return Ok(());
    }

    for row in session.engine().board().to_layout() {
        println!("{}", row);
    }
    println!();
    println!(
        "level {}: {} after {} swaps, score {}/{}, {} moves left",
        number,
        phase.as_str(),
        session.turns(),
        session.engine().score(),
        session.engine().target_score(),
        session.engine().moves_remaining()
    );
    if let Some(result) = completion {
        println!(
            "stars: {}{}{}",
            result.stars,
            if result.is_new_high_score { ", new best" } else { "" },
            if result.unlocked_new_level { ", next level unlocked" } else { "" }
        );
    }
    Ok(())
}
