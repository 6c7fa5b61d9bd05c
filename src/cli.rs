use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Headless tile-matching puzzle: levels, progress, and auto-played sessions.
#[derive(Debug, Parser)]
#[command(name = "crush", version, about)]
pub struct Args {
    /// Progress file (defaults to CRUSH_PROGRESS_PATH, then the XDG config dir).
    #[arg(long, global = true, value_name = "FILE")]
    pub progress_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every level with its target, moves, and your progress.
    Levels,
    /// Show star and completion totals.
    Progress,
    /// Erase all saved progress.
    Reset,
    /// Auto-play an unlocked level using the engine's own hints.
    Play {
        /// Level number (1-based).
        #[arg(short, long)]
        level: u32,

        /// Board seed (defaults to CRUSH_SEED, then 1).
        #[arg(short, long)]
        seed: Option<u32>,

        /// Stop after this many swaps even if the level is still running.
        #[arg(long, default_value = "100", value_name = "N")]
        max_turns: u32,

        /// Print the final engine snapshot as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}
