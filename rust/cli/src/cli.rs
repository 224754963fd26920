//! Command-line argument definitions (clap derive).

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hilo", about = "Equation Hi-Lo card game", version)]
pub struct HiloCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play an interactive game against AI opponents
    Play {
        /// Number of AI opponents
        #[arg(long, default_value_t = 3)]
        ai: usize,
        /// Round limit, 0 = play until elimination
        #[arg(long, default_value_t = 10)]
        rounds: u32,
        /// RNG seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
        /// Disable AI evaluation noise
        #[arg(long)]
        no_mistakes: bool,
    },
    /// Run headless AI-only games and write round records
    Sim {
        /// Number of games to simulate
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// RNG seed for the first game (subsequent games increment it)
        #[arg(long)]
        seed: Option<u64>,
        /// JSONL output path for round records
        #[arg(long)]
        out: Option<String>,
    },
    /// Solve a hand and print the best LOW and HIGH equations
    Solve {
        /// Comma-separated number card values, e.g. "9,3,2"
        #[arg(long)]
        cards: String,
        /// Comma-separated operators, e.g. "+,-,÷" (defaults to the
        /// starting rack)
        #[arg(long)]
        ops: Option<String>,
        /// Number of √ cards to apply (each one must be used)
        #[arg(long, default_value_t = 0)]
        sqrt: usize,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
