//! Brackle - CLI
//!
//! Daily bracket-height puzzle with TUI and line-based modes.

use anyhow::{Context, Result};
use brackle::{
    commands::{check_guess, run_calendar, run_simple},
    config::Config,
    core::Grammar,
    game::{Game, GameOptions, MemoryStore},
    output::{print_calendar_report, print_check_report, print_stats},
    telemetry,
    universe::{DailySelector, Universe, parse_day},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "brackle",
    about = "Daily bracket-height puzzle: find the hidden ( ) * sequence in 6 tries",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for saved games and stats (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Play a specific UTC day (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    date: Option<String>,

    /// Keep progress in memory only
    #[arg(long, global = true)]
    no_save: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based play without TUI)
    Simple {
        /// Play a random answer; stats are not touched
        #[arg(short, long)]
        practice: bool,
    },

    /// Print the answer for the selected day
    Answer,

    /// Score one guess against the selected day's answer
    Check {
        /// Guess such as "(*()*)**"
        guess: String,

        /// Also print the answer
        #[arg(short, long)]
        reveal: bool,
    },

    /// Show saved statistics
    Stats,

    /// Show the answer universe
    Universe {
        /// List every member in selection order
        #[arg(short, long)]
        list: bool,
    },

    /// Answer distribution over a range of days
    Calendar {
        /// First day (default: the selected day)
        #[arg(short, long)]
        from: Option<String>,

        /// Number of days
        #[arg(short = 'n', long, default_value = "365")]
        days: u32,

        /// How many of the most frequent answers to list
        #[arg(short, long, default_value = "10")]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::new(cli.data_dir, cli.date.as_deref(), cli.no_save)?;

    let command = cli.command.unwrap_or(Commands::Play);
    if matches!(command, Commands::Play) {
        // Stderr output would corrupt the alternate screen
        if let Some(dir) = config.log_dir()
            && let Err(e) = telemetry::init_file(dir)
        {
            eprintln!("warning: logging disabled: {e}");
        }
    } else {
        telemetry::init_stderr();
    }

    let universe = Universe::new(Grammar::default());
    tracing::debug!(size = universe.len(), "answer universe ready");

    match command {
        Commands::Play => run_play_command(&universe, &config),
        Commands::Simple { practice } => run_simple_command(&universe, &config, practice),
        Commands::Answer => {
            let date = config.play_date();
            let answer = DailySelector::new(&universe).answer_for(date);
            println!("{} {answer}", date.format("%Y-%m-%d"));
            Ok(())
        }
        Commands::Check { guess, reveal } => {
            let report = check_guess(&universe, config.play_date(), &guess, reveal)
                .map_err(|e| anyhow::anyhow!("Invalid input: {e}"))?;
            print_check_report(&report);
            Ok(())
        }
        Commands::Stats => {
            let game = Game::open(
                &universe,
                config.open_store(),
                config.play_date(),
                GameOptions::default(),
            );
            print_stats(&game.stats_snapshot());
            Ok(())
        }
        Commands::Universe { list } => {
            println!(
                "{} answers of length {} (max height {})",
                universe.len(),
                universe.grammar().seq_len(),
                universe.grammar().max_height()
            );
            if list {
                for (i, member) in universe.members().iter().enumerate() {
                    println!("{i:4}  {member}");
                }
            }
            Ok(())
        }
        Commands::Calendar { from, days, top } => {
            let from = match from {
                Some(d) => parse_day(&d).with_context(|| format!("invalid date '{d}'"))?,
                None => config.play_date(),
            };
            let report = run_calendar(&universe, from, days, top, true);
            print_calendar_report(&report);
            Ok(())
        }
    }
}

fn run_simple_command(universe: &Universe, config: &Config, practice: bool) -> Result<()> {
    let mut game = if practice {
        use rand::prelude::IndexedRandom;

        let answer = universe
            .members()
            .choose(&mut rand::rng())
            .cloned()
            .context("answer universe is empty")?;
        Game::open(
            universe,
            Box::new(MemoryStore::new()),
            config.play_date(),
            GameOptions {
                practice_answer: Some(answer),
            },
        )
    } else {
        Game::open(
            universe,
            config.open_store(),
            config.play_date(),
            GameOptions::default(),
        )
    };
    run_simple(&mut game).map_err(|e| anyhow::anyhow!(e))
}

fn run_play_command(universe: &Universe, config: &Config) -> Result<()> {
    use brackle::interactive::{App, run_tui};

    let game = Game::open(
        universe,
        config.open_store(),
        config.play_date(),
        GameOptions::default(),
    );
    run_tui(App::new(game, config.follows_clock()))
}
