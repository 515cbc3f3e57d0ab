//! chess-play - play both sides of a chess game in the terminal.
//!
//! Reads coordinate-notation moves from stdin and prints the board and game
//! status after each one.

mod config;
mod shell;

use clap::Parser;
use config::PlayConfig;
use shell::{Flow, Shell};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// chess-play - play both sides of a chess game in the terminal.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play both sides of a chess game in the terminal")]
struct Args {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw pieces as letters instead of Unicode glyphs
    #[arg(long)]
    ascii: bool,

    /// Do not list legal destinations after a rejected move
    #[arg(long)]
    hide_destinations: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(PlayConfig::default_path);
    let mut config = PlayConfig::load(&config_path)?;
    if args.ascii {
        config.unicode_pieces = false;
    }
    if args.hide_destinations {
        config.show_destinations = false;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::info!("Config: {:?} ({:?})", config, config_path);

    let mut shell = Shell::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    shell.show(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if shell.handle(&line, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    tracing::info!(plies = shell.game().ply_count(), "Exiting");
    Ok(())
}
