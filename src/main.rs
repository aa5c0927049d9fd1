use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::Rng;

use maze_escape::term::{TerminalConsole, TerminalGuard};
use maze_escape::{Difficulty, Menu, SystemClock};

/// Escape a freshly carved maze before the countdown ends.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Difficulty preselected in the settings menu.
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed for reproducible sessions.
    #[arg(long, env = "MAZE_ESCAPE_SEED")]
    seed: Option<u64>,

    /// Countdown in seconds, overriding the difficulty's.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    time_limit: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // stderr shares the terminal with the alternate screen; keep it quiet
    // unless RUST_LOG asks for more.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let guard = TerminalGuard::enter(io::stdout()).context("preparing the terminal")?;
    let result = run(&args, io::stdout());
    guard.restore().context("restoring the terminal")?;
    result
}

fn run(args: &Args, stdout: Stdout) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("seed {seed}, difficulty {}", args.difficulty);

    let mut menu = Menu::new(args.difficulty, seed);
    if let Some(secs) = args.time_limit {
        menu = menu.with_time_limit(Duration::from_secs(secs));
    }
    let mut console = TerminalConsole::new(stdout);
    let clock = SystemClock::new();
    menu.run(&mut console, &clock).context("terminal I/O failed")?;
    Ok(())
}
