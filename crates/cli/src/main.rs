//! ratehue CLI - color-coded pace tracking against an hourly rate.

mod render;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ratehue_core::{Color, SessionConfig};
use ratehue_gradient::GradientInterpolator;
use ratehue_progress::{PaceEstimator, RateTracker};
use ratehue_session::{Command, RunnerConfig, SessionController, SessionRunner};
use render::{status_line, swatch, TerminalRenderer};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PALETTE: &str = "green,yellow,orange,red";

#[derive(Parser)]
#[command(name = "ratehue")]
#[command(about = "Color-coded pace tracking against an hourly rate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show goal, progress and color for one instant
    Color {
        /// Target completions per hour
        #[arg(long, default_value = "1")]
        rate: u32,
        /// Seconds elapsed
        #[arg(long)]
        elapsed: u64,
        /// Units completed
        #[arg(long, allow_negative_numbers = true)]
        completed: i64,
        /// Comma-separated palette, start color first
        #[arg(long, value_delimiter = ',', default_value = DEFAULT_PALETTE)]
        palette: Vec<Color>,
    },
    /// Run a live session. Stdin: enter or +N add, -N correct, s start,
    /// p pause, r reset, rate N, q quit
    Run {
        /// JSON session config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Target completions per hour
        #[arg(long)]
        rate: Option<u32>,
        /// Comma-separated palette, start color first
        #[arg(long, value_delimiter = ',')]
        palette: Option<Vec<Color>>,
        /// Log diagnostics every 10 seconds
        #[arg(long)]
        log: bool,
        /// Stop after this many ticks
        #[arg(long)]
        seconds: Option<u64>,
        /// Milliseconds per tick
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Wait for `s` before ticking
        #[arg(long)]
        paused: bool,
        /// Bar width in cells
        #[arg(long, default_value = "40")]
        width: u16,
    },
    /// Tick through a session without waiting, adding one unit every few seconds
    Simulate {
        /// Target completions per hour
        #[arg(long, default_value = "80")]
        rate: u32,
        /// Seconds to simulate
        #[arg(long, default_value = "3600")]
        seconds: u64,
        /// Add one unit every this many seconds
        #[arg(long, default_value = "45")]
        every: u64,
        /// Print one line every this many seconds
        #[arg(long, default_value = "300")]
        sample: u64,
        /// Comma-separated palette, start color first
        #[arg(long, value_delimiter = ',', default_value = DEFAULT_PALETTE)]
        palette: Vec<Color>,
        /// Log diagnostics every 10 seconds
        #[arg(long)]
        log: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Color { rate, elapsed, completed, palette } => {
            let mut tracker = RateTracker::new(rate);
            tracker.advance(elapsed);
            tracker.add_completed(completed);
            let snapshot = tracker.snapshot();
            let color = GradientInterpolator::new(palette).color_at(snapshot.progress_ratio);

            println!("Elapsed:   {}s", snapshot.elapsed_seconds);
            println!("Completed: {}", snapshot.completed);
            println!("Goal:      {:.2}", snapshot.goal_at_this_instant);
            println!("Progress:  {:.1}%", snapshot.progress_percent());
            println!("Color:     {} {}\x1b[0m", color, swatch(&color));
        }
        Commands::Run { config, rate, palette, log, seconds, interval_ms, paused, width } => {
            let mut session = match config {
                Some(path) => SessionConfig::load(&path).await?,
                None => SessionConfig::default().with_palette(default_palette()),
            };
            if let Some(rate) = rate {
                session.rate_per_hour = rate;
            }
            if let Some(palette) = palette {
                session.palette = palette;
            }
            if let Some(interval_ms) = interval_ms {
                session.tick_interval_ms = interval_ms;
            }
            session.logging |= log;
            session.validate()?;

            let controller = SessionController::new(&session);
            info!(
                session = %controller.id(),
                rate_per_hour = session.rate_per_hour,
                colors = session.palette.len(),
                "Session ready"
            );

            let (tx, rx) = mpsc::channel(32);
            if !paused {
                tx.send(Command::Start).await?;
            }
            spawn_stdin_reader(tx);

            let mut runner = SessionRunner::new(controller, TerminalRenderer::new(tokio::io::stdout(), width), rx)
                .with_config(RunnerConfig {
                    max_ticks: seconds,
                    ..RunnerConfig::from(&session)
                });
            let snapshot = runner.run().await?;

            println!();
            println!(
                "Finished: {} completed in {}s (goal {:.1})",
                snapshot.completed, snapshot.elapsed_seconds, snapshot.goal_at_this_instant
            );
            if let Some(average) = PaceEstimator::default().average_per_hour(&snapshot) {
                println!("Average per hour: {:.1}", average);
            }
        }
        Commands::Simulate { rate, seconds, every, sample, palette, log } => {
            let session = SessionConfig::default()
                .with_rate(rate)
                .with_palette(palette)
                .with_logging(log);
            let mut controller = SessionController::new(&session);
            controller.start();

            let sample = sample.max(1);
            for second in 1..=seconds {
                if every > 0 && second % every == 0 {
                    controller.add_completed(1);
                }
                let Some(frame) = controller.on_tick() else {
                    break;
                };
                if second % sample == 0 || second == seconds {
                    println!("{}\x1b[0m {}", swatch(&frame.color), status_line(&frame.snapshot, &frame.color));
                }
            }
        }
    }

    Ok(())
}

fn default_palette() -> Vec<Color> {
    vec![Color::GREEN, Color::YELLOW, Color::ORANGE, Color::RED]
}

/// Forward stdin lines as session commands.
///
/// Runs on a plain thread: a blocking stdin read inside the runtime would
/// hold up shutdown until the next line arrives.
fn spawn_stdin_reader(tx: mpsc::Sender<Command>) {
    let runtime = Handle::current();
    std::thread::spawn(move || forward_commands(std::io::stdin().lock(), tx, &runtime));
}

/// Send each parsed line of `input` to the session.
///
/// Returns once the session stops listening, or after a quit. When `input`
/// runs dry first, the sender is held until the session ends on its own.
fn forward_commands(input: impl BufRead, tx: mpsc::Sender<Command>, runtime: &Handle) {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            warn!(input = %line.trim(), "Unrecognized command");
            continue;
        };
        if tx.blocking_send(command).is_err() || command == Command::Shutdown {
            return;
        }
    }
    debug!("Input closed");
    runtime.block_on(tx.closed());
}

fn parse_command(line: &str) -> Option<Command> {
    let input = line.trim().to_lowercase();
    match input.as_str() {
        "" | "+" => return Some(Command::Add(1)),
        "-" => return Some(Command::Add(-1)),
        "s" | "start" => return Some(Command::Start),
        "p" | "pause" => return Some(Command::Pause),
        "r" | "reset" => return Some(Command::Reset),
        "q" | "quit" => return Some(Command::Shutdown),
        _ => {}
    }

    if let Some(rate) = input.strip_prefix("rate") {
        return rate.trim().parse().ok().map(Command::SetRate);
    }
    if let Some(count) = input.strip_prefix('+') {
        return count.trim().parse().ok().map(Command::Add);
    }
    if input.starts_with('-') {
        return input.parse().ok().map(Command::Add);
    }
    None
}
