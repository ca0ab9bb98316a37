//! siglock CLI
//!
//! Usage:
//!   siglock                         # Interactive: Enter generates, s = status, q = quit
//!   siglock --once                  # One batch in real time, then exit
//!   siglock --simulate              # One full cycle in virtual time
//!   siglock --json                  # Display events as JSON lines

use clap::Parser;
use chrono::NaiveDateTime;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use siglock::core::{Clock, DisplaySink, FixedClock, GenerationOrchestrator, JsonSink, Settings, SystemClock, TerminalSink};
use siglock::types::{ConfigError, Phase};
use siglock::VERSION;

type Orchestrator = GenerationOrchestrator<Box<dyn DisplaySink>, Box<dyn Clock>, StdRng>;

#[derive(Parser, Debug)]
#[command(
    name = "siglock",
    version = VERSION,
    about = "Generate four time-seeded signals, then lock until the last one has passed",
    long_about = "siglock produces a batch of four bounded values (5.00x - 16.00x) paired\n\
                  with wall-clock times +2, +10, +20 and +30 minutes out. After a batch\n\
                  is published, requests are locked for 30 minutes.\n\n\
                  Phases:\n  \
                  IDLE       - Ready, press Enter to generate\n  \
                  ANALYZING  - Batch in progress (3.0s - 4.2s)\n  \
                  LOCKED     - Cooldown running, requests ignored"
)]
struct Args {
    /// Interactive mode - read commands from stdin (default)
    #[arg(short, long)]
    interactive: bool,

    /// Generate one batch in real time and exit
    #[arg(long)]
    once: bool,

    /// Run one full cycle in virtual time without sleeping
    #[arg(long)]
    simulate: bool,

    /// Output display events as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Countdown tick period in milliseconds (overrides config)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for the jitter/delay RNG (default: entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Pin the wall clock, e.g. 2024-03-09T14:00:00
    #[arg(long)]
    at: Option<NaiveDateTime>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_tracing();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    if args.simulate {
        run_simulate(&args, &settings);
    } else if args.once {
        run_once(&args, &settings).await;
    } else {
        run_interactive(&args, &settings).await;
    }
}

/// Install the stderr subscriber; RUST_LOG overrides the default level
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_settings(args: &Args) -> Result<Settings, ConfigError> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(tick_ms) = args.tick_ms {
        settings.tick_ms = tick_ms;
    }
    settings.validate()?;
    Ok(settings)
}

fn build(args: &Args, settings: &Settings) -> Orchestrator {
    let sink: Box<dyn DisplaySink> = if args.json {
        Box::new(JsonSink::stdout())
    } else {
        Box::new(TerminalSink::stdout(!args.no_color))
    };
    let clock: Box<dyn Clock> = match args.at {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    GenerationOrchestrator::new(sink, clock, rng, settings)
}

/// Run one full cycle in virtual time (no sleeping)
fn run_simulate(args: &Args, settings: &Settings) {
    if !args.json {
        print_header("Simulate", args.no_color);
    }
    let mut orch = build(args, settings);
    orch.request_generation();
    let reached = orch.run_until_idle();
    if !args.json {
        println!();
        println!("Cycle complete after {:.1}s (virtual)", reached.as_secs_f64());
    }
}

/// Generate one batch in real time, exit once it is published
async fn run_once(args: &Args, settings: &Settings) {
    if !args.json {
        print_header("Once", args.no_color);
    }
    let mut orch = build(args, settings);
    let start = Instant::now();
    orch.request_generation();

    while orch.batches_published() == 0 {
        match orch.next_deadline() {
            Some(due) => tokio::time::sleep_until(start + due).await,
            None => break,
        }
        orch.advance_to(start.elapsed());
    }
    if !args.json {
        println!();
    }
}

/// Interactive mode: stdin commands and timer tasks share one thread
async fn run_interactive(args: &Args, settings: &Settings) {
    if !args.json {
        print_header("Interactive", args.no_color);
        println!("Enter (or 'g') generates a batch, 's' shows status, 'q' quits.");
        println!();
    }

    let mut orch = build(args, settings);
    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = orch.next_deadline().map(|due| start + due);

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) | Err(_) => break,
                };
                orch.advance_to(start.elapsed());
                match line.trim().to_ascii_lowercase().as_str() {
                    "" | "g" | "generate" => {
                        // Ignored requests stay silent
                        orch.request_generation();
                    }
                    "s" | "status" => print_status(&orch, args.no_color),
                    "q" | "quit" | "exit" => break,
                    other => eprintln!("Unknown command: {}", other),
                }
            }
            _ = wait_until(deadline) => {
                orch.advance_to(start.elapsed());
            }
        }
    }

    if !args.json {
        println!();
        println!("Session ended. Batches: {}", orch.batches_published());
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

fn print_status(orch: &Orchestrator, no_color: bool) {
    let phase = orch.phase();
    let line = match phase {
        Phase::Locked { remaining } => format!(
            "{} {} | unlocks in {}",
            phase.emoji(),
            phase,
            humanize(Duration::from_secs(u64::from(remaining)))
        ),
        _ => format!("{} {}", phase.emoji(), phase),
    };
    if no_color {
        println!("{} | batches={}", line, orch.batches_published());
    } else {
        println!("{} | batches={}", line.bold(), orch.batches_published());
    }
}

fn humanize(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}m{:02}s", secs / 60, secs % 60)
}

fn print_header(mode: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  siglock v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("{}", "========================================".cyan());
        println!("  {} v{} - {}", "siglock".bold(), VERSION, mode);
        println!("{}", "========================================".cyan());
    }
}
