//! Console runner for myrtio-pin-effects
//!
//! Drives one GPIO pin through the built-in effects from a text menu.
//! Ctrl+C stops the running effect and returns to the menu; outside of an
//! effect it quits.

mod controller;
mod output;

use std::sync::atomic::Ordering;

use clap::Parser;
use myrtio_pin_effects::{Duration, EffectId, OutputLine, Player, PlayerConfig, Speed};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use controller::{Controller, PLAYING, STOP};
use output::{DryRunLine, ThreadDelay};

/// Exit code for a process stopped by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Parser)]
#[command(
    name = "myrtio-pin-console",
    about = "LED effects for a single GPIO pin with speed control"
)]
struct Args {
    /// GPIO pin number (BCM)
    #[arg(long, env = "PIN_EFFECTS_PIN", default_value_t = 17)]
    pin: u8,

    /// Speed multiplier (>0). >1 faster, <1 slower
    #[arg(long, env = "PIN_EFFECTS_SPEED", default_value_t = 1.0)]
    speed: f32,

    /// Play a single effect (name or menu key) until interrupted instead of
    /// showing the menu
    #[arg(long, value_parser = parse_effect)]
    effect: Option<EffectId>,

    /// Log every write instead of driving the GPIO pin
    #[arg(long)]
    dry_run: bool,

    /// Longest uninterrupted wait in milliseconds (0 disables slicing)
    #[arg(long, default_value_t = 50)]
    wait_slice_ms: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_effect(name: &str) -> Result<EffectId, String> {
    let by_key = || name.parse::<u8>().ok().and_then(EffectId::from_raw);
    EffectId::parse_from_str(name).or_else(by_key).ok_or_else(|| {
        let known: Vec<&str> = EffectId::ALL.iter().map(|id| id.as_str()).collect();
        format!("unknown effect '{name}', expected one of: {}", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tokio::spawn(watch_interrupts());

    tokio::task::spawn_blocking(move || run(&args)).await?
}

/// Route Ctrl+C to the running effect, or quit when nothing is playing
async fn watch_interrupts() {
    loop {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {err}");
            return;
        }
        if PLAYING.load(Ordering::Acquire) {
            STOP.cancel();
        } else {
            println!("\nGoodbye!");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.speed.is_nan() || args.speed <= 0.0 {
        warn!(speed = args.speed, "speed must be above zero, using the minimum");
    }
    let speed = Speed::new(args.speed);
    let player = Player::with_config(
        ThreadDelay,
        PlayerConfig {
            wait_slice: Duration::from_millis(args.wait_slice_ms),
        },
    );

    if args.dry_run {
        return start(args, DryRunLine::new(args.pin), speed, player);
    }

    #[cfg(feature = "gpio")]
    {
        start(args, output::GpioLine::new(args.pin), speed, player)
    }

    #[cfg(not(feature = "gpio"))]
    {
        anyhow::bail!("built without GPIO support, run with --dry-run")
    }
}

fn start<L: OutputLine>(
    args: &Args,
    line: L,
    speed: Speed,
    player: Player<ThreadDelay>,
) -> anyhow::Result<()> {
    let mut controller = Controller::new(args.pin, line, speed, player);
    match args.effect {
        Some(id) => controller.play(id, speed).map(|_| ()),
        None => controller.run_menu(),
    }
}
