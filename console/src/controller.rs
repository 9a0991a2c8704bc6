//! Interactive session controller
//!
//! Owns the speed selection and the output line, runs one effect at a time
//! and hands control back to the menu once the effect is interrupted.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration as StdDuration;

use anyhow::{Context, anyhow};
use myrtio_pin_effects::{CancelToken, EffectId, OutputLine, Player, SessionError, Speed};
use tracing::{info, warn};

use crate::output::ThreadDelay;

/// Raised by the interrupt watcher to stop the running effect
pub static STOP: CancelToken = CancelToken::new();

/// Set while an effect is playing
pub static PLAYING: AtomicBool = AtomicBool::new(false);

/// Pause after an interrupted effect before the menu comes back
const RETURN_PAUSE: StdDuration = StdDuration::from_millis(400);

/// Preset speeds offered by the speed chooser
const SLOW: f32 = 0.5;
const NORMAL: f32 = 1.0;
const FAST: f32 = 2.0;

pub struct Controller<L: OutputLine> {
    pin: u8,
    line: L,
    speed: Speed,
    player: Player<ThreadDelay>,
}

impl<L: OutputLine> Controller<L> {
    pub fn new(pin: u8, line: L, speed: Speed, player: Player<ThreadDelay>) -> Self {
        Self {
            pin,
            line,
            speed,
            player,
        }
    }

    /// Menu loop; returns when the user quits or stdin closes
    pub fn run_menu(&mut self) -> anyhow::Result<()> {
        println!("Raspberry Pi LED Effects — Speed Control Enabled");
        println!("Tip: Use a 220–330 Ω resistor in series with the LED.");

        loop {
            println!("\n=== MENU ===");
            for id in EffectId::ALL {
                println!("{}. {}", id.raw(), id.title());
            }
            println!("q. Quit");
            println!("Current speed: {}", self.speed);

            let Some(choice) =
                prompt("Select a mode (1-4), 's' to change speed, or 'q' to quit: ")?
            else {
                return Ok(());
            };

            match choice.to_lowercase().as_str() {
                "q" => {
                    println!("Goodbye!");
                    return Ok(());
                }
                "s" => self.speed = choose_speed(self.speed)?,
                other => match other.parse::<u8>().ok().and_then(EffectId::from_raw) {
                    Some(id) => {
                        let tweak = prompt("Change speed for this run? (y/N): ")?;
                        let speed = if tweak.is_some_and(|answer| answer.eq_ignore_ascii_case("y")) {
                            choose_speed(self.speed)?
                        } else {
                            self.speed
                        };
                        if self.play(id, speed)? {
                            println!("\n↩ Returning to menu...\n");
                            thread::sleep(RETURN_PAUSE);
                        }
                    }
                    None => println!("Invalid choice. Try again."),
                },
            }
        }
    }

    /// Play one effect until interrupted
    ///
    /// Returns `false` when the line could not be acquired; that is reported
    /// to the user and is not an error.
    pub fn play(&mut self, id: EffectId, speed: Speed) -> anyhow::Result<bool> {
        println!(
            "▶ {} @ speed {} (GPIO{}). Ctrl+C to stop.",
            id.title(),
            speed,
            self.pin
        );

        STOP.reset();
        PLAYING.store(true, Ordering::Release);
        let result = self
            .player
            .play_named(id.as_str(), speed.get(), &mut self.line, &STOP);
        PLAYING.store(false, Ordering::Release);

        match result {
            Ok(report) => {
                if report.cleanup_failed {
                    warn!(pin = self.pin, "effect stopped but the line may not be idle");
                }
                info!(effect = %id, steps = report.steps, "effect stopped");
                Ok(true)
            }
            Err(SessionError::SinkUnavailable(err)) => {
                println!("GPIO{} unavailable: {err:?}", self.pin);
                Ok(false)
            }
            Err(err) => Err(anyhow!("{err}")),
        }
    }
}

/// Ask the user for a speed multiplier
///
/// Enter keeps `current`; a custom value is asked for until it is a finite
/// number above zero.
pub fn choose_speed(current: Speed) -> anyhow::Result<Speed> {
    println!("\nSpeed options:");
    println!(" 1) Slow ({SLOW}×)");
    println!(" 2) Normal ({NORMAL}×)");
    println!(" 3) Fast ({FAST}×)");
    println!(" 4) Custom (enter any positive number; e.g., 1.5)");
    println!("Enter to keep current ({current})");

    let Some(choice) = prompt("Select speed [1-4 or Enter]: ")? else {
        return Ok(current);
    };
    let speed = match choice.as_str() {
        "" => current,
        "1" => Speed::new(SLOW),
        "2" => Speed::new(NORMAL),
        "3" => Speed::new(FAST),
        "4" => loop {
            let Some(raw) = prompt("Custom speed (>0): ")? else {
                return Ok(current);
            };
            match raw.parse::<f32>() {
                Ok(value) if value.is_finite() && value > 0.0 => break Speed::new(value),
                _ => println!("Invalid number. Try again."),
            }
        },
        _ => {
            println!("Invalid choice. Keeping current speed.");
            current
        }
    };
    Ok(speed)
}

/// Print `message` and read one trimmed line; `None` once stdin is closed
fn prompt(message: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{message}")?;
    stdout.flush()?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

