// What the auto-ping service tells the outside world, and the console
// rendering of it used by the interactive CLI.

use super::{PingError, StatusSnapshot};
use crossterm::style::Stylize;
use std::io::Write;
use std::time::Duration;

/// Notifications emitted by [`super::AutoPingService`]. Emitted outside the
/// state lock, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingEvent {
    Started { interval: Duration },
    /// Timer released, manually or after too many failures.
    Stopped,
    TickSucceeded { tick_count: u64 },
    /// Periodic status line, every `summary_every` successful ticks.
    Summary(StatusSnapshot),
    TickFailed {
        failures: u32,
        threshold: u32,
        error: PingError,
    },
    /// Emitted on every even failure count below the threshold.
    FailureWarning { failures: u32, threshold: u32 },
    ThresholdExceeded { failures: u32, threshold: u32 },
}

/// Receives service events. Implementations must be cheap: they run on the
/// timer thread between ticks.
pub trait PingReporter: Send + Sync {
    fn report(&self, event: &PingEvent);
}

/// Discards every event.
pub struct SilentReporter;

impl PingReporter for SilentReporter {
    fn report(&self, _event: &PingEvent) {}
}

/// Prints one-character tick markers and short status blocks to stdout.
pub struct ConsoleReporter {
    debug: bool,
}

impl ConsoleReporter {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    fn marker(&self, text: String) {
        let mut out = std::io::stdout();
        let _ = write!(out, "{}", text);
        let _ = out.flush();
    }
}

impl PingReporter for ConsoleReporter {
    fn report(&self, event: &PingEvent) {
        match event {
            PingEvent::Started { interval } => {
                println!("{}", "Starting auto-ping...".green());
                println!("{}", format!("Interval: {}s", interval.as_secs()).dark_grey());
                println!("{}", "Endpoint: GET /status".dark_grey());
                println!(
                    "{}",
                    "Pings run in the background to keep the connection active.\n".dark_grey()
                );
            }
            PingEvent::Stopped => println!("{}", "Auto-ping stopped".red()),
            PingEvent::TickSucceeded { .. } => self.marker("•".green().to_string()),
            PingEvent::Summary(status) => {
                println!(
                    "{}",
                    format!("\nPing #{} ok - uptime: {}", status.tick_count, status.uptime).blue()
                );
                println!(
                    "{}",
                    format!("Last ping: {}", status.last_tick.as_deref().unwrap_or("-")).dark_grey()
                );
                println!(
                    "{}",
                    format!(
                        "Errors: {}/{}\n",
                        status.consecutive_failures, status.failure_threshold
                    )
                    .dark_grey()
                );
            }
            PingEvent::TickFailed { error, .. } => {
                self.marker("×".red().to_string());
                if self.debug {
                    println!("{}", format!("\nDebug - error: {}", error).dark_grey());
                }
            }
            PingEvent::FailureWarning { failures, threshold } => {
                println!(
                    "{}",
                    format!("\nError count: {}/{}", failures, threshold).yellow()
                );
            }
            PingEvent::ThresholdExceeded { failures, threshold } => {
                println!(
                    "{}",
                    format!("\nToo many errors ({}/{})", failures, threshold).red()
                );
                println!("{}", "Stopping auto-ping to avoid spamming the server".red());
                println!("{}", "Possible causes:".yellow());
                println!("{}", "   • Token expired - a new token is needed".dark_grey());
                println!("{}", "   • Internet connection problems".dark_grey());
                println!("{}", "   • Gradient server under maintenance".dark_grey());
            }
        }
    }
}
