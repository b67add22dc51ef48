//! Auto-ping: a background keep-alive that probes the API on a fixed
//! interval and shuts itself down after too many consecutive failures.
//!
//! The service owns one timer thread per `start()`. All state lives behind a
//! single mutex; the timer thread only holds it for bookkeeping, never while
//! the probe is in flight, so `start`, `stop`, `status` and
//! `set_monitored_target` never wait on the network.
//!
//! Every `start()` opens a new generation. A timer thread or a late probe
//! result from an older generation finds a different generation under the
//! lock and drops out, which is what makes `stop()` final even while a probe
//! is still running.

mod reporter;

pub use reporter::{ConsoleReporter, PingEvent, PingReporter, SilentReporter};

use crate::format::{format_clock, format_duration};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Minimum length of a node id accepted by `set_monitored_target`.
pub const MIN_TARGET_LEN: usize = 10;

/// A single lightweight request whose only purpose is to confirm the remote
/// service is reachable.
pub trait LivenessProbe: Send + Sync + 'static {
    fn probe(&self) -> anyhow::Result<()>;
}

impl<F> LivenessProbe for F
where
    F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn probe(&self) -> anyhow::Result<()> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("node id must not be empty")]
    Empty,
    #[error("node id is too short ({len} < {min} characters)")]
    TooShort { len: usize, min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PingError {
    #[error("auto-ping is already running")]
    AlreadyRunning,
    #[error("auto-ping is not running")]
    NotRunning,
    #[error("ping timed out after {0:?}")]
    ProbeTimeout(Duration),
    #[error("ping failed: {0}")]
    ProbeFailed(String),
    #[error("could not start the ping timer: {0}")]
    Timer(String),
    #[error(transparent)]
    InvalidTarget(#[from] TargetError),
}

/// Timing and failure policy.
#[derive(Debug, Clone)]
pub struct PingConfig {
    pub interval: Duration,
    /// Upper bound for one probe. Kept below `interval` so ticks never stack.
    pub probe_timeout: Duration,
    pub failure_threshold: u32,
    /// Print a status summary every this many successful ticks.
    pub summary_every: u64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(10),
            failure_threshold: 5,
            summary_every: 20,
        }
    }
}

/// Read-only view of the service, with display strings already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub running: bool,
    pub tick_count: u64,
    pub consecutive_failures: u32,
    pub failure_threshold: u32,
    pub uptime: String,
    pub last_tick: Option<String>,
    pub next_tick: String,
    pub monitored_target: Option<String>,
}

struct TimerHandle {
    generation: u64,
    // Dropping the sender wakes the timer thread and ends it.
    _cancel: Sender<()>,
}

#[derive(Default)]
struct ServiceState {
    tick_count: u64,
    consecutive_failures: u32,
    started_at: Option<DateTime<Local>>,
    last_tick_at: Option<DateTime<Local>>,
    monitored_target: Option<String>,
    timer: Option<TimerHandle>,
    generation: u64,
}

impl ServiceState {
    fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.timer.as_ref().map(|t| t.generation) == Some(generation)
    }

    /// Shared by `stop()` and the threshold shutdown.
    fn release(&mut self) -> bool {
        self.started_at = None;
        self.timer.take().is_some()
    }

    fn snapshot(&self, config: &PingConfig, now: DateTime<Local>) -> StatusSnapshot {
        let uptime = match self.started_at {
            Some(started) => format_duration((now - started).num_seconds().max(0) as u64),
            None => "0s".into(),
        };
        let next_tick = match self.last_tick_at {
            Some(last) => chrono::Duration::from_std(config.interval)
                .ok()
                .and_then(|period| last.checked_add_signed(period))
                .map(|next| format_clock(&next))
                .unwrap_or_else(|| "soon".into()),
            None => "soon".into(),
        };
        StatusSnapshot {
            running: self.is_running(),
            tick_count: self.tick_count,
            consecutive_failures: self.consecutive_failures,
            failure_threshold: config.failure_threshold,
            uptime,
            last_tick: self.last_tick_at.as_ref().map(format_clock),
            next_tick,
            monitored_target: self.monitored_target.clone(),
        }
    }
}

struct Shared {
    config: PingConfig,
    probe: Arc<dyn LivenessProbe>,
    reporter: Arc<dyn PingReporter>,
    state: Mutex<ServiceState>,
}

/// Periodic keep-alive service. Cheap to clone; clones control the same
/// service.
#[derive(Clone)]
pub struct AutoPingService {
    shared: Arc<Shared>,
}

impl AutoPingService {
    pub fn new<P, R>(probe: P, reporter: R, config: PingConfig) -> Self
    where
        P: LivenessProbe,
        R: PingReporter + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                config,
                probe: Arc::new(probe),
                reporter: Arc::new(reporter),
                state: Mutex::new(ServiceState::default()),
            }),
        }
    }

    pub fn config(&self) -> &PingConfig {
        &self.shared.config
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().is_running()
    }

    /// Arm the timer and schedule the first tick right away. The first probe
    /// runs on the timer thread, so this returns without touching the
    /// network.
    pub fn start(&self) -> Result<(), PingError> {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let generation = {
            let mut state = self.shared.lock();
            if state.is_running() {
                tracing::warn!("auto-ping start requested while already running");
                return Err(PingError::AlreadyRunning);
            }
            state.generation += 1;
            let generation = state.generation;
            state.started_at = Some(Local::now());
            state.tick_count = 0;
            state.consecutive_failures = 0;
            state.timer = Some(TimerHandle {
                generation,
                _cancel: cancel_tx,
            });
            generation
        };

        tracing::info!(
            generation,
            interval_secs = self.shared.config.interval.as_secs(),
            "auto-ping started"
        );
        self.shared.reporter.report(&PingEvent::Started {
            interval: self.shared.config.interval,
        });

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("auto-ping".into())
            .spawn(move || shared.run_timer(generation, cancel_rx));
        if let Err(e) = spawned {
            let mut state = self.shared.lock();
            if state.is_current(generation) {
                state.release();
            }
            tracing::error!(error = %e, "failed to spawn auto-ping timer");
            return Err(PingError::Timer(e.to_string()));
        }
        Ok(())
    }

    /// Release the timer. No tick result is applied after this returns; a
    /// probe that is still in flight finishes on its own and is ignored.
    pub fn stop(&self) -> Result<(), PingError> {
        {
            let mut state = self.shared.lock();
            if !state.release() {
                tracing::warn!("auto-ping stop requested while not running");
                return Err(PingError::NotRunning);
            }
        }
        tracing::info!("auto-ping stopped");
        self.shared.reporter.report(&PingEvent::Stopped);
        Ok(())
    }

    pub fn status(&self) -> StatusSnapshot {
        self.shared.lock().snapshot(&self.shared.config, Local::now())
    }

    /// Remember a node id for the status views. Does not change what the
    /// ticks probe.
    pub fn set_monitored_target(&self, id: &str) -> Result<(), PingError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TargetError::Empty.into());
        }
        let len = id.chars().count();
        if len < MIN_TARGET_LEN {
            return Err(TargetError::TooShort {
                len,
                min: MIN_TARGET_LEN,
            }
            .into());
        }
        self.shared.lock().monitored_target = Some(id.to_string());
        tracing::info!(node_id = id, "monitored node set");
        Ok(())
    }

    pub fn monitored_target(&self) -> Option<String> {
        self.shared.lock().monitored_target.clone()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Timer loop. Ticks are due at `start + k * interval` on the monotonic
    /// clock; slots that already passed are skipped, not replayed.
    fn run_timer(&self, generation: u64, cancel: Receiver<()>) {
        let period = self.config.interval.max(Duration::from_millis(1));
        let mut due = Instant::now();
        loop {
            if !self.tick(generation) {
                break;
            }
            due += period;
            let now = Instant::now();
            if due <= now {
                let mut skipped = 0u32;
                while due <= now {
                    due += period;
                    skipped += 1;
                }
                tracing::debug!(skipped, "tick overran its slot, skipping missed ticks");
            }
            match cancel.recv_timeout(due - now) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!(generation, "auto-ping timer exited");
    }

    /// One tick. Returns false once this generation is no longer running.
    fn tick(&self, generation: u64) -> bool {
        if !self.lock().is_current(generation) {
            return false;
        }

        let outcome = self.probe_with_timeout();

        let (events, still_running) = {
            let mut state = self.lock();
            if !state.is_current(generation) {
                tracing::debug!("discarding probe result after stop");
                return false;
            }
            let threshold = self.config.failure_threshold;
            let mut events = Vec::with_capacity(3);
            match outcome {
                Ok(()) => {
                    let now = Local::now();
                    state.tick_count += 1;
                    state.last_tick_at = Some(now);
                    state.consecutive_failures = 0;
                    events.push(PingEvent::TickSucceeded {
                        tick_count: state.tick_count,
                    });
                    if self.config.summary_every > 0
                        && state.tick_count % self.config.summary_every == 0
                    {
                        events.push(PingEvent::Summary(state.snapshot(&self.config, now)));
                    }
                    (events, true)
                }
                Err(error) => {
                    state.consecutive_failures += 1;
                    let failures = state.consecutive_failures;
                    tracing::warn!(failures, threshold, %error, "auto-ping probe failed");
                    events.push(PingEvent::TickFailed {
                        failures,
                        threshold,
                        error,
                    });
                    if failures >= threshold {
                        state.release();
                        tracing::error!(failures, "auto-ping stopped after too many failures");
                        events.push(PingEvent::ThresholdExceeded { failures, threshold });
                        events.push(PingEvent::Stopped);
                        (events, false)
                    } else {
                        if failures % 2 == 0 {
                            events.push(PingEvent::FailureWarning { failures, threshold });
                        }
                        (events, true)
                    }
                }
            }
        };

        for event in &events {
            self.reporter.report(event);
        }
        still_running
    }

    /// Run the probe on a worker thread and give up after `probe_timeout`.
    /// A probe that overruns keeps its thread until it returns; its result
    /// goes nowhere.
    fn probe_with_timeout(&self) -> Result<(), PingError> {
        let (tx, rx) = mpsc::sync_channel(1);
        let probe = Arc::clone(&self.probe);
        thread::Builder::new()
            .name("auto-ping-probe".into())
            .spawn(move || {
                let _ = tx.send(probe.probe());
            })
            .map_err(|e| PingError::ProbeFailed(e.to_string()))?;

        match rx.recv_timeout(self.config.probe_timeout) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PingError::ProbeFailed(format!("{:#}", e))),
            Err(RecvTimeoutError::Timeout) => Err(PingError::ProbeTimeout(self.config.probe_timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(PingError::ProbeFailed("probe thread panicked".into()))
            }
        }
    }
}
