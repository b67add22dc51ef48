use gradient_cli::ping::{AutoPingService, PingConfig, PingError, PingEvent, PingReporter};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<PingEvent>>>);

impl PingReporter for Recorder {
    fn report(&self, event: &PingEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

impl Recorder {
    fn events(&self) -> Vec<PingEvent> {
        self.0.lock().unwrap().clone()
    }

    fn count(&self, pred: impl Fn(&PingEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        sleep(Duration::from_millis(5));
    }
    cond()
}

fn policy(interval_ms: u64, timeout_ms: u64) -> PingConfig {
    PingConfig {
        interval: Duration::from_millis(interval_ms),
        probe_timeout: Duration::from_millis(timeout_ms),
        ..PingConfig::default()
    }
}

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn start_runs_the_first_tick_immediately() {
    let calls = Arc::new(AtomicU32::new(0));
    let probe_calls = Arc::clone(&calls);
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        move || -> anyhow::Result<()> {
            probe_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
        recorder.clone(),
        policy(3_600_000, 1_000),
    );

    service.start().unwrap();
    assert!(service.is_running());
    assert!(wait_until(WAIT, || service.status().tick_count == 1));

    let status = service.status();
    assert!(status.running);
    assert_eq!(status.consecutive_failures, 0);
    assert!(status.last_tick.is_some());
    assert_ne!(status.next_tick, "soon");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(recorder.events().first(), Some(PingEvent::Started { .. })));

    service.stop().unwrap();
}

#[test]
fn second_start_is_rejected_and_changes_nothing() {
    let calls = Arc::new(AtomicU32::new(0));
    let probe_calls = Arc::clone(&calls);
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        move || -> anyhow::Result<()> {
            probe_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
        recorder.clone(),
        policy(3_600_000, 1_000),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || service.status().tick_count == 1));
    let before = service.status();

    assert_eq!(service.start(), Err(PingError::AlreadyRunning));
    sleep(Duration::from_millis(50));

    let after = service.status();
    assert!(after.running);
    assert_eq!(after.tick_count, before.tick_count);
    assert_eq!(after.last_tick, before.last_tick);
    assert_eq!(after.consecutive_failures, before.consecutive_failures);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.count(|e| matches!(e, PingEvent::Started { .. })), 1);

    service.stop().unwrap();
}

#[test]
fn stop_halts_ticks() {
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        || -> anyhow::Result<()> { Ok(()) },
        recorder.clone(),
        policy(20, 1_000),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || service.status().tick_count >= 3));
    service.stop().unwrap();

    let stopped = service.status();
    assert!(!stopped.running);
    assert_eq!(stopped.uptime, "0s");
    sleep(Duration::from_millis(150));
    assert_eq!(service.status().tick_count, stopped.tick_count);
    assert_eq!(recorder.count(|e| *e == PingEvent::Stopped), 1);
    assert_eq!(service.stop(), Err(PingError::NotRunning));
}

#[test]
fn in_flight_result_is_ignored_after_stop() {
    let entered = Arc::new(AtomicBool::new(false));
    let probe_entered = Arc::clone(&entered);
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        move || -> anyhow::Result<()> {
            probe_entered.store(true, Ordering::SeqCst);
            sleep(Duration::from_millis(200));
            Ok(())
        },
        recorder.clone(),
        policy(3_600_000, 2_000),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || entered.load(Ordering::SeqCst)));
    service.stop().unwrap();
    sleep(Duration::from_millis(400));

    let status = service.status();
    assert!(!status.running);
    assert_eq!(status.tick_count, 0);
    assert_eq!(status.consecutive_failures, 0);
    assert_eq!(status.last_tick, None);
    assert_eq!(recorder.count(|e| matches!(e, PingEvent::TickSucceeded { .. })), 0);
}

#[test]
fn five_failures_stop_the_service() {
    let calls = Arc::new(AtomicU32::new(0));
    let probe_calls = Arc::clone(&calls);
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        move || -> anyhow::Result<()> {
            probe_calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("connection refused")
        },
        recorder.clone(),
        policy(10, 500),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || !service.is_running()));
    sleep(Duration::from_millis(50));

    let status = service.status();
    assert_eq!(status.consecutive_failures, 5);
    assert_eq!(status.tick_count, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 5);

    let warnings: Vec<u32> = recorder
        .events()
        .iter()
        .filter_map(|e| match e {
            PingEvent::FailureWarning { failures, .. } => Some(*failures),
            _ => None,
        })
        .collect();
    assert_eq!(warnings, vec![2, 4]);
    assert_eq!(recorder.count(|e| matches!(e, PingEvent::TickFailed { .. })), 5);
    assert_eq!(
        recorder.count(|e| *e == PingEvent::ThresholdExceeded { failures: 5, threshold: 5 }),
        1
    );
    assert_eq!(recorder.events().last(), Some(&PingEvent::Stopped));

    // Already stopped by the threshold.
    assert_eq!(service.stop(), Err(PingError::NotRunning));
}

#[test]
fn success_resets_the_failure_streak() {
    let calls = Arc::new(AtomicU32::new(0));
    let probe_calls = Arc::clone(&calls);
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        move || -> anyhow::Result<()> {
            if probe_calls.fetch_add(1, Ordering::SeqCst) < 3 {
                anyhow::bail!("flaky")
            }
            Ok(())
        },
        recorder.clone(),
        policy(10, 500),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || service.status().tick_count >= 1));

    let status = service.status();
    assert!(status.running);
    assert_eq!(status.consecutive_failures, 0);
    assert_eq!(recorder.count(|e| matches!(e, PingEvent::TickFailed { .. })), 3);
    assert_eq!(
        recorder.count(|e| matches!(e, PingEvent::FailureWarning { failures: 2, .. })),
        1
    );
    assert_eq!(recorder.count(|e| matches!(e, PingEvent::ThresholdExceeded { .. })), 0);

    service.stop().unwrap();
}

#[test]
fn slow_probe_counts_as_failure() {
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        || -> anyhow::Result<()> {
            sleep(Duration::from_millis(300));
            Ok(())
        },
        recorder.clone(),
        policy(3_600_000, 50),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || service.status().consecutive_failures == 1));
    assert_eq!(service.status().tick_count, 0);
    assert_eq!(
        recorder.count(|e| matches!(
            e,
            PingEvent::TickFailed { error: PingError::ProbeTimeout(_), .. }
        )),
        1
    );

    service.stop().unwrap();
}

#[test]
fn summary_every_twenty_successes() {
    let recorder = Recorder::default();
    let service = AutoPingService::new(
        || -> anyhow::Result<()> { Ok(()) },
        recorder.clone(),
        policy(5, 500),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || {
        recorder.count(|e| matches!(e, PingEvent::Summary(_))) >= 1
    }));
    service.stop().unwrap();

    let first = recorder.events().into_iter().find_map(|e| match e {
        PingEvent::Summary(snapshot) => Some(snapshot),
        _ => None,
    });
    let snapshot = first.unwrap();
    assert_eq!(snapshot.tick_count, 20);
    assert!(snapshot.running);
}

#[test]
fn restart_after_threshold_starts_fresh() {
    let healthy = Arc::new(AtomicBool::new(false));
    let probe_healthy = Arc::clone(&healthy);
    let service = AutoPingService::new(
        move || -> anyhow::Result<()> {
            if probe_healthy.load(Ordering::SeqCst) {
                Ok(())
            } else {
                anyhow::bail!("down")
            }
        },
        Recorder::default(),
        policy(10, 500),
    );

    service.start().unwrap();
    assert!(wait_until(WAIT, || !service.is_running()));
    assert_eq!(service.status().consecutive_failures, 5);

    healthy.store(true, Ordering::SeqCst);
    service.start().unwrap();
    assert!(wait_until(WAIT, || service.status().tick_count >= 1));
    let status = service.status();
    assert!(status.running);
    assert_eq!(status.consecutive_failures, 0);

    service.stop().unwrap();
}

#[test]
fn monitored_target_survives_restart() {
    let service = AutoPingService::new(
        || -> anyhow::Result<()> { Ok(()) },
        Recorder::default(),
        policy(3_600_000, 500),
    );
    service.set_monitored_target("  W2F5PWFHP7YUYY7V ").unwrap();
    service.start().unwrap();
    service.stop().unwrap();
    assert_eq!(service.status().monitored_target.as_deref(), Some("W2F5PWFHP7YUYY7V"));
}
