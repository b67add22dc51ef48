use gradient_cli::logging::{self, ERROR_FILE, LOG_FILE};
use std::fs;

#[test]
fn errors_are_copied_to_their_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");
    logging::init(&log_dir, false).unwrap();

    tracing::warn!("ping latency high");
    tracing::error!("disk on fire");

    let all = fs::read_to_string(log_dir.join(LOG_FILE)).unwrap();
    let errors = fs::read_to_string(log_dir.join(ERROR_FILE)).unwrap();
    assert!(all.contains("ping latency high"));
    assert!(all.contains("disk on fire"));
    assert!(errors.contains("disk on fire"));
    assert!(!errors.contains("ping latency high"));

    // The global subscriber can only be installed once per process.
    assert!(logging::init(&log_dir, false).is_err());
}
