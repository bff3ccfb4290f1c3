use flowdeploy_observe::{LoggerConfig, LoggerError, LoggerFormat, logger_init};

// Global subscriber state: keep everything in one test.
#[test]
fn initializes_once() {
    let cfg = LoggerConfig::default().with_format(LoggerFormat::Json);
    logger_init(&cfg).unwrap();
    tracing::info!(flow = "MyFlow", "logger ready");

    let again = logger_init(&LoggerConfig::default());
    assert!(matches!(again, Err(LoggerError::AlreadyInitialized)));
}
