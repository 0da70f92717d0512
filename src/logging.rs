//! # Structured Logging Module
//!
//! Environment-aware structured logging to the console and to a JSON file
//! under `log/`, plus the structured events the executor emits per phase.

use crate::constants::QueryPhase;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(true)
            .with_filter(env_filter(&log_level));

        let log_dir = PathBuf::from("log");
        if let Err(e) = fs::create_dir_all(&log_dir) {
            // No file output without a log directory
            let _ = tracing_subscriber::registry().with(console_layer).try_init();
            tracing::warn!(error = %e, "Could not create log directory, logging to console only");
            return;
        }

        let pid = process::id();
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let log_filename = format!("{environment}.{pid}.{timestamp}.log");
        let log_path = log_dir.join(&log_filename);

        let file_appender = tracing_appender::rolling::never(&log_dir, &log_filename);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

        let subscriber = tracing_subscriber::registry().with(console_layer).with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(env_filter(&log_level)),
        );

        if subscriber.try_init().is_err() {
            // An embedding application already installed a global subscriber
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = pid,
            environment = %environment,
            log_file = %log_path.display(),
            "Structured logging initialized"
        );

        // The writer flushes on drop; keep it for the life of the process
        std::mem::forget(guard);
    });
}

/// `RUST_LOG` wins over the environment default
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("PAGEQUERY_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log one completed store round trip
pub fn log_query_phase(phase: QueryPhase, entity: &str, rows: u64, duration_ms: u64) {
    tracing::debug!(
        phase = %phase,
        entity = %entity,
        rows = rows,
        duration_ms = duration_ms,
        "QUERY_PHASE"
    );
}

/// Log the outcome of a whole paged execution
pub fn log_execution_summary(
    entity: &str,
    first_result: u64,
    page_size: u64,
    total_count: u64,
    returned: usize,
    phases: usize,
) {
    tracing::info!(
        entity = %entity,
        first_result = first_result,
        page_size = page_size,
        total_count = total_count,
        returned = returned,
        phases = phases,
        timestamp = %Utc::now().to_rfc3339(),
        "QUERY_EXECUTED"
    );
}

/// Log a failed phase with full context
pub fn log_phase_error(entity: &str, phase: QueryPhase, error: &str) {
    tracing::error!(
        entity = %entity,
        phase = %phase,
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "QUERY_PHASE_FAILED"
    );
}
