//! Structured logging for the Strata terrain tools.
//!
//! Provides structured, filterable logging via the `tracing` ecosystem:
//! console output with timestamps and module paths, plus JSON file logging in
//! debug builds for post-mortem analysis of long generation runs.

use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Sets up:
/// - console output with uptime timestamps, module paths, and severity levels
/// - JSON file logging in debug builds (optional)
/// - environment-based filtering (respects `RUST_LOG`)
///
/// # Arguments
///
/// * `log_dir` - optional directory for JSON log files (debug builds only)
/// * `debug_build` - whether this is a debug build (enables file logging)
/// * `filter` - optional filter override, e.g. `"info,strata_terrain=debug"`
///
/// # Examples
///
/// ```no_run
/// use strata_log::init_logging;
///
/// // Basic initialization
/// init_logging(None, false, None);
///
/// // With file logging in debug mode and a filter override
/// let log_dir = std::path::Path::new("./logs");
/// init_logging(Some(log_dir), true, Some("debug"));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, filter: Option<&str>) {
    let filter_str = match filter {
        Some(filter) if !filter.is_empty() => filter.to_string(),
        _ => "info".to_string(),
    };

    // RUST_LOG wins over the programmatic filter when set.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // worker threads are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    // In debug builds, also log to a file for post-mortem analysis.
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("strata.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string (`info` everywhere).
///
/// Useful for testing and for consistent default behavior.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_enables_info() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_subsystem_filter_parses() {
        let filter = EnvFilter::new("info,strata_terrain=debug");
        let filter_str = format!("{filter}");
        assert!(filter_str.contains("strata_terrain=debug"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_common_filter_strings_parse() {
        let valid_filters = [
            "info",
            "debug,strata_field=trace",
            "warn,strata_terrain=debug,strata_rand=trace",
            "error",
        ];
        for filter_str in &valid_filters {
            assert!(
                EnvFilter::try_from(*filter_str).is_ok(),
                "Failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_log_file_path_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path();
        std::fs::create_dir_all(log_path).unwrap();
        let log_file_path = log_path.join("strata.log");
        assert_eq!(log_file_path.file_name().unwrap(), "strata.log");
    }
}
