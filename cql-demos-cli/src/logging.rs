//! Logging setup for the example programs.
//!
//! The examples report what they find through `tracing`, so a subscriber is
//! always installed. Level and format come from the command line first,
//! then from the environment:
//!
//! - `CQL_DEMOS_LOG_LEVEL=trace|debug|info|warn|error` - Set the log level
//! - `CQL_DEMOS_DEBUG=true|1|yes` - Shorthand for the debug level
//! - `CQL_DEMOS_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Driver messages (`scylla` target) are capped at `warn` unless the level is
//! `trace`.

use std::env;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Level used when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Format used when nothing else is configured.
pub const DEFAULT_FORMAT: &str = "json";

/// Check if debug logging is enabled via `CQL_DEMOS_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("CQL_DEMOS_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn normalize_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn normalize_format(format: &str) -> Option<&'static str> {
    match format.to_lowercase().as_str() {
        "json" => Some("json"),
        "pretty" => Some("pretty"),
        "compact" => Some("compact"),
        _ => None,
    }
}

/// Pick the log level: explicit choice, then `CQL_DEMOS_LOG_LEVEL`, then the
/// debug switch, then [`DEFAULT_LEVEL`]. Unknown names are skipped.
pub fn resolve_level(cli: Option<&str>, env_level: Option<&str>, debug: bool) -> &'static str {
    cli.and_then(normalize_level)
        .or_else(|| env_level.and_then(normalize_level))
        .unwrap_or(if debug { "debug" } else { DEFAULT_LEVEL })
}

/// Pick the output format: explicit choice, then `CQL_DEMOS_LOG_FORMAT`, then
/// [`DEFAULT_FORMAT`].
pub fn resolve_format(cli: Option<&str>, env_format: Option<&str>) -> &'static str {
    cli.and_then(normalize_format)
        .or_else(|| env_format.and_then(normalize_format))
        .unwrap_or(DEFAULT_FORMAT)
}

/// Build the filter directive for a level.
pub fn filter_directive(level: &str) -> String {
    let driver = if level == "trace" { "trace" } else { "warn" };
    format!("cql_demos={level},cql_demos_cli={level},cql_demos_client={level},scylla={driver}")
}

/// Initialize logging. Subsequent calls are no-ops.
pub fn init(level: Option<&str>, format: Option<&str>) {
    INIT.call_once(|| {
        let env_level = env::var("CQL_DEMOS_LOG_LEVEL").ok();
        let env_format = env::var("CQL_DEMOS_LOG_FORMAT").ok();

        let level = resolve_level(level, env_level.as_deref(), is_debug_enabled());
        let format = resolve_format(format, env_format.as_deref());

        let filter =
            EnvFilter::try_new(filter_directive(level)).unwrap_or_else(|_| EnvFilter::new("warn"));

        match format {
            "json" => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty().with_writer(std::io::stderr))
                    .init();
            }
        }

        tracing::debug!(level, format, "Logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_precedence() {
        assert_eq!(resolve_level(Some("TRACE"), Some("error"), true), "trace");
        assert_eq!(resolve_level(None, Some("warn"), true), "warn");
        assert_eq!(resolve_level(None, None, true), "debug");
        assert_eq!(resolve_level(None, None, false), "info");
        assert_eq!(resolve_level(Some("loud"), Some("nonsense"), false), "info");
    }

    #[test]
    fn test_format_precedence() {
        assert_eq!(resolve_format(Some("pretty"), Some("compact")), "pretty");
        assert_eq!(resolve_format(None, Some("Compact")), "compact");
        assert_eq!(resolve_format(None, None), "json");
        assert_eq!(resolve_format(Some("xml"), None), "json");
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(
            filter_directive("debug"),
            "cql_demos=debug,cql_demos_cli=debug,cql_demos_client=debug,scylla=warn"
        );
        assert!(filter_directive("trace").ends_with("scylla=trace"));
        assert!(EnvFilter::try_new(filter_directive("info")).is_ok());
    }
}
