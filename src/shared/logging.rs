//! tracing subscriber setup.
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Map a settings log level (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`) to a filter directive.
///
/// Unknown levels fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" | "FATAL" => "error",
        _ => "info",
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(level)));

    let result = if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(filter)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::debug("DEBUG", "debug")]
    #[case::info("INFO", "info")]
    #[case::lowercase("warning", "warn")]
    #[case::warn("WARN", "warn")]
    #[case::error("ERROR", "error")]
    #[case::critical("CRITICAL", "error")]
    #[case::padded(" debug ", "debug")]
    #[case::unknown("VERBOSE", "info")]
    #[case::empty("", "info")]
    fn maps_levels_to_directives(#[case] level: &str, #[case] expected: &str) {
        assert_eq!(level_directive(level), expected);
    }

    #[test]
    fn init_twice_does_not_panic() {
        init("INFO", false);
        init("DEBUG", true);
    }
}
