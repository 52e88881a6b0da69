//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so that report output on stdout stays machine readable.
//! `RUST_LOG` overrides the level chosen on the command line.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging behavior for one invocation.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_target: bool,
}

impl LogConfig {
    /// Map `-q` and the `-v` count to a level.
    ///
    /// - `-q`: error
    /// - none: info
    /// - `-v`: debug
    /// - `-vv` and more: trace
    #[must_use]
    pub fn from_flags(verbosity: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbosity {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            with_target: verbosity >= 1,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config.level);
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("dircheck={level},dircheck_cli={level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_from_flags() {
        assert_eq!(LogConfig::from_flags(0, false).level, Level::INFO);
        assert_eq!(LogConfig::from_flags(1, false).level, Level::DEBUG);
        assert_eq!(LogConfig::from_flags(2, false).level, Level::TRACE);
        assert_eq!(LogConfig::from_flags(5, false).level, Level::TRACE);
        assert_eq!(LogConfig::from_flags(0, true).level, Level::ERROR);
    }
}
