#![cfg(feature = "std")]

use log::{self, LevelFilter, Metadata, Record};
use std::env;

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_ENV: &str = "SHOTGRID_LOG";

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    // Stderr keeps stdout free for command output.
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Parse a level name, falling back to `info`.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logging with a level taken from the `SHOTGRID_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid. Later calls are ignored.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_falls_back_to_info() {
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(level_from(Some("loud")), LevelFilter::Info);
        assert_eq!(level_from(None), LevelFilter::Info);
    }
}
