//! Console logger.
//!
//! Routes `log` records to stderr, prefixed with the level and the PID of the
//! emitting process, since parent and children share the terminal.

use log::{LevelFilter, Metadata, Record};
use proclab_core::task::current_pid;
use std::env;
use std::io::Write;

/// Environment variable consulted when no level is given on the command line.
pub const LOG_ENV: &str = "PROCLAB_LOG";

static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{:<5} {}] {}",
                record.level(),
                current_pid(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

/// Picks the level from the command line, then [`LOG_ENV`], then `warn`.
/// Unrecognized values fall through to the next source.
pub fn resolve_level(flag: Option<&str>) -> LevelFilter {
    flag.and_then(parse_level)
        .or_else(|| env::var(LOG_ENV).ok().as_deref().and_then(parse_level))
        .unwrap_or(LevelFilter::Warn)
}

/// Installs the logger. Fails only if another logger is already installed.
pub fn init(max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level);
    Ok(())
}
