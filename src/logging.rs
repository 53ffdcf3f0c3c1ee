#![cfg(feature = "std")]

//! Minimal stderr logger. Stdout is reserved for game output and the JSON
//! reports of `duel` and `bench`.

use std::env;
use log::{self, LevelFilter, Metadata, Record};

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Environment variable holding the log level.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug` or `trace` in any case,
/// e.g. `NAVAL_BATTLE_LOG=debug naval-battle duel --seed 7` prints every
/// targeting decision of the AI.
pub const LOG_ENV: &str = "NAVAL_BATTLE_LOG";

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logging with a level taken from [`LOG_ENV`].
/// Defaults to `info` if the variable is not set or invalid. Only the first
/// call installs the logger.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
