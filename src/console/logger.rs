//! Logger implementation for the log crate.

use core::fmt::{self, Display};
use std::time::Instant;

use anyhow::anyhow;
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::SdbResult;

lazy_static! {
    static ref START: Instant = Instant::now();
}

pub struct SimpleLogger;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
    BrightBlack = 90,
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{1B}[{}m", *self as u8)
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let file = record.file().unwrap_or("none");
        let line = record.line().unwrap_or(0);
        let args = record.args();
        let color_reset = "\u{1B}[0m";

        let args_color = match record.level() {
            Level::Error => ColorCode::Red,
            Level::Warn => ColorCode::Yellow,
            Level::Info => ColorCode::Green,
            Level::Debug => ColorCode::Cyan,
            Level::Trace => ColorCode::BrightBlack,
        };

        let secs = START.elapsed().as_secs_f64();

        // [time file:line] message
        eprintln!("[{secs:.5} {file}:{line}] {args_color}{args}{color_reset}");
    }

    fn flush(&self) {}
}

/// Parse a level name; unknown names turn logging off.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Install the logger. Fails if another logger is already set.
pub fn init(level: &str) -> SdbResult<()> {
    lazy_static::initialize(&START);
    log::set_logger(&SimpleLogger).map_err(|e| anyhow!("logger init failed: {e}"))?;
    log::set_max_level(parse_level(level));
    Ok(())
}
