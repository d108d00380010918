//! Unified error types for sdb.
//!
//! Process plumbing (configuration, logger, image loading) uses `SdbResult<T>`,
//! an alias for `anyhow::Result<T>`. Shell commands use the structured
//! `CommandError`, so every failure a handler can produce is a value the
//! dispatch loop renders and then moves past.
//!
//! ## Usage Examples
//!
//! Creating errors:
//! ```ignore
//! anyhow::bail!("Operation failed");
//! return Err(CommandError::Usage("x N ADDR"));
//! ```
//!
//! Adding context:
//! ```ignore
//! std::fs::read(path)
//!     .with_context(|| format!("failed to read image {}", path.display()))?;
//! ```

use crate::target::{MemoryFault, VAddr};

/// Result type alias using anyhow::Error.
pub type SdbResult<T> = anyhow::Result<T>;

/// Result of a single command handler.
pub type CmdResult<T> = Result<T, CommandError>;

/// Every local, recoverable failure a command can report.
///
/// None of these end the session; the shell prints them and reads the next line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("error: {what} must be in {min}..={max}, got {got}")]
    Range {
        what: &'static str,
        min: i64,
        max: i64,
        got: i64,
    },
    #[error("error: address must be hex, got '{0}'")]
    Format(String),
    #[error("error: address overflow computing {base:#x} + 4 * {count}")]
    AddressOverflow { base: VAddr, count: u64 },
    #[error("error: no expression given")]
    NoExpression,
    #[error("error: wrong expression {0}")]
    Evaluation(String),
    #[error("error: {0}")]
    Memory(#[from] MemoryFault),
}
