//! Command trait and context definitions.

use core::fmt;

use crate::error::CmdResult;
use crate::target::{StopReason, Target, VAddr, Word};

/// Parsed command arguments.
pub struct Args<'a> {
    args: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// Create Args from a slice of string references.
    pub fn new(args: Vec<&'a str>) -> Self {
        Self { args }
    }

    /// Get argument at index (0 is first argument after command name).
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if no arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Iterate over arguments.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args.iter().copied()
    }
}

/// Command execution context: one tokenized input line.
pub struct CommandContext<'a> {
    /// The command word.
    pub command: &'a str,
    /// Whitespace-split arguments (excluding the command word).
    pub args: Args<'a>,
    /// Everything after the first run of whitespace following the command
    /// word, untouched. `None` when nothing follows.
    pub args_raw: Option<&'a str>,
}

impl<'a> CommandContext<'a> {
    /// Tokenize a line. Empty or whitespace-only lines yield `None`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_start();
        if line.is_empty() {
            return None;
        }

        let (command, rest) = match line.find(char::is_whitespace) {
            Some(end) => line.split_at(end),
            None => (line, ""),
        };
        let rest = rest.trim_start();
        let args_raw = (!rest.is_empty()).then_some(rest);

        Some(Self::new(command, args_raw))
    }

    /// Build a context for a command invoked without going through a line.
    pub fn new(command: &'a str, args_raw: Option<&'a str>) -> Self {
        let args = args_raw
            .map(|raw| raw.split_whitespace().collect())
            .unwrap_or_default();
        Self {
            command,
            args: Args::new(args),
            args_raw,
        }
    }
}

/// What the dispatch loop does after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate,
}

/// The structured result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nothing,
    Quit,
    Stopped(StopReason),
    Registers(String),
    Memory { addr: VAddr, value: Word },
    Value(Word),
    Help(Vec<(&'static str, &'static str)>),
    Describe {
        name: &'static str,
        description: &'static str,
    },
}

impl Reply {
    pub fn outcome(&self) -> Outcome {
        match self {
            Reply::Quit => Outcome::Terminate,
            _ => Outcome::Continue,
        }
    }

    /// Whether rendering this reply prints anything.
    pub fn is_silent(&self) -> bool {
        matches!(self, Reply::Nothing | Reply::Quit)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Nothing | Reply::Quit => Ok(()),
            Reply::Stopped(reason) => write!(f, "{reason}"),
            Reply::Registers(dump) => f.write_str(dump.trim_end()),
            Reply::Memory { addr, value } => {
                write!(f, "addr = {addr:#x}\nvalue = {value}")
            }
            Reply::Value(value) => write!(f, "{value}"),
            Reply::Help(entries) => {
                for (i, (name, description)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{name} - {description}")?;
                }
                Ok(())
            }
            Reply::Describe { name, description } => write!(f, "{name} - {description}"),
        }
    }
}

/// Trait for implementing commands.
///
/// Commands are registered statically and looked up by name.
pub trait Command: Sync {
    /// Command name, matched exactly against the first word of a line.
    fn name(&self) -> &'static str;

    /// Short description (shown in help list).
    fn description(&self) -> &'static str;

    /// Usage hint reported on argument errors.
    fn usage(&self) -> &'static str {
        self.name()
    }

    /// Execute the command against the controlled target.
    fn execute(&self, ctx: &CommandContext, target: &mut dyn Target) -> CmdResult<Reply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_and_remainder() {
        let ctx = CommandContext::parse("si 3").unwrap();
        assert_eq!(ctx.command, "si");
        assert_eq!(ctx.args_raw, Some("3"));
        assert_eq!(ctx.args.len(), 1);
        assert_eq!(ctx.args.get(0), Some("3"));
    }

    #[test]
    fn bare_command_has_no_remainder() {
        let ctx = CommandContext::parse("q").unwrap();
        assert_eq!(ctx.command, "q");
        assert_eq!(ctx.args_raw, None);
        assert!(ctx.args.is_empty());

        let ctx = CommandContext::parse("  q   ").unwrap();
        assert_eq!(ctx.command, "q");
        assert_eq!(ctx.args_raw, None);
    }

    #[test]
    fn empty_lines_yield_nothing() {
        assert!(CommandContext::parse("").is_none());
        assert!(CommandContext::parse("   \t ").is_none());
    }

    #[test]
    fn remainder_follows_first_whitespace_run() {
        let ctx = CommandContext::parse("p \t $sp + 4 ").unwrap();
        assert_eq!(ctx.command, "p");
        assert_eq!(ctx.args_raw, Some("$sp + 4 "));
        assert_eq!(ctx.args.iter().collect::<Vec<_>>(), ["$sp", "+", "4"]);
    }

    #[test]
    fn quit_outcome() {
        assert_eq!(Reply::Quit.outcome(), Outcome::Terminate);
        assert_eq!(Reply::Value(1).outcome(), Outcome::Continue);
        assert!(Reply::Nothing.is_silent());
    }

    #[test]
    fn renders_help_and_memory() {
        let help = Reply::Help(vec![("a", "first"), ("b", "second")]);
        assert_eq!(help.to_string(), "a - first\nb - second");

        let mem = Reply::Memory { addr: 0x108, value: 7 };
        assert_eq!(mem.to_string(), "addr = 0x108\nvalue = 7");
    }
}
