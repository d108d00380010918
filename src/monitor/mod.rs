//! The debugger shell.
//!
//! # Architecture
//!
//! - `command.rs` - `Command` trait, the line tokenizer, `Outcome` and `Reply`
//! - `registry.rs` - Static command registration and lookup
//! - `shell.rs` - The dispatch loop and its batch/interactive mode
//! - `line.rs` - Where lines come from: terminal or script
//! - `commands/` - Individual command implementations
//!
//! # Adding a New Command
//!
//! 1. Create a new file in `commands/` (e.g., `commands/mycommand.rs`)
//! 2. Define a struct and implement the `Command` trait
//! 3. Export a static instance: `pub static MYCOMMAND: MyCommand = MyCommand;`
//! 4. Add to `commands/mod.rs`: `pub mod mycommand;` and `pub use mycommand::MYCOMMAND;`
//! 5. Register in `registry.rs` COMMANDS array: `&commands::MYCOMMAND,`

pub mod command;
pub mod commands;
pub mod line;
pub mod registry;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{Args, Command, CommandContext, Outcome, Reply};
pub use line::{LineSource, Script, Terminal};
pub use registry::{all_commands, find_command};
pub use shell::{Mode, Shell};
