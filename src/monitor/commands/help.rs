//! Help command - displays available commands.

use crate::error::{CmdResult, CommandError};
use crate::monitor::registry::{all_commands, find_command};
use crate::monitor::{Command, CommandContext, Reply};
use crate::target::Target;

/// Help command instance.
pub static HELP: HelpCommand = HelpCommand;

/// Help command implementation.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Display information about all supported commands"
    }

    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn execute(&self, ctx: &CommandContext, _target: &mut dyn Target) -> CmdResult<Reply> {
        // Only the first word names a command; anything after it is ignored.
        match ctx.args.get(0) {
            Some(name) => describe(name),
            None => Ok(list()),
        }
    }
}

fn describe(name: &str) -> CmdResult<Reply> {
    let cmd = find_command(name).ok_or_else(|| CommandError::UnknownCommand(name.into()))?;
    Ok(Reply::Describe {
        name: cmd.name(),
        description: cmd.description(),
    })
}

fn list() -> Reply {
    Reply::Help(
        all_commands()
            .iter()
            .map(|cmd| (cmd.name(), cmd.description()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::testing::Recorder;

    fn help(args: Option<&str>) -> CmdResult<Reply> {
        HELP.execute(&CommandContext::new("help", args), &mut Recorder::default())
    }

    #[test]
    fn lists_every_command_in_order() {
        let Reply::Help(entries) = help(None).unwrap() else {
            panic!("expected a listing");
        };
        assert_eq!(entries.len(), all_commands().len());
        assert_eq!(entries[0].0, "help");
        assert_eq!(entries[6].0, "p");
    }

    #[test]
    fn listing_is_stable() {
        assert_eq!(help(None).unwrap(), help(None).unwrap());
    }

    #[test]
    fn describes_one_command() {
        assert_eq!(
            help(Some("q")).unwrap(),
            Reply::Describe {
                name: "q",
                description: "Exit sdb"
            }
        );
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            help(Some("frob")),
            Err(CommandError::UnknownCommand("frob".into()))
        );
    }
}
