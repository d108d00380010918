//! Info command - registers and watchpoints.

use crate::error::{CmdResult, CommandError};
use crate::monitor::{Command, CommandContext, Reply};
use crate::target::Target;

/// Info command instance.
pub static INFO: InfoCommand = InfoCommand;

pub struct InfoCommand;

impl Command for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    fn description(&self) -> &'static str {
        "Display the info of registers & watchpoints"
    }

    fn usage(&self) -> &'static str {
        "info r | info w"
    }

    fn execute(&self, ctx: &CommandContext, target: &mut dyn Target) -> CmdResult<Reply> {
        if ctx.args.len() != 1 {
            return Err(CommandError::Usage(self.usage()));
        }
        match ctx.args.get(0) {
            Some("r") => Ok(Reply::Registers(target.render_registers())),
            // TODO: list active watchpoints once they can be set.
            Some("w") => Ok(Reply::Nothing),
            _ => Err(CommandError::Usage(self.usage())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::testing::Recorder;

    fn info(args: Option<&str>) -> CmdResult<Reply> {
        INFO.execute(&CommandContext::new("info", args), &mut Recorder::default())
    }

    #[test]
    fn registers() {
        assert_eq!(info(Some("r")), Ok(Reply::Registers("pc 0x0".into())));
    }

    #[test]
    fn watchpoints_are_reserved() {
        assert_eq!(info(Some("w")), Ok(Reply::Nothing));
    }

    #[test]
    fn anything_else_is_usage() {
        for args in [None, Some("x"), Some("r w")] {
            assert_eq!(info(args), Err(CommandError::Usage("info r | info w")));
        }
    }
}
