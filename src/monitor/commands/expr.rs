//! Print command - evaluate an expression.

use crate::error::{CmdResult, CommandError};
use crate::monitor::{Command, CommandContext, Reply};
use crate::target::Target;

/// Print command instance.
pub static PRINT: PrintCommand = PrintCommand;

pub struct PrintCommand;

impl Command for PrintCommand {
    fn name(&self) -> &'static str {
        "p"
    }

    fn description(&self) -> &'static str {
        "Calculate the value of the expression EXPR"
    }

    fn usage(&self) -> &'static str {
        "p EXPR"
    }

    fn execute(&self, ctx: &CommandContext, target: &mut dyn Target) -> CmdResult<Reply> {
        let expr = ctx.args_raw.ok_or(CommandError::NoExpression)?;
        target
            .evaluate(expr)
            .map(Reply::Value)
            .ok_or_else(|| CommandError::Evaluation(expr.into()))
    }
}
