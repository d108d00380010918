//! Execution control commands: continue, quit and single-step.

use crate::error::{CmdResult, CommandError};
use crate::monitor::{Command, CommandContext, Reply};
use crate::target::{StepLimit, Target};

/// Continue command instance.
pub static CONTINUE: ContinueCommand = ContinueCommand;

/// Quit command instance.
pub static QUIT: QuitCommand = QuitCommand;

/// Single-step command instance.
pub static STEP: StepCommand = StepCommand;

/// Largest step count `si` accepts.
pub const MAX_STEPS: i64 = 9;

pub struct ContinueCommand;

impl Command for ContinueCommand {
    fn name(&self) -> &'static str {
        "c"
    }

    fn description(&self) -> &'static str {
        "Continue the execution of the program"
    }

    fn execute(&self, _ctx: &CommandContext, target: &mut dyn Target) -> CmdResult<Reply> {
        Ok(Reply::Stopped(target.run(StepLimit::Unbounded)))
    }
}

pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &'static str {
        "q"
    }

    fn description(&self) -> &'static str {
        "Exit sdb"
    }

    fn execute(&self, _ctx: &CommandContext, _target: &mut dyn Target) -> CmdResult<Reply> {
        Ok(Reply::Quit)
    }
}

/// Arguments of `si`, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRequest {
    pub n: u64,
}

impl StepRequest {
    pub fn parse(ctx: &CommandContext) -> CmdResult<Self> {
        if ctx.args.len() > 1 {
            return Err(CommandError::Usage("si [N]"));
        }
        let n = match ctx.args.get(0) {
            // Text without leading digits keeps the default.
            Some(token) => leading_int(token).unwrap_or(1),
            None => 1,
        };
        // Zero passes this check and reaches the engine as a no-op run.
        if !(0..=MAX_STEPS).contains(&n) {
            return Err(CommandError::Range {
                what: "N",
                min: 1,
                max: MAX_STEPS,
                got: n,
            });
        }
        Ok(Self { n: n as u64 })
    }
}

/// Read a leading signed decimal integer the way `%d` does: optional sign,
/// then digits, ignoring whatever follows. Values that overflow saturate.
fn leading_int(token: &str) -> Option<i64> {
    let (negative, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

pub struct StepCommand;

impl Command for StepCommand {
    fn name(&self) -> &'static str {
        "si"
    }

    fn description(&self) -> &'static str {
        "Let the program execute N instructions in a single step and then suspend execution"
    }

    fn usage(&self) -> &'static str {
        "si [N]"
    }

    fn execute(&self, ctx: &CommandContext, target: &mut dyn Target) -> CmdResult<Reply> {
        let req = StepRequest::parse(ctx)?;
        Ok(Reply::Stopped(target.run(StepLimit::Steps(req.n))))
    }
}
