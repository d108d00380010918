//! The dispatch loop.

use std::io::{self, Write};

use crate::error::CommandError;
use crate::monitor::commands;
use crate::monitor::line::LineSource;
use crate::monitor::registry::find_command;
use crate::monitor::{Command, CommandContext, Outcome, Reply};
use crate::target::Target;

/// How the shell runs. Fixed when the shell is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Read and dispatch lines until quit or end of input.
    #[default]
    Interactive,
    /// Continue the program once, read nothing, return.
    Batch,
}

pub struct Shell<T> {
    mode: Mode,
    target: T,
}

impl<T: Target> Shell<T> {
    /// Build a shell and run the target's one-time initializers.
    pub fn new(mode: Mode, mut target: T) -> Self {
        target.init_expr();
        target.init_watchpoints();
        info!("shell ready, mode: {mode:?}");
        Self { mode, target }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Run the session. Returns when the program finishes (batch), on `q`,
    /// or at end of input.
    pub fn run(&mut self, lines: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        if self.mode == Mode::Batch {
            let ctx = CommandContext::new(commands::CONTINUE.name(), None);
            self.invoke(&commands::CONTINUE, &ctx, out)?;
            return Ok(());
        }

        while let Some(line) = lines.next_line() {
            if self.dispatch(&line, out)? == Outcome::Terminate {
                info!("session terminated by command");
                return Ok(());
            }
        }
        info!("end of input");
        Ok(())
    }

    /// Tokenize and run one line. Blank lines do nothing.
    pub fn dispatch(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Outcome> {
        let Some(ctx) = CommandContext::parse(line) else {
            return Ok(Outcome::Continue);
        };

        self.target.drain_pending_events();

        match find_command(ctx.command) {
            Some(cmd) => self.invoke(cmd, &ctx, out),
            None => {
                writeln!(out, "{}", CommandError::UnknownCommand(ctx.command.into()))?;
                Ok(Outcome::Continue)
            }
        }
    }

    fn invoke(
        &mut self,
        cmd: &dyn Command,
        ctx: &CommandContext,
        out: &mut dyn Write,
    ) -> io::Result<Outcome> {
        debug!("dispatch {} {:?}", cmd.name(), ctx.args_raw);
        match cmd.execute(ctx, &mut self.target) {
            Ok(reply) => {
                render(&reply, out)?;
                Ok(reply.outcome())
            }
            Err(e) => {
                debug!("{} failed: {e:?}", cmd.name());
                writeln!(out, "{e}")?;
                Ok(Outcome::Continue)
            }
        }
    }
}

fn render(reply: &Reply, out: &mut dyn Write) -> io::Result<()> {
    if !reply.is_silent() {
        writeln!(out, "{reply}")?;
    }
    out.flush()
}
