//! The boundary between the shell and the machine it controls.
//!
//! The shell owns no execution or memory semantics. Everything it can do to
//! the guest goes through [`Target`]: run the engine, dump registers, read a
//! word of memory, evaluate an expression, and drop stale device events.
//!
//! [`Machine`] is a small host-side target so the `sdb` binary has something
//! to drive. Tests use their own recording targets.

pub mod expr;
pub mod machine;
pub mod watchpoint;

use core::fmt;

pub use expr::Evaluator;
pub use machine::Machine;
pub use watchpoint::WatchpointPool;

/// Guest machine word.
pub type Word = u64;

/// Guest virtual address.
pub type VAddr = u64;

/// How far the engine may run before returning control to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepLimit {
    /// Run until the engine stops on its own.
    Unbounded,
    /// Retire at most this many instructions.
    Steps(u64),
}

/// Why the engine handed control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The step budget ran out; the program can be resumed.
    Paused { pc: VAddr },
    /// The program executed its halt trap.
    Halted { pc: VAddr, code: Word },
    /// Execution left valid memory.
    Aborted { pc: VAddr },
    /// The program had already finished; nothing was executed.
    Ended,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StopReason::Paused { pc } => write!(f, "stopped at pc = {pc:#x}"),
            StopReason::Halted { pc, code: 0 } => write!(f, "HIT GOOD TRAP at pc = {pc:#x}"),
            StopReason::Halted { pc, code } => {
                write!(f, "HIT BAD TRAP at pc = {pc:#x} (code {code})")
            }
            StopReason::Aborted { pc } => write!(f, "ABORT at pc = {pc:#x}"),
            StopReason::Ended => write!(
                f,
                "Program execution has ended. To restart the program, exit sdb and run again."
            ),
        }
    }
}

/// A guest memory access outside mapped memory.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("address {addr:#x} (width {width}) is out of bound")]
pub struct MemoryFault {
    pub addr: VAddr,
    pub width: usize,
}

/// Capabilities the shell consumes from the controlled machine.
pub trait Target {
    /// Run the execution engine. May block for the whole simulated run.
    fn run(&mut self, limit: StepLimit) -> StopReason;

    /// Render the full register set. The target owns the format.
    fn render_registers(&self) -> String;

    /// Read `width` bytes of guest memory at `addr`.
    fn read_word(&mut self, addr: VAddr, width: usize) -> Result<Word, MemoryFault>;

    /// Evaluate an expression; `None` when it is malformed.
    fn evaluate(&mut self, expr: &str) -> Option<Word>;

    /// Drop pending device events before a command runs.
    fn drain_pending_events(&mut self) {}

    /// One-time expression grammar setup.
    fn init_expr(&mut self) {}

    /// One-time watchpoint pool allocation.
    fn init_watchpoints(&mut self) {}

    /// Whether the session ended in a state the process should report as failure.
    fn is_exit_status_bad(&self) -> bool {
        false
    }
}

impl<T: Target + ?Sized> Target for &mut T {
    fn run(&mut self, limit: StepLimit) -> StopReason {
        (**self).run(limit)
    }

    fn render_registers(&self) -> String {
        (**self).render_registers()
    }

    fn read_word(&mut self, addr: VAddr, width: usize) -> Result<Word, MemoryFault> {
        (**self).read_word(addr, width)
    }

    fn evaluate(&mut self, expr: &str) -> Option<Word> {
        (**self).evaluate(expr)
    }

    fn drain_pending_events(&mut self) {
        (**self).drain_pending_events()
    }

    fn init_expr(&mut self) {
        (**self).init_expr()
    }

    fn init_watchpoints(&mut self) {
        (**self).init_watchpoints()
    }

    fn is_exit_status_bad(&self) -> bool {
        (**self).is_exit_status_bad()
    }
}
