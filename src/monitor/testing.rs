//! Recording target for unit tests.

use crate::target::{MemoryFault, StepLimit, StopReason, Target, VAddr, Word};

/// Remembers every call; memory holds `addr as Word` everywhere below 4 GiB.
#[derive(Debug, Default)]
pub struct Recorder {
    pub runs: Vec<StepLimit>,
    pub reads: Vec<(VAddr, usize)>,
    pub evals: Vec<String>,
    pub drains: usize,
    pub inits: usize,
}

impl Target for Recorder {
    fn run(&mut self, limit: StepLimit) -> StopReason {
        self.runs.push(limit);
        StopReason::Paused { pc: 0 }
    }

    fn render_registers(&self) -> String {
        "pc 0x0".into()
    }

    fn read_word(&mut self, addr: VAddr, width: usize) -> Result<Word, MemoryFault> {
        self.reads.push((addr, width));
        if addr >= 1 << 32 {
            return Err(MemoryFault { addr, width });
        }
        Ok(addr)
    }

    fn evaluate(&mut self, expr: &str) -> Option<Word> {
        self.evals.push(expr.into());
        expr.trim().parse().ok()
    }

    fn drain_pending_events(&mut self) {
        self.drains += 1;
    }

    fn init_expr(&mut self) {
        self.inits += 1;
    }

    fn init_watchpoints(&mut self) {
        self.inits += 1;
    }
}
