//! Host-side reference target.
//!
//! Flat little-endian guest memory, a 32-entry register file plus `pc`, and an
//! engine that retires one 4-byte word per step. Words are not decoded: the
//! only word the engine recognizes is the halt trap, whose exit code is taken
//! from `a0`.

use anyhow::{Context, ensure};
use std::path::Path;

use super::{Evaluator, MemoryFault, StepLimit, StopReason, Target, VAddr, WatchpointPool, Word};
use crate::SdbResult;

/// `ebreak`, used as the halt trap.
pub const HALT_TRAP: u32 = 0x0010_0073;

/// Steps shown at debug level when fewer than this many are requested.
const MAX_INST_TO_PRINT: u64 = 10;

/// Image used when none is given on the command line.
const BUILTIN_IMAGE: [u32; 5] = [
    0x0000_0297, // auipc t0,0
    0x0002_8823, // sb zero,16(t0)
    0x0102_c503, // lbu a0,16(t0)
    HALT_TRAP,
    0xdead_beef,
];

const GPR_NAMES: [&str; 32] = [
    "$0", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

const A0: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stop,
    End { pc: VAddr, code: Word },
    Abort { pc: VAddr },
}

pub struct Machine {
    base: VAddr,
    mem: Vec<u8>,
    gpr: [Word; 32],
    pc: VAddr,
    state: State,
    evaluator: Evaluator,
    watchpoints: WatchpointPool,
}

impl Machine {
    /// Create a machine with `size` bytes of zeroed memory mapped at `base`.
    pub fn new(base: VAddr, size: usize) -> Self {
        Self {
            base,
            mem: vec![0; size],
            gpr: [0; 32],
            pc: base,
            state: State::Stop,
            evaluator: Evaluator::new(),
            watchpoints: WatchpointPool::new(),
        }
    }

    /// Copy `image` to the start of memory. Returns the image size.
    pub fn load_image(&mut self, image: &[u8]) -> SdbResult<usize> {
        ensure!(
            image.len() <= self.mem.len(),
            "image of {} bytes does not fit in {} bytes of memory",
            image.len(),
            self.mem.len()
        );
        self.mem[..image.len()].copy_from_slice(image);
        Ok(image.len())
    }

    pub fn load_image_file(&mut self, path: &Path) -> SdbResult<usize> {
        let image = std::fs::read(path)
            .with_context(|| format!("failed to read image {}", path.display()))?;
        let size = self.load_image(&image)?;
        info!("image {} loaded: {size} bytes", path.display());
        Ok(size)
    }

    pub fn load_builtin_image(&mut self) -> SdbResult<usize> {
        let image: Vec<u8> = BUILTIN_IMAGE.iter().flat_map(|w| w.to_le_bytes()).collect();
        let size = self.load_image(&image)?;
        info!("no image given, using the built-in image ({size} bytes)");
        Ok(size)
    }

    pub fn pc(&self) -> VAddr {
        self.pc
    }

    pub fn watchpoints(&self) -> &WatchpointPool {
        &self.watchpoints
    }

    /// Look up a register by ABI name, or `pc`.
    pub fn reg(&self, name: &str) -> Option<Word> {
        if name == "pc" {
            return Some(self.pc);
        }
        GPR_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.gpr[i])
    }

    pub fn set_reg(&mut self, name: &str, value: Word) -> bool {
        if name == "pc" {
            self.pc = value;
            return true;
        }
        match GPR_NAMES.iter().position(|n| *n == name) {
            // `$0` is hardwired to zero.
            Some(0) => true,
            Some(i) => {
                self.gpr[i] = value;
                true
            }
            None => false,
        }
    }

    fn in_bounds(&self, addr: VAddr, width: usize) -> Option<usize> {
        let offset = usize::try_from(addr.checked_sub(self.base)?).ok()?;
        let end = offset.checked_add(width)?;
        (end <= self.mem.len()).then_some(offset)
    }

    fn step(&mut self, trace: bool) -> Option<StopReason> {
        let pc = self.pc;
        let word = match self.read_word(pc, 4) {
            Ok(w) => w as u32,
            Err(e) => {
                warn!("instruction fetch failed: {e}");
                self.state = State::Abort { pc };
                return Some(StopReason::Aborted { pc });
            }
        };
        if trace {
            debug!("{pc:#010x}: {word:08x}");
        }
        if word == HALT_TRAP {
            let code = self.gpr[A0];
            self.state = State::End { pc, code };
            return Some(StopReason::Halted { pc, code });
        }
        self.pc = pc.wrapping_add(4);
        None
    }
}

impl Target for Machine {
    fn run(&mut self, limit: StepLimit) -> StopReason {
        if matches!(self.state, State::End { .. } | State::Abort { .. }) {
            return StopReason::Ended;
        }
        self.state = State::Running;

        let trace = matches!(limit, StepLimit::Steps(n) if n < MAX_INST_TO_PRINT);
        let mut retired = 0u64;
        let stop = loop {
            if let StepLimit::Steps(n) = limit {
                if retired >= n {
                    self.state = State::Stop;
                    break StopReason::Paused { pc: self.pc };
                }
            }
            if let Some(stop) = self.step(trace) {
                break stop;
            }
            retired += 1;
        };
        debug!("engine returned after {retired} instructions: {stop:?}");
        stop
    }

    fn render_registers(&self) -> String {
        let mut out = String::new();
        for (name, value) in GPR_NAMES.iter().zip(self.gpr.iter()) {
            out.push_str(&format!("{name:<4} {value:#010x} {value}\n"));
        }
        out.push_str(&format!("{:<4} {:#010x} {}", "pc", self.pc, self.pc));
        out
    }

    fn read_word(&mut self, addr: VAddr, width: usize) -> Result<Word, MemoryFault> {
        let fault = MemoryFault { addr, width };
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(fault);
        }
        let offset = self.in_bounds(addr, width).ok_or(fault)?;
        let mut bytes = [0u8; 8];
        bytes[..width].copy_from_slice(&self.mem[offset..offset + width]);
        Ok(Word::from_le_bytes(bytes))
    }

    fn evaluate(&mut self, expr: &str) -> Option<Word> {
        self.evaluator.eval(expr, |name| self.reg(name))
    }

    fn init_expr(&mut self) {
        self.evaluator.init();
    }

    fn init_watchpoints(&mut self) {
        self.watchpoints.init();
    }

    fn is_exit_status_bad(&self) -> bool {
        match self.state {
            State::Running | State::Stop => false,
            State::End { code, .. } => code != 0,
            State::Abort { .. } => true,
        }
    }
}
