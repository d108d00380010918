//! Examine-memory command.
//!
//! `x N ADDR` reads the single word at `ADDR + 4 * N`; it does not dump the
//! `N` words in between.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CmdResult, CommandError};
use crate::monitor::{Command, CommandContext, Reply};
use crate::target::{Target, VAddr};

/// Examine command instance.
pub static EXAMINE: ExamineCommand = ExamineCommand;

/// Bytes per word read by `x`.
pub const WORD_BYTES: usize = 4;

lazy_static! {
    static ref HEX_ADDR: Regex = Regex::new(r"^(0[xX])?[0-9a-fA-F]+$").unwrap();
}

/// Arguments of `x`, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAddressRequest {
    pub count: u64,
    pub base_address: VAddr,
}

impl ParsedAddressRequest {
    pub fn parse(ctx: &CommandContext) -> CmdResult<Self> {
        const USAGE: &str = "x N ADDR";

        let (Some(count), Some(addr), None) = (ctx.args.get(0), ctx.args.get(1), ctx.args.get(2))
        else {
            return Err(CommandError::Usage(USAGE));
        };
        let count = count
            .parse::<u64>()
            .map_err(|_| CommandError::Usage(USAGE))?;

        if !HEX_ADDR.is_match(addr) {
            return Err(CommandError::Format(addr.into()));
        }
        let digits = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .unwrap_or(addr);
        // Matched the pattern, so only overflow can fail here.
        let base_address =
            VAddr::from_str_radix(digits, 16).map_err(|_| CommandError::Format(addr.into()))?;

        Ok(Self {
            count,
            base_address,
        })
    }

    /// `base_address + 4 * count`, or `None` on overflow.
    pub fn effective_address(&self) -> Option<VAddr> {
        self.count
            .checked_mul(WORD_BYTES as u64)
            .and_then(|offset| self.base_address.checked_add(offset))
    }
}

pub struct ExamineCommand;

impl Command for ExamineCommand {
    fn name(&self) -> &'static str {
        "x"
    }

    fn description(&self) -> &'static str {
        "Usage: x N ADDR. Read the word N words past hex address ADDR"
    }

    fn usage(&self) -> &'static str {
        "x N ADDR"
    }

    fn execute(&self, ctx: &CommandContext, target: &mut dyn Target) -> CmdResult<Reply> {
        let req = ParsedAddressRequest::parse(ctx)?;
        let addr = req
            .effective_address()
            .ok_or(CommandError::AddressOverflow {
                base: req.base_address,
                count: req.count,
            })?;
        let value = target.read_word(addr, WORD_BYTES)?;
        Ok(Reply::Memory { addr, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::testing::Recorder;
    use crate::target::MemoryFault;

    fn x(args: &str) -> (CmdResult<Reply>, Recorder) {
        let mut target = Recorder::default();
        let res = EXAMINE.execute(&CommandContext::new("x", Some(args)), &mut target);
        (res, target)
    }

    #[test]
    fn reads_word_at_end_offset() {
        let (res, target) = x("2 0x100");
        assert_eq!(res, Ok(Reply::Memory { addr: 0x108, value: 0x108 }));
        assert_eq!(target.reads, [(0x108, 4)]);
    }

    #[test]
    fn prefix_is_optional() {
        let (res, _) = x("0 80000000");
        assert_eq!(res, Ok(Reply::Memory { addr: 0x8000_0000, value: 0x8000_0000 }));
        let (res, _) = x("1 0XfF");
        assert!(matches!(res, Ok(Reply::Memory { addr: 0x103, .. })));
    }

    #[test]
    fn non_hex_address_is_format_error() {
        for addr in ["zz", "0x", "0xg1", "-10", "$sp"] {
            let (res, target) = x(&format!("2 {addr}"));
            assert_eq!(res, Err(CommandError::Format(addr.into())), "{addr}");
            assert!(target.reads.is_empty());
        }
    }

    #[test]
    fn arity_and_count_are_usage_errors() {
        for args in ["2", "2 0x10 3", "-1 0x10", "two 0x10"] {
            let (res, target) = x(args);
            assert_eq!(res, Err(CommandError::Usage("x N ADDR")), "{args}");
            assert!(target.reads.is_empty());
        }
        let res = EXAMINE.execute(&CommandContext::new("x", None), &mut Recorder::default());
        assert_eq!(res, Err(CommandError::Usage("x N ADDR")));
    }

    #[test]
    fn overflow_issues_no_read() {
        let (res, target) = x("1 0xffffffffffffffff");
        assert!(matches!(res, Err(CommandError::AddressOverflow { .. })));
        assert!(target.reads.is_empty());
    }

    #[test]
    fn memory_fault_is_reported() {
        let (res, _) = x("0 0x100000000");
        assert_eq!(
            res,
            Err(CommandError::Memory(MemoryFault { addr: 1 << 32, width: 4 }))
        );
    }
}
