//! Single-term expression evaluator for the host target.
//!
//! Accepted terms: a decimal literal, a `0x` hex literal, or a `$name`
//! register reference. Anything else is a malformed expression.

use regex::Regex;

use super::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TermKind {
    Hex,
    Decimal,
    Register,
}

/// Token rules, tried in order. Each pattern captures the payload in group 1.
const RULES: &[(&str, TermKind)] = &[
    (r"^0[xX]([0-9a-fA-F]+)$", TermKind::Hex),
    (r"^([0-9]+)$", TermKind::Decimal),
    (r"^\$([A-Za-z0-9$]+)$", TermKind::Register),
];

/// Evaluator whose rules are compiled once by [`Evaluator::init`].
#[derive(Debug, Default)]
pub struct Evaluator {
    rules: Vec<(Regex, TermKind)>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the token rules. Calling it again is a no-op.
    pub fn init(&mut self) {
        if !self.rules.is_empty() {
            return;
        }
        for (pattern, kind) in RULES {
            match Regex::new(pattern) {
                Ok(re) => self.rules.push((re, *kind)),
                Err(e) => error!("failed to compile expression rule {pattern}: {e}"),
            }
        }
        debug!("expression rules compiled: {}", self.rules.len());
    }

    pub fn is_ready(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Evaluate `expr`, resolving registers through `reg`.
    pub fn eval(&self, expr: &str, reg: impl Fn(&str) -> Option<Word>) -> Option<Word> {
        let expr = expr.trim();
        for (re, kind) in &self.rules {
            let Some(caps) = re.captures(expr) else {
                continue;
            };
            let payload = caps.get(1)?.as_str();
            return match kind {
                TermKind::Hex => Word::from_str_radix(payload, 16).ok(),
                TermKind::Decimal => payload.parse().ok(),
                TermKind::Register => reg(payload),
            };
        }
        trace!("no rule matches expression '{expr}'");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> Evaluator {
        let mut e = Evaluator::new();
        e.init();
        e
    }

    fn regs(name: &str) -> Option<Word> {
        (name == "sp").then_some(0x8000_1000)
    }

    #[test]
    fn literals() {
        let e = ready();
        assert_eq!(e.eval("42", regs), Some(42));
        assert_eq!(e.eval(" 0x1F ", regs), Some(0x1f));
        assert_eq!(e.eval("0X10", regs), Some(16));
    }

    #[test]
    fn registers() {
        let e = ready();
        assert_eq!(e.eval("$sp", regs), Some(0x8000_1000));
        assert_eq!(e.eval("$nope", regs), None);
    }

    #[test]
    fn malformed() {
        let e = ready();
        assert_eq!(e.eval("1+2", regs), None);
        assert_eq!(e.eval("", regs), None);
        assert_eq!(e.eval("0xzz", regs), None);
        assert_eq!(e.eval("99999999999999999999999", regs), None);
    }

    #[test]
    fn uninitialized_rejects_everything() {
        let e = Evaluator::new();
        assert!(!e.is_ready());
        assert_eq!(e.eval("1", regs), None);
    }
}
