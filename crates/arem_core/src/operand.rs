//! Operand table
//!
//! Instruction rows carry two operand codes packed into one 16-bit field.
//! Most codes name a register, condition or fixed indirect form; the
//! `0x27`..`0x2A` codes stand for the decoded expression of the row.

use crate::error::{DecodeError, Result};

/// How a substituted expression is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `expr`
    Direct,
    /// `(expr)`
    Indirect,
    /// `(IXexpr)`, the expression carries its own sign: `(IX+5)`
    IndexedIx,
    /// `(IYexpr)`
    IndexedIy,
}

impl Addressing {
    pub fn wrap(self, symbol: &str) -> String {
        match self {
            Addressing::Direct => symbol.to_string(),
            Addressing::Indirect => format!("({})", symbol),
            Addressing::IndexedIx => format!("(IX{})", symbol),
            Addressing::IndexedIy => format!("(IY{})", symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Fixed text; empty for "no operand"
    Fixed(&'static str),
    /// Use the row's decoded expression
    Symbol(Addressing),
}

impl Operand {
    pub fn is_symbol(self) -> bool {
        matches!(self, Operand::Symbol(_))
    }

    /// Text of this operand given the expression text assigned to it
    pub fn resolve(self, symbol: &str) -> String {
        match self {
            Operand::Fixed(text) => text.to_string(),
            Operand::Symbol(mode) => mode.wrap(symbol),
        }
    }
}

/// Operand codes `0x00`..`0x2A`; `None` marks codes the format never uses
static OPERANDS: [Option<Operand>; 0x2B] = [
    // 0x00
    Some(Operand::Fixed("")),
    // 0x01..0x07: 8-bit registers
    Some(Operand::Fixed("B")),
    Some(Operand::Fixed("C")),
    Some(Operand::Fixed("D")),
    Some(Operand::Fixed("E")),
    Some(Operand::Fixed("H")),
    Some(Operand::Fixed("L")),
    Some(Operand::Fixed("A")),
    // 0x08..0x0F: register pairs
    Some(Operand::Fixed("BC")),
    Some(Operand::Fixed("DE")),
    Some(Operand::Fixed("HL")),
    Some(Operand::Fixed("SP")),
    Some(Operand::Fixed("IX")),
    Some(Operand::Fixed("IY")),
    Some(Operand::Fixed("AF")),
    Some(Operand::Fixed("AF'")),
    // 0x10..0x17: conditions
    Some(Operand::Fixed("NZ")),
    Some(Operand::Fixed("Z")),
    Some(Operand::Fixed("NC")),
    Some(Operand::Fixed("C")),
    Some(Operand::Fixed("PO")),
    Some(Operand::Fixed("PE")),
    Some(Operand::Fixed("P")),
    Some(Operand::Fixed("M")),
    // 0x18..0x1E: register indirect
    Some(Operand::Fixed("(HL)")),
    Some(Operand::Fixed("(BC)")),
    Some(Operand::Fixed("(DE)")),
    Some(Operand::Fixed("(SP)")),
    Some(Operand::Fixed("(C)")),
    Some(Operand::Fixed("(IX)")),
    Some(Operand::Fixed("(IY)")),
    // 0x1F..0x26
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    // 0x27..0x2A: expression substitution
    Some(Operand::Symbol(Addressing::Direct)),
    Some(Operand::Symbol(Addressing::Indirect)),
    Some(Operand::Symbol(Addressing::IndexedIx)),
    Some(Operand::Symbol(Addressing::IndexedIy)),
];

pub fn lookup_operand(code: u8) -> Result<Operand> {
    OPERANDS
        .get(code as usize)
        .copied()
        .flatten()
        .ok_or(DecodeError::UnknownOperandCode(code))
}

/// Split the packed field into (first, second) operand codes
pub fn unpack_operands(packed: u16) -> (u8, u8) {
    ((packed & 0x00FF) as u8, (packed >> 8) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers() {
        assert_eq!(lookup_operand(0x00).unwrap(), Operand::Fixed(""));
        assert_eq!(lookup_operand(0x07).unwrap(), Operand::Fixed("A"));
        assert_eq!(lookup_operand(0x0F).unwrap(), Operand::Fixed("AF'"));
        assert_eq!(lookup_operand(0x13).unwrap(), Operand::Fixed("C"));
        assert_eq!(lookup_operand(0x1E).unwrap(), Operand::Fixed("(IY)"));
    }

    #[test]
    fn test_fixed_codes_total() {
        for code in 0x00..=0x1E {
            assert!(
                matches!(lookup_operand(code), Ok(Operand::Fixed(_))),
                "code {:#04x}",
                code
            );
        }
    }

    #[test]
    fn test_symbol_codes() {
        for code in 0x27..=0x2A {
            assert!(lookup_operand(code).unwrap().is_symbol());
        }
        assert_eq!(
            lookup_operand(0x29).unwrap().resolve("+5"),
            "(IX+5)"
        );
        assert_eq!(lookup_operand(0x28).unwrap().resolve("BUF"), "(BUF)");
    }

    #[test]
    fn test_unused_codes_rejected() {
        for code in (0x1F..=0x26).chain(0x2B..=0xFF) {
            assert_eq!(
                lookup_operand(code),
                Err(DecodeError::UnknownOperandCode(code))
            );
        }
    }

    #[test]
    fn test_unpack_order() {
        assert_eq!(unpack_operands(0x0201), (0x01, 0x02));
        assert_eq!(unpack_operands(0x0102), (0x02, 0x01));
    }
}
