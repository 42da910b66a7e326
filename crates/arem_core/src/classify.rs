//! Row classifier
//!
//! Instruction rows occupy `0xDA00..=0xE1E3` in steps of ten: every
//! run of ten codes shares one instruction key and the key selects the
//! mnemonic. The same mnemonic appears under several keys, one per
//! operand shape (`LD r,r` vs `LD rr,nn` and so on). Directive, label,
//! assignment and comment rows have one code each just above.

use crate::error::{DecodeError, Result};

pub const INSTRUCTION_BASE: u16 = 0xDA00;
pub const INSTRUCTION_STRIDE: u16 = 10;

pub const ROW_ORG: u16 = 0xE1E4;
pub const ROW_PUT: u16 = 0xE1E6;
pub const ROW_DEFB: u16 = 0xE1E7;
pub const ROW_DEFW: u16 = 0xE1E8;
pub const ROW_DEFM: u16 = 0xE1E9;
pub const ROW_DEFS: u16 = 0xE1EA;
pub const ROW_LABEL: u16 = 0xE1EB;
pub const ROW_ASSIGNMENT: u16 = 0xE1EC;
pub const ROW_COMMENT: u16 = 0xE1ED;

/// Inclusive range of instruction keys sharing one mnemonic
pub struct InstructionSpan {
    pub first: u8,
    pub last: u8,
    pub mnemonic: &'static str,
}

const fn span(first: u8, last: u8, mnemonic: &'static str) -> InstructionSpan {
    InstructionSpan {
        first,
        last,
        mnemonic,
    }
}

/// Instruction keys `1..=202`, sorted and contiguous
pub static INSTRUCTION_SPANS: &[InstructionSpan] = &[
    span(1, 35, "LD"),
    span(36, 38, "PUSH"),
    span(39, 41, "POP"),
    span(42, 43, "EX"),
    span(44, 44, "EXX"),
    span(45, 47, "EX"),
    span(48, 48, "LDI"),
    span(49, 49, "LDIR"),
    span(50, 50, "LDD"),
    span(51, 51, "LDDR"),
    span(52, 52, "CPI"),
    span(53, 53, "CPIR"),
    span(54, 54, "CPD"),
    span(55, 55, "CPDR"),
    span(56, 60, "ADD"),
    span(61, 65, "ADC"),
    span(66, 70, "SUB"),
    span(71, 75, "SBC"),
    span(76, 80, "AND"),
    span(81, 85, "OR"),
    span(86, 90, "XOR"),
    span(91, 95, "CP"),
    span(96, 99, "INC"),
    span(100, 103, "DEC"),
    span(104, 104, "DAA"),
    span(105, 105, "CPL"),
    span(106, 106, "NEG"),
    span(107, 107, "CCF"),
    span(108, 108, "SCF"),
    span(109, 109, "NOP"),
    span(110, 110, "HALT"),
    span(111, 111, "DI"),
    span(112, 112, "EI"),
    span(113, 113, "IM0"),
    span(114, 114, "IM1"),
    span(115, 115, "IM2"),
    span(116, 116, "ADD"),
    span(117, 117, "ADC"),
    span(118, 118, "SBC"),
    span(119, 120, "ADD"),
    span(121, 123, "INC"),
    span(124, 126, "DEC"),
    span(127, 127, "RLCA"),
    span(128, 128, "RLA"),
    span(129, 129, "RRCA"),
    span(130, 130, "RRA"),
    span(131, 134, "RLC"),
    span(135, 138, "RL"),
    span(139, 142, "RRC"),
    span(143, 146, "RR"),
    span(147, 150, "SLA"),
    span(151, 154, "SRA"),
    span(155, 158, "SRL"),
    span(159, 159, "RLD"),
    span(160, 160, "RRD"),
    span(161, 164, "BIT"),
    span(165, 168, "SET"),
    span(169, 172, "RES"),
    span(173, 174, "JP"),
    span(175, 179, "JR"),
    span(180, 182, "JP"),
    span(183, 183, "DJNZ"),
    span(184, 185, "CALL"),
    span(186, 187, "RET"),
    span(188, 188, "RETI"),
    span(189, 189, "RETN"),
    span(190, 190, "RST"),
    span(191, 192, "IN"),
    span(193, 193, "INI"),
    span(194, 194, "INIR"),
    span(195, 195, "IND"),
    span(196, 196, "INDR"),
    span(197, 198, "OUT"),
    span(199, 199, "OUTI"),
    span(200, 200, "OTIR"),
    span(201, 201, "OUTD"),
    span(202, 202, "OTDR"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Org,
    Put,
    Defb,
    Defw,
    Defs,
    Defm,
}

impl Directive {
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Org => "ORG",
            Directive::Put => "PUT",
            Directive::Defb => "DEFB",
            Directive::Defw => "DEFW",
            Directive::Defs => "DEFS",
            Directive::Defm => "DEFM",
        }
    }
}

/// What a row type code asks the record decoder to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Instruction(&'static str),
    Directive(Directive),
    Label,
    Assignment,
    Comment,
}

/// Instruction key of a row code, if it falls in the instruction block
pub fn instruction_key(code: u16) -> Option<u16> {
    code.checked_sub(INSTRUCTION_BASE)
        .map(|offset| offset / INSTRUCTION_STRIDE + 1)
}

pub fn lookup_mnemonic(key: u16) -> Option<&'static str> {
    INSTRUCTION_SPANS
        .iter()
        .find(|s| (s.first as u16..=s.last as u16).contains(&key))
        .map(|s| s.mnemonic)
}

pub fn classify(code: u16) -> Result<RowKind> {
    if let Some(mnemonic) = instruction_key(code).and_then(lookup_mnemonic) {
        return Ok(RowKind::Instruction(mnemonic));
    }

    let kind = match code {
        ROW_ORG => RowKind::Directive(Directive::Org),
        ROW_PUT => RowKind::Directive(Directive::Put),
        ROW_DEFB => RowKind::Directive(Directive::Defb),
        ROW_DEFW => RowKind::Directive(Directive::Defw),
        ROW_DEFM => RowKind::Directive(Directive::Defm),
        ROW_DEFS => RowKind::Directive(Directive::Defs),
        ROW_LABEL => RowKind::Label,
        ROW_ASSIGNMENT => RowKind::Assignment,
        ROW_COMMENT => RowKind::Comment,
        _ => return Err(DecodeError::UnknownRowType(code)),
    };
    Ok(kind)
}

/// First row code of an instruction key, the one the assembler writes
pub fn row_code_for_key(key: u16) -> Option<u16> {
    key.checked_sub(1)?
        .checked_mul(INSTRUCTION_STRIDE)?
        .checked_add(INSTRUCTION_BASE)
}
