//! Record decoder
//!
//! Record layout, all little-endian:
//!
//! ```text
//! +0  u8   length       whole record, this byte included
//! +1  u8   instr_size   0 = no expression after the operands
//! +2  u16  row_type
//! +4  ..   body         length - 5 bytes
//! +n  u8   terminator   always 0x00
//! ```

use tracing::warn;

use crate::classify::{classify, RowKind};
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use crate::expression::{Expression, SYMBOL_BIAS};
use crate::operand::{lookup_operand, unpack_operands};
use crate::render::{bytes_to_string, Line};

/// Bytes of a record outside its body
pub const ENVELOPE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub length: u8,
    pub instr_size: u8,
    pub row_type: u16,
    pub body: &'a [u8],
}

impl<'a> Record<'a> {
    /// Parse one record from exactly the bytes its length field covers
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(bytes);
        let length = cursor.take_u8()?;
        if (length as usize) < ENVELOPE_SIZE {
            return Err(DecodeError::TruncatedRecord {
                needed: ENVELOPE_SIZE,
                available: length as usize,
            });
        }
        if bytes.len() < length as usize {
            return Err(DecodeError::TruncatedRecord {
                needed: length as usize,
                available: bytes.len(),
            });
        }

        let instr_size = cursor.take_u8()?;
        let row_type = cursor.take_u16()?;
        let body = cursor.take(length as usize - ENVELOPE_SIZE)?;
        let terminator = cursor.take_u8()?;
        if terminator != 0 {
            return Err(DecodeError::MalformedTerminator(terminator));
        }

        Ok(Self {
            length,
            instr_size,
            row_type,
            body,
        })
    }

    pub fn decode(&self) -> Result<Line> {
        let mut body = ByteCursor::new(self.body);

        let line = match classify(self.row_type)? {
            RowKind::Instruction(mnemonic) => self.decode_instruction(mnemonic, &mut body)?,
            RowKind::Directive(directive) => {
                let expr = Expression::decode(&mut body)?;
                Line::Directive {
                    keyword: directive.keyword(),
                    argument: expr.text,
                    comment: expr.comment,
                }
            }
            RowKind::Label => {
                let expr = Expression::decode(&mut body)?;
                Line::Label {
                    name: expr.text,
                    comment: expr.comment,
                }
            }
            RowKind::Assignment => {
                let name = decode_assignment_name(&mut body)?;
                let expr = Expression::decode(&mut body)?;
                Line::Assignment {
                    name,
                    value: expr.text,
                    comment: expr.comment,
                }
            }
            RowKind::Comment => Line::Comment(bytes_to_string(body.take_rest())),
        };

        Ok(line)
    }

    fn decode_instruction(&self, mnemonic: &'static str, body: &mut ByteCursor<'_>) -> Result<Line> {
        let (first, second) = unpack_operands(body.take_u16()?);
        let first = lookup_operand(first)?;
        let second = lookup_operand(second)?;

        let expr = if self.instr_size > 0 {
            Expression::decode(body)?
        } else {
            if !body.is_empty() {
                warn!(
                    "ignoring {} trailing byte(s) of row type {:#06x} without expression",
                    body.remaining(),
                    self.row_type
                );
            }
            Expression::default()
        };

        // Two substituted operands share one expression: `LD (IX+2),5`
        let (text1, text2) = if first.is_symbol() && second.is_symbol() {
            expr.text
                .split_once(',')
                .unwrap_or((expr.text.as_str(), expr.text.as_str()))
        } else {
            (expr.text.as_str(), expr.text.as_str())
        };

        Ok(Line::Instruction {
            mnemonic,
            operands: vec![first.resolve(text1), second.resolve(text2)],
            comment: expr.comment,
        })
    }
}

/// Length-prefixed symbol name followed by a mandatory `=`
fn decode_assignment_name(body: &mut ByteCursor<'_>) -> Result<String> {
    let prefix = body.take_u8()?;
    if prefix < SYMBOL_BIAS {
        return Err(DecodeError::MalformedSymbolAssignment(prefix));
    }
    let name = body.take((prefix - SYMBOL_BIAS) as usize)?;
    let sign = body.take_u8()?;
    if sign != b'=' {
        return Err(DecodeError::MalformedSymbolAssignment(sign));
    }
    Ok(bytes_to_string(name))
}
