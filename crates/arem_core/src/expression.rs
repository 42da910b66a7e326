//! Expression decoder
//!
//! Operand values, directive arguments and label names are stored as a
//! run of self-describing terms. Each term starts with a format byte:
//! - `0x01`..`0x03` 16-bit number shown as hex, binary or decimal
//! - `0x04`/`0x05` one quoted character (plain or video charset)
//! - `0x20`..`0x5F` the byte itself (operators, digits, punctuation)
//! - `0x80`..`0xFF` symbol name of `format - 0x80` bytes
//!
//! Quoted spans (`'...'`) are stored verbatim and a `;` starts the
//! trailing comment.

use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use crate::render::bytes_to_string;

const QUOTE: u8 = b'\'';

pub const FORMAT_HEX: u8 = 0x01;
pub const FORMAT_BINARY: u8 = 0x02;
pub const FORMAT_DECIMAL: u8 = 0x03;
pub const FORMAT_QUOTED_CHAR: u8 = 0x04;
pub const FORMAT_VIDEO_CHAR: u8 = 0x05;

/// Bias subtracted from a symbol's format byte to get its length
pub const SYMBOL_BIAS: u8 = 0x80;

/// One decoded term, borrowing its payload from the record body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'a> {
    Hex(u16),
    Binary(u16),
    Decimal(u16),
    Char(u8),
    QuotedChar(u8),
    VideoChar(u8),
    Symbol(&'a [u8]),
}

impl<'a> Term<'a> {
    /// Decode exactly one term from the cursor
    pub fn decode(cursor: &mut ByteCursor<'a>) -> Result<Self> {
        let format = cursor.take_u8()?;
        let term = match format {
            FORMAT_HEX => Term::Hex(cursor.take_u16()?),
            FORMAT_BINARY => Term::Binary(cursor.take_u16()?),
            FORMAT_DECIMAL => Term::Decimal(cursor.take_u16()?),
            FORMAT_QUOTED_CHAR => Term::QuotedChar(cursor.take_u8()?),
            FORMAT_VIDEO_CHAR => Term::VideoChar(cursor.take_u8()?),
            b' '..=b'_' => Term::Char(format),
            SYMBOL_BIAS..=0xFF => Term::Symbol(cursor.take((format - SYMBOL_BIAS) as usize)?),
            other => return Err(DecodeError::UnknownTermFormat(other)),
        };
        Ok(term)
    }
}

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Hex(v) => write!(f, "{:x}H", v),
            Term::Binary(v) => write!(f, "{:b}B", v),
            Term::Decimal(v) => write!(f, "{}", v),
            Term::Char(c) => write!(f, "{}", *c as char),
            Term::QuotedChar(c) => write!(f, "'{}'", *c as char),
            Term::VideoChar(c) => write!(f, "V'{}'", *c as char),
            Term::Symbol(name) => f.write_str(&bytes_to_string(name)),
        }
    }
}

/// Rendered expression text plus the raw trailing comment (with its `;`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    pub text: String,
    pub comment: String,
}

impl Expression {
    /// Decode terms until the body runs out or a comment starts
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mut expr = Expression::default();

        while !cursor.is_empty() {
            if cursor.at_comment_marker() {
                expr.comment = bytes_to_string(cursor.take_rest());
                break;
            }

            if cursor.peek()? == QUOTE {
                // Quoted spans can hold anything, `;` and quote bytes included
                let close = cursor
                    .find_from(1, QUOTE)
                    .ok_or(DecodeError::UnterminatedQuote)?;
                expr.text.push_str(&bytes_to_string(cursor.take(close + 1)?));
            } else {
                let term = Term::decode(cursor)?;
                expr.text.push_str(&term.to_string());
            }
        }

        Ok(expr)
    }
}
