//! Error type shared by every decoding stage
//!
//! None of these errors is recoverable: a single bad record means the
//! stream has desynchronised, so decoding of the whole file stops.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated record: needed {needed} byte(s), {available} available")]
    TruncatedRecord { needed: usize, available: usize },

    #[error("unexpected end of record body")]
    EmptyBody,

    #[error("malformed record terminator {0:#04x} (expected 0x00)")]
    MalformedTerminator(u8),

    #[error("unknown row type {0:#06x}")]
    UnknownRowType(u16),

    #[error("unknown operand code {0:#04x}")]
    UnknownOperandCode(u8),

    #[error("unknown expression term format {0:#04x}")]
    UnknownTermFormat(u8),

    #[error("malformed symbol assignment: unexpected byte {0:#04x}")]
    MalformedSymbolAssignment(u8),

    #[error("unterminated quoted literal")]
    UnterminatedQuote,

    #[error("file type {0:#04x} not supported (expected 0x41)")]
    UnsupportedHeaderType(u8),

    #[error("truncated header: {available} of 128 bytes present")]
    TruncatedHeader { available: usize },

    #[error("invalid header name terminator {0:#04x}")]
    InvalidNameTerminator(u8),

    /// Carries the inner error in its own message, so it is not a chained source
    #[error("record {index} at offset {offset:#06x}: {error}")]
    AtRecord {
        index: usize,
        offset: usize,
        error: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Attach the position of the failing record
    pub fn at_record(self, index: usize, offset: usize) -> Self {
        DecodeError::AtRecord {
            index,
            offset,
            error: Box::new(self),
        }
    }

    /// The underlying error with any record context stripped
    pub fn root(&self) -> &DecodeError {
        match self {
            DecodeError::AtRecord { error, .. } => error.root(),
            other => other,
        }
    }
}
