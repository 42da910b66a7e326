//! Core decoder for tokenised assembler source images
//!
//! This crate turns the tokenised records stored by a Z80 cross-assembler
//! on tape/disk images back into assembly-language text: one record in,
//! one source line out.

pub mod classify;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod expression;
pub mod header;
pub mod operand;
pub mod record;
pub mod render;
pub mod types;

pub use decoder::{decode_listing, decode_record, Decoder, RecordReader};
pub use error::{DecodeError, Result};
pub use header::ContainerHeader;
pub use types::*;
