//! Container header
//!
//! The fixed 128-byte preamble of a tape/disk image:
//!
//! ```text
//! +0    u8        file type (0x41 for tokenised source)
//! +1    [u8; 16]  name
//! +17   u8        name terminator (0x0D or 0x00)
//! +18   u16       size
//! +20   u16       load address
//! +22   u16       exec address
//! +24   [u8; 104] comment
//! ```

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use crate::render::bytes_to_string;

pub const HEADER_SIZE: usize = 128;
pub const SOURCE_FILE_TYPE: u8 = 0x41;

const NAME_SIZE: usize = 16;
const COMMENT_SIZE: usize = 104;
const CR: u8 = 0x0D;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    pub file_type: u8,
    pub name: String,
    pub size: u16,
    pub load_address: u16,
    pub exec_address: u16,
    pub comment: String,
}

/// Text up to the first CR or NUL
fn field_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&b| b == CR || b == 0)
        .unwrap_or(bytes.len());
    bytes_to_string(&bytes[..end])
}

impl ContainerHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(DecodeError::TruncatedHeader {
                available: data.len(),
            });
        }

        let mut cursor = ByteCursor::new(&data[..HEADER_SIZE]);
        let file_type = cursor.take_u8()?;
        if file_type != SOURCE_FILE_TYPE {
            return Err(DecodeError::UnsupportedHeaderType(file_type));
        }

        let name = cursor.take(NAME_SIZE)?;
        let name_terminator = cursor.take_u8()?;
        if name_terminator != CR && name_terminator != 0 {
            return Err(DecodeError::InvalidNameTerminator(name_terminator));
        }

        Ok(Self {
            file_type,
            name: field_text(name),
            size: cursor.take_u16()?,
            load_address: cursor.take_u16()?,
            exec_address: cursor.take_u16()?,
            comment: field_text(cursor.take(COMMENT_SIZE)?).trim_end().to_string(),
        })
    }
}
