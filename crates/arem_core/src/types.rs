//! Listing types produced by the decoder
//!
//! These are the serialisable forms handed to output formatting.

use serde::Serialize;

/// A reconstructed source listing
#[derive(Debug, Clone, Serialize)]
pub struct SourceListing {
    /// Name from the container header
    pub name: String,
    /// Load address from the container header
    pub load_address: u16,
    /// Exec address from the container header
    pub exec_address: u16,
    /// Reconstructed lines, one per record
    pub lines: Vec<SourceLine>,
}

impl SourceListing {
    /// Lines joined as plain text, each newline-terminated
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}\n", line.text))
            .collect()
    }
}

/// A single line of source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    /// One-based line number (record index + 1)
    pub line_no: u32,
    /// Source text
    pub text: String,
}
