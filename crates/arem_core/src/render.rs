//! Line renderer
//!
//! Columns are tab separated: `MNEMONIC\tOPERANDS\tCOMMENT`. Empty
//! columns at the end are dropped together with their tab.

/// Map each byte to the code point of the same value
pub fn bytes_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// A decoded record ready for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Instruction {
        mnemonic: &'static str,
        operands: Vec<String>,
        comment: String,
    },
    Directive {
        keyword: &'static str,
        argument: String,
        comment: String,
    },
    Label {
        name: String,
        comment: String,
    },
    Assignment {
        name: String,
        value: String,
        comment: String,
    },
    Comment(String),
}

fn push_comment(out: &mut String, comment: &str) {
    if !comment.is_empty() {
        out.push('\t');
        out.push_str(comment);
    }
}

impl Line {
    pub fn render(&self) -> String {
        match self {
            Line::Instruction {
                mnemonic,
                operands,
                comment,
            } => {
                let mut out = mnemonic.to_string();
                let operands: Vec<&str> = operands
                    .iter()
                    .map(String::as_str)
                    .filter(|op| !op.is_empty())
                    .collect();
                if !operands.is_empty() {
                    out.push('\t');
                    out.push_str(&operands.join(","));
                }
                push_comment(&mut out, comment);
                out
            }
            Line::Directive {
                keyword,
                argument,
                comment,
            } => {
                let mut out = format!("{}\t{}", keyword, argument);
                push_comment(&mut out, comment);
                out
            }
            Line::Label { name, comment } => {
                let mut out = format!("{}:", name);
                push_comment(&mut out, comment);
                out
            }
            Line::Assignment {
                name,
                value,
                comment,
            } => {
                let mut out = format!("{}={}", name, value);
                push_comment(&mut out, comment);
                out
            }
            Line::Comment(text) => text.clone(),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
