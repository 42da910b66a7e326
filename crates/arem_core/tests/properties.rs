//! Property tests for the record decoder
//!
//! Covers:
//! - Numeric literal suffixes over the whole 16-bit range
//! - Quoted spans copied verbatim whatever they contain
//! - Operand table lookups for every fixed register/condition code
//! - Every instruction row code classifying to a mnemonic

use arem_core::classify::{classify, RowKind, INSTRUCTION_SPANS};
use arem_core::cursor::ByteCursor;
use arem_core::expression::Expression;
use arem_core::operand::{lookup_operand, Operand};
use arem_core::{decode_record, DecodeError};
use proptest::prelude::*;

fn record(instr_size: u8, row_type: u16, body: &[u8]) -> Vec<u8> {
    let mut bytes = vec![(body.len() + 5) as u8, instr_size];
    bytes.extend_from_slice(&row_type.to_le_bytes());
    bytes.extend_from_slice(body);
    bytes.push(0);
    bytes
}

fn fixed_text(code: u8) -> &'static str {
    match lookup_operand(code).unwrap() {
        Operand::Fixed(text) => text,
        Operand::Symbol(_) => panic!("code {:#04x} is not fixed", code),
    }
}

proptest! {
    /// Property: format 1/2/3 numbers render with H, B or no suffix.
    #[test]
    fn prop_numeric_suffixes(value in any::<u16>()) {
        let [lo, hi] = value.to_le_bytes();

        let hex = Expression::decode(&mut ByteCursor::new(&[0x01, lo, hi])).unwrap();
        prop_assert_eq!(hex.text, format!("{:x}H", value));

        let bin = Expression::decode(&mut ByteCursor::new(&[0x02, lo, hi])).unwrap();
        prop_assert_eq!(bin.text, format!("{:b}B", value));

        let dec = Expression::decode(&mut ByteCursor::new(&[0x03, lo, hi])).unwrap();
        prop_assert_eq!(dec.text, value.to_string());
    }

    /// Property: a quoted span is never split into terms or comments.
    #[test]
    fn prop_quoted_span_verbatim(inner in proptest::collection::vec(any::<u8>().prop_filter("no quote", |b| *b != b'\''), 0..40)) {
        let mut body = vec![b'\''];
        body.extend_from_slice(&inner);
        body.push(b'\'');

        let expr = Expression::decode(&mut ByteCursor::new(&body)).unwrap();
        let expected: String = body.iter().map(|&b| b as char).collect();
        prop_assert_eq!(expr.text, expected);
        prop_assert!(expr.comment.is_empty());
    }

    /// Property: two fixed operands render from the table, first code first.
    #[test]
    fn prop_fixed_operands(first in 0u8..=0x1E, second in 0u8..=0x1E) {
        let line = decode_record(&record(0, 0xDA00, &[first, second])).unwrap();

        let operands: Vec<&str> = [fixed_text(first), fixed_text(second)]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        let expected = if operands.is_empty() {
            "LD".to_string()
        } else {
            format!("LD\t{}", operands.join(","))
        };
        prop_assert_eq!(line, expected);
    }

    /// Property: every code in the instruction block is an instruction.
    #[test]
    fn prop_instruction_block_total(code in 0xDA00u16..=0xE1E3) {
        prop_assert!(matches!(classify(code), Ok(RowKind::Instruction(_))));
    }

    /// Property: codes below the instruction block are never classified.
    #[test]
    fn prop_low_codes_unknown(code in 0u16..0xDA00) {
        prop_assert_eq!(classify(code), Err(DecodeError::UnknownRowType(code)));
    }
}

#[test]
fn test_mnemonic_table_size() {
    let keys: usize = INSTRUCTION_SPANS
        .iter()
        .map(|s| (s.last - s.first) as usize + 1)
        .sum();
    assert_eq!(keys, 202);
}

#[test]
fn test_empty_expression_with_size_hint_zero() {
    let line = decode_record(&record(0, 0xDA00, &[0x07, 0x27])).unwrap();
    assert_eq!(line, "LD\tA");
}

#[test]
fn test_label_scenario() {
    let mut body = vec![0x83];
    body.extend_from_slice(b"FOO; init");
    assert_eq!(decode_record(&record(0, 0xE1EB, &body)).unwrap(), "FOO:\t; init");
}
