//! Stream decoder for tokenised source images
//!
//! Handles a whole image:
//! - Container header parsed once
//! - Records delimited by their own length byte
//! - One output line per record, stopping at the first error

use tracing::{debug, warn};

use crate::error::Result;
use crate::header::{ContainerHeader, HEADER_SIZE};
use crate::record::Record;
use crate::types::{SourceLine, SourceListing};

/// Iterator over the records following the header
pub struct RecordReader<'a> {
    data: &'a [u8],
    offset: usize,
    index: usize,
    failed: bool,
}

impl<'a> RecordReader<'a> {
    /// `data` is the record stream only, `base` its offset in the file
    pub fn new(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            offset: base,
            index: 0,
            failed: false,
        }
    }

    /// Offset in the file of the next record
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A record plus where it was found
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub index: usize,
    pub offset: usize,
    pub record: Record<'a>,
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<Located<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.data.is_empty() {
            return None;
        }

        let (index, offset) = (self.index, self.offset);
        match Record::parse(self.data) {
            Ok(record) => {
                let len = record.length as usize;
                self.data = &self.data[len..];
                self.offset += len;
                self.index += 1;
                Some(Ok(Located {
                    index,
                    offset,
                    record,
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e.at_record(index, offset)))
            }
        }
    }
}

/// Decodes a complete image into source lines
pub struct Decoder<'a> {
    header: ContainerHeader,
    records: RecordReader<'a>,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = ContainerHeader::parse(data)?;
        let stream = &data[HEADER_SIZE..];

        if stream.len() != header.size as usize {
            warn!(
                "header declares {} byte(s) of records, file holds {}",
                header.size,
                stream.len()
            );
        }

        Ok(Self {
            header,
            records: RecordReader::new(stream, HEADER_SIZE),
            failed: false,
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// Decode everything into a listing, failing on the first bad record
    pub fn into_listing(self) -> Result<SourceListing> {
        let name = self.header.name.clone();
        let load_address = self.header.load_address;
        let exec_address = self.header.exec_address;
        let lines = self.collect::<Result<Vec<_>>>()?;

        Ok(SourceListing {
            name,
            load_address,
            exec_address,
            lines,
        })
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let located = match self.records.next()? {
            Ok(located) => located,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        debug!(
            "record {} at {:#06x}: row type {:#06x}, {} byte(s)",
            located.index, located.offset, located.record.row_type, located.record.length
        );

        match located.record.decode() {
            Ok(line) => Some(Ok(SourceLine {
                line_no: located.index as u32 + 1,
                text: line.render(),
            })),
            Err(e) => {
                self.failed = true;
                Some(Err(e.at_record(located.index, located.offset)))
            }
        }
    }
}

/// Decode a whole image held in memory
pub fn decode_listing(data: &[u8]) -> Result<SourceListing> {
    Decoder::new(data)?.into_listing()
}

/// Decode the record at the start of `bytes` into its rendered line
pub fn decode_record(bytes: &[u8]) -> Result<String> {
    Ok(Record::parse(bytes)?.decode()?.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::header::tests::header_bytes;

    fn record(instr_size: u8, row_type: u16, body: &[u8]) -> Vec<u8> {
        let mut bytes = vec![(body.len() + 5) as u8, instr_size];
        bytes.extend_from_slice(&row_type.to_le_bytes());
        bytes.extend_from_slice(body);
        bytes.push(0);
        bytes
    }

    fn image(records: &[Vec<u8>]) -> Vec<u8> {
        let stream: Vec<u8> = records.concat();
        let mut data = header_bytes("TEST", stream.len() as u16);
        data.extend_from_slice(&stream);
        data
    }

    #[test]
    fn test_decode_listing() {
        let data = image(&[
            record(0, 0xE1ED, b"; demo"),
            record(0, 0xE1E4, &[0x01, 0x00, 0x12]),
            record(0, 0xDA00, &[0x01, 0x02]),
        ]);

        let listing = decode_listing(&data).unwrap();
        assert_eq!(listing.name, "TEST");
        let text: Vec<&str> = listing.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(text, vec!["; demo", "ORG\t1200H", "LD\tB,C"]);
        assert_eq!(listing.lines[2].line_no, 3);
    }

    #[test]
    fn test_empty_stream() {
        let listing = decode_listing(&image(&[])).unwrap();
        assert!(listing.lines.is_empty());
    }

    #[test]
    fn test_unknown_row_stops_decoding() {
        let data = image(&[
            record(0, 0xE1ED, b";ok"),
            record(0, 0xE1EE, b""),
            record(0, 0xE1ED, b";never"),
        ]);

        let results: Vec<_> = Decoder::new(&data).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().text, ";ok");

        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.root(), &DecodeError::UnknownRowType(0xE1EE));
        match err {
            DecodeError::AtRecord { index, offset, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(*offset, HEADER_SIZE + 8);
            }
            other => panic!("missing record context: {:?}", other),
        }
        assert!(err.to_string().contains("0xe1ee"));
    }

    #[test]
    fn test_truncated_trailing_record() {
        let mut data = image(&[record(0, 0xE1ED, b";ok")]);
        data.extend_from_slice(&[0x09, 0x00]);

        let mut decoder = Decoder::new(&data).unwrap();
        assert!(decoder.next().unwrap().is_ok());
        let err = decoder.next().unwrap().unwrap_err();
        assert!(matches!(err.root(), DecodeError::TruncatedRecord { .. }));
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_listing_fails_whole() {
        let data = image(&[record(0, 0xE1ED, b";ok"), record(0, 0x0001, b"")]);
        assert!(decode_listing(&data).is_err());
    }

    #[test]
    fn test_decode_record() {
        assert_eq!(decode_record(&record(0, 0xDA00, &[0x07, 0x01])).unwrap(), "LD\tA,B");
        assert!(decode_record(&record(0, 0xDA00, &[0x07])).is_err());
    }
}
