//! The seven-bit occurrence header.
//!
//! Bits, in stream order:
//!
//! | bits | field                                              |
//! |------|----------------------------------------------------|
//! | 0-1  | position tag: `00` single, `10` range, `01` set, `11` none |
//! | 2    | offset present                                     |
//! | 3    | real offset present                                |
//! | 4    | parent present                                     |
//! | 5    | payload present                                    |
//! | 6    | kind: `0` string, `1` reserved                     |

use lexspan_bits::{BitReader, BitWriter};
use lexspan_common::Result;
use lexspan_occurrence::{OccurrenceKind, Position, PositionKind};

/// Position representation announced by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionTag {
    Single,
    Range,
    Set,
    /// No position was encoded.
    None,
}

impl PositionTag {
    pub fn of(position: Option<&Position>) -> PositionTag {
        match position.map(Position::kind) {
            Some(PositionKind::Single) => PositionTag::Single,
            Some(PositionKind::Range) => PositionTag::Range,
            Some(PositionKind::Set) => PositionTag::Set,
            None => PositionTag::None,
        }
    }

    /// The two header bits in stream order.
    fn bits(self) -> (bool, bool) {
        match self {
            PositionTag::Single => (false, false),
            PositionTag::Range => (true, false),
            PositionTag::Set => (false, true),
            PositionTag::None => (true, true),
        }
    }

    fn from_bits(first: bool, second: bool) -> PositionTag {
        match (first, second) {
            (false, false) => PositionTag::Single,
            (true, false) => PositionTag::Range,
            (false, true) => PositionTag::Set,
            (true, true) => PositionTag::None,
        }
    }
}

/// Decoded form of the header bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub position: PositionTag,
    pub offset: bool,
    pub real_offset: bool,
    pub parent: bool,
    pub payload: bool,
    pub kind: OccurrenceKind,
}

impl Header {
    pub const BIT_LEN: usize = 7;

    pub fn write(&self, writer: &mut BitWriter) {
        let (first, second) = self.position.bits();
        writer.write_bit(first);
        writer.write_bit(second);
        writer.write_bit(self.offset);
        writer.write_bit(self.real_offset);
        writer.write_bit(self.parent);
        writer.write_bit(self.payload);
        writer.write_bit(self.kind == OccurrenceKind::Reserved);
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Header> {
        let first = reader.read_bit()?;
        let second = reader.read_bit()?;
        Ok(Header {
            position: PositionTag::from_bits(first, second),
            offset: reader.read_bit()?,
            real_offset: reader.read_bit()?,
            parent: reader.read_bit()?,
            payload: reader.read_bit()?,
            kind: if reader.read_bit()? {
                OccurrenceKind::Reserved
            } else {
                OccurrenceKind::String
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = Header {
            position: PositionTag::Range,
            offset: true,
            real_offset: false,
            parent: true,
            payload: false,
            kind: OccurrenceKind::String,
        };
        let mut writer = BitWriter::new();
        header.write(&mut writer);
        assert_eq!(writer.bit_len(), Header::BIT_LEN);
        // LSB first: 1, 0, 1, 0, 1, 0, 0
        assert_eq!(writer.finish(), vec![0b0001_0101]);

        let set = Header {
            position: PositionTag::Set,
            kind: OccurrenceKind::Reserved,
            ..header
        };
        let mut writer = BitWriter::new();
        set.write(&mut writer);
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b0101_0110]);
        assert_eq!(Header::read(&mut BitReader::new(&bytes)).unwrap(), set);
    }

    #[test]
    fn test_every_tag_reads_back() {
        for tag in [
            PositionTag::Single,
            PositionTag::Range,
            PositionTag::Set,
            PositionTag::None,
        ] {
            let (first, second) = tag.bits();
            assert_eq!(PositionTag::from_bits(first, second), tag);
        }
    }
}
