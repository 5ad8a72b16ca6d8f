//! Payload bytes back to occurrence fields.
//!
//! Decoding is a pure function of the encoded bytes and the start position
//! supplied by the host's positional postings, so any number of threads may
//! decode concurrently.

use lexspan_bits::BitReader;
use lexspan_common::{Result, error::Error, result::narrow_u32, verify_data};
use lexspan_occurrence::{Occurrence, OccurrenceKind, Offset, Position};

use crate::header::{Header, PositionTag};

/// Fields reconstructed from one encoded occurrence.
///
/// Fields that were absent or suppressed at encode time are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOccurrence {
    pub id: u32,
    pub kind: OccurrenceKind,
    /// `None` for the `11` position header.
    pub position: Option<Position>,
    pub offset: Option<Offset>,
    pub real_offset: Option<Offset>,
    pub parent_id: Option<u32>,
    pub payload: Option<Vec<u8>>,
}

impl DecodedOccurrence {
    /// Rebuilds an [`Occurrence`] carrying the decoded fields and `value`,
    /// which is stored by the host index rather than in the payload.
    pub fn into_occurrence(self, value: impl Into<String>) -> Occurrence {
        let mut occurrence = Occurrence::new(self.id, value);
        occurrence.set_kind(self.kind);
        occurrence.set_position(self.position);
        if let Some(offset) = self.offset {
            occurrence.set_offset(offset.start(), offset.end());
        }
        if let Some(real) = self.real_offset {
            occurrence.set_real_offset(real.start(), real.end());
        }
        occurrence.set_parent_id(self.parent_id);
        occurrence.set_payload(self.payload);
        occurrence
    }
}

/// Decodes one occurrence written by [`crate::encode_occurrence`].
///
/// `start_position` is the absolute position of the occurrence, anchoring
/// single, range and set positions.
///
/// # Errors
///
/// Returns an `InvalidFormat` error for truncated or structurally invalid
/// input. Once the occurrence id has been read, the error is attributed to
/// that occurrence (see [`Error::occurrence_id`]).
pub fn decode_occurrence(bytes: &[u8], start_position: u32) -> Result<DecodedOccurrence> {
    let mut reader = BitReader::new(bytes);
    let header = Header::read(&mut reader).inspect_err(|e| {
        log::debug!("failed to decode occurrence header: {e}");
    })?;
    let id = narrow_u32(reader.read_non_negative()?, "occurrence id").inspect_err(|e| {
        log::debug!("failed to decode occurrence id: {e}");
    })?;

    let decoded = decode_body(&mut reader, header, id, start_position)
        .map_err(|e| e.for_occurrence(id))
        .inspect_err(|e| log::debug!("{e}"))?;
    log::trace!("decoded occurrence {id} from {} bytes", bytes.len());
    Ok(decoded)
}

fn decode_body(
    reader: &mut BitReader<'_>,
    header: Header,
    id: u32,
    start_position: u32,
) -> Result<DecodedOccurrence> {
    let position = read_position(reader, header.position, start_position)?;

    let offset = if header.offset {
        let start = narrow_u32(reader.read_non_negative()?, "offset start")?;
        Some(read_span(reader, start, "offset")?)
    } else {
        None
    };

    let real_offset = if header.real_offset {
        let start = match offset {
            Some(offset) => {
                let delta = reader.read_signed()?;
                apply_delta(offset.start(), delta, "real offset start")?
            }
            None => narrow_u32(reader.read_non_negative()?, "real offset start")?,
        };
        Some(read_span(reader, start, "real offset")?)
    } else {
        None
    };

    let parent_id = if header.parent {
        let delta = reader.read_signed()?;
        Some(apply_delta(id, delta, "parent id")?)
    } else {
        None
    };

    let payload = if header.payload {
        Some(reader.read_remaining_bytes().to_vec())
    } else {
        None
    };

    Ok(DecodedOccurrence {
        id,
        kind: header.kind,
        position,
        offset,
        real_offset,
        parent_id,
        payload,
    })
}

fn read_position(
    reader: &mut BitReader<'_>,
    tag: PositionTag,
    start: u32,
) -> Result<Option<Position>> {
    let position = match tag {
        PositionTag::None => return Ok(None),
        PositionTag::Single => Position::single(start),
        PositionTag::Range => {
            let len = reader.read_positive()?;
            Position::range(start, span_end(start, len, "position range")?)
        }
        PositionTag::Set => {
            let count = reader.read_positive()?;
            // Every delta takes at least one bit.
            verify_data!(position_set, count - 1 <= reader.remaining_bits() as u64);
            let mut points = Vec::with_capacity(count as usize);
            let mut point = start;
            points.push(point);
            for _ in 1..count {
                let delta = reader.read_positive()?;
                point = (point as u64)
                    .checked_add(delta)
                    .ok_or_else(|| Error::invalid_format("position set", "delta overflow"))
                    .and_then(|next| narrow_u32(next, "position set"))?;
                points.push(point);
            }
            Position::from_points(points)
        }
    };
    Ok(Some(position))
}

fn read_span(reader: &mut BitReader<'_>, start: u32, element: &str) -> Result<Offset> {
    let len = reader.read_positive()?;
    Ok(Offset::new(start, span_end(start, len, element)?))
}

/// Returns `start + len - 1`, the inclusive end of a span of `len` values.
fn span_end(start: u32, len: u64, element: &str) -> Result<u32> {
    let end = (start as u64)
        .checked_add(len - 1)
        .ok_or_else(|| Error::invalid_format(element, "span length overflow"))?;
    narrow_u32(end, element)
}

fn apply_delta(base: u32, delta: i64, element: &str) -> Result<u32> {
    let value = i64::from(base)
        .checked_add(delta)
        .ok_or_else(|| Error::invalid_format(element, "delta overflow"))?;
    u32::try_from(value).map_err(|_| {
        Error::invalid_format(element, format!("value {value} outside the u32 range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodingFlags, encode_occurrence};
    use lexspan_common::error::ErrorKind;

    #[test]
    fn test_decode_minimal() {
        let decoded = decode_occurrence(&[0b1000_0000], 41).unwrap();
        assert_eq!(decoded.id, 0);
        assert_eq!(decoded.position, Some(Position::single(41)));
        assert_eq!(decoded.kind, OccurrenceKind::String);
        assert!(decoded.offset.is_none() && decoded.parent_id.is_none());
        assert!(decoded.payload.is_none());
    }

    #[test]
    fn test_set_position_uses_anchor() {
        let mut occurrence = Occurrence::new(7, "w");
        occurrence.add_positions([3, 4, 9]);
        let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);

        let decoded = decode_occurrence(&bytes, 3).unwrap();
        assert_eq!(decoded.position, Some(Position::from_points([3, 4, 9])));

        // The stored deltas are relative; a different anchor shifts the set.
        let shifted = decode_occurrence(&bytes, 100).unwrap();
        assert_eq!(shifted.position, Some(Position::from_points([100, 101, 106])));
    }

    #[test]
    fn test_none_header_and_reserved_kind() {
        // Position tag 11, kind bit set, id 0.
        let decoded = decode_occurrence(&[0b1100_0011], 5).unwrap();
        assert_eq!(decoded.position, None);
        assert_eq!(decoded.kind, OccurrenceKind::Reserved);
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = decode_occurrence(&[], 0).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.occurrence_id(), None);
    }

    #[test]
    fn test_truncated_body_names_occurrence() {
        let mut occurrence = Occurrence::new(9, "w");
        occurrence.add_position(0);
        occurrence.set_offset(1000, 2000);
        occurrence.set_parent_id(Some(2));
        let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);

        let err = decode_occurrence(&bytes[..2], 0).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.occurrence_id(), Some(9));
        assert!(matches!(err.kind(), ErrorKind::OccurrencePayload { .. }));
    }

    #[test]
    fn test_parent_before_zero_is_rejected() {
        let mut occurrence = Occurrence::new(1, "w");
        occurrence.add_position(0);
        occurrence.set_parent_id(Some(0));
        let mut bytes = encode_occurrence(&occurrence, EncodingFlags::PARENT);
        assert_eq!(
            decode_occurrence(&bytes, 0).unwrap().parent_id,
            Some(0)
        );

        // Rewrite the id to 0 so that the parent delta of -1 underflows.
        let mut writer = lexspan_bits::BitWriter::new();
        crate::header_for(&occurrence, EncodingFlags::PARENT).write(&mut writer);
        writer.write_non_negative(0);
        writer.write_signed(-1);
        bytes = writer.finish();
        let err = decode_occurrence(&bytes, 0).unwrap_err();
        assert_eq!(err.occurrence_id(), Some(0));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_huge_parent_delta_is_rejected() {
        let header = Header {
            position: PositionTag::Single,
            offset: false,
            real_offset: false,
            parent: true,
            payload: false,
            kind: OccurrenceKind::String,
        };
        let mut writer = lexspan_bits::BitWriter::new();
        header.write(&mut writer);
        writer.write_non_negative(1);
        writer.write_signed(i64::MAX);
        let err = decode_occurrence(&writer.finish(), 0).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.occurrence_id(), Some(1));
    }

    #[test]
    fn test_huge_real_offset_delta_is_rejected() {
        let header = Header {
            position: PositionTag::Single,
            offset: true,
            real_offset: true,
            parent: false,
            payload: false,
            kind: OccurrenceKind::String,
        };
        let mut writer = lexspan_bits::BitWriter::new();
        header.write(&mut writer);
        writer.write_non_negative(4);
        writer.write_non_negative(10);
        writer.write_positive(3);
        writer.write_signed(i64::MAX);
        writer.write_positive(1);
        let err = decode_occurrence(&writer.finish(), 0).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.occurrence_id(), Some(4));
    }
}
