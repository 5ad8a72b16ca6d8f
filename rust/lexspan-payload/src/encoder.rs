//! Occurrence to payload bytes.

use lexspan_bits::BitWriter;
use lexspan_occurrence::{Occurrence, Offset, Position};

use crate::{
    flags::EncodingFlags,
    header::{Header, PositionTag},
};

/// Computes the header the encoder writes for `occurrence` under `flags`.
///
/// This is the single place deciding which optional fields are present.
pub fn header_for(occurrence: &Occurrence, flags: EncodingFlags) -> Header {
    let offset = encoded_offset(occurrence, flags);
    Header {
        position: PositionTag::of(occurrence.position()),
        offset: offset.is_some(),
        real_offset: encoded_real_offset(occurrence, flags, offset).is_some(),
        parent: flags.contains(EncodingFlags::PARENT) && occurrence.has_parent(),
        payload: flags.contains(EncodingFlags::PAYLOAD) && occurrence.has_payload(),
        kind: occurrence.kind(),
    }
}

/// Serializes the metadata of one occurrence.
///
/// The absolute start position is not stored; the decoder receives it from
/// the host's positional postings. The output is the bit-packed header and
/// integer fields, zero-padded to a byte boundary, followed by the raw
/// payload bytes when they are encoded.
pub fn encode_occurrence(occurrence: &Occurrence, flags: EncodingFlags) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(8 + occurrence.payload().map_or(0, <[u8]>::len));
    encode_into(occurrence, flags, &mut writer);
    let bytes = writer.finish();
    log::trace!(
        "encoded occurrence {} into {} bytes",
        occurrence.id(),
        bytes.len()
    );
    bytes
}

/// Writes one encoded occurrence into `writer`, leaving it byte-aligned.
pub fn encode_into(occurrence: &Occurrence, flags: EncodingFlags, writer: &mut BitWriter) {
    let offset = encoded_offset(occurrence, flags);
    let real_offset = encoded_real_offset(occurrence, flags, offset);
    let header = header_for(occurrence, flags);
    header.write(writer);

    let id = occurrence.id();
    writer.write_non_negative(id as u64);

    if let Some(position) = occurrence.position() {
        write_position(position, writer);
    }

    if let Some(offset) = offset {
        writer.write_non_negative(offset.start() as u64);
        writer.write_positive(span_len(offset));
    }

    if let Some(real) = real_offset {
        match offset {
            Some(offset) => writer.write_signed(real.start() as i64 - offset.start() as i64),
            None => writer.write_non_negative(real.start() as u64),
        }
        writer.write_positive(span_len(real));
    }

    if let Some(parent_id) = occurrence.parent_id().filter(|_| header.parent) {
        writer.write_signed(parent_id as i64 - id as i64);
    }

    writer.create_byte();

    if let Some(payload) = occurrence.payload().filter(|_| header.payload) {
        writer.write_bytes(payload);
    }
}

fn write_position(position: &Position, writer: &mut BitWriter) {
    match position.set_points() {
        Some(points) => {
            writer.write_positive(points.len() as u64);
            for pair in points.windows(2) {
                writer.write_positive((pair[1] - pair[0]) as u64);
            }
        }
        None if position.start() != position.end() => writer.write_positive(position.span_len()),
        None => {}
    }
}

fn encoded_offset(occurrence: &Occurrence, flags: EncodingFlags) -> Option<Offset> {
    if flags.contains(EncodingFlags::OFFSET) && occurrence.has_offset() {
        occurrence.offset()
    } else {
        None
    }
}

/// The real offset is written only when it adds information to the offset
/// that is actually written.
fn encoded_real_offset(
    occurrence: &Occurrence,
    flags: EncodingFlags,
    offset: Option<Offset>,
) -> Option<Offset> {
    if !flags.contains(EncodingFlags::REAL_OFFSET) {
        return None;
    }
    occurrence.real_offset_beyond(offset)
}

fn span_len(offset: Offset) -> u64 {
    (offset.end() - offset.start()) as u64 + 1
}
