use lexspan_bits::{BitReader, BitWriter};
use lexspan_occurrence::{Occurrence, OccurrenceKind, Offset, Position};
use lexspan_payload::{DecodedOccurrence, EncodingFlags, decode_occurrence, encode_occurrence};
use lexspan_testkit::data_gen::OccurrenceGenerator;

fn expected_fields(occurrence: &Occurrence, flags: EncodingFlags) -> DecodedOccurrence {
    let offset = occurrence
        .offset()
        .filter(|_| flags.contains(EncodingFlags::OFFSET) && occurrence.has_offset());
    let real_offset = occurrence.real_offset().filter(|real| {
        flags.contains(EncodingFlags::REAL_OFFSET)
            && occurrence.provide_real_offset()
            && offset != Some(*real)
    });
    DecodedOccurrence {
        id: occurrence.id(),
        kind: occurrence.kind(),
        position: occurrence.position().cloned(),
        offset,
        real_offset,
        parent_id: occurrence
            .parent_id()
            .filter(|_| flags.contains(EncodingFlags::PARENT) && occurrence.has_parent()),
        payload: occurrence
            .payload()
            .filter(|_| flags.contains(EncodingFlags::PAYLOAD))
            .map(<[u8]>::to_vec),
    }
}

#[test]
fn test_random_round_trip_all_flag_combinations() {
    let mut generator = OccurrenceGenerator::new(90_210);
    let occurrences = generator.occurrences(400);
    for bits in 0..=EncodingFlags::ALL.bits() {
        let flags = EncodingFlags::from_bits_truncate(bits);
        for occurrence in &occurrences {
            let bytes = encode_occurrence(occurrence, flags);
            let start = occurrence.position().map_or(0, Position::start);
            let decoded = decode_occurrence(&bytes, start).unwrap();
            assert_eq!(
                decoded,
                expected_fields(occurrence, flags),
                "{occurrence} with {flags:?}"
            );
        }
    }
}

#[test]
fn test_full_occurrence_round_trip() {
    let mut occurrence = Occurrence::with_prefix(12, "lemma", Some("run"));
    occurrence.add_positions([40, 41, 45, 46, 47]);
    occurrence.set_offset(300, 320);
    occurrence.set_real_offset(295, 330);
    occurrence.set_parent_id(Some(15));
    occurrence.set_payload(Some(vec![0, 1, 2, 255]));

    let bytes = encode_occurrence(&occurrence, EncodingFlags::ALL);
    let decoded = decode_occurrence(&bytes, 40).unwrap();
    assert_eq!(decoded.position, occurrence.position().cloned());
    assert_eq!(decoded.offset, Some(Offset::new(300, 320)));
    assert_eq!(decoded.real_offset, Some(Offset::new(295, 330)));
    assert_eq!(decoded.parent_id, Some(15));
    assert_eq!(decoded.payload.as_deref(), Some(&[0, 1, 2, 255][..]));

    let rebuilt = decoded.into_occurrence(occurrence.value());
    assert_eq!(rebuilt, occurrence);
}

#[test]
fn test_bit_exact_layout() {
    let mut occurrence = Occurrence::new(2, "w");
    occurrence.add_position_range(10, 11);
    occurrence.set_offset(0, 3);
    occurrence.set_parent_id(Some(1));
    let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);

    // Read it back field by field with the raw primitives.
    let mut reader = BitReader::new(&bytes);
    let header = (0..7)
        .map(|_| reader.read_bit().unwrap() as u8)
        .collect::<Vec<_>>();
    assert_eq!(header, vec![1, 0, 1, 0, 1, 0, 0]);
    assert_eq!(reader.read_non_negative().unwrap(), 2);
    assert_eq!(reader.read_positive().unwrap(), 2);
    assert_eq!(reader.read_non_negative().unwrap(), 0);
    assert_eq!(reader.read_positive().unwrap(), 4);
    assert_eq!(reader.read_signed().unwrap(), -1);
    assert!(reader.remaining_bits() < 8);
    assert!(reader.read_remaining_bytes().is_empty());
}

#[test]
fn test_empty_payload_round_trips_as_empty() {
    let mut occurrence = Occurrence::new(5, "w");
    occurrence.add_position(3);
    occurrence.set_payload(Some(Vec::new()));
    let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);
    let decoded = decode_occurrence(&bytes, 3).unwrap();
    assert_eq!(decoded.payload, Some(Vec::new()));
}

#[test]
fn test_unpositioned_occurrence_uses_none_header() {
    let mut occurrence = Occurrence::new(4, "w");
    occurrence.set_kind(OccurrenceKind::Reserved);
    let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);
    assert_eq!(bytes[0] & 0b11, 0b11);
    let decoded = decode_occurrence(&bytes, 77).unwrap();
    assert_eq!(decoded.position, None);
    assert_eq!(decoded.kind, OccurrenceKind::Reserved);
    assert_eq!(decoded.id, 4);
}

#[test]
fn test_every_truncation_fails_cleanly() {
    let mut generator = OccurrenceGenerator::new(4_242);
    for occurrence in generator.occurrences(200) {
        let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);
        // The payload tail is length-free, so only cut into the bit-packed part.
        let packed_len = bytes.len() - occurrence.payload().map_or(0, <[u8]>::len);
        for cut in 0..packed_len {
            let start = occurrence.position().map_or(0, Position::start);
            // The last packed byte always holds at least one field bit.
            let err = decode_occurrence(&bytes[..cut], start).unwrap_err();
            assert!(err.is_format_error(), "{err}");
            if let Some(id) = err.occurrence_id() {
                assert_eq!(id, occurrence.id());
            }
        }
    }
}

#[test]
fn test_out_of_range_values_are_format_errors() {
    // Id beyond u32.
    let mut writer = BitWriter::new();
    writer.write_bits(false, 7);
    writer.write_non_negative(u32::MAX as u64 + 1);
    let err = decode_occurrence(&writer.finish(), 0).unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.occurrence_id(), None);

    // Range reaching past u32::MAX.
    let mut writer = BitWriter::new();
    writer.write_bit(true);
    writer.write_bits(false, 6);
    writer.write_non_negative(3);
    writer.write_positive(10);
    let err = decode_occurrence(&writer.finish(), u32::MAX - 2).unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.occurrence_id(), Some(3));

    // Set claiming more points than there are bits.
    let mut writer = BitWriter::new();
    writer.write_bit(false);
    writer.write_bit(true);
    writer.write_bits(false, 5);
    writer.write_non_negative(0);
    writer.write_positive(1 << 40);
    let err = decode_occurrence(&writer.finish(), 0).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_concurrent_decoding() {
    let mut generator = OccurrenceGenerator::new(1_001);
    let encoded = generator
        .occurrences(300)
        .into_iter()
        .map(|o| {
            let bytes = encode_occurrence(&o, EncodingFlags::ALL);
            (o, bytes)
        })
        .collect::<Vec<_>>();

    std::thread::scope(|scope| {
        for chunk in encoded.chunks(50) {
            scope.spawn(move || {
                for (occurrence, bytes) in chunk {
                    let start = occurrence.position().map_or(0, Position::start);
                    let decoded = decode_occurrence(bytes, start).unwrap();
                    assert_eq!(decoded, expected_fields(occurrence, EncodingFlags::ALL));
                }
            });
        }
    });
}
