use lexspan::{
    interval_tree::{OccurrenceIndex, OccurrenceIndexConfig},
    occurrence::{Occurrence, OccurrenceIdFactory},
    payload::{EncodingFlags, decode_occurrence, encode_occurrence},
};
use lexspan_testkit::data_gen::OccurrenceGenerator;

/// Builds one segment: payloads stored next to the "host" start position,
/// plus a position index.
fn build_segment(occurrences: &[Occurrence]) -> (Vec<(u32, Vec<u8>)>, OccurrenceIndex) {
    let mut index = OccurrenceIndex::new(OccurrenceIndexConfig::default()).unwrap();
    let stored = occurrences
        .iter()
        .map(|occurrence| {
            index.add_position(occurrence).unwrap();
            let start = occurrence.position().unwrap().start();
            (start, encode_occurrence(occurrence, EncodingFlags::ALL))
        })
        .collect();
    (stored, index)
}

#[test]
fn test_query_hits_decode_to_covering_occurrences() {
    let occurrences = OccurrenceGenerator::new(5_150)
        .with_max_position(500)
        .occurrences(600);
    let (stored, index) = build_segment(&occurrences);
    let (tree, _) = index.finish();

    for point in (0..500).step_by(13) {
        for hit in tree.search_hits(point, point) {
            let (start, bytes) = &stored[hit.id as usize];
            let decoded = decode_occurrence(bytes, *start).unwrap();
            assert_eq!(decoded.id, hit.id);
            let position = decoded.position.unwrap();
            assert!(position.contains(point), "{position} does not cover {point}");
        }
    }
}

#[test]
fn test_tokenizer_session_with_nested_annotations() {
    let mut ids = OccurrenceIdFactory::new();

    let mut sentence = Occurrence::with_prefix(ids.next_id(), "s", None);
    sentence.add_position_range(0, 3);
    sentence.set_offset(0, 22);

    let mut words = Vec::new();
    for (i, (text, start, end)) in [("The", 0, 2), ("cats", 4, 7), ("sat", 9, 11), ("down", 13, 16)]
        .into_iter()
        .enumerate()
    {
        let mut word = Occurrence::with_prefix(ids.next_id(), "t", Some(text));
        word.add_position(i as u32);
        word.set_offset(start, end);
        word.set_parent_id(Some(sentence.id()));
        words.push(word);
    }

    let mut parents = OccurrenceIndex::new(OccurrenceIndexConfig::default()).unwrap();
    for word in &words {
        assert!(parents.add_parent(word).unwrap());
    }
    assert!(!parents.add_parent(&sentence).unwrap());
    let (parent_tree, stats) = parents.finish();
    assert_eq!(stats.occurrences, 4);
    let mut children = parent_tree
        .search_hits(sentence.id(), sentence.id())
        .map(|hit| hit.id)
        .collect::<Vec<_>>();
    children.sort();
    assert_eq!(children, vec![1, 2, 3, 4]);

    for word in &words {
        let bytes = encode_occurrence(word, EncodingFlags::DEFAULT);
        let start = word.position().unwrap().start();
        let decoded = decode_occurrence(&bytes, start).unwrap();
        assert_eq!(decoded.parent_id, Some(0));
        assert_eq!(decoded.into_occurrence(word.value()), *word);
    }

    ids.reset();
    assert_eq!(ids.peek(), 0);
}

#[test]
fn test_document_index() {
    let mut documents = OccurrenceIndex::new(OccurrenceIndexConfig::document()).unwrap();
    for doc in [4u32, 1, 9, 7] {
        documents.add_document(doc, doc as u64 * 100).unwrap();
    }
    let (tree, stats) = documents.finish();
    assert_eq!((stats.min_position, stats.max_position), (Some(1), Some(9)));

    let next = tree.advance(5);
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].hits().next().map(|hit| hit.reference), Some(700));
}
