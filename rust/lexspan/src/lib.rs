//! # Lexspan: Positional Encoding and Interval Indexing for Annotated Text
//!
//! Lexspan stores linguistically rich metadata for every occurrence of a
//! text-search index: multi-position spans, character offsets, parent links
//! between nested annotations and opaque payloads. It keeps that metadata
//! compact and makes occurrence ranges searchable by overlap.
//!
//! ## Architecture
//!
//! The crate re-exports the workspace members so that a single dependency
//! gives access to the whole pipeline:
//!
//! * [`occurrence`] - occurrences, canonical positions and their decomposition
//!   into minimal point/range runs
//! * [`payload`] - the bit-exact per-occurrence codec
//! * [`interval_tree`] - the augmented interval index and occurrence index
//!   builders
//! * [`common`] - error type and result helpers
//!
//! ### Support Modules
//!
//! * [`support::bits`] - bit streams and Elias-Gamma integer coding
//!
//! ## Data Flow
//!
//! At index-build time each occurrence produced by a tokenizer is
//! decomposed into runs, each run is inserted into an
//! [`OccurrenceIndex`](interval_tree::OccurrenceIndex), and the occurrence
//! itself is encoded with [`encode_occurrence`](payload::encode_occurrence).
//! At query time the host supplies the absolute start position and
//! [`decode_occurrence`](payload::decode_occurrence) reconstructs the rest.
//!
//! ```rust
//! use lexspan::interval_tree::{OccurrenceIndex, OccurrenceIndexConfig};
//! use lexspan::occurrence::Occurrence;
//! use lexspan::payload::{EncodingFlags, decode_occurrence, encode_occurrence};
//!
//! let mut occurrence = Occurrence::with_prefix(0, "lemma", Some("walk"));
//! occurrence.add_positions([4, 5, 9]);
//! occurrence.set_offset(20, 31);
//!
//! let mut index = OccurrenceIndex::new(OccurrenceIndexConfig::default()).unwrap();
//! index.add_position(&occurrence).unwrap();
//! let (tree, _) = index.finish();
//! assert_eq!(tree.search_hits(9, 9).count(), 1);
//!
//! let bytes = encode_occurrence(&occurrence, EncodingFlags::DEFAULT);
//! let decoded = decode_occurrence(&bytes, 4).unwrap();
//! assert_eq!(decoded.position.as_ref(), occurrence.position());
//! ```

pub use lexspan_common as common;
pub use lexspan_interval_tree as interval_tree;
pub use lexspan_occurrence as occurrence;
pub use lexspan_payload as payload;

pub mod support {
    pub use lexspan_bits as bits;
}
