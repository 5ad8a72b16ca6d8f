//! Bit-exact codec for per-occurrence metadata.
//!
//! Each occurrence is serialized into a small byte blob stored next to the
//! host index's native postings entry. The blob holds everything except the
//! absolute start position, which the host already stores and hands back to
//! [`decode_occurrence`] at read time.
//!
//! # Layout
//!
//! 1. Seven header bits (see [`header`]): position tag, offset, real offset,
//!    parent and payload presence, kind.
//! 2. Occurrence id, non-negative Elias-Gamma.
//! 3. Position body: nothing for a single position, the positive span length
//!    for a range, the point count and the positive gaps between successive
//!    points for a set.
//! 4. Offset: non-negative start, positive length.
//! 5. Real offset: signed start delta against the offset if one was written,
//!    otherwise a non-negative start; then the positive length.
//! 6. Parent: signed delta against the occurrence id.
//! 7. Zero padding to the next byte boundary.
//! 8. Raw payload bytes.
//!
//! The layout is a wire format. Changing it requires a version tag managed
//! outside this crate.

pub mod decoder;
pub mod encoder;
pub mod flags;
pub mod header;

pub use decoder::{DecodedOccurrence, decode_occurrence};
pub use encoder::{encode_into, encode_occurrence, header_for};
pub use flags::EncodingFlags;
pub use header::{Header, PositionTag};
