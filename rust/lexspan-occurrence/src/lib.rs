//! Data model of indexed occurrences.
//!
//! An occurrence is one linguistic unit (word, token, annotation span) produced
//! by a tokenizer. Besides its value it carries a token-count [`Position`],
//! optional character [`Offset`]s, a referential parent link and an opaque
//! payload. This crate defines those types and the algorithm that splits a
//! set of positions into a minimal list of point/range units
//! ([`decompose_points`]), which feeds the interval indexes.
//!
//! # Key Types
//!
//! - [`Position`] - canonical single/range/set position of an occurrence
//! - [`Offset`] - inclusive character span
//! - [`Occurrence`] - one tokenizer output unit with its metadata
//! - [`OccurrenceIdFactory`] - explicit, resettable occurrence id counter

pub mod decompose;
pub mod id_factory;
pub mod occurrence;
pub mod offset;
pub mod position;

pub use decompose::decompose_points;
pub use id_factory::OccurrenceIdFactory;
pub use occurrence::{Occurrence, OccurrenceKind, VALUE_DELIMITER};
pub use offset::Offset;
pub use position::{Position, PositionKind};
