//! Indexed occurrences and their metadata.
//!
//! An [`Occurrence`] is created by a tokenizer for every linguistic unit it
//! emits. Positions and offsets are accumulated while tokenizing; afterwards
//! the occurrence is treated as immutable and handed to the payload encoder
//! and the interval index builders.
//!
//! # Value Layout
//!
//! The value of an occurrence is usually a `prefix` (the annotation layer,
//! e.g. `lemma` or `pos`) and a `postfix` (the annotated text) joined by
//! [`VALUE_DELIMITER`]. Values without a delimiter consist of a prefix only.
//!
//! # Suppression Flags
//!
//! The offset, real offset and parent id each have a `provide_*` flag. A
//! cleared flag withholds the value from encoding without discarding it.

use std::fmt;

use crate::{offset::Offset, position::Position};

/// Separator between the prefix and the postfix of an occurrence value.
pub const VALUE_DELIMITER: char = '\u{1}';

/// Padding character stripped from prefixes and postfixes.
const VALUE_PADDING: char = '\u{0}';

/// Type tag of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OccurrenceKind {
    /// Plain string occurrence, the only concrete kind.
    #[default]
    String,
    /// Placeholder for kinds added by later format revisions.
    Reserved,
}

/// One indexed linguistic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    id: u32,
    kind: OccurrenceKind,
    value: String,
    position: Option<Position>,
    offset: Option<Offset>,
    real_offset: Option<Offset>,
    parent_id: Option<u32>,
    payload: Option<Vec<u8>>,
    provide_offset: bool,
    provide_real_offset: bool,
    provide_parent_id: bool,
    token_ref: Option<u64>,
    term_ref: Option<u64>,
    prefix_id: Option<u32>,
}

impl Occurrence {
    /// Creates an occurrence with the given id and raw value.
    pub fn new(id: u32, value: impl Into<String>) -> Occurrence {
        Occurrence {
            id,
            kind: OccurrenceKind::String,
            value: value.into(),
            position: None,
            offset: None,
            real_offset: None,
            parent_id: None,
            payload: None,
            provide_offset: true,
            provide_real_offset: true,
            provide_parent_id: true,
            token_ref: None,
            term_ref: None,
            prefix_id: None,
        }
    }

    /// Creates an occurrence whose value is `prefix`, the delimiter and an
    /// optional `postfix`.
    pub fn with_prefix(id: u32, prefix: &str, postfix: Option<&str>) -> Occurrence {
        let mut value = String::with_capacity(prefix.len() + 1 + postfix.map_or(0, str::len));
        value.push_str(prefix);
        value.push(VALUE_DELIMITER);
        if let Some(postfix) = postfix {
            value.push_str(postfix);
        }
        Occurrence::new(id, value)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn kind(&self) -> OccurrenceKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: OccurrenceKind) {
        self.kind = kind;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Returns the part of the value before the first delimiter, without
    /// padding characters.
    pub fn prefix(&self) -> String {
        prefix_of(&self.value)
    }

    /// Returns the part of the value after the first delimiter, up to the
    /// first padding character. Empty if the value has no delimiter.
    pub fn postfix(&self) -> &str {
        postfix_of(&self.value)
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    /// Adds a single token position.
    pub fn add_position(&mut self, position: u32) {
        match &mut self.position {
            Some(current) => current.add_point(position),
            None => self.position = Some(Position::single(position)),
        }
    }

    /// Adds the token positions `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn add_position_range(&mut self, start: u32, end: u32) {
        match &mut self.position {
            Some(current) => current.add_range(start, end),
            None => self.position = Some(Position::range(start, end)),
        }
    }

    /// Adds a collection of token positions. An empty collection is ignored.
    pub fn add_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = u32>,
    {
        let positions = positions.into_iter().collect::<Vec<_>>();
        if positions.is_empty() {
            return;
        }
        match &mut self.position {
            Some(current) => current.add_points(positions),
            None => self.position = Some(Position::from_points(positions)),
        }
    }

    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }

    /// Replaces the offset.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn set_offset(&mut self, start: u32, end: u32) {
        self.offset = Some(Offset::new(start, end));
    }

    /// Widens the offset to also cover `[start, end]`, or sets it if absent.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn add_offset(&mut self, start: u32, end: u32) {
        match &mut self.offset {
            Some(offset) => offset.extend(start, end),
            None => self.set_offset(start, end),
        }
    }

    pub fn real_offset(&self) -> Option<Offset> {
        self.real_offset
    }

    /// Replaces the real offset.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn set_real_offset(&mut self, start: u32, end: u32) {
        self.real_offset = Some(Offset::new(start, end));
    }

    pub fn parent_id(&self) -> Option<u32> {
        self.parent_id
    }

    pub fn set_parent_id(&mut self, parent_id: Option<u32>) {
        self.parent_id = parent_id;
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn set_payload(&mut self, payload: Option<Vec<u8>>) {
        self.payload = payload;
    }

    pub fn provide_offset(&self) -> bool {
        self.provide_offset
    }

    pub fn set_provide_offset(&mut self, provide: bool) {
        self.provide_offset = provide;
    }

    pub fn provide_real_offset(&self) -> bool {
        self.provide_real_offset
    }

    pub fn set_provide_real_offset(&mut self, provide: bool) {
        self.provide_real_offset = provide;
    }

    pub fn provide_parent_id(&self) -> bool {
        self.provide_parent_id
    }

    pub fn set_provide_parent_id(&mut self, provide: bool) {
        self.provide_parent_id = provide;
    }

    pub fn token_ref(&self) -> Option<u64> {
        self.token_ref
    }

    pub fn set_token_ref(&mut self, token_ref: Option<u64>) {
        self.token_ref = token_ref;
    }

    pub fn term_ref(&self) -> Option<u64> {
        self.term_ref
    }

    pub fn set_term_ref(&mut self, term_ref: Option<u64>) {
        self.term_ref = term_ref;
    }

    pub fn prefix_id(&self) -> Option<u32> {
        self.prefix_id
    }

    pub fn set_prefix_id(&mut self, prefix_id: Option<u32>) {
        self.prefix_id = prefix_id;
    }

    /// Returns `true` if an offset is set and not suppressed.
    pub fn has_offset(&self) -> bool {
        self.offset.is_some() && self.provide_offset
    }

    /// Returns `true` if a real offset is set, not suppressed, and carries
    /// information beyond the offset: either no offset is available or the
    /// two spans differ.
    pub fn has_real_offset(&self) -> bool {
        let offset = self.offset.filter(|_| self.provide_offset);
        self.real_offset_beyond(offset).is_some()
    }

    /// Returns the real offset if it is set, not suppressed, and differs
    /// from `offset`, the offset a reader will actually see.
    pub fn real_offset_beyond(&self, offset: Option<Offset>) -> Option<Offset> {
        self.real_offset
            .filter(|real| self.provide_real_offset && offset != Some(*real))
    }

    /// Returns `true` if a parent id is set and not suppressed.
    pub fn has_parent(&self) -> bool {
        self.parent_id.is_some() && self.provide_parent_id
    }

    /// Returns `true` if payload bytes are attached.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn span(f: &mut fmt::Formatter<'_>, offset: Option<Offset>, provided: bool) -> fmt::Result {
            match offset {
                Some(offset) => write!(f, "{:>17}", offset.to_string())?,
                None => write!(f, "{:>17}", "[-------,-------]")?,
            }
            f.write_str(if provided { "  " } else { "* " })
        }

        write!(f, "[{:05}] ", self.id)?;
        span(f, self.real_offset, self.provide_real_offset)?;
        span(f, self.offset, self.provide_offset)?;
        match &self.position {
            Some(position) => write!(f, "{:>11}", position.to_string())?,
            None => write!(f, "{:>11}", "")?,
        }
        match self.parent_id {
            Some(parent) => write!(f, "[{parent:05}]")?,
            None => f.write_str("[-----]")?,
        }
        f.write_str(if self.provide_parent_id { "  " } else { "* " })?;
        match &self.payload {
            Some(payload) => write!(f, "[{} bytes] ", payload.len())?,
            None => f.write_str("[------] ")?,
        }
        write!(f, "[{}] [{}]", self.prefix(), self.postfix())
    }
}

fn prefix_of(value: &str) -> String {
    let prefix = value
        .split_once(VALUE_DELIMITER)
        .map_or(value, |(prefix, _)| prefix);
    prefix.replace(VALUE_PADDING, "")
}

fn postfix_of(value: &str) -> &str {
    match value.split_once(VALUE_DELIMITER) {
        Some((_, postfix)) => postfix
            .split_once(VALUE_PADDING)
            .map_or(postfix, |(postfix, _)| postfix),
        None => "",
    }
}
