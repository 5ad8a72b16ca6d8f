//! Character offsets of an occurrence.

use std::fmt;

/// Inclusive character span `[start, end]` in the (possibly transformed) text.
///
/// The same type describes real offsets, which locate the occurrence in the
/// original, untransformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    start: u32,
    end: u32,
}

impl Offset {
    /// Creates an offset span.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: u32, end: u32) -> Offset {
        assert!(start <= end, "offset start {start} after end {end}");
        Offset { start, end }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Widens the span to also cover `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn extend(&mut self, start: u32, end: u32) {
        assert!(start <= end, "offset start {start} after end {end}");
        self.start = self.start.min(start);
        self.end = self.end.max(end);
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.start, self.end)
    }
}
