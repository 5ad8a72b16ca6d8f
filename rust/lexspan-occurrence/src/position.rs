//! Token-count positions of an occurrence.
//!
//! A position is kept in one of three canonical representations:
//!
//! ## Single
//! One token position, such as `[5]`.
//!
//! ## Range
//! A contiguous run of positions `[start-end]` with `start < end`. A range whose
//! bounds coincide is stored as a single position.
//!
//! ## Set
//! Two or more positions that do not form a contiguous run, such as
//! `[5, 6, 8]`. A contiguous set is stored as a range, a one-element set as a
//! single position.
//!
//! Every constructor and mutator re-evaluates the representation, so a
//! [`Position`] is always in canonical form and exactly one representation
//! applies to any given set of points.

use std::{fmt, ops::RangeInclusive};

use crate::decompose::decompose_points;

/// Discriminant of a [`Position`] representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionKind {
    Single,
    Range,
    Set,
}

/// Canonical token-count position of an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    repr: Repr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Single(u32),
    /// Invariant: `start < end`.
    Range { start: u32, end: u32 },
    /// Invariant: strictly ascending, at least two points, not contiguous.
    Set(Vec<u32>),
}

impl Position {
    /// Creates a single-point position.
    pub fn single(position: u32) -> Position {
        Position {
            repr: Repr::Single(position),
        }
    }

    /// Creates a position covering `start..=end`.
    ///
    /// Returns a single-point position when `start == end`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn range(start: u32, end: u32) -> Position {
        assert!(start <= end, "position range start {start} after end {end}");
        if start == end {
            Position::single(start)
        } else {
            Position {
                repr: Repr::Range { start, end },
            }
        }
    }

    /// Creates a position from an arbitrary collection of points.
    ///
    /// The points may be unordered and contain duplicates.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_points<I>(points: I) -> Position
    where
        I: IntoIterator<Item = u32>,
    {
        let mut points = points.into_iter().collect::<Vec<_>>();
        assert!(!points.is_empty(), "a position needs at least one point");
        points.sort_unstable();
        points.dedup();
        Position::from_sorted_points(points)
    }

    /// Builds the canonical representation of a strictly ascending,
    /// non-empty point list.
    fn from_sorted_points(points: Vec<u32>) -> Position {
        let start = points[0];
        let end = points[points.len() - 1];
        if points.len() as u64 == (end - start) as u64 + 1 {
            Position::range(start, end)
        } else {
            Position {
                repr: Repr::Set(points),
            }
        }
    }

    /// Returns the active representation.
    pub fn kind(&self) -> PositionKind {
        match &self.repr {
            Repr::Single(_) => PositionKind::Single,
            Repr::Range { .. } => PositionKind::Range,
            Repr::Set(_) => PositionKind::Set,
        }
    }

    /// First (smallest) position.
    pub fn start(&self) -> u32 {
        match &self.repr {
            Repr::Single(p) => *p,
            Repr::Range { start, .. } => *start,
            Repr::Set(points) => points[0],
        }
    }

    /// Last (largest) position.
    pub fn end(&self) -> u32 {
        match &self.repr {
            Repr::Single(p) => *p,
            Repr::Range { end, .. } => *end,
            Repr::Set(points) => points[points.len() - 1],
        }
    }

    /// Length of the covered span, `1 + end - start`.
    ///
    /// For a set this includes the gaps between its points.
    pub fn span_len(&self) -> u64 {
        (self.end() - self.start()) as u64 + 1
    }

    /// Number of distinct points.
    pub fn point_count(&self) -> u64 {
        match &self.repr {
            Repr::Single(_) | Repr::Range { .. } => self.span_len(),
            Repr::Set(points) => points.len() as u64,
        }
    }

    /// Returns `true` if `position` is one of the points.
    pub fn contains(&self, position: u32) -> bool {
        match &self.repr {
            Repr::Single(p) => *p == position,
            Repr::Range { start, end } => (*start..=*end).contains(&position),
            Repr::Set(points) => points.binary_search(&position).is_ok(),
        }
    }

    /// Returns the points of a set position, `None` for singles and ranges.
    pub fn set_points(&self) -> Option<&[u32]> {
        match &self.repr {
            Repr::Set(points) => Some(points),
            _ => None,
        }
    }

    /// Iterates over all points in ascending order.
    pub fn points(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match &self.repr {
            Repr::Single(p) => Box::new(std::iter::once(*p)),
            Repr::Range { start, end } => Box::new(*start..=*end),
            Repr::Set(points) => Box::new(points.iter().copied()),
        }
    }

    /// Returns the minimal list of inclusive ranges covering the points.
    pub fn ranges(&self) -> Vec<RangeInclusive<u32>> {
        match &self.repr {
            Repr::Single(p) => vec![*p..=*p],
            Repr::Range { start, end } => vec![*start..=*end],
            Repr::Set(points) => decompose_points(points.iter().copied()),
        }
    }

    /// Adds one point, upgrading or downgrading the representation as needed.
    pub fn add_point(&mut self, position: u32) {
        match self.repr {
            Repr::Single(p) if p == position => {}
            Repr::Single(p) => {
                let adjacent = position.checked_sub(p) == Some(1) || p.checked_sub(position) == Some(1);
                *self = if adjacent {
                    Position::range(p.min(position), p.max(position))
                } else {
                    Position {
                        repr: Repr::Set(vec![p.min(position), p.max(position)]),
                    }
                };
            }
            Repr::Range { start, end } => {
                let touches = position as u64 + 1 >= start as u64 && position as u64 <= end as u64 + 1;
                if touches {
                    *self = Position::range(start.min(position), end.max(position));
                } else {
                    self.merge_points(std::iter::once(position));
                }
            }
            Repr::Set(_) => self.merge_points(std::iter::once(position)),
        }
    }

    /// Adds all points of `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn add_range(&mut self, start: u32, end: u32) {
        assert!(start <= end, "position range start {start} after end {end}");
        if let Repr::Range {
            start: cur_start,
            end: cur_end,
        } = self.repr
        {
            let overlaps = start as u64 <= cur_end as u64 + 1
                && end as u64 + 1 >= cur_start as u64;
            if overlaps {
                *self = Position::range(start.min(cur_start), end.max(cur_end));
                return;
            }
        }
        self.merge_points(start..=end);
    }

    /// Adds an arbitrary collection of points.
    pub fn add_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.merge_points(points);
    }

    fn merge_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = u32>,
    {
        let mut merged = self.points().collect::<Vec<_>>();
        merged.extend(points);
        merged.sort_unstable();
        merged.dedup();
        *self = Position::from_sorted_points(merged);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Single(p) => write!(f, "[{p}]"),
            Repr::Range { start, end } => write!(f, "[{start}-{end}]"),
            Repr::Set(points) => write!(f, "{points:?}"),
        }
    }
}
