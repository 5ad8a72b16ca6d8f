//! Data generation utilities for testing.
//!
//! Generators are seeded explicitly so that every randomized test is
//! reproducible from its seed.

use std::collections::BTreeSet;

use lexspan_occurrence::{Occurrence, OccurrenceIdFactory, Position};

/// Produces random but well-formed occurrences.
///
/// Ids are assigned from an owned [`OccurrenceIdFactory`], so a generator
/// behaves like one tokenization session. Parents always refer to an
/// earlier id of the same generator.
pub struct OccurrenceGenerator {
    rng: fastrand::Rng,
    ids: OccurrenceIdFactory,
    /// Largest token position produced.
    max_position: u32,
}

impl OccurrenceGenerator {
    pub fn new(seed: u64) -> OccurrenceGenerator {
        OccurrenceGenerator {
            rng: fastrand::Rng::with_seed(seed),
            ids: OccurrenceIdFactory::new(),
            max_position: 10_000,
        }
    }

    /// Limits generated positions to `0..=max_position`.
    pub fn with_max_position(mut self, max_position: u32) -> OccurrenceGenerator {
        assert!(max_position >= 64);
        self.max_position = max_position;
        self
    }

    /// Generates an occurrence where every optional field is present with
    /// probability one half.
    pub fn next_occurrence(&mut self) -> Occurrence {
        let id = self.ids.next_id();
        let mut occurrence = if self.rng.bool() {
            let prefix = ["t", "lemma", "pos", "s"][self.rng.usize(..4)];
            let postfix = self.random_word();
            Occurrence::with_prefix(id, prefix, Some(postfix.as_str()))
        } else {
            Occurrence::new(id, self.random_word())
        };

        occurrence.set_position(Some(self.random_position()));

        if self.rng.bool() {
            let start = self.rng.u32(0..1_000_000);
            let end = start + self.rng.u32(0..64);
            occurrence.set_offset(start, end);
            if self.rng.bool() {
                // Frequently identical, sometimes shifted.
                let shift = if self.rng.bool() { 0 } else { self.rng.u32(0..8) };
                occurrence.set_real_offset(start + shift, end + shift + self.rng.u32(0..4));
            }
        } else if self.rng.u8(..4) == 0 {
            let start = self.rng.u32(0..1_000_000);
            occurrence.set_real_offset(start, start + self.rng.u32(0..64));
        }

        if id > 0 && self.rng.bool() {
            occurrence.set_parent_id(Some(self.rng.u32(0..id)));
        }

        if self.rng.bool() {
            let len = self.rng.usize(0..48);
            let payload = std::iter::repeat_with(|| self.rng.u8(..))
                .take(len)
                .collect();
            occurrence.set_payload(Some(payload));
        }

        if self.rng.u8(..8) == 0 {
            occurrence.set_provide_offset(false);
        }
        if self.rng.u8(..8) == 0 {
            occurrence.set_provide_real_offset(false);
        }
        if self.rng.u8(..8) == 0 {
            occurrence.set_provide_parent_id(false);
        }

        occurrence.set_token_ref(Some(self.rng.u64(..1 << 40)));
        occurrence.set_term_ref(Some(self.rng.u64(..1 << 40)));
        occurrence.set_prefix_id(Some(self.rng.u32(..256)));
        occurrence
    }

    /// Generates `count` occurrences with consecutive ids.
    pub fn occurrences(&mut self, count: usize) -> Vec<Occurrence> {
        (0..count).map(|_| self.next_occurrence()).collect()
    }

    /// Generates a position of a random representation.
    pub fn random_position(&mut self) -> Position {
        // Leaves room for the widest set of `random_points`.
        let start = self.rng.u32(0..=self.max_position - 48);
        match self.rng.u8(..3) {
            0 => Position::single(start),
            1 => Position::range(start, start + self.rng.u32(1..16)),
            _ => Position::from_points(self.random_points(start, 12)),
        }
    }

    /// Generates between 1 and `max_count` distinct points in `start..start + 4 * max_count`,
    /// always including `start`.
    pub fn random_points(&mut self, start: u32, max_count: usize) -> BTreeSet<u32> {
        let count = self.rng.usize(1..=max_count);
        let width = 4 * max_count as u32;
        let mut points = BTreeSet::new();
        points.insert(start);
        while points.len() < count {
            points.insert(start.saturating_add(self.rng.u32(0..width)));
        }
        points
    }

    /// Generates a random inclusive range within `0..=max_position`.
    pub fn random_range(&mut self) -> (u32, u32) {
        let left = self.rng.u32(0..=self.max_position);
        let right = left.saturating_add(self.rng.u32(0..16)).min(self.max_position);
        (left, right)
    }

    fn random_word(&mut self) -> String {
        let len = self.rng.usize(1..10);
        std::iter::repeat_with(|| self.rng.lowercase()).take(len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_reproducible() {
        let a = OccurrenceGenerator::new(7).occurrences(50);
        let b = OccurrenceGenerator::new(7).occurrences(50);
        assert_eq!(a, b);
        assert!(a.iter().enumerate().all(|(i, o)| o.id() == i as u32));
        assert!(
            a.iter()
                .all(|o| o.parent_id().is_none_or(|parent| parent < o.id()))
        );
    }
}
