//! Builders feeding occurrences into an interval tree.
//!
//! Three kinds of keys are indexed:
//!
//! - **positions**: every maximal run of an occurrence's token positions;
//! - **parents**: the parent id of an occurrence, as a single point;
//! - **documents**: a document id, as a single point.
//!
//! Each call either inserts all keys derived from its input or none of them.

use std::ops::RangeInclusive;

use lexspan_common::{Result, error::Error};
use lexspan_occurrence::Occurrence;

use crate::{config::OccurrenceIndexConfig, hit::HitRecord, tree::IntervalTree};

/// Counters describing what an [`OccurrenceIndex`] has indexed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of successful `add_*` calls.
    pub occurrences: u64,
    /// Number of hit lists inserted.
    pub hit_lists: u64,
    /// Smallest key bound seen.
    pub min_position: Option<u32>,
    /// Largest key bound seen.
    pub max_position: Option<u32>,
}

impl IndexStats {
    fn record(&mut self, ranges: &[RangeInclusive<u32>]) {
        self.occurrences += 1;
        self.hit_lists += ranges.len() as u64;
        for range in ranges {
            let (start, end) = (*range.start(), *range.end());
            self.min_position = Some(self.min_position.map_or(start, |m| m.min(start)));
            self.max_position = Some(self.max_position.map_or(end, |m| m.max(end)));
        }
    }
}

/// Interval index over occurrence keys, with [`HitRecord`]s as hits.
///
/// When an occurrence has no token reference its id is used as the
/// reference of the hit record.
pub struct OccurrenceIndex {
    config: OccurrenceIndexConfig,
    tree: IntervalTree<HitRecord>,
    stats: IndexStats,
}

impl OccurrenceIndex {
    pub fn new(config: OccurrenceIndexConfig) -> Result<OccurrenceIndex> {
        config.validate()?;
        Ok(OccurrenceIndex {
            config,
            tree: IntervalTree::new(),
            stats: IndexStats::default(),
        })
    }

    pub fn config(&self) -> &OccurrenceIndexConfig {
        &self.config
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn tree(&self) -> &IntervalTree<HitRecord> {
        &self.tree
    }

    /// Indexes the token positions of `occurrence`, one key per maximal
    /// run of consecutive positions.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the occurrence has no position, lacks the prefix
    /// id required by `store_secondary`, or a derived key violates
    /// `single_point` or `max_hits_per_key`. Nothing is inserted then.
    pub fn add_position(&mut self, occurrence: &Occurrence) -> Result<()> {
        let Some(position) = occurrence.position() else {
            return Err(self.reject(occurrence.id(), "position", "occurrence has no position"));
        };
        let mut hit = HitRecord::new(occurrence.id(), reference_of(occurrence));
        if self.config.store_secondary {
            let Some(prefix_id) = occurrence.prefix_id() else {
                return Err(self.reject(occurrence.id(), "prefix_id", "missing prefix id"));
            };
            hit = hit.with_secondary(prefix_id, occurrence.term_ref().unwrap_or(0));
        }
        let ranges = position.ranges();
        self.insert_all(occurrence.id(), &ranges, hit)
    }

    /// Indexes the parent link of `occurrence` as a point at the parent id.
    ///
    /// Returns `false` without changes if the occurrence has no parent or
    /// suppresses it.
    pub fn add_parent(&mut self, occurrence: &Occurrence) -> Result<bool> {
        let Some(parent_id) = occurrence.parent_id().filter(|_| occurrence.has_parent()) else {
            return Ok(false);
        };
        let hit = HitRecord::new(occurrence.id(), reference_of(occurrence));
        self.insert_all(occurrence.id(), &[parent_id..=parent_id], hit)?;
        Ok(true)
    }

    /// Indexes a document id with its reference.
    pub fn add_document(&mut self, doc_id: u32, reference: u64) -> Result<()> {
        self.insert_all(doc_id, &[doc_id..=doc_id], HitRecord::new(doc_id, reference))
    }

    /// Closes the underlying tree; see [`IntervalTree::close`].
    pub fn close(&mut self) {
        self.tree.close();
    }

    /// Closes the index and returns the tree with the final statistics.
    pub fn finish(mut self) -> (IntervalTree<HitRecord>, IndexStats) {
        self.close();
        (self.tree, self.stats)
    }

    fn insert_all(&mut self, id: u32, ranges: &[RangeInclusive<u32>], hit: HitRecord) -> Result<()> {
        if self.tree.is_closed() {
            return Err(Error::invalid_operation("insert into closed occurrence index"));
        }
        for range in ranges {
            self.check_key(id, range)?;
        }
        for range in ranges {
            self.tree.insert_range(*range.start(), *range.end(), vec![hit]);
        }
        self.stats.record(ranges);
        Ok(())
    }

    fn check_key(&self, id: u32, range: &RangeInclusive<u32>) -> Result<()> {
        let existing = self
            .tree
            .find(*range.start(), *range.end())
            .map_or(0, |node| self.tree.node(node).hit_lists().len());
        if self.config.single_point {
            if range.start() != range.end() {
                return Err(self.reject(id, "range", "single-point index cannot store a range"));
            }
            if existing > 0 {
                return Err(self.reject(id, "key", "single-point index key already present"));
            }
        }
        if existing >= self.config.max_hits_per_key {
            return Err(self.reject(id, "max_hits_per_key", "too many hit lists for one key"));
        }
        Ok(())
    }

    fn reject(&self, id: u32, name: &str, message: &str) -> Error {
        log::debug!("occurrence index rejected {id}: {name}: {message}");
        Error::invalid_arg(name, message)
    }
}

fn reference_of(occurrence: &Occurrence) -> u64 {
    occurrence
        .token_ref()
        .unwrap_or(occurrence.id() as u64)
}
