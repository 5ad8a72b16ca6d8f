//! Hit records stored in occurrence indexes.

use std::cmp::Ordering;

/// Secondary key of a hit: the prefix (annotation layer) id and term
/// reference in the position index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondaryRef {
    pub id: u32,
    pub reference: u64,
}

/// One reference stored under an index key.
///
/// Records sort by `reference`, then by `id`, then by secondary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitRecord {
    /// Occurrence or document id.
    pub id: u32,
    pub reference: u64,
    pub secondary: Option<SecondaryRef>,
}

impl HitRecord {
    pub fn new(id: u32, reference: u64) -> HitRecord {
        HitRecord {
            id,
            reference,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, id: u32, reference: u64) -> HitRecord {
        self.secondary = Some(SecondaryRef { id, reference });
        self
    }
}

impl Ord for HitRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.reference
            .cmp(&other.reference)
            .then(self.id.cmp(&other.id))
            .then_with(|| {
                let key = |s: &Option<SecondaryRef>| s.map(|s| (s.id, s.reference));
                key(&self.secondary).cmp(&key(&other.secondary))
            })
    }
}

impl PartialOrd for HitRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
