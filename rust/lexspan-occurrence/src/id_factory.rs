/// Monotonic occurrence id counter owned by a tokenization session.
///
/// Ids are unique within one factory. Each session (or test) keeps its own
/// factory and calls [`OccurrenceIdFactory::reset`] to start over; there is no
/// process-wide counter.
#[derive(Debug, Default, Clone)]
pub struct OccurrenceIdFactory {
    next: u32,
}

impl OccurrenceIdFactory {
    /// Creates a factory handing out ids starting at zero.
    pub fn new() -> OccurrenceIdFactory {
        OccurrenceIdFactory::default()
    }

    /// Creates a factory whose first id is `first`.
    pub fn starting_at(first: u32) -> OccurrenceIdFactory {
        OccurrenceIdFactory { next: first }
    }

    /// Returns a fresh id and advances the counter.
    ///
    /// # Panics
    ///
    /// Panics when the 32-bit id space is exhausted.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = id.checked_add(1).expect("occurrence id space exhausted");
        id
    }

    /// Returns the id the next call to [`OccurrenceIdFactory::next_id`] will hand out.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Restarts numbering from zero.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
