//! Augmented interval index over occurrence ranges.
//!
//! [`IntervalTree`] is a left-leaning red-black tree keyed by inclusive
//! `[left, right]` ranges. Each node tracks the `[min, max]` bounds of its
//! subtree so that overlap queries can skip subtrees that cannot match, and
//! holds one hit list per insertion of its exact key. The tree is generic
//! over the hit type; [`OccurrenceIndex`] instantiates it with
//! [`HitRecord`]s for position, parent and document lookups.
//!
//! # Lifecycle
//!
//! A tree is built by sequential insertion on one thread, then
//! [closed](IntervalTree::close). Closing guarantees a root (an empty tree
//! receives the sentinel `[0, 0]`) and freezes the tree; it is then shared
//! read-only, navigated with a [`TreeCursor`] or queried with
//! [`IntervalTree::search`] and [`IntervalTree::advance`].

pub mod config;
pub mod cursor;
pub mod hit;
pub mod node;
pub mod occurrence_index;
pub mod search;
pub mod tree;

pub use config::OccurrenceIndexConfig;
pub use cursor::TreeCursor;
pub use hit::{HitRecord, SecondaryRef};
pub use node::{Color, IntervalNode, NodeId};
pub use occurrence_index::{IndexStats, OccurrenceIndex};
pub use tree::{InOrder, IntervalTree};
