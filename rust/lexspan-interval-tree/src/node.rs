//! Tree nodes.

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// One distinct `[left, right]` key of an interval tree.
///
/// `min` and `max` bound every range stored in the subtree rooted at this
/// node, which lets overlap searches skip whole subtrees.
#[derive(Debug, Clone)]
pub struct IntervalNode<H> {
    pub(crate) left: u32,
    pub(crate) right: u32,
    pub(crate) min: u32,
    pub(crate) max: u32,
    pub(crate) color: Color,
    pub(crate) left_child: Option<NodeId>,
    pub(crate) right_child: Option<NodeId>,
    pub(crate) hit_lists: Vec<Vec<H>>,
}

impl<H> IntervalNode<H> {
    pub(crate) fn new(left: u32, right: u32) -> IntervalNode<H> {
        IntervalNode {
            left,
            right,
            min: left,
            max: right,
            color: Color::Red,
            left_child: None,
            right_child: None,
            hit_lists: Vec::new(),
        }
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    /// Smallest bound in this node's subtree.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest bound in this node's subtree.
    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left_child(&self) -> Option<NodeId> {
        self.left_child
    }

    pub fn right_child(&self) -> Option<NodeId> {
        self.right_child
    }

    /// Hit lists in insertion order, one per insertion of this key.
    pub fn hit_lists(&self) -> &[Vec<H>] {
        &self.hit_lists
    }

    /// All hits of all lists.
    pub fn hits(&self) -> impl Iterator<Item = &H> {
        self.hit_lists.iter().flatten()
    }

    /// Returns `true` if `[start, end]` intersects this node's own range.
    #[inline]
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        self.left <= end && start <= self.right
    }

    /// Returns `true` if `[start, end]` intersects the subtree bounds.
    #[inline]
    pub(crate) fn subtree_overlaps(&self, start: u32, end: u32) -> bool {
        self.min <= end && start <= self.max
    }

    pub(crate) fn flip_color(&mut self) {
        self.color = self.color.flip();
    }

    pub(crate) fn is_point(&self) -> bool {
        self.left == self.right
    }
}
