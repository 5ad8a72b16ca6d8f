//! Read-only queries over an interval tree.

use crate::{
    node::{IntervalNode, NodeId},
    tree::IntervalTree,
};

impl<H> IntervalTree<H> {
    /// Returns every node whose range intersects `[start, end]`, in ascending
    /// `left` order.
    ///
    /// Subtrees whose `[min, max]` bounds miss the query are skipped.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn search(&self, start: u32, end: u32) -> Vec<&IntervalNode<H>> {
        assert!(start <= end, "query [{start}, {end}] is inverted");
        let mut found = Vec::new();
        self.collect_overlaps(self.root(), start, end, &mut found);
        found
    }

    /// Returns the hits of all nodes intersecting `[start, end]`.
    pub fn search_hits(&self, start: u32, end: u32) -> impl Iterator<Item = &H> {
        self.search(start, end)
            .into_iter()
            .flat_map(|node| node.hits())
    }

    /// Returns all nodes whose `left` equals the smallest `left` that is not
    /// below `position`. Empty if every node starts before `position`.
    pub fn advance(&self, position: u32) -> Vec<&IntervalNode<H>> {
        let mut next_left = None;
        let mut at = self.root();
        while let Some(id) = at {
            let node = self.node(id);
            if node.left() >= position {
                next_left = Some(node.left());
                at = node.left_child();
            } else {
                at = node.right_child();
            }
        }
        match next_left {
            Some(left) => self
                .search(left, left)
                .into_iter()
                .filter(|node| node.left() == left)
                .collect(),
            None => Vec::new(),
        }
    }

    fn collect_overlaps<'a>(
        &'a self,
        at: Option<NodeId>,
        start: u32,
        end: u32,
        found: &mut Vec<&'a IntervalNode<H>>,
    ) {
        let Some(id) = at else {
            return;
        };
        let node = self.node(id);
        if !node.subtree_overlaps(start, end) {
            return;
        }
        self.collect_overlaps(node.left_child(), start, end, found);
        if node.overlaps(start, end) {
            found.push(node);
        }
        self.collect_overlaps(node.right_child(), start, end, found);
    }
}
