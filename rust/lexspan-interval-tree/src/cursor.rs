use crate::{
    node::{IntervalNode, NodeId},
    tree::IntervalTree,
};

/// Read-only navigation handle over a closed [`IntervalTree`].
///
/// Span matching walks the tree node by node, keeping its own position in
/// a cursor. Cursors are cheap to clone and any number of them may traverse
/// the same tree concurrently.
#[derive(Debug)]
pub struct TreeCursor<'a, H> {
    tree: &'a IntervalTree<H>,
    current: Option<NodeId>,
}

impl<H> Clone for TreeCursor<'_, H> {
    fn clone(&self) -> Self {
        TreeCursor {
            tree: self.tree,
            current: self.current,
        }
    }
}

impl<'a, H> TreeCursor<'a, H> {
    /// Creates a cursor positioned at the root.
    ///
    /// # Panics
    ///
    /// Panics if the tree is not closed.
    pub fn new(tree: &'a IntervalTree<H>) -> TreeCursor<'a, H> {
        assert!(tree.is_closed(), "cursor over an open interval tree");
        TreeCursor {
            tree,
            current: tree.root(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree
            .root()
            .expect("closed interval tree always has a root")
    }

    pub fn current_id(&self) -> Option<NodeId> {
        self.current
    }

    pub fn current(&self) -> Option<&'a IntervalNode<H>> {
        self.current.map(|id| self.tree.node(id))
    }

    pub fn set_current(&mut self, id: Option<NodeId>) {
        self.current = id;
    }

    /// Moves back to the root.
    pub fn reset(&mut self) {
        self.current = Some(self.root());
    }

    pub fn left_child(&self) -> Option<NodeId> {
        self.current().and_then(IntervalNode::left_child)
    }

    pub fn right_child(&self) -> Option<NodeId> {
        self.current().and_then(IntervalNode::right_child)
    }

    /// Descends into the left subtree if it may hold ranges intersecting
    /// `[start, end]`. Returns `false` and stays put otherwise.
    pub fn descend_left(&mut self, start: u32, end: u32) -> bool {
        self.descend(self.left_child(), start, end)
    }

    /// Descends into the right subtree if it may hold ranges intersecting
    /// `[start, end]`. Returns `false` and stays put otherwise.
    pub fn descend_right(&mut self, start: u32, end: u32) -> bool {
        self.descend(self.right_child(), start, end)
    }

    fn descend(&mut self, child: Option<NodeId>, start: u32, end: u32) -> bool {
        match child {
            Some(id) if self.tree.node(id).subtree_overlaps(start, end) => {
                self.current = Some(id);
                true
            }
            _ => false,
        }
    }
}

impl<H> IntervalTree<H> {
    /// Returns a cursor positioned at the root.
    ///
    /// # Panics
    ///
    /// Panics if the tree is not closed.
    pub fn cursor(&self) -> TreeCursor<'_, H> {
        TreeCursor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::IntervalTree;

    #[test]
    fn test_cursor_walks_overlapping_path() {
        let tree = IntervalTree::from_ranges((0..64u32).map(|i| (i * 10..=i * 10 + 5, vec![i])));
        let mut cursor = tree.cursor();
        let root = cursor.root();
        assert_eq!(cursor.current_id(), Some(root));

        // Walk down towards 300..=302, pruning by subtree bounds.
        let (start, end) = (300, 302);
        let mut visited = Vec::new();
        loop {
            let node = cursor.current().unwrap();
            visited.push(node.left());
            if node.overlaps(start, end) {
                break;
            }
            let moved = if start < node.left() {
                cursor.descend_left(start, end)
            } else {
                cursor.descend_right(start, end)
            };
            assert!(moved, "lost track at {visited:?}");
        }
        assert_eq!(visited.last(), Some(&300));
        assert!(visited.len() <= tree.height());

        cursor.set_current(None);
        assert!(cursor.current().is_none());
        assert!(cursor.left_child().is_none());
        cursor.reset();
        assert_eq!(cursor.current_id(), Some(root));
    }

    #[test]
    #[should_panic]
    fn test_cursor_requires_closed_tree() {
        let mut tree = IntervalTree::new();
        tree.insert_point(1, vec![()]);
        tree.cursor();
    }
}
