//! Left-leaning red-black interval tree with min/max augmentation.

use std::{fmt, ops::RangeInclusive};

use ahash::AHashMap;

use crate::node::{Color, IntervalNode, NodeId};

/// Balanced binary search tree over inclusive `[left, right]` ranges.
///
/// Nodes are ordered by `left`. Every distinct `(left, right)` key owns one
/// node; inserting an existing key appends a new hit list to that node
/// instead of growing the tree, so multiplicities are preserved.
///
/// The tree is built by sequential insertion and then [closed](Self::close).
/// A closed tree always has a root and is never mutated again, so it can be
/// shared across threads and read without locking.
///
/// Nodes live in an arena and refer to their children by [`NodeId`].
pub struct IntervalTree<H> {
    nodes: Vec<IntervalNode<H>>,
    root: Option<NodeId>,
    keys: AHashMap<(u32, u32), NodeId>,
    closed: bool,
}

impl<H> Default for IntervalTree<H> {
    fn default() -> Self {
        IntervalTree::new()
    }
}

impl<H> IntervalTree<H> {
    pub fn new() -> IntervalTree<H> {
        IntervalTree {
            nodes: Vec::new(),
            root: None,
            keys: AHashMap::new(),
            closed: false,
        }
    }

    /// Builds a tree from `(range, hit list)` pairs and closes it.
    pub fn from_ranges<I>(ranges: I) -> IntervalTree<H>
    where
        I: IntoIterator<Item = (RangeInclusive<u32>, Vec<H>)>,
    {
        let mut tree = IntervalTree::new();
        for (range, hits) in ranges {
            tree.insert_range(*range.start(), *range.end(), hits);
        }
        tree.close();
        tree
    }

    /// Inserts the single point `[point, point]` with one hit list.
    ///
    /// # Panics
    ///
    /// Panics if the tree is closed.
    pub fn insert_point(&mut self, point: u32, hits: Vec<H>) -> NodeId {
        self.insert_range(point, point, hits)
    }

    /// Inserts `[left, right]` with one hit list and returns the node holding
    /// the key.
    ///
    /// # Panics
    ///
    /// Panics if `left > right` or if the tree is closed.
    pub fn insert_range(&mut self, left: u32, right: u32, hits: Vec<H>) -> NodeId {
        let id = self.insert_key(left, right);
        self.nodes[id.index()].hit_lists.push(hits);
        id
    }

    /// Guarantees a root exists and freezes the tree.
    ///
    /// An empty tree receives the sentinel node `[0, 0]` without hit lists.
    /// Closing a non-empty or already closed tree changes nothing else.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.root.is_none() {
            log::debug!("closing empty interval tree with sentinel [0, 0]");
            self.insert_key(0, 0);
        }
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &IntervalNode<H> {
        &self.nodes[id.index()]
    }

    /// Looks up the node holding exactly `[left, right]`.
    pub fn find(&self, left: u32, right: u32) -> Option<NodeId> {
        self.keys.get(&(left, right)).copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn height_of<H>(tree: &IntervalTree<H>, id: Option<NodeId>) -> usize {
            match id {
                Some(id) => {
                    let node = tree.node(id);
                    1 + height_of(tree, node.left_child).max(height_of(tree, node.right_child))
                }
                None => 0,
            }
        }
        height_of(self, self.root)
    }

    /// Iterates over the nodes in ascending `left` order.
    pub fn iter(&self) -> InOrder<'_, H> {
        let mut iter = InOrder {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    fn insert_key(&mut self, left: u32, right: u32) -> NodeId {
        assert!(!self.closed, "insertion into a closed interval tree");
        assert!(left <= right, "interval [{left}, {right}] is inverted");
        if let Some(&id) = self.keys.get(&(left, right)) {
            return id;
        }

        let id = NodeId(u32::try_from(self.nodes.len()).expect("interval tree node limit"));
        self.nodes.push(IntervalNode::new(left, right));
        self.keys.insert((left, right), id);

        let root = self.insert_at(self.root, id);
        self.nodes[root.index()].color = Color::Black;
        self.root = Some(root);
        id
    }

    /// Inserts the detached node `new` below `at`, rebalancing on the way
    /// back up, and returns the new subtree root.
    fn insert_at(&mut self, at: Option<NodeId>, new: NodeId) -> NodeId {
        let Some(mut h) = at else {
            return new;
        };

        if self.nodes[new.index()].left <= self.nodes[h.index()].left {
            let child = self.insert_at(self.nodes[h.index()].left_child, new);
            self.nodes[h.index()].left_child = Some(child);
        } else {
            let child = self.insert_at(self.nodes[h.index()].right_child, new);
            self.nodes[h.index()].right_child = Some(child);
        }

        let node = &self.nodes[h.index()];
        if self.is_red(node.right_child) && !self.is_red(node.left_child) {
            h = self.rotate_left(h);
        }
        let node = &self.nodes[h.index()];
        if self.is_red(node.left_child)
            && self.is_red(node.left_child.and_then(|l| self.node(l).left_child))
        {
            h = self.rotate_right(h);
        }
        let node = &self.nodes[h.index()];
        if self.is_red(node.left_child) && self.is_red(node.right_child) {
            self.flip_colors(h);
        }

        self.update_bounds(h);
        h
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.nodes[id.index()].color == Color::Red)
    }

    fn rotate_left(&mut self, h: NodeId) -> NodeId {
        let x = self.nodes[h.index()]
            .right_child
            .expect("rotate_left requires a right child");
        self.nodes[h.index()].right_child = self.nodes[x.index()].left_child;
        self.nodes[x.index()].left_child = Some(h);
        self.nodes[x.index()].color = self.nodes[h.index()].color;
        self.nodes[h.index()].color = Color::Red;
        self.update_bounds(h);
        self.update_bounds(x);
        x
    }

    fn rotate_right(&mut self, h: NodeId) -> NodeId {
        let x = self.nodes[h.index()]
            .left_child
            .expect("rotate_right requires a left child");
        self.nodes[h.index()].left_child = self.nodes[x.index()].right_child;
        self.nodes[x.index()].right_child = Some(h);
        self.nodes[x.index()].color = self.nodes[h.index()].color;
        self.nodes[h.index()].color = Color::Red;
        self.update_bounds(h);
        self.update_bounds(x);
        x
    }

    fn flip_colors(&mut self, h: NodeId) {
        let (left, right) = {
            let node = &mut self.nodes[h.index()];
            node.flip_color();
            (node.left_child, node.right_child)
        };
        for child in [left, right].into_iter().flatten() {
            self.nodes[child.index()].flip_color();
        }
    }

    /// Recomputes `min`/`max` of `id` from its own range and its children.
    fn update_bounds(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let mut min = node.left;
        let mut max = node.right;
        for child in [node.left_child, node.right_child].into_iter().flatten() {
            let child = &self.nodes[child.index()];
            min = min.min(child.min);
            max = max.max(child.max);
        }
        let node = &mut self.nodes[id.index()];
        node.min = min;
        node.max = max;
    }
}

/// In-order iterator over the nodes of an [`IntervalTree`].
pub struct InOrder<'a, H> {
    tree: &'a IntervalTree<H>,
    stack: Vec<NodeId>,
}

impl<H> InOrder<'_, H> {
    fn push_left_spine(&mut self, mut id: Option<NodeId>) {
        while let Some(current) = id {
            self.stack.push(current);
            id = self.tree.node(current).left_child;
        }
    }
}

impl<'a, H> Iterator for InOrder<'a, H> {
    type Item = &'a IntervalNode<H>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.push_left_spine(node.right_child);
        Some(node)
    }
}

impl<'a, H> IntoIterator for &'a IntervalTree<H> {
    type Item = &'a IntervalNode<H>;
    type IntoIter = InOrder<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Writes one line per node, children indented by three spaces per level:
/// `[l] (max) : n lists` for points and `[l-r] (max) : n lists` for ranges.
impl<H> fmt::Display for IntervalTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = self.root.map(|root| (root, 0usize)).into_iter().collect::<Vec<_>>();
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            write!(f, "{:indent$}", "", indent = depth * 3)?;
            if node.is_point() {
                write!(f, "[{}]", node.left)?;
            } else {
                write!(f, "[{}-{}]", node.left, node.right)?;
            }
            writeln!(f, " ({}) : {} lists", node.max, node.hit_lists.len())?;
            // Left subtree printed first.
            if let Some(right) = node.right_child {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left_child {
                stack.push((left, depth + 1));
            }
        }
        Ok(())
    }
}

impl<H: fmt::Debug> fmt::Debug for IntervalTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalTree")
            .field("len", &self.len())
            .field("root", &self.root)
            .field("closed", &self.closed)
            .finish()
    }
}
