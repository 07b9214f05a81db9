use std::cmp::Ordering;

use log::{debug, trace};

use crate::error::{Result, TreeError};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::inorder::InOrder;
use crate::node::{Color, Node, Side};

/// An ordered map from distinct keys to string values.
#[derive(Debug)]
pub struct RbTree<K = u64, Ix = DefaultIx> {
    /// Vector that stores nodes, the sentinel lives at index 0
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the red-black tree
    pub(crate) root: NodeIndex<Ix>,
    /// Node with the smallest key
    pub(crate) min_node: NodeIndex<Ix>,
    /// Node with the largest key
    pub(crate) max_node: NodeIndex<Ix>,
    /// Number of elements in the tree
    pub(crate) len: usize,
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: Self::sentinel(),
            min_node: Self::sentinel(),
            max_node: Self::sentinel(),
            len: 0,
        }
    }

    /// Insert a key-value pair into the tree.
    ///
    /// Returns the number of color changes made while rebalancing, or
    /// [`TreeError::DuplicateKey`] without touching the tree if the key is
    /// already present.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_tree_map::{RbTree, TreeError};
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.insert(1, "one"), Ok(0));
    /// assert_eq!(tree.insert(2, "two"), Ok(0));
    /// assert_eq!(tree.insert(3, "three"), Ok(2));
    /// assert_eq!(tree.insert(3, "again"), Err(TreeError::DuplicateKey));
    /// assert_eq!(tree.search(&3), Some("three"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: impl Into<String>) -> Result<usize> {
        let link = self.insertion_point(&key)?;
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(key, value.into()));
        let flips = self.insert_inner(node_idx, link);
        trace!("insert: {flips} color changes, len {}", self.len);
        Ok(flips)
    }

    /// Remove a key from the tree.
    ///
    /// Returns the number of color changes made while rebalancing, or
    /// [`TreeError::KeyNotFound`] if the key is absent.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree_map::{RbTree, TreeError};
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(5, "five").unwrap();
    /// tree.insert(3, "three").unwrap();
    /// tree.insert(8, "eight").unwrap();
    /// assert_eq!(tree.delete(&4), Err(TreeError::KeyNotFound));
    /// assert_eq!(tree.delete(&5), Ok(1));
    /// assert_eq!(tree.keys_to_array(), vec![3, 8]);
    /// ```
    #[inline]
    pub fn delete(&mut self, key: &K) -> Result<usize> {
        let node_idx = self.search_exact(key).ok_or(TreeError::KeyNotFound)?;
        let flips = self.delete_inner(node_idx);
        // Swap the node with the last node stored in the vector and update indices
        let _ignore = self.nodes.swap_remove(node_idx.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, node_idx);
        trace!("delete: {flips} color changes, len {}", self.len);
        Ok(flips)
    }

    /// Return the value stored under the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(7, "").unwrap();
    /// assert_eq!(tree.search(&7), Some(""));
    /// assert_eq!(tree.search(&8), None);
    /// ```
    #[inline]
    pub fn search(&self, key: &K) -> Option<&str> {
        self.search_exact(key)
            .and_then(|idx| self.node_ref(idx, Node::value))
    }

    /// Return `true` if the key is present.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search_exact(key).is_some()
    }

    /// Value of the smallest key, `None` if the tree is empty.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<&str> {
        self.node_ref(self.min_node, Node::value)
    }

    /// Value of the largest key, `None` if the tree is empty.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<&str> {
        self.node_ref(self.max_node, Node::value)
    }

    /// All keys in ascending order.
    ///
    /// # Example
    /// ```rust
    /// use rb_tree_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for (k, v) in [(5, "e"), (3, "c"), (8, "h"), (1, "a")] {
    ///     tree.insert(k, v).unwrap();
    /// }
    /// assert_eq!(tree.keys_to_array(), vec![1, 3, 5, 8]);
    /// assert_eq!(tree.values_to_array(), vec!["a", "c", "e", "h"]);
    /// ```
    #[inline]
    #[must_use]
    pub fn keys_to_array(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        keys.extend(self.in_order().map(|(key, _)| key.clone()));
        keys
    }

    /// All values, ordered by ascending key.
    #[inline]
    #[must_use]
    pub fn values_to_array(&self) -> Vec<&str> {
        let mut values = Vec::with_capacity(self.len);
        values.extend(self.in_order().map(|(_, value)| value));
        values
    }

    /// Remove all elements from the tree
    #[inline]
    pub fn clear(&mut self) {
        debug!("clear: dropping {} nodes", self.len);
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.min_node = Self::sentinel();
        self.max_node = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn in_order(&self) -> InOrder<'_, K, Ix> {
        InOrder::new(self)
    }
}

impl<K> RbTree<K>
where
    K: Ord,
{
    /// Create an empty `RbTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> Default for RbTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, Ix> {
        Node {
            entry: None,
            left: Self::sentinel(),
            right: Self::sentinel(),
            parent: Self::sentinel(),
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(key: K, value: String) -> Node<K, Ix> {
        Node {
            entry: Some((key, value)),
            left: Self::sentinel(),
            right: Self::sentinel(),
            parent: Self::sentinel(),
            color: Color::Red,
        }
    }

    /// Get the sentinel node index
    pub(crate) fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::sentinel()
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Find where a new key hangs: its parent and which side of it.
    ///
    /// `None` means the tree is empty and the key becomes the root. A key past
    /// either end hangs directly off `max_node` or `min_node`, which have no
    /// child on that side.
    fn insertion_point(&self, key: &K) -> Result<Option<(NodeIndex<Ix>, Side)>> {
        if self.is_empty() {
            return Ok(None);
        }
        if self
            .node_ref(self.max_node, Node::key)
            .is_some_and(|max| key > max)
        {
            return Ok(Some((self.max_node, Side::Right)));
        } else if self
            .node_ref(self.min_node, Node::key)
            .is_some_and(|min| key < min)
        {
            return Ok(Some((self.min_node, Side::Left)));
        }

        let mut y = Self::sentinel();
        let mut side = Side::Left;
        let mut x = self.root;
        while let Some(x_key) = self.node_ref(x, Node::key) {
            y = x;
            side = match key.cmp(x_key) {
                Ordering::Equal => return Err(TreeError::DuplicateKey),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            x = self.node_ref(x, |n| n.child(side));
        }
        Ok(Some((y, side)))
    }

    /// Link a freshly pushed node into the tree and rebalance.
    fn insert_inner(&mut self, z: NodeIndex<Ix>, link: Option<(NodeIndex<Ix>, Side)>) -> usize {
        self.len = self.len.wrapping_add(1);
        let Some((y, side)) = link else {
            self.node_mut(z, Node::set_color(Color::Black));
            self.root = z;
            self.min_node = z;
            self.max_node = z;
            return 0;
        };

        self.node_mut(z, Node::set_parent(y));
        self.node_mut(y, Node::set_child(side, z));
        match side {
            Side::Left if y == self.min_node => self.min_node = z,
            Side::Right if y == self.max_node => self.max_node = z,
            _ => {}
        }

        self.insert_fixup(z)
    }

    /// Unlink a node from the tree and rebalance. The node stays in the arena.
    fn delete_inner(&mut self, z: NodeIndex<Ix>) -> usize {
        let was_max = z == self.max_node;
        let mut flips = 0;
        let mut y_orig_color = self.node_ref(z, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            if z == self.min_node {
                if z == self.root {
                    self.max_node = Self::sentinel();
                }
                self.min_node = self.successor(z);
            }
            self.transplant(z, x);
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
        } else {
            let y = self.subtree_minimum(self.node_ref(z, Node::right));
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            let z_color = self.node_ref(z, Node::color);
            if self.node_ref(y, Node::color) != z_color {
                self.node_mut(y, Node::set_color(z_color));
                flips += 1;
            }
        }

        if matches!(y_orig_color, Color::Black) {
            flips += self.delete_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
        if was_max || self.max_node.is_sentinel() {
            self.max_node = self.subtree_maximum(self.root);
        }
        flips
    }

    /// Search for the node with exactly the given key
    fn search_exact(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while let Some(x_key) = self.node_ref(x, Node::key) {
            x = match key.cmp(x_key) {
                Ordering::Equal => return Some(x),
                Ordering::Less => self.node_ref(x, Node::left),
                Ordering::Greater => self.node_ref(x, Node::right),
            };
        }
        None
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) -> usize {
        let mut flips = 0;
        while self.parent_ref(z, Node::is_red) {
            // a red parent is never the root, so the grandparent is real
            let side = self.side_of(self.node_ref(z, Node::parent));
            let y = self.grand_parent_ref(z, |n| n.child(side.opposite()));
            if self.node_ref(y, Node::is_red) {
                self.parent_mut(z, Node::set_color(Color::Black));
                self.node_mut(y, Node::set_color(Color::Black));
                self.grand_parent_mut(z, Node::set_color(Color::Red));
                flips += 3;
                z = self.parent_ref(z, Node::parent);
            } else {
                if self.side_of(z) != side {
                    z = self.node_ref(z, Node::parent);
                    self.rotate(z, side);
                }
                self.parent_mut(z, Node::set_color(Color::Black));
                self.grand_parent_mut(z, Node::set_color(Color::Red));
                flips += 2;
                self.rotate(self.parent_ref(z, Node::parent), side.opposite());
            }
        }
        if self.node_ref(self.root, Node::is_red) {
            self.node_mut(self.root, Node::set_color(Color::Black));
            flips += 1;
        }
        flips
    }

    /// Restore red-black tree properties after a delete.
    ///
    /// `x` may be the sentinel, in which case its parent link was set by the
    /// preceding transplant.
    fn delete_fixup(&mut self, mut x: NodeIndex<Ix>) -> usize {
        let mut flips = 0;
        while x != self.root && self.node_ref(x, Node::is_black) {
            let side = self.side_of(x);
            let far = side.opposite();
            let mut w = self.parent_ref(x, |n| n.child(far));
            if self.node_ref(w, Node::is_red) {
                self.node_mut(w, Node::set_color(Color::Black));
                self.parent_mut(x, Node::set_color(Color::Red));
                flips += 2;
                self.rotate(self.node_ref(x, Node::parent), side);
                w = self.parent_ref(x, |n| n.child(far));
            }
            debug_assert!(!w.is_sentinel(), "double black node without a sibling");
            if self.child_ref(w, side, Node::is_black) && self.child_ref(w, far, Node::is_black) {
                self.node_mut(w, Node::set_color(Color::Red));
                flips += 1;
                x = self.node_ref(x, Node::parent);
            } else {
                if self.child_ref(w, far, Node::is_black) {
                    self.child_mut(w, side, Node::set_color(Color::Black));
                    self.node_mut(w, Node::set_color(Color::Red));
                    flips += 2;
                    self.rotate(w, far);
                    w = self.parent_ref(x, |n| n.child(far));
                }
                if self.parent_ref(x, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    flips += 2;
                }
                self.child_mut(w, far, Node::set_color(Color::Black));
                flips += 1;
                self.rotate(self.node_ref(x, Node::parent), side);
                x = self.root;
            }
        }
        if self.node_ref(x, Node::is_red) {
            self.node_mut(x, Node::set_color(Color::Black));
            flips += 1;
        }
        flips
    }

    /// Binary tree rotation. `Side::Left` lifts the right child of `x` into
    /// its place, `Side::Right` the left child.
    fn rotate(&mut self, x: NodeIndex<Ix>, side: Side) {
        let y = self.node_ref(x, |n| n.child(side.opposite()));
        debug_assert!(!y.is_sentinel(), "rotation without a child to lift");
        let inner = self.node_ref(y, |n| n.child(side));
        self.node_mut(x, Node::set_child(side.opposite(), inner));
        if !inner.is_sentinel() {
            self.node_mut(inner, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_child(side, x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else {
            let side = self.side_of(x);
            self.parent_mut(x, Node::set_child(side, y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else {
            let side = self.side_of(u);
            self.parent_mut(u, Node::set_child(side, v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// In-order successor of `x`, or the sentinel if `x` holds the largest key.
    fn successor(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if !self.right_ref(x, Node::is_sentinel) {
            return self.subtree_minimum(self.node_ref(x, Node::right));
        }
        let mut y = self.node_ref(x, Node::parent);
        while !y.is_sentinel() && self.node_ref(y, Node::right) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        y
    }

    /// Find the node with the minimum key in the subtree rooted at `x`.
    fn subtree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !x.is_sentinel() && !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key in the subtree rooted at `x`.
    fn subtree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !x.is_sentinel() && !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Which child of its parent `node` is.
    ///
    /// Also correct for the sentinel standing in for a removed leaf: its
    /// sibling is never the sentinel.
    pub(crate) fn side_of(&self, node: NodeIndex<Ix>) -> Side {
        if self.parent_ref(node, Node::left) == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Update nodes indices after remove
    ///
    /// The node that used to live at `old` now lives at `new`; every link
    /// that pointed at it is rewritten.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.min_node == old {
            self.min_node = new;
        }
        if self.max_node == old {
            self.max_node = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            if !self.left_ref(new, Node::is_sentinel) {
                self.left_mut(new, Node::set_parent(new));
            }
            if !self.right_ref(new, Node::is_sentinel) {
                self.right_mut(new, Node::set_parent(new));
            }
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn child_ref<F, R>(&'a self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].child(side).index();
        op(&self.nodes[idx])
    }

    pub(crate) fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn child_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].child(side).index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}
