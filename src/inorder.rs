use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::rbtree::RbTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(tree: &RbTree<K, Ix>, mut x: NodeIndex<Ix>, stack: &mut Vec<NodeIndex<Ix>>)
where
    Ix: IndexType,
{
    while !tree.node_ref(x, Node::is_sentinel) {
        stack.push(x);
        x = tree.node_ref(x, Node::left);
    }
}

/// In-order walk over the entries of an `RbTree`.
///
/// Uses an explicit stack holding at most one root-to-leaf path.
#[derive(Debug)]
pub(crate) struct InOrder<'a, K, Ix> {
    /// Reference to the tree
    tree: &'a RbTree<K, Ix>,
    /// Nodes whose left subtree is done but which are not yet yielded
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, Ix> InOrder<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<K, Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(tree, tree.root, &mut stack);
        InOrder { tree, stack }
    }
}

impl<'a, K, Ix> Iterator for InOrder<'a, K, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        left_link(self.tree, self.tree.node_ref(x, Node::right), &mut self.stack);
        self.tree.node_ref(x, Node::entry)
    }
}
