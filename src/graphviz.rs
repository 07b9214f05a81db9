//! Graphviz output for inspecting tree shape and colors.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::Path;

use crate::index::IndexType;
use crate::node::Node;
use crate::rbtree::RbTree;

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord + Display,
    Ix: IndexType,
{
    /// Render the tree in DOT format, one vertex per key labelled `key: value`
    /// and filled with the node's color.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph rbtree {\n    node [style=filled, fontcolor=white];\n");
        let mut stack = vec![self.root];
        while let Some(x) = stack.pop() {
            let Some((key, value)) = self.node_ref(x, Node::entry) else {
                continue;
            };
            let color = if self.node_ref(x, Node::is_red) {
                "red"
            } else {
                "black"
            };
            dot.push_str(&format!(
                "    \"{key}\" [label=\"{key}: {}\", fillcolor={color}];\n",
                value.escape_debug()
            ));
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if let Some(child_key) = self.node_ref(child, Node::key) {
                    dot.push_str(&format!("    \"{key}\" -> \"{child_key}\";\n"));
                    stack.push(child);
                }
            }
        }
        dot.push_str("}\n");
        dot
    }

    /// Write [`to_dot`](Self::to_dot) output to a file.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_dot())
    }
}
