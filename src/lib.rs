//! `rb_tree_map` is an ordered map from distinct keys to string values, based on a
//! red-black tree.
//!
//! Search, insertion and deletion take O(logN) time. The smallest and largest
//! entries are tracked so that `min` and `max` are O(1). Every `insert` and
//! `delete` reports how many node colors it changed while rebalancing.
//!
//! Nodes are kept in a vector and refer to each other by index, with slot 0 acting
//! as the shared black sentinel leaf. Deleted nodes are swapped out of the vector
//! immediately, so the tree never holds dead slots. Keys default to `u64`, which
//! rules out negative keys.
//!
//! # Example
//!
//! ```rust
//! use rb_tree_map::{RbTree, TreeError};
//!
//! let mut tree = RbTree::new();
//! for (key, value) in [(5, "five"), (3, "three"), (8, "eight"), (1, "one")] {
//!     tree.insert(key, value).unwrap();
//! }
//! assert_eq!(tree.min(), Some("one"));
//! assert_eq!(tree.max(), Some("eight"));
//! assert_eq!(tree.insert(5, "again"), Err(TreeError::DuplicateKey));
//!
//! tree.delete(&1).unwrap();
//! assert_eq!(tree.min(), Some("three"));
//! assert_eq!(tree.keys_to_array(), vec![3, 5, 8]);
//! ```
//!

mod error;
#[cfg(feature = "graphviz")]
mod graphviz;
mod index;
mod inorder;
mod node;
mod rbtree;


pub use error::TreeError;
pub use index::{DefaultIx, IndexType};
pub use rbtree::RbTree;
