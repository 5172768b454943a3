//! AVL tree: node type, rotation and repair engine, deletion splice, and the
//! [`AvlTree`] container built on them.

pub mod node_ref;
pub mod splice;
pub mod tree;
pub mod types;
pub mod util;

pub use node_ref::NodeRef;
pub use splice::{splice, Splice};
pub use tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike, AvlOptions, InsertRepair, EMPTY_HEIGHT};
pub use util::{assert_avl_tree, print, remove, restructure, rotate_left, rotate_right};
