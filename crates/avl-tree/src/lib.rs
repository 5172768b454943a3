//! Arena-backed AVL tree.
//!
//! [`AvlTree`] is an ordered key/value map that stays height-balanced, so
//! lookup, insertion and removal are all O(log n). Duplicate keys are rejected
//! instead of overwritten.
//!
//! Nodes are stored in a `Vec` owned by the tree, and all links are
//! `Option<u32>` indices into it. Each node keeps a parent index next to its
//! two child indices; the parent edge is only used to walk back up during
//! rebalancing and is always rewritten together with the child edge.
//!
//! # Example
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! assert_eq!(tree.insert(Some(10), "ten"), Ok(true));
//! assert_eq!(tree.insert(Some(20), "twenty"), Ok(true));
//! assert_eq!(tree.insert(Some(30), "thirty"), Ok(true));
//! assert_eq!(tree.insert(Some(20), "again"), Ok(false));
//!
//! let root = tree.get_tree_root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(tree.get_tree_height(), 1);
//!
//! assert_eq!(tree.find_by_key(Some(&30)), Ok(Some(&"thirty")));
//! assert_eq!(tree.remove_by_key(Some(&10)), Ok(true));
//! assert!(tree.find_by_key(None).is_err());
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] link trait and [`KvNode`] entry trait |
//! | [`util`] | Arena link helpers shared by the tree engine |
//! | [`avl`] | Rotations, restructuring, deletion splice and [`AvlTree`] |
//! | [`print`] | Box-drawing printer behind `Display` |
//! | [`error`] | [`AvlError`] |

pub mod avl;
pub mod error;
pub mod print;
pub mod types;
pub mod util;

pub use avl::{AvlOptions, AvlTree, InsertRepair, NodeRef, Splice};
pub use error::{AvlError, Result};
pub use types::{KvNode, Node};
