#![allow(dead_code)]

use std::sync::Once;

use avl_tree::{AvlTree, NodeRef};
use tracing_subscriber::EnvFilter;

static TEST_SETUP: Once = Once::new();

/// Installs a `tracing` subscriber once per test binary. `RUST_LOG` overrides
/// the default `debug` filter.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

fn walk<K: Ord + Copy, V>(node: NodeRef<'_, K, V>, keys: &mut Vec<K>) -> i32 {
    let lh = match node.left() {
        Some(l) => {
            assert_eq!(l.parent().map(|p| p.index()), Some(node.index()));
            walk(l, keys)
        }
        None => -1,
    };
    keys.push(*node.key());
    let rh = match node.right() {
        Some(r) => {
            assert_eq!(r.parent().map(|p| p.index()), Some(node.index()));
            walk(r, keys)
        }
        None => -1,
    };
    assert_eq!(node.height(), 1 + lh.max(rh), "height of {}", node.index());
    assert!((lh - rh).abs() <= 1, "balance of {}", node.index());
    assert_eq!(node.balance(), lh - rh);
    node.height()
}

/// Re-checks every structural invariant through the public node handles and
/// returns the keys in order.
pub fn check_structure<K, V, C>(tree: &AvlTree<K, V, C>) -> Vec<K>
where
    K: Ord + Copy,
    C: Fn(&K, &K) -> i32,
{
    let mut keys = Vec::new();
    match tree.get_tree_root() {
        Some(root) => {
            assert!(root.parent().is_none());
            let h = walk(root, &mut keys);
            assert_eq!(h, tree.get_tree_height());
        }
        None => assert_eq!(tree.get_tree_height(), -1),
    }
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(keys.len(), tree.get_tree_size());
    tree.assert_valid().unwrap();
    keys
}

/// Upper bound on the height of an AVL tree holding `n` keys.
pub fn height_bound(n: usize) -> f64 {
    1.45 * ((n + 1) as f64).log2()
}
