use std::fmt::Debug;

use tracing::trace;

use crate::types::KvNode;
use crate::util::{
    attach_l, attach_r, first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r,
};

use super::splice::splice;
use super::types::{AvlNodeLike, InsertRepair, EMPTY_HEIGHT};

/// Stored height of `node`, or [`EMPTY_HEIGHT`] for an empty link.
#[inline]
pub fn height<N: AvlNodeLike>(arena: &[N], node: Option<u32>) -> i32 {
    node.map_or(EMPTY_HEIGHT, |i| arena[i as usize].height())
}

/// `height(left) - height(right)`, from the stored child heights.
#[inline]
pub fn balance<N: AvlNodeLike>(arena: &[N], node: u32) -> i32 {
    height(arena, get_l(arena, node)) - height(arena, get_r(arena, node))
}

/// Recomputes the height of `node` from its children and stores it.
#[inline]
pub fn update_height<N: AvlNodeLike>(arena: &mut [N], node: u32) -> i32 {
    let h = 1 + height(arena, get_l(arena, node)).max(height(arena, get_r(arena, node)));
    arena[node as usize].set_height(h);
    h
}

/// Rotates `n` down to the left; its right child takes its place.
///
/// Returns the node now occupying `n`'s position. When `n` was the root the
/// pivot comes back with no parent, which is how callers learn about the new
/// root.
pub fn rotate_left<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    let Some(pivot) = get_r(arena, n) else {
        debug_assert!(false, "rotate_left on node {n} without a right child");
        return n;
    };
    let p = get_p(arena, n);
    let inner = get_l(arena, pivot);

    attach_r(arena, n, inner);
    set_p(arena, pivot, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(pivot));
        } else {
            set_r(arena, p, Some(pivot));
        }
    }
    attach_l(arena, pivot, Some(n));

    update_height(arena, n);
    update_height(arena, pivot);
    trace!(node = n, pivot, "rotate left");
    pivot
}

/// Mirror of [`rotate_left`].
pub fn rotate_right<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    let Some(pivot) = get_l(arena, n) else {
        debug_assert!(false, "rotate_right on node {n} without a left child");
        return n;
    };
    let p = get_p(arena, n);
    let inner = get_r(arena, pivot);

    attach_l(arena, n, inner);
    set_p(arena, pivot, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(pivot));
        } else {
            set_r(arena, p, Some(pivot));
        }
    }
    attach_r(arena, pivot, Some(n));

    update_height(arena, n);
    update_height(arena, pivot);
    trace!(node = n, pivot, "rotate right");
    pivot
}

/// Refreshes the height of `n` and applies the single or double rotation its
/// balance factor calls for.
///
/// Returns the node now at `n`'s position; that is `n` itself when no
/// rotation was needed.
pub fn restructure<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    update_height(arena, n);
    let bf = balance(arena, n);

    if bf > 1 {
        let Some(l) = get_l(arena, n) else {
            return n;
        };
        if balance(arena, l) < 0 {
            rotate_left(arena, l);
        }
        rotate_right(arena, n)
    } else if bf < -1 {
        let Some(r) = get_r(arena, n) else {
            return n;
        };
        if balance(arena, r) > 0 {
            rotate_right(arena, r);
        }
        rotate_left(arena, n)
    } else {
        n
    }
}

/// Walks from `start` to the root refreshing heights and restructuring.
///
/// `root` is the root before the walk; the root after it is returned.
pub fn repair_after_insert<N: AvlNodeLike>(
    arena: &mut [N],
    root: u32,
    start: u32,
    walk: InsertRepair,
) -> u32 {
    let mut curr = start;
    loop {
        let sub = restructure(arena, curr);
        let parent = get_p(arena, sub);
        if sub != curr && walk == InsertRepair::StopAfterRotation {
            return if parent.is_none() { sub } else { root };
        }
        match parent {
            Some(p) => curr = p,
            None => return sub,
        }
    }
}

/// Walks from `start` to the root refreshing heights, restructuring only the
/// nodes whose balance left `{-1, 0, 1}`.
///
/// Never stops early: after a deletion every level may need a rotation.
pub fn repair_after_remove<N: AvlNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    start: Option<u32>,
) -> Option<u32> {
    let Some(mut curr) = start else {
        return root;
    };
    loop {
        update_height(arena, curr);
        if balance(arena, curr).abs() > 1 {
            curr = restructure(arena, curr);
        }
        match get_p(arena, curr) {
            Some(p) => curr = p,
            None => return Some(curr),
        }
    }
}

/// Attaches the detached node `n` as the left child of leaf-side slot `p` and
/// repairs upwards. Returns the new root.
pub fn insert_left<N: AvlNodeLike>(
    arena: &mut [N],
    root: u32,
    n: u32,
    p: u32,
    walk: InsertRepair,
) -> u32 {
    debug_assert!(get_l(arena, p).is_none());
    attach_l(arena, p, Some(n));
    repair_after_insert(arena, root, p, walk)
}

/// Mirror of [`insert_left`].
pub fn insert_right<N: AvlNodeLike>(
    arena: &mut [N],
    root: u32,
    n: u32,
    p: u32,
    walk: InsertRepair,
) -> u32 {
    debug_assert!(get_r(arena, p).is_none());
    attach_r(arena, p, Some(n));
    repair_after_insert(arena, root, p, walk)
}

/// Unlinks `n` from the tree and rebalances. Returns the new root.
///
/// On return `n` has no links left; its arena slot is the caller's to reclaim.
pub fn remove<N: AvlNodeLike>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32> {
    let p = get_p(arena, n);
    let outcome = splice(arena, n);
    let replacement = outcome.replacement();

    replace_child(arena, p, n, replacement);
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);

    let root = if p.is_none() { replacement } else { root };
    repair_after_remove(arena, root, outcome.repair_start())
}

fn validate<K, V, N>(arena: &[N], node: u32) -> Result<i32, String>
where
    N: AvlNodeLike + KvNode<K, V>,
{
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    let lh = match l {
        Some(l) => {
            if get_p(arena, l) != Some(node) {
                return Err(format!("Broken parent link on left child of node {node}"));
            }
            validate::<K, V, N>(arena, l)?
        }
        None => EMPTY_HEIGHT,
    };
    let rh = match r {
        Some(r) => {
            if get_p(arena, r) != Some(node) {
                return Err(format!("Broken parent link on right child of node {node}"));
            }
            validate::<K, V, N>(arena, r)?
        }
        None => EMPTY_HEIGHT,
    };

    let expected = 1 + lh.max(rh);
    let actual = arena[node as usize].height();
    if actual != expected {
        return Err(format!(
            "Height mismatch at node {node}: expected {expected}, got {actual}"
        ));
    }
    if !(-1..=1).contains(&(lh - rh)) {
        return Err(format!("AVL balance violated at node {node}: {}", lh - rh));
    }

    Ok(expected)
}

/// Checks links, heights, balance and key order of the tree under `root`.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    N: AvlNodeLike + KvNode<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }

    validate::<K, V, N>(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(arena[prev as usize].key(), arena[i as usize].key());
            if cmp >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike + KvNode<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.height(),
                n.key(),
                n.value()
            )
        }
    }
}

/// Builds an arena by plain BST descent plus the regular repair walk, so
/// arena index `i` holds the `i`-th key of `keys`.
#[cfg(test)]
pub(crate) fn build(keys: &[i32]) -> (Vec<super::AvlNode<i32, ()>>, Option<u32>) {
    let mut arena = Vec::new();
    let mut root: Option<u32> = None;
    for &k in keys {
        arena.push(super::AvlNode::new(k, ()));
        let n = (arena.len() - 1) as u32;
        let Some(r) = root else {
            root = Some(n);
            continue;
        };
        let mut curr = r;
        loop {
            if k < arena[curr as usize].k {
                match get_l(&arena, curr) {
                    Some(l) => curr = l,
                    None => {
                        root = Some(insert_left(&mut arena, r, n, curr, InsertRepair::FullWalk));
                        break;
                    }
                }
            } else {
                match get_r(&arena, curr) {
                    Some(rr) => curr = rr,
                    None => {
                        root = Some(insert_right(&mut arena, r, n, curr, InsertRepair::FullWalk));
                        break;
                    }
                }
            }
        }
    }
    (arena, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;

    fn cmp(a: &i32, b: &i32) -> i32 {
        a.cmp(b) as i32
    }

    fn key(arena: &[AvlNode<i32, ()>], i: Option<u32>) -> Option<i32> {
        i.map(|i| arena[i as usize].k)
    }

    fn chain(keys: &[i32], right: bool) -> Vec<AvlNode<i32, ()>> {
        let mut arena: Vec<AvlNode<i32, ()>> = keys.iter().map(|&k| AvlNode::new(k, ())).collect();
        for i in 1..arena.len() as u32 {
            if right {
                attach_r(&mut arena, i - 1, Some(i));
            } else {
                attach_l(&mut arena, i - 1, Some(i));
            }
        }
        for i in (0..arena.len() as u32).rev() {
            update_height(&mut arena, i);
        }
        arena
    }

    #[test]
    fn rotate_left_promotes_right_child_to_root() {
        let mut arena = chain(&[1, 2, 3], true);
        let top = rotate_left(&mut arena, 0);
        assert_eq!(top, 1);
        assert_eq!(get_p(&arena, 1), None);
        assert_eq!(key(&arena, get_l(&arena, 1)), Some(1));
        assert_eq!(key(&arena, get_r(&arena, 1)), Some(3));
        assert_eq!(get_p(&arena, 0), Some(1));
        assert_eq!(arena[0].height, 0);
        assert_eq!(arena[1].height, 1);
        assert_avl_tree(&arena, Some(1), &cmp).unwrap();
    }

    #[test]
    fn rotate_right_hands_inner_subtree_across() {
        // 40 (20 (10, 30), 50); 30 is the inner subtree that changes sides.
        let mut arena: Vec<AvlNode<i32, ()>> =
            [40, 20, 50, 10, 30].iter().map(|&k| AvlNode::new(k, ())).collect();
        attach_l(&mut arena, 0, Some(1));
        attach_r(&mut arena, 0, Some(2));
        attach_l(&mut arena, 1, Some(3));
        attach_r(&mut arena, 1, Some(4));
        for i in [4, 3, 2, 1, 0] {
            update_height(&mut arena, i);
        }

        let top = rotate_right(&mut arena, 0);
        assert_eq!(key(&arena, Some(top)), Some(20));
        assert_eq!(key(&arena, get_l(&arena, 0)), Some(30));
        assert_eq!(get_p(&arena, 4), Some(0));
        assert_eq!(arena[0].height, 1);
        assert_eq!(arena[1].height, 2);
    }

    #[test]
    fn restructure_handles_all_four_shapes() {
        // Left-left.
        let mut arena = chain(&[3, 2, 1], false);
        let top = restructure(&mut arena, 0);
        assert_eq!(key(&arena, Some(top)), Some(2));
        assert_avl_tree(&arena, Some(top), &cmp).unwrap();

        // Right-right.
        let mut arena = chain(&[1, 2, 3], true);
        let top = restructure(&mut arena, 0);
        assert_eq!(key(&arena, Some(top)), Some(2));
        assert_avl_tree(&arena, Some(top), &cmp).unwrap();

        // Left-right: 3 -> l 1 -> r 2.
        let mut arena: Vec<AvlNode<i32, ()>> = [3, 1, 2].iter().map(|&k| AvlNode::new(k, ())).collect();
        attach_l(&mut arena, 0, Some(1));
        attach_r(&mut arena, 1, Some(2));
        for i in [2, 1, 0] {
            update_height(&mut arena, i);
        }
        let top = restructure(&mut arena, 0);
        assert_eq!(key(&arena, Some(top)), Some(2));
        assert_avl_tree(&arena, Some(top), &cmp).unwrap();

        // Right-left: 1 -> r 3 -> l 2.
        let mut arena: Vec<AvlNode<i32, ()>> = [1, 3, 2].iter().map(|&k| AvlNode::new(k, ())).collect();
        attach_r(&mut arena, 0, Some(1));
        attach_l(&mut arena, 1, Some(2));
        for i in [2, 1, 0] {
            update_height(&mut arena, i);
        }
        let top = restructure(&mut arena, 0);
        assert_eq!(key(&arena, Some(top)), Some(2));
        assert_avl_tree(&arena, Some(top), &cmp).unwrap();
    }

    #[test]
    fn restructure_leaves_balanced_node_alone() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let root = root.unwrap();
        assert_eq!(restructure(&mut arena, root), root);
    }

    #[test]
    fn stop_after_rotation_matches_full_walk() {
        let keys: Vec<i32> = (0..64).map(|i| (i * 37) % 64).collect();
        let (full, full_root) = build(&keys);

        let mut arena = Vec::new();
        let mut root: Option<u32> = None;
        for &k in &keys {
            arena.push(AvlNode::new(k, ()));
            let n = (arena.len() - 1) as u32;
            let Some(r) = root else {
                root = Some(n);
                continue;
            };
            let mut curr = r;
            loop {
                let side = if k < arena[curr as usize].k {
                    get_l(&arena, curr)
                } else {
                    get_r(&arena, curr)
                };
                match side {
                    Some(c) => curr = c,
                    None if k < arena[curr as usize].k => {
                        root = Some(insert_left(&mut arena, r, n, curr, InsertRepair::StopAfterRotation));
                        break;
                    }
                    None => {
                        root = Some(insert_right(&mut arena, r, n, curr, InsertRepair::StopAfterRotation));
                        break;
                    }
                }
            }
            assert_avl_tree(&arena, root, &cmp).unwrap();
        }

        assert_eq!(key(&arena, root), key(&full, full_root));
        for i in 0..arena.len() {
            assert_eq!(arena[i].height, full[i].height);
            assert_eq!(arena[i].p, full[i].p);
        }
    }

    #[test]
    fn remove_keeps_tree_valid_at_every_step() {
        let keys: Vec<i32> = (0..50).collect();
        let (mut arena, mut root) = build(&keys);
        for n in (0..50u32).step_by(2) {
            root = remove(&mut arena, root, n);
            assert_eq!(arena[n as usize].p, None);
            assert_eq!(arena[n as usize].l, None);
            assert_eq!(arena[n as usize].r, None);
            assert_avl_tree(&arena, root, &cmp).unwrap();
        }
        assert_eq!(crate::util::size(&arena, root), 25);
    }

    #[test]
    fn print_lists_heights() {
        let (arena, root) = build(&[2, 1]);
        let out = print::<i32, (), _>(&arena, root, "");
        assert!(out.starts_with("Node[0] [h=1] { 2 = () }"));
        assert!(out.contains("L=Node[1] [h=0] { 1 = () }"));
    }

    #[test]
    fn validator_reports_stale_height() {
        let (mut arena, root) = build(&[2, 1, 3]);
        arena[1].height = 3;
        let err = assert_avl_tree(&arena, root, &cmp).unwrap_err();
        assert!(err.starts_with("Height mismatch"));
    }
}
