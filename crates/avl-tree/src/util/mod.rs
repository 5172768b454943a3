//! Arena link utilities shared by the AVL engine.
//!
//! Everything here speaks in arena indices. Child links are always written
//! together with the matching parent link through [`attach_l`], [`attach_r`]
//! and [`replace_child`], so no caller has to remember the back edge.

use crate::types::Node;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Makes `child` the left child of `parent`.
pub fn attach_l<N: Node>(arena: &mut [N], parent: u32, child: Option<u32>) {
    set_l(arena, parent, child);
    if let Some(child) = child {
        set_p(arena, child, Some(parent));
    }
}

/// Makes `child` the right child of `parent`.
pub fn attach_r<N: Node>(arena: &mut [N], parent: u32, child: Option<u32>) {
    set_r(arena, parent, child);
    if let Some(child) = child {
        set_p(arena, child, Some(parent));
    }
}

/// Puts `new` into the child slot of `parent` currently held by `old`.
///
/// With no `parent`, `new` becomes a root and its parent link is cleared.
pub fn replace_child<N: Node>(arena: &mut [N], parent: Option<u32>, old: u32, new: Option<u32>) {
    match parent {
        Some(p) if get_l(arena, p) == Some(old) => attach_l(arena, p, new),
        Some(p) => attach_r(arena, p, new),
        None => {
            if let Some(new) = new {
                set_p(arena, new, None);
            }
        }
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes reachable from `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Re-points every link that references `from` so that it references `to`.
///
/// Called right before `Vec::swap_remove` moves the node at `from` into the
/// vacated slot `to`. The node at `to` must already be unlinked. Returns the
/// root, which changes only when `from` was the root.
pub fn relocate<N: Node>(arena: &mut [N], root: Option<u32>, from: u32, to: u32) -> Option<u32> {
    if let Some(p) = get_p(arena, from) {
        if get_l(arena, p) == Some(from) {
            set_l(arena, p, Some(to));
        } else {
            set_r(arena, p, Some(to));
        }
    }
    if let Some(l) = get_l(arena, from) {
        set_p(arena, l, Some(to));
    }
    if let Some(r) = get_r(arena, from) {
        set_p(arena, r, Some(to));
    }
    if root == Some(from) {
        Some(to)
    } else {
        root
    }
}
