//! Structural BST delete.
//!
//! [`splice`] decides which subtree takes over a node that is being removed
//! and which node the upward repair walk has to start from. It re-links the
//! replacement's own children but leaves the removed node's parent slot
//! alone; attaching the replacement there is the caller's step.

use tracing::trace;

use crate::types::Node;
use crate::util::{attach_l, attach_r, get_l, get_p, get_r};

/// Outcome of splicing out one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Splice {
    /// No children. Nothing replaces the node; repair starts at its former
    /// parent, if any.
    Leaf { parent: Option<u32> },
    /// Exactly one child, which moves up unchanged.
    OneChild { child: u32 },
    /// Two children, and the left child has no right child: the left child
    /// is the in-order predecessor and takes over the right subtree.
    TwoChildrenAdjacentPredecessor { predecessor: u32 },
    /// Two children, the left child has a right child, and the right child
    /// has no left child: the right child is the in-order successor and takes
    /// over the left subtree.
    TwoChildrenAdjacentSuccessor { successor: u32 },
    /// Two children, neither special case. The rightmost node of the left
    /// subtree was detached from `detached_from` and takes over both
    /// subtrees.
    TwoChildrenGeneral { predecessor: u32, detached_from: u32 },
}

impl Splice {
    /// Root of the subtree that goes into the removed node's slot.
    pub fn replacement(&self) -> Option<u32> {
        match *self {
            Splice::Leaf { .. } => None,
            Splice::OneChild { child } => Some(child),
            Splice::TwoChildrenAdjacentPredecessor { predecessor } => Some(predecessor),
            Splice::TwoChildrenAdjacentSuccessor { successor } => Some(successor),
            Splice::TwoChildrenGeneral { predecessor, .. } => Some(predecessor),
        }
    }

    /// Lowest node whose height may have changed.
    pub fn repair_start(&self) -> Option<u32> {
        match *self {
            Splice::Leaf { parent } => parent,
            Splice::OneChild { child } => Some(child),
            Splice::TwoChildrenAdjacentPredecessor { predecessor } => Some(predecessor),
            Splice::TwoChildrenAdjacentSuccessor { successor } => Some(successor),
            Splice::TwoChildrenGeneral { detached_from, .. } => Some(detached_from),
        }
    }
}

/// Splices `n` out of its subtree.
pub fn splice<N: Node>(arena: &mut [N], n: u32) -> Splice {
    let outcome = match (get_l(arena, n), get_r(arena, n)) {
        (None, None) => Splice::Leaf {
            parent: get_p(arena, n),
        },
        (Some(child), None) | (None, Some(child)) => Splice::OneChild { child },
        (Some(l), Some(r)) => match get_r(arena, l) {
            None => {
                attach_r(arena, l, Some(r));
                Splice::TwoChildrenAdjacentPredecessor { predecessor: l }
            }
            Some(_) if get_l(arena, r).is_none() => {
                attach_l(arena, r, Some(l));
                Splice::TwoChildrenAdjacentSuccessor { successor: r }
            }
            Some(lr) => {
                let mut vp = l;
                let mut v = lr;
                while let Some(next) = get_r(arena, v) {
                    vp = v;
                    v = next;
                }
                let vl = get_l(arena, v);
                attach_r(arena, vp, vl);
                attach_r(arena, v, Some(r));
                attach_l(arena, v, Some(l));
                Splice::TwoChildrenGeneral {
                    predecessor: v,
                    detached_from: vp,
                }
            }
        },
    };
    trace!(node = n, ?outcome, "splice");
    outcome
}
