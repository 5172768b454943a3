//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the tree, and every link is
//! an `Option<u32>` index into that arena. The `l` / `r` links own their
//! subtrees; `p` is a navigation edge only and must always agree with the
//! child link that points back at the node.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;

    /// Consumes the node, handing its entry back to the caller.
    fn into_entry(self) -> (K, V)
    where
        Self: Sized;
}
