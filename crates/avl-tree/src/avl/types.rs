use crate::types::{KvNode, Node};

/// Height of an empty subtree.
pub const EMPTY_HEIGHT: i32 = -1;

/// Arena node of an [`AvlTree`](super::AvlTree).
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// `1 + max(height(l), height(r))`; a lone leaf has height 0.
    pub height: i32,
}

impl<K, V> AvlNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            height: 0,
        }
    }
}

impl<K, V> Node for AvlNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode<K, V> for AvlNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }

    fn value(&self) -> &V {
        &self.v
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }

    fn into_entry(self) -> (K, V) {
        (self.k, self.v)
    }
}

/// AVL-specific node behavior.
pub trait AvlNodeLike: Node {
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
}

impl<K, V> AvlNodeLike for AvlNode<K, V> {
    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }
}

/// How far the post-insert repair walk climbs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InsertRepair {
    /// Refresh heights and check balance on every ancestor up to the root.
    #[default]
    FullWalk,
    /// Stop at the first rotation. A leaf insertion needs at most one, and
    /// the subtree height above it is the same as before the insert.
    StopAfterRotation,
}

/// Construction-time settings for [`AvlTree`](super::AvlTree).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvlOptions {
    /// Number of nodes reserved up front in the arena.
    pub capacity: usize,
    pub insert_repair: InsertRepair,
}
