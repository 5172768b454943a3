use super::types::AvlNode;
use super::util::balance;

/// Read-only handle on a node of an [`AvlTree`](super::AvlTree).
///
/// Borrows the tree, so the shape it reports cannot change underneath it.
pub struct NodeRef<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    idx: u32,
}

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(arena: &'a [AvlNode<K, V>], idx: u32) -> Self {
        Self { arena, idx }
    }

    fn at(&self, idx: Option<u32>) -> Option<NodeRef<'a, K, V>> {
        idx.map(|idx| NodeRef::new(self.arena, idx))
    }

    fn node(&self) -> &'a AvlNode<K, V> {
        &self.arena[self.idx as usize]
    }

    /// Arena slot of the node. Slots are reused after removals.
    pub fn index(&self) -> u32 {
        self.idx
    }

    pub fn key(&self) -> &'a K {
        &self.node().k
    }

    pub fn value(&self) -> &'a V {
        &self.node().v
    }

    pub fn height(&self) -> i32 {
        self.node().height
    }

    /// `height(left) - height(right)`.
    pub fn balance(&self) -> i32 {
        balance(self.arena, self.idx)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.node().l)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.node().r)
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K, V>> {
        self.at(self.node().p)
    }
}

impl<'a, K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for NodeRef<'a, K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.idx)
            .field("key", self.key())
            .field("value", self.value())
            .field("height", &self.height())
            .finish()
    }
}
