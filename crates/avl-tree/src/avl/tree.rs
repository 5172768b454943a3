use std::fmt;

use tracing::debug;

use crate::error::{AvlError, Result};
use crate::print::{print_tree, PrintChild};
use crate::types::KvNode;
use crate::util::{relocate, size};

use super::node_ref::NodeRef;
use super::types::{AvlNode, AvlOptions, EMPTY_HEIGHT};
use super::util::{assert_avl_tree, insert_left, insert_right, print, remove};

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Ordered key/value map kept height-balanced by AVL rotations.
///
/// Duplicate keys are rejected rather than overwritten. Nodes live in a dense
/// arena: removing a key frees its slot immediately by moving the last node
/// into it.
pub struct AvlTree<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    len: usize,
    comparator: C,
    options: AvlOptions,
}

impl<K, V> AvlTree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlTree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_options(AvlOptions::default(), comparator)
    }

    pub fn with_options(options: AvlOptions, comparator: C) -> Self {
        Self {
            arena: Vec::with_capacity(options.capacity),
            root: None,
            len: 0,
            comparator,
            options,
        }
    }

    pub fn options(&self) -> &AvlOptions {
        &self.options
    }

    /// Root node, for structural inspection.
    pub fn get_tree_root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|idx| NodeRef::new(&self.arena, idx))
    }

    /// Height of the root; `-1` for an empty tree.
    pub fn get_tree_height(&self) -> i32 {
        self.root
            .map_or(EMPTY_HEIGHT, |idx| self.arena[idx as usize].height)
    }

    pub fn get_tree_size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Looks up `key`.
    ///
    /// # Errors
    ///
    /// [`AvlError::InvalidArgument`] when `key` is `None`.
    pub fn find_by_key(&self, key: Option<&K>) -> Result<Option<&V>> {
        let key = key.ok_or(AvlError::InvalidArgument("cannot search for a null key"))?;
        Ok(self.get(key))
    }

    /// Inserts `key` unless it is already present.
    ///
    /// Returns `false`, leaving the tree untouched, for a duplicate key.
    ///
    /// # Errors
    ///
    /// [`AvlError::InvalidArgument`] when `key` is `None`.
    pub fn insert(&mut self, key: Option<K>, value: V) -> Result<bool> {
        let key = key.ok_or(AvlError::InvalidArgument("null keys are not allowed"))?;
        Ok(self.add(key, value))
    }

    /// Removes `key`. Returns `false` if it was not present.
    ///
    /// # Errors
    ///
    /// [`AvlError::InvalidArgument`] when `key` is `None`.
    pub fn remove_by_key(&mut self, key: Option<&K>) -> Result<bool> {
        let key = key.ok_or(AvlError::InvalidArgument("cannot remove a null key"))?;
        Ok(self.del(key))
    }

    fn find(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            let cmp = (self.comparator)(key, &node.k);
            if cmp == 0 {
                return Some(i);
            }
            curr = if cmp < 0 { node.l } else { node.r };
        }
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.arena[i as usize].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(self.arena[idx as usize].value_mut())
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        self.arena.push(AvlNode::new(key, value));
        (self.arena.len() - 1) as u32
    }

    /// Inserts `key` unless it is already present; returns whether it was
    /// inserted.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let Some(root) = self.root else {
            self.root = Some(self.push_node(key, value));
            self.len = 1;
            return true;
        };

        let mut curr = root;
        loop {
            let node = &self.arena[curr as usize];
            let cmp = (self.comparator)(&key, &node.k);
            if cmp == 0 {
                debug!(node = curr, "duplicate key rejected");
                return false;
            }
            let next = if cmp < 0 { node.l } else { node.r };
            match next {
                Some(next) => curr = next,
                None => {
                    let idx = self.push_node(key, value);
                    let walk = self.options.insert_repair;
                    let root = if cmp < 0 {
                        insert_left(&mut self.arena, root, idx, curr, walk)
                    } else {
                        insert_right(&mut self.arena, root, idx, curr, walk)
                    };
                    self.root = Some(root);
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    /// Removes `key`; returns whether it was present.
    pub fn del(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` and hands back the stored entry.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let Some(node) = self.find(key) else {
            debug!("remove of absent key");
            return None;
        };

        self.root = remove(&mut self.arena, self.root, node);
        self.len -= 1;
        Some(self.reclaim(node))
    }

    /// Frees the slot of an unlinked node, keeping the arena dense.
    fn reclaim(&mut self, node: u32) -> (K, V) {
        let last = (self.arena.len() - 1) as u32;
        if node != last {
            self.root = relocate(&mut self.arena, self.root, last, node);
        }
        self.arena.swap_remove(node as usize).into_entry()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Checks every structural invariant, naming the first one violated.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.len {
            return Err(format!(
                "Size mismatch: tracked {}, reachable {reachable}",
                self.len
            ));
        }
        if self.arena.len() != self.len {
            return Err(format!(
                "Arena holds {} nodes for {} keys",
                self.arena.len(),
                self.len
            ));
        }
        Ok(())
    }

    fn print_node(&self, idx: u32, tab: &str) -> String
    where
        K: fmt::Display,
    {
        let node = &self.arena[idx as usize];
        let head = format!("{} [h={}]", node.k, node.height);
        if node.l.is_none() && node.r.is_none() {
            return head;
        }
        let (l, r) = (node.l, node.r);
        let left: &PrintChild = &move |tab: &str| self.print_child(l, tab);
        let right: &PrintChild = &move |tab: &str| self.print_child(r, tab);
        format!("{head}{}", print_tree(tab, &[Some(left), Some(right)]))
    }

    fn print_child(&self, idx: Option<u32>, tab: &str) -> String
    where
        K: fmt::Display,
    {
        match idx {
            Some(idx) => self.print_node(idx, tab),
            None => "∅".to_string(),
        }
    }
}

impl<K, V, C> fmt::Display for AvlTree<K, V, C>
where
    K: fmt::Display,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            None => f.write_str("AvlTree ∅"),
            Some(root) => {
                let top: &PrintChild = &|tab: &str| self.print_node(root, tab);
                write!(f, "AvlTree{}", print_tree("", &[Some(top)]))
            }
        }
    }
}

impl<K, V, C> fmt::Debug for AvlTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AvlTree(size={}) ", self.len)?;
        f.write_str(&print::<K, V, AvlNode<K, V>>(&self.arena, self.root, ""))
    }
}
