use crate::arena::{Entry, TypedArena};
use crate::traversal::BinaryNode;
use std::cmp::Ordering;
use std::fmt;

/// A struct representing an internal node of a treap.
///
/// Children are owned through the arena the node lives in; `parent` is only a back-reference used
/// to walk upwards during rotations.
pub struct Node<K> {
    pub key: K,
    pub priority: f64,
    pub parent: Option<Entry>,
    pub left: Option<Entry>,
    pub right: Option<Entry>,
}

impl<K> Node<K> {
    pub fn new(key: K, priority: f64) -> Self {
        Node {
            key,
            priority,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Returns `true` if priority `lhs` sits strictly closer to the root than `rhs`.
///
/// Priorities use the IEEE 754 total order so that every `f64`, NaN included, has a place in the
/// heap.
pub fn precedes(lhs: f64, rhs: f64) -> bool {
    lhs.total_cmp(&rhs) == Ordering::Less
}

/// A read-only handle to a node of a `Treap<K>`.
///
/// # Examples
///
/// ```
/// use priority_treap::treap::Treap;
///
/// let mut treap = Treap::new();
/// treap.insert(2, 0.1);
/// treap.insert(1, 0.5);
///
/// let node = treap.find(&1).unwrap();
/// assert_eq!(node.key(), &1);
/// assert_eq!(node.priority(), 0.5);
/// assert_eq!(node.parent().map(|parent| *parent.key()), Some(2));
/// ```
pub struct NodeRef<'a, K> {
    arena: &'a TypedArena<Node<K>>,
    entry: Entry,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(arena: &'a TypedArena<Node<K>>, entry: Entry) -> Self {
        NodeRef { arena, entry }
    }

    pub(crate) fn entry(&self) -> Entry {
        self.entry
    }

    fn node(&self) -> &'a Node<K> {
        &self.arena[self.entry]
    }

    fn at(&self, entry: Option<Entry>) -> Option<Self> {
        entry.map(|entry| NodeRef::new(self.arena, entry))
    }

    /// Returns the key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// Returns the priority of this node.
    pub fn priority(&self) -> f64 {
        self.node().priority
    }

    /// Returns the parent of this node, or `None` if it is the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().parent)
    }

    /// Returns the left child of this node.
    pub fn left(&self) -> Option<Self> {
        self.at(self.node().left)
    }

    /// Returns the right child of this node.
    pub fn right(&self) -> Option<Self> {
        self.at(self.node().right)
    }
}

impl<'a, K> Clone for NodeRef<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for NodeRef<'a, K> {}

impl<'a, K> BinaryNode for NodeRef<'a, K> {
    fn left(&self) -> Option<Self> {
        NodeRef::left(self)
    }

    fn right(&self) -> Option<Self> {
        NodeRef::right(self)
    }
}

impl<'a, K> fmt::Debug for NodeRef<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("priority", &self.priority())
            .finish()
    }
}
