use crate::arena::{Entry, TypedArena};
use crate::error::{Error, Result};
use crate::traversal::{self, Direction, InOrder, PreOrder};
use crate::treap::node::{precedes, Node, NodeRef};
use crate::treap::tree::{self, Arena};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::vec::{self, Vec};

const DEFAULT_CHUNK_SIZE: usize = 1024;

const ROTATION_INVARIANT: &str = "Error: rotation broke parent links.";

/// A binary search tree over keys that is also a min-heap over per-node priorities.
///
/// Keys follow binary search tree order: keys smaller than a node's key are in its left subtree,
/// and greater or equal keys are in its right subtree. Priorities follow min-heap order: no node
/// has a smaller priority than its parent, so the root holds the smallest priority. Priorities
/// are compared with the IEEE 754 total order, so any `f64` is accepted.
///
/// Nodes are stored in a `TypedArena` and carry a back-reference to their parent. Insertion
/// attaches a new leaf and rotates it up, and deletion rotates the target down to a leaf before
/// unlinking it, so neither operation recurses.
///
/// # Examples
///
/// ```
/// use priority_treap::treap::Treap;
///
/// let mut treap = Treap::new();
/// treap.insert(5, 0.9);
/// treap.insert(3, 0.5);
/// treap.insert(1, 0.2);
///
/// assert_eq!(treap.top(), Ok((&1, 0.2)));
/// assert_eq!(treap.min(), Ok(&1));
/// assert_eq!(treap.max(), Ok(&5));
///
/// treap.update(&5, 0.1).unwrap();
/// assert_eq!(treap.top(), Ok((&5, 0.1)));
///
/// assert_eq!(treap.delete(&3), Ok((3, 0.5)));
/// assert!(treap.delete(&3).is_err());
/// assert_eq!(treap.iter().map(|(key, _)| *key).collect::<Vec<_>>(), vec![1, 5]);
/// ```
pub struct Treap<K> {
    arena: Arena<K>,
    root: Option<Entry>,
    len: usize,
}

impl<K> Treap<K> {
    /// Constructs a new, empty `Treap<K>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let treap: Treap<u32> = Treap::new();
    /// assert!(treap.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `Treap<K>` whose node arena grows by `chunk_size` nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::with_chunk_size(16);
    /// treap.insert("a", 0.5);
    /// assert_eq!(treap.len(), 1);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Treap {
            arena: TypedArena::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    /// Inserts a key with a given priority. Equal keys are kept side by side, so inserting a key
    /// that already exists adds another node with that key.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.5);
    /// treap.insert(1, 0.25);
    /// assert_eq!(treap.len(), 2);
    /// assert_eq!(treap.top(), Ok((&1, 0.25)));
    /// ```
    pub fn insert(&mut self, key: K, priority: f64)
    where
        K: Ord,
    {
        let Treap { arena, root, len } = self;
        let node = arena.allocate(Node::new(key, priority));
        match *root {
            None => *root = Some(node),
            Some(tree) => {
                tree::insert_bst(arena, tree, node);
                tree::sift_up(arena, root, node).expect(ROTATION_INVARIANT);
            },
        }
        *len += 1;
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.5);
    /// assert!(!treap.contains(&0));
    /// assert!(treap.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::find(&self.arena, self.root, key).is_some()
    }

    /// Returns a handle to the node holding `key`, or `Error::NotFound` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::error::Error;
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(2, 0.1);
    /// treap.insert(1, 0.5);
    ///
    /// let node = treap.find(&1).unwrap();
    /// assert_eq!(node.key(), &1);
    /// assert_eq!(node.parent().map(|parent| *parent.key()), Some(2));
    /// assert!(treap.find(&3).is_err());
    /// assert_eq!(treap.find(&3).err(), Some(Error::NotFound));
    /// ```
    pub fn find<V>(&self, key: &V) -> Result<NodeRef<'_, K>>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::find(&self.arena, self.root, key)
            .map(|entry| NodeRef::new(&self.arena, entry))
            .ok_or(Error::NotFound)
    }

    /// Returns the priority associated with `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::error::Error;
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.5);
    /// assert_eq!(treap.get_priority(&1), Ok(0.5));
    /// assert_eq!(treap.get_priority(&2), Err(Error::NotFound));
    /// ```
    pub fn get_priority<V>(&self, key: &V) -> Result<f64>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).map(|node| node.priority())
    }

    /// Removes a node with the given key and returns its key and priority. Returns
    /// `Error::NotFound` without modifying the treap if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::error::Error;
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.5);
    /// assert_eq!(treap.delete(&1), Ok((1, 0.5)));
    /// assert_eq!(treap.delete(&1), Err(Error::NotFound));
    /// ```
    pub fn delete<V>(&mut self, key: &V) -> Result<(K, f64)>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        let entry = tree::find(&self.arena, self.root, key).ok_or(Error::NotFound)?;
        Ok(self.remove_entry(entry))
    }

    /// Changes the priority of the node holding `key` and moves it to restore heap order. A
    /// smaller priority moves the node towards the root, a larger one moves it towards the leaves.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.2);
    /// treap.insert(2, 0.4);
    /// treap.update(&2, 0.1).unwrap();
    /// assert_eq!(treap.top(), Ok((&2, 0.1)));
    /// ```
    pub fn update<V>(&mut self, key: &V, priority: f64) -> Result<()>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        let Treap { arena, root, .. } = self;
        let entry = tree::find(arena, *root, key).ok_or(Error::NotFound)?;
        let old_priority = arena[entry].priority;
        arena[entry].priority = priority;
        if precedes(priority, old_priority) {
            tree::sift_up(arena, root, entry).expect(ROTATION_INVARIANT);
        } else if precedes(old_priority, priority) {
            tree::sift_down(arena, root, entry).expect(ROTATION_INVARIANT);
        }
        Ok(())
    }

    /// Returns the minimum key of the treap, or `Error::EmptyTreap` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.9);
    /// treap.insert(3, 0.1);
    /// assert_eq!(treap.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.root()
            .map(|root| traversal::leftmost(root).key())
            .ok_or(Error::EmptyTreap)
    }

    /// Returns the maximum key of the treap, or `Error::EmptyTreap` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.1);
    /// treap.insert(3, 0.9);
    /// assert_eq!(treap.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&K> {
        self.root()
            .map(|root| traversal::rightmost(root).key())
            .ok_or(Error::EmptyTreap)
    }

    /// Returns the key and priority at the root, which holds the smallest priority in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::error::Error;
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// assert_eq!(treap.top(), Err(Error::EmptyTreap));
    ///
    /// treap.insert(1, 0.7);
    /// treap.insert(2, 0.3);
    /// assert_eq!(treap.top(), Ok((&2, 0.3)));
    /// ```
    pub fn top(&self) -> Result<(&K, f64)> {
        self.root()
            .map(|root| (root.key(), root.priority()))
            .ok_or(Error::EmptyTreap)
    }

    /// Removes and returns the key and priority at the root, which holds the smallest priority in
    /// the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert('a', 0.7);
    /// treap.insert('b', 0.3);
    /// assert_eq!(treap.pop(), Ok(('b', 0.3)));
    /// assert_eq!(treap.pop(), Ok(('a', 0.7)));
    /// assert!(treap.pop().is_err());
    /// ```
    pub fn pop(&mut self) -> Result<(K, f64)> {
        let root = self.root.ok_or(Error::EmptyTreap)?;
        Ok(self.remove_entry(root))
    }

    fn remove_entry(&mut self, entry: Entry) -> (K, f64) {
        let Treap { arena, root, len } = self;
        tree::sift_down_to_leaf(arena, root, entry).expect(ROTATION_INVARIANT);
        let Node { key, priority, .. } = tree::detach(arena, root, entry);
        *len -= 1;
        (key, priority)
    }

    /// Returns a handle to the root of the treap, or `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// assert!(treap.root().is_none());
    ///
    /// treap.insert(1, 0.5);
    /// treap.insert(2, 0.25);
    /// let root = treap.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.left().map(|node| *node.key()), Some(1));
    /// ```
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|entry| NodeRef::new(&self.arena, entry))
    }

    /// Returns the number of keys in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.5);
    /// assert_eq!(treap.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// assert!(treap.is_empty());
    /// treap.insert(1, 0.5);
    /// assert!(!treap.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the treap, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.5);
    /// treap.insert(2, 0.5);
    /// treap.clear();
    /// assert_eq!(treap.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// assert_eq!(treap.height(), 0);
    ///
    /// treap.insert(2, 0.1);
    /// assert_eq!(treap.height(), 1);
    ///
    /// treap.insert(1, 0.2);
    /// treap.insert(3, 0.3);
    /// assert_eq!(treap.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        traversal::height(self.root())
    }

    /// Returns the height of the left subtree of the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(2, 0.1);
    /// treap.insert(1, 0.2);
    /// treap.insert(0, 0.3);
    /// assert_eq!(treap.left_height(), 2);
    /// ```
    pub fn left_height(&self) -> usize {
        traversal::height(self.root().and_then(|root| root.left()))
    }

    /// Returns the height of the right subtree of the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(2, 0.1);
    /// treap.insert(1, 0.2);
    /// assert_eq!(treap.right_height(), 0);
    ///
    /// treap.insert(3, 0.3);
    /// assert_eq!(treap.right_height(), 1);
    /// ```
    pub fn right_height(&self) -> usize {
        traversal::height(self.root().and_then(|root| root.right()))
    }

    /// Returns the absolute difference between the heights of the two subtrees of the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(2, 0.1);
    /// treap.insert(3, 0.2);
    /// treap.insert(4, 0.3);
    /// assert_eq!(treap.height_diff(), 2);
    /// ```
    pub fn height_diff(&self) -> usize {
        let left_height = self.left_height();
        let right_height = self.right_height();
        if left_height > right_height {
            left_height - right_height
        } else {
            right_height - left_height
        }
    }

    /// Returns `true` if the heights of the two subtrees of the root differ by at most one.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(2, 0.1);
    /// treap.insert(1, 0.2);
    /// assert!(treap.balanced());
    ///
    /// treap.insert(0, 0.3);
    /// assert!(!treap.balanced());
    /// ```
    pub fn balanced(&self) -> bool {
        self.height_diff() < 2
    }

    /// Walks the whole treap and returns `true` if binary search tree order, heap order, parent
    /// links and the length all agree.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// for (key, priority) in vec![(5, 0.9), (3, 0.5), (8, 0.7), (1, 0.2), (4, 0.6)] {
    ///     treap.insert(key, priority);
    /// }
    /// treap.update(&8, 0.05).unwrap();
    /// treap.delete(&3).unwrap();
    /// assert!(treap.check_invariants());
    /// ```
    pub fn check_invariants(&self) -> bool
    where
        K: Ord,
    {
        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return false;
            }
        }

        let mut nodes = 0;
        for entry in PreOrder::new(self.root(), Direction::Forward).map(|node| node.entry()) {
            nodes += 1;
            let node = &self.arena[entry];
            for child in node.left.iter().chain(node.right.iter()) {
                let child_node = &self.arena[*child];
                if child_node.parent != Some(entry)
                    || precedes(child_node.priority, node.priority)
                {
                    return false;
                }
            }
        }

        let mut keys = self.iter().map(|(key, _)| key);
        let mut in_order = true;
        if let Some(mut prev) = keys.next() {
            for key in keys {
                if key < prev {
                    in_order = false;
                    break;
                }
                prev = key;
            }
        }

        in_order && nodes == self.len && self.arena.len() == self.len
    }

    /// Returns an iterator over the treap. The iterator yields keys and priorities in ascending
    /// key order, and in descending key order when reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::treap::Treap;
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(1, 0.3);
    /// treap.insert(3, 0.1);
    /// treap.insert(2, 0.2);
    ///
    /// let mut iterator = treap.iter();
    /// assert_eq!(iterator.next(), Some((&1, 0.3)));
    /// assert_eq!(iterator.next_back(), Some((&3, 0.1)));
    /// assert_eq!(iterator.next(), Some((&2, 0.2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapIter<'_, K> {
        TreapIter {
            front: InOrder::new(self.root(), Direction::Forward),
            back: InOrder::new(self.root(), Direction::Reverse),
            remaining: self.len,
        }
    }
}

impl<K> IntoIterator for Treap<K> {
    type Item = (K, f64);
    type IntoIter = TreapIntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        let order = InOrder::new(self.root(), Direction::Forward)
            .map(|node| node.entry())
            .collect::<Vec<Entry>>();
        TreapIntoIter {
            arena: self.arena,
            order: order.into_iter(),
        }
    }
}

impl<'a, K> IntoIterator for &'a Treap<K>
where
    K: 'a,
{
    type Item = (&'a K, f64);
    type IntoIter = TreapIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `Treap<K>`.
///
/// This iterator yields keys and priorities in ascending key order.
pub struct TreapIntoIter<K> {
    arena: Arena<K>,
    order: vec::IntoIter<Entry>,
}

impl<K> TreapIntoIter<K> {
    fn free_entry(&mut self, entry: Entry) -> (K, f64) {
        let Node { key, priority, .. } = self.arena.free(&entry);
        (key, priority)
    }
}

impl<K> Iterator for TreapIntoIter<K> {
    type Item = (K, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.order.next()?;
        Some(self.free_entry(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K> DoubleEndedIterator for TreapIntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let entry = self.order.next_back()?;
        Some(self.free_entry(entry))
    }
}

impl<K> ExactSizeIterator for TreapIntoIter<K> {}

/// An iterator for `Treap<K>`.
///
/// This iterator traverses the keys of a treap in-order. Each call to `Treap::iter` starts a
/// fresh traversal.
pub struct TreapIter<'a, K> {
    front: InOrder<NodeRef<'a, K>>,
    back: InOrder<NodeRef<'a, K>>,
    remaining: usize,
}

impl<'a, K> Iterator for TreapIter<'a, K>
where
    K: 'a,
{
    type Item = (&'a K, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.front.next().map(|node| (node.key(), node.priority()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for TreapIter<'a, K>
where
    K: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.back.next().map(|node| (node.key(), node.priority()))
    }
}

impl<'a, K> ExactSizeIterator for TreapIter<'a, K> where K: 'a {}

impl<K> Default for Treap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Extend<(K, f64)> for Treap<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        for (key, priority) in iter {
            self.insert(key, priority);
        }
    }
}

impl<K> FromIterator<(K, f64)> for Treap<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut treap = Treap::new();
        treap.extend(iter);
        treap
    }
}

impl<K> fmt::Debug for Treap<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Treap;
    use crate::error::Error;
    use crate::traversal::{self, Direction, LevelOrder};

    // keys [5, 3, 8, 1, 4] with priorities [0.9, 0.5, 0.7, 0.2, 0.6]
    fn sample() -> Treap<u32> {
        let mut treap = Treap::new();
        for &(key, priority) in &[(5, 0.9), (3, 0.5), (8, 0.7), (1, 0.2), (4, 0.6)] {
            treap.insert(key, priority);
            assert!(treap.check_invariants());
        }
        treap
    }

    fn keys(treap: &Treap<u32>) -> Vec<u32> {
        treap.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_len_empty() {
        let treap: Treap<u32> = Treap::new();
        assert_eq!(treap.len(), 0);
        assert!(treap.is_empty());
        assert!(!treap.contains(&1));
        assert!(treap.check_invariants());
    }

    #[test]
    fn test_empty_errors() {
        let mut treap: Treap<u32> = Treap::new();
        assert_eq!(treap.min(), Err(Error::EmptyTreap));
        assert_eq!(treap.max(), Err(Error::EmptyTreap));
        assert_eq!(treap.top(), Err(Error::EmptyTreap));
        assert_eq!(treap.pop(), Err(Error::EmptyTreap));
        assert_eq!(treap.height(), 0);
        assert_eq!(treap.height_diff(), 0);
        assert!(treap.balanced());
    }

    #[test]
    fn test_sample_shape() {
        let treap = sample();
        assert_eq!(treap.top(), Ok((&1, 0.2)));
        assert_eq!(treap.min(), Ok(&1));
        assert_eq!(treap.max(), Ok(&8));
        assert_eq!(keys(&treap), vec![1, 3, 4, 5, 8]);

        //   1
        //    \
        //     3
        //      \
        //       4
        //        \
        //         8
        //        /
        //       5
        let levels = LevelOrder::new(treap.root(), Direction::Forward)
            .map(|node| *node.key())
            .collect::<Vec<u32>>();
        assert_eq!(levels, vec![1, 3, 4, 8, 5]);
        assert_eq!(treap.height(), 5);
        assert_eq!(treap.left_height(), 0);
        assert_eq!(treap.right_height(), 4);
        assert_eq!(treap.height_diff(), 4);
        assert!(!treap.balanced());
    }

    #[test]
    fn test_update_to_root() {
        let mut treap = sample();
        treap.update(&3, 0.01).unwrap();
        assert!(treap.check_invariants());
        assert_eq!(treap.top(), Ok((&3, 0.01)));
        assert_eq!(treap.root().and_then(|root| root.left()).map(|n| *n.key()), Some(1));
        assert_eq!(keys(&treap), vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn test_update_sift_down() {
        let mut treap = sample();
        treap.update(&1, 0.95).unwrap();
        assert!(treap.check_invariants());
        assert_eq!(treap.top(), Ok((&3, 0.5)));
        assert_eq!(treap.get_priority(&1), Ok(0.95));
        assert!(treap.find(&1).unwrap().left().is_none());
        assert!(treap.find(&1).unwrap().right().is_none());
        assert_eq!(keys(&treap), vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn test_update_same_priority() {
        let mut treap = sample();
        treap.update(&4, 0.6).unwrap();
        assert_eq!(treap.find(&4).unwrap().parent().map(|n| *n.key()), Some(3));
        assert!(treap.check_invariants());
    }

    #[test]
    fn test_update_missing() {
        let mut treap = sample();
        assert_eq!(treap.update(&7, 0.1), Err(Error::NotFound));
        assert_eq!(treap.top(), Ok((&1, 0.2)));
    }

    #[test]
    fn test_delete() {
        let mut treap = sample();
        assert_eq!(treap.delete(&4), Ok((4, 0.6)));
        assert!(!treap.contains(&4));
        assert_eq!(treap.len(), 4);
        assert!(treap.check_invariants());

        assert_eq!(treap.delete(&4), Err(Error::NotFound));
        assert_eq!(treap.len(), 4);
    }

    #[test]
    fn test_delete_root_and_last() {
        let mut treap = sample();
        assert_eq!(treap.delete(&1), Ok((1, 0.2)));
        assert_eq!(treap.top(), Ok((&3, 0.5)));
        assert!(treap.check_invariants());

        for key in &[3, 5, 8, 4] {
            treap.delete(key).unwrap();
            assert!(treap.check_invariants());
        }
        assert!(treap.is_empty());
        assert!(treap.root().is_none());
        assert_eq!(treap.len(), 0);
    }

    #[test]
    fn test_pop_in_priority_order() {
        let mut treap = sample();
        let mut popped = Vec::new();
        while let Ok((key, _)) = treap.pop() {
            popped.push(key);
            assert!(treap.check_invariants());
        }
        assert_eq!(popped, vec![1, 3, 4, 8, 5]);
    }

    #[test]
    fn test_duplicates() {
        let mut treap = Treap::new();
        treap.insert(2, 0.5);
        treap.insert(2, 0.3);
        treap.insert(2, 0.7);
        treap.insert(1, 0.1);
        assert!(treap.check_invariants());
        assert_eq!(treap.len(), 4);
        assert_eq!(keys(&treap), vec![1, 2, 2, 2]);

        assert_eq!(treap.delete(&2).map(|pair| pair.0), Ok(2));
        assert_eq!(treap.delete(&2).map(|pair| pair.0), Ok(2));
        assert!(treap.contains(&2));
        assert_eq!(treap.delete(&2).map(|pair| pair.0), Ok(2));
        assert!(!treap.contains(&2));
        assert!(treap.check_invariants());
    }

    #[test]
    fn test_nan_priority() {
        let mut treap = Treap::new();
        treap.insert(1, ::std::f64::NAN);
        treap.insert(2, ::std::f64::INFINITY);
        treap.insert(3, 0.5);
        assert!(treap.check_invariants());
        assert_eq!(treap.pop().map(|pair| pair.0), Ok(3));
        assert_eq!(treap.pop().map(|pair| pair.0), Ok(2));
        assert_eq!(treap.pop().map(|pair| pair.0), Ok(1));
    }

    #[test]
    fn test_borrowed_keys() {
        let mut treap = Treap::new();
        treap.insert(String::from("b"), 0.2);
        treap.insert(String::from("a"), 0.4);
        assert!(treap.contains("a"));
        assert_eq!(treap.get_priority("b"), Ok(0.2));
        assert_eq!(treap.delete("a"), Ok((String::from("a"), 0.4)));
    }

    #[test]
    fn test_iter_rev() {
        let treap = sample();
        let rev = treap.iter().rev().map(|(key, _)| *key).collect::<Vec<u32>>();
        assert_eq!(rev, vec![8, 5, 4, 3, 1]);
        assert_eq!(treap.iter().len(), 5);
    }

    #[test]
    fn test_iter_is_restartable() {
        let treap = sample();
        let first = keys(&treap);
        let second = (&treap).into_iter().map(|(key, _)| *key).collect::<Vec<u32>>();
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_iter() {
        let treap = sample();
        assert_eq!(
            treap.into_iter().collect::<Vec<(u32, f64)>>(),
            vec![(1, 0.2), (3, 0.5), (4, 0.6), (5, 0.9), (8, 0.7)],
        );

        let treap = sample();
        assert_eq!(treap.into_iter().rev().next(), Some((8, 0.7)));
    }

    #[test]
    fn test_from_iter_and_debug() {
        let treap = vec![(2, 0.5), (1, 0.25)].into_iter().collect::<Treap<u32>>();
        assert_eq!(format!("{:?}", treap), "{1: 0.25, 2: 0.5}");
    }

    #[test]
    fn test_clear() {
        let mut treap = sample();
        treap.clear();
        assert!(treap.is_empty());
        assert_eq!(treap.len(), 0);
        treap.insert(9, 0.1);
        assert_eq!(keys(&treap), vec![9]);
        assert!(treap.check_invariants());
    }

    #[test]
    fn test_sorted_insertions_stay_iterable() {
        let mut treap = Treap::new();
        for key in 0..10_000u32 {
            treap.insert(key, f64::from(key));
        }
        assert_eq!(treap.height(), 10_000);
        assert_eq!(traversal::count(treap.root()), 10_000);
        assert_eq!(treap.iter().rev().next(), Some((&9_999, 9_999.0)));
        assert_eq!(treap.pop(), Ok((0, 0.0)));
    }
}
