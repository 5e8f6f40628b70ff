use crate::error::Result;
use crate::randomized::source::{RandomSource, XorShiftSource};
use crate::treap::{NodeRef, Treap, TreapIter};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered collection of keys backed by a `Treap<K>` whose priorities are drawn uniformly at
/// random from `[0, 1)`.
///
/// Because every key receives an independent random priority, the shape of the tree is that of a
/// binary search tree built from a random insertion order, and its expected height is logarithmic
/// in the number of keys regardless of the order keys are inserted in.
///
/// # Examples
///
/// ```
/// use priority_treap::randomized::RandomizedTreap;
///
/// let mut treap = RandomizedTreap::with_seed(1);
/// treap.extend(0..1000);
///
/// assert_eq!(treap.len(), 1000);
/// assert_eq!(treap.min(), Ok(&0));
/// assert_eq!(treap.max(), Ok(&999));
/// assert!(treap.height() < 40);
///
/// let (key, priority) = treap.delete(&500).unwrap();
/// assert_eq!(key, 500);
/// assert!(0.0 <= priority && priority < 1.0);
/// assert!(!treap.contains(&500));
/// ```
pub struct RandomizedTreap<K, R = XorShiftSource> {
    treap: Treap<K>,
    source: R,
}

impl<K> RandomizedTreap<K> {
    /// Constructs a new, empty `RandomizedTreap<K>` with a source seeded from the thread-local
    /// generator.
    pub fn new() -> Self {
        Self::with_source(XorShiftSource::new())
    }

    /// Constructs a new, empty `RandomizedTreap<K>` whose priorities are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(XorShiftSource::with_seed(seed))
    }
}

impl<K, R> RandomizedTreap<K, R>
where
    R: RandomSource,
{
    /// Constructs a new, empty `RandomizedTreap<K, R>` that draws priorities from `source`.
    pub fn with_source(source: R) -> Self {
        RandomizedTreap {
            treap: Treap::new(),
            source,
        }
    }

    /// Reseeds the priority source. Keys inserted afterwards receive reproducible priorities.
    pub fn seed(&mut self, seed: u64) {
        self.source.seed(seed);
    }

    /// Inserts a key with a freshly drawn priority. Inserting a key that already exists adds
    /// another node with that key.
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let priority = self.source.next_priority();
        self.treap.insert(key, priority);
    }

    /// Checks if a key exists in the treap.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.treap.contains(key)
    }

    /// Returns a handle to the node holding `key`, or `Error::NotFound` if there is none.
    pub fn find<V>(&self, key: &V) -> Result<NodeRef<'_, K>>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.treap.find(key)
    }

    /// Removes a key from the treap and returns it together with the priority it was given, or
    /// returns `Error::NotFound` if it does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::error::Error;
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::with_seed(1);
    /// treap.insert(1);
    /// let priority = treap.as_treap().get_priority(&1).unwrap();
    /// assert_eq!(treap.delete(&1), Ok((1, priority)));
    /// assert_eq!(treap.delete(&1), Err(Error::NotFound));
    /// ```
    pub fn delete<V>(&mut self, key: &V) -> Result<(K, f64)>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.treap.delete(key)
    }

    /// Replaces the priority drawn for `key` and moves the node to restore heap order. Returns
    /// `Error::NotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::with_seed(1);
    /// treap.extend(0..10);
    /// treap.update(&7, -1.0).unwrap();
    /// assert_eq!(treap.top(), Ok((&7, -1.0)));
    /// ```
    pub fn update<V>(&mut self, key: &V, priority: f64) -> Result<()>
    where
        K: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.treap.update(key, priority)
    }

    /// Returns the minimum key, or `Error::EmptyTreap` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(vec![3, 1, 2]);
    /// assert_eq!(treap.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.treap.min()
    }

    /// Returns the maximum key, or `Error::EmptyTreap` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(vec![3, 1, 2]);
    /// assert_eq!(treap.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&K> {
        self.treap.max()
    }

    /// Returns the key at the root together with its priority.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.insert('a');
    /// let (key, _) = treap.top().unwrap();
    /// assert_eq!(key, &'a');
    /// ```
    pub fn top(&self) -> Result<(&K, f64)> {
        self.treap.top()
    }

    /// Removes and returns the key at the root together with its priority.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(vec![1, 2]);
    /// let (_, first) = treap.pop().unwrap();
    /// let (_, second) = treap.pop().unwrap();
    /// assert!(first <= second);
    /// assert!(treap.pop().is_err());
    /// ```
    pub fn pop(&mut self) -> Result<(K, f64)> {
        self.treap.pop()
    }

    /// Returns the number of keys in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.insert(1);
    /// treap.insert(1);
    /// assert_eq!(treap.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.treap.len()
    }

    /// Returns `true` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// assert!(treap.is_empty());
    /// treap.insert(1);
    /// assert!(!treap.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.treap.is_empty()
    }

    /// Clears the treap, removing all keys. The priority source keeps its state.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(0..10);
    /// treap.clear();
    /// assert_eq!(treap.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.treap.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// assert_eq!(treap.height(), 0);
    /// treap.extend(0..3);
    /// assert!(treap.height() >= 2 && treap.height() <= 3);
    /// ```
    pub fn height(&self) -> usize {
        self.treap.height()
    }

    /// Returns the height of the left subtree of the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.insert(1);
    /// assert_eq!(treap.left_height(), 0);
    /// ```
    pub fn left_height(&self) -> usize {
        self.treap.left_height()
    }

    /// Returns the height of the right subtree of the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(0..2);
    /// assert_eq!(treap.left_height() + treap.right_height(), 1);
    /// ```
    pub fn right_height(&self) -> usize {
        self.treap.right_height()
    }

    /// Returns the absolute difference between the heights of the two subtrees of the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(0..2);
    /// assert_eq!(treap.height_diff(), 1);
    /// ```
    pub fn height_diff(&self) -> usize {
        self.treap.height_diff()
    }

    /// Returns `true` if the heights of the two subtrees of the root differ by at most one.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let mut treap = RandomizedTreap::new();
    /// treap.extend(0..2);
    /// assert!(treap.balanced());
    /// ```
    pub fn balanced(&self) -> bool {
        self.treap.balanced()
    }

    /// Returns the wrapped treap.
    pub fn as_treap(&self) -> &Treap<K> {
        &self.treap
    }

    /// Returns an iterator over the keys in ascending order, or descending order when reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::randomized::RandomizedTreap;
    ///
    /// let treap = vec![3, 1, 2].into_iter().collect::<RandomizedTreap<u32>>();
    /// assert_eq!(treap.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert_eq!(treap.iter().rev().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn iter(&self) -> RandomizedTreapIter<'_, K> {
        RandomizedTreapIter {
            treap_iter: self.treap.iter(),
        }
    }
}

impl<'a, K, R> IntoIterator for &'a RandomizedTreap<K, R>
where
    K: 'a,
    R: RandomSource,
{
    type Item = &'a K;
    type IntoIter = RandomizedTreapIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `RandomizedTreap<K, R>`.
///
/// This iterator traverses the keys of the treap in-order.
pub struct RandomizedTreapIter<'a, K> {
    treap_iter: TreapIter<'a, K>,
}

impl<'a, K> Iterator for RandomizedTreapIter<'a, K>
where
    K: 'a,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.treap_iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.treap_iter.size_hint()
    }
}

impl<'a, K> DoubleEndedIterator for RandomizedTreapIter<'a, K>
where
    K: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.treap_iter.next_back().map(|pair| pair.0)
    }
}

impl<'a, K> ExactSizeIterator for RandomizedTreapIter<'a, K> where K: 'a {}

impl<K, R> Default for RandomizedTreap<K, R>
where
    R: RandomSource + Default,
{
    fn default() -> Self {
        Self::with_source(R::default())
    }
}

impl<K, R> Extend<K> for RandomizedTreap<K, R>
where
    K: Ord,
    R: RandomSource,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, R> FromIterator<K> for RandomizedTreap<K, R>
where
    K: Ord,
    R: RandomSource + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut treap = Self::default();
        treap.extend(iter);
        treap
    }
}

impl<K, R> fmt::Display for RandomizedTreap<K, R>
where
    R: RandomSource,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RandomizedTreap(len={}, height={})", self.len(), self.height())
    }
}

impl<K, R> fmt::Debug for RandomizedTreap<K, R>
where
    K: fmt::Debug,
    R: RandomSource,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RandomizedTreap;
    use crate::error::Error;
    use crate::randomized::source::RandomSource;
    use std::collections::VecDeque;

    // replays a fixed list of priorities
    struct Replay(VecDeque<f64>);

    impl RandomSource for Replay {
        fn next_priority(&mut self) -> f64 {
            self.0.pop_front().expect("Expected another priority.")
        }

        fn seed(&mut self, _seed: u64) {}
    }

    #[test]
    fn test_len_empty() {
        let treap: RandomizedTreap<u32> = RandomizedTreap::new();
        assert_eq!(treap.len(), 0);
        assert!(treap.is_empty());
        assert_eq!(treap.min(), Err(Error::EmptyTreap));
        assert_eq!(treap.max(), Err(Error::EmptyTreap));
    }

    #[test]
    fn test_insert_uses_source() {
        let source = Replay(vec![0.9, 0.5, 0.7, 0.2, 0.6].into_iter().collect());
        let mut treap = RandomizedTreap::with_source(source);
        treap.extend(vec![5, 3, 8, 1, 4]);

        assert_eq!(treap.top(), Ok((&1, 0.2)));
        assert_eq!(treap.find(&4).map(|node| node.priority()), Ok(0.6));
        assert_eq!(treap.iter().cloned().collect::<Vec<u32>>(), vec![1, 3, 4, 5, 8]);
        assert!(treap.as_treap().check_invariants());
    }

    #[test]
    fn test_same_seed_same_shape() {
        let mut left = RandomizedTreap::with_seed(99);
        let mut right = RandomizedTreap::new();
        right.seed(99);
        for key in 0..500u32 {
            left.insert(key);
            right.insert(key);
        }

        assert_eq!(left.top(), right.top());
        assert_eq!(left.height(), right.height());
        assert!(left
            .as_treap()
            .iter()
            .zip(right.as_treap().iter())
            .all(|(l, r)| l == r));
    }

    #[test]
    fn test_delete() {
        let mut treap = RandomizedTreap::with_seed(3);
        treap.extend(vec![2, 1, 3]);
        let priority = treap.as_treap().get_priority(&2);
        assert_eq!(treap.delete(&2).map(|pair| pair.0), Ok(2));
        assert_eq!(priority.map(|priority| priority < 1.0), Ok(true));
        assert_eq!(treap.delete(&2), Err(Error::NotFound));
        assert_eq!(treap.len(), 2);
        assert!(treap.as_treap().check_invariants());
    }

    #[test]
    fn test_update() {
        let source = Replay(vec![0.9, 0.5, 0.7, 0.2, 0.6].into_iter().collect());
        let mut treap = RandomizedTreap::with_source(source);
        treap.extend(vec![5, 3, 8, 1, 4]);

        assert_eq!(treap.update(&8, 0.1), Ok(()));
        assert_eq!(treap.top(), Ok((&8, 0.1)));
        assert!(treap.as_treap().check_invariants());

        assert_eq!(treap.update(&8, 0.95), Ok(()));
        assert_eq!(treap.top(), Ok((&1, 0.2)));
        assert!(treap.as_treap().check_invariants());

        assert_eq!(treap.update(&2, 0.0), Err(Error::NotFound));
        assert_eq!(treap.len(), 5);
        assert_eq!(treap.iter().cloned().collect::<Vec<u32>>(), vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn test_pop_drains_by_priority() {
        let mut treap = RandomizedTreap::with_seed(5);
        treap.extend(0..100u32);
        let mut last = ::std::f64::NEG_INFINITY;
        while let Ok((_, priority)) = treap.pop() {
            assert!(priority >= last);
            last = priority;
        }
        assert!(treap.is_empty());
    }

    #[test]
    fn test_sorted_input_stays_shallow() {
        let mut treap = RandomizedTreap::with_seed(11);
        treap.extend(0..4096u32);
        assert!(treap.height() <= 3 * 12);
        assert!(treap.as_treap().check_invariants());
    }

    #[test]
    fn test_display_and_debug() {
        let mut treap = RandomizedTreap::with_seed(1);
        assert_eq!(treap.to_string(), "RandomizedTreap(len=0, height=0)");
        treap.insert(7);
        assert_eq!(treap.to_string(), "RandomizedTreap(len=1, height=1)");
        treap.insert(3);
        assert_eq!(format!("{:?}", treap), "{3, 7}");
    }

    #[test]
    fn test_clear() {
        let mut treap = RandomizedTreap::with_seed(1);
        treap.extend(0..10u32);
        treap.clear();
        assert!(treap.is_empty());
        assert_eq!(treap.height(), 0);
        assert!(treap.balanced());
    }
}
