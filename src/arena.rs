//! Chunked, free-listed storage for tree nodes addressed by `Entry` handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to a value stored in a `TypedArena<T>`.
///
/// Handles are small and `Copy`, so trees stored in an arena link their nodes with
/// `Option<Entry>` instead of owning pointers. A handle stays valid until the value it refers to
/// is freed; after that the block may be handed out again by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Entry {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Entry>),
}

/// An allocator that stores a single type of object in fixed-size chunks.
///
/// Chunks are never reallocated once created, so allocating never moves existing values. Freed
/// blocks form an intrusive free list and are reused before a new chunk is created. Dropping the
/// arena drops every value still stored in it.
///
/// # Examples
///
/// ```
/// use priority_treap::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate("left");
/// let y = arena.allocate("right");
/// assert_eq!(arena[x], "left");
/// assert_eq!(arena.len(), 2);
///
/// arena[y] = "root";
/// assert_eq!(arena.free(&y), "root");
/// assert_eq!(arena.get(&y), None);
/// ```
pub struct TypedArena<T> {
    head: Option<Entry>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_entry(&self, entry: &Entry) -> bool {
        entry.chunk_index < self.chunks.len()
            && entry.block_index < self.chunks[entry.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` that holds `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Stores `value` in the arena and returns the handle used to access or free it.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0.5);
    /// assert_eq!(arena.get(&x), Some(&0.5));
    /// ```
    pub fn allocate(&mut self, value: T) -> Entry {
        if let Some(entry) = self.head.take() {
            let vacant_block = mem::replace(
                &mut self.chunks[entry.chunk_index][entry.block_index],
                Block::Occupied(value),
            );
            match vacant_block {
                Block::Vacant(next_entry) => self.head = next_entry,
                Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
            }
            self.len += 1;
            return entry;
        }

        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        let chunk_index = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk_index];
        last_chunk.push(Block::Occupied(value));
        Entry {
            chunk_index,
            block_index: last_chunk.len() - 1,
        }
    }

    /// Removes the object referred to by `entry` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `entry` refers to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(3);
    /// assert_eq!(arena.free(&x), 3);
    /// assert!(arena.is_empty());
    /// ```
    pub fn free(&mut self, entry: &Entry) -> T {
        if !self.is_valid_entry(entry) {
            panic!("Error: attempting to free invalid block.");
        }
        if let Block::Vacant(_) = self.chunks[entry.chunk_index][entry.block_index] {
            panic!("Error: attempting to free vacant block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[entry.chunk_index][entry.block_index],
            Block::Vacant(self.head.take()),
        );
        self.head = Some(*entry);
        self.len -= 1;
        match old_block {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if `entry` does not
    /// refer to a live object.
    pub fn get(&self, entry: &Entry) -> Option<&T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.chunks[entry.chunk_index][entry.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if `entry` does not refer
    /// to a live object.
    pub fn get_mut(&mut self, entry: &Entry) -> Option<&mut T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.chunks[entry.chunk_index][entry.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena and releases all chunks. Every handle previously returned
    /// by the arena is invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_treap::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(2);
    /// let x = arena.allocate(1);
    /// arena.allocate(2);
    /// arena.allocate(3);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(&x), None);
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Entry> for TypedArena<T> {
    type Output = T;

    fn index(&self, entry: Entry) -> &Self::Output {
        self.get(&entry).expect("Error: entry out of bounds.")
    }
}

impl<T> IndexMut<Entry> for TypedArena<T> {
    fn index_mut(&mut self, entry: Entry) -> &mut Self::Output {
        self.get_mut(&entry).expect("Error: entry out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, TypedArena};

    #[test]
    #[should_panic]
    fn test_new_zero_chunk_size() {
        let _arena: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(4);
        arena.free(&Entry {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_twice() {
        let mut arena = TypedArena::new(4);
        let entry = arena.allocate(0);
        arena.free(&entry);
        arena.free(&entry);
    }

    #[test]
    fn test_allocate_spills_into_new_chunk() {
        let mut arena = TypedArena::new(2);
        let handles: Vec<Entry> = (0..5).map(|i| arena.allocate(i)).collect();
        assert_eq!(
            handles[2],
            Entry {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(
            handles[4],
            Entry {
                chunk_index: 2,
                block_index: 0
            },
        );
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(arena[*handle], i);
        }
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena = TypedArena::new(4);
        let a = arena.allocate('a');
        let b = arena.allocate('b');
        arena.allocate('c');

        assert_eq!(arena.free(&a), 'a');
        assert_eq!(arena.free(&b), 'b');
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.allocate('d'), b);
        assert_eq!(arena.allocate('e'), a);
        assert_eq!(arena[a], 'e');
        assert_eq!(arena[b], 'd');
    }

    #[test]
    fn test_reuse_does_not_grow_chunks() {
        let mut arena = TypedArena::new(2);
        let a = arena.allocate(1);
        arena.allocate(2);
        arena.free(&a);
        assert_eq!(
            arena.allocate(3),
            Entry {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(arena.chunks.len(), 1);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(4);
        let entry = arena.allocate(7);
        arena.free(&entry);
        assert_eq!(arena.get(&entry), None);
        assert_eq!(arena.get_mut(&entry), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(4);
        let entry = arena.allocate(1);
        *arena.get_mut(&entry).unwrap() += 1;
        assert_eq!(arena.get(&entry), Some(&2));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        let entry = arena.allocate(1);
        arena.allocate(2);
        arena.allocate(3);
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.get(&entry), None);
        assert_eq!(
            arena.allocate(4),
            Entry {
                chunk_index: 0,
                block_index: 0
            },
        );
    }
}
