//! Structural primitives of a parent-linked treap stored in a `TypedArena`.
//!
//! Every function works on arena handles and keeps the parent back-references consistent with
//! the child links. Functions that can move a node into the root position take the root slot of
//! the tree so it can be updated in place.

use crate::arena::{Entry, TypedArena};
use crate::error::{Error, Result};
use crate::treap::node::{precedes, Node};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;

pub type Arena<K> = TypedArena<Node<K>>;

// Points the slot that held `old` (a child of `parent`, or the root) at `new`.
fn replace_child<K>(
    arena: &mut Arena<K>,
    root: &mut Option<Entry>,
    parent: Option<Entry>,
    old: Entry,
    new: Entry,
) {
    arena[new].parent = parent;
    match parent {
        None => *root = Some(new),
        Some(parent) => {
            if arena[parent].left == Some(old) {
                arena[parent].left = Some(new);
            } else {
                arena[parent].right = Some(new);
            }
        },
    }
}

/// Rotates `node` above its parent, where `node` is the left child of its parent. The right
/// subtree of `node` becomes the left subtree of the old parent.
pub fn rotate_right<K>(arena: &mut Arena<K>, root: &mut Option<Entry>, node: Entry) -> Result<()> {
    let parent = arena[node].parent.ok_or(Error::InvalidRotation)?;
    if arena[parent].left != Some(node) {
        return Err(Error::InvalidRotation);
    }
    trace!("rotate right {:?} over {:?}", node, parent);

    let grandparent = arena[parent].parent;
    let moved = arena[node].right;
    arena[parent].left = moved;
    if let Some(moved) = moved {
        arena[moved].parent = Some(parent);
    }
    replace_child(arena, root, grandparent, parent, node);
    arena[node].right = Some(parent);
    arena[parent].parent = Some(node);
    Ok(())
}

/// Rotates `node` above its parent, where `node` is the right child of its parent. The left
/// subtree of `node` becomes the right subtree of the old parent.
pub fn rotate_left<K>(arena: &mut Arena<K>, root: &mut Option<Entry>, node: Entry) -> Result<()> {
    let parent = arena[node].parent.ok_or(Error::InvalidRotation)?;
    if arena[parent].right != Some(node) {
        return Err(Error::InvalidRotation);
    }
    trace!("rotate left {:?} over {:?}", node, parent);

    let grandparent = arena[parent].parent;
    let moved = arena[node].left;
    arena[parent].right = moved;
    if let Some(moved) = moved {
        arena[moved].parent = Some(parent);
    }
    replace_child(arena, root, grandparent, parent, node);
    arena[node].left = Some(parent);
    arena[parent].parent = Some(node);
    Ok(())
}

// Rotates `node` above its parent on whichever side it hangs.
fn rotate_up<K>(arena: &mut Arena<K>, root: &mut Option<Entry>, node: Entry) -> Result<()> {
    let parent = arena[node].parent.ok_or(Error::InvalidRotation)?;
    if arena[parent].left == Some(node) {
        rotate_right(arena, root, node)
    } else {
        rotate_left(arena, root, node)
    }
}

// The child with the smaller priority; the left child wins ties.
fn preferred_child<K>(arena: &Arena<K>, node: Entry) -> Option<Entry> {
    match (arena[node].left, arena[node].right) {
        (Some(left), Some(right)) => {
            if precedes(arena[right].priority, arena[left].priority) {
                Some(right)
            } else {
                Some(left)
            }
        },
        (Some(left), None) => Some(left),
        (None, Some(right)) => Some(right),
        (None, None) => None,
    }
}

/// Attaches the detached `node` below `tree` in binary search tree order. Keys smaller than a
/// node's key go left, greater or equal keys go right. Heap order is not restored.
pub fn insert_bst<K>(arena: &mut Arena<K>, tree: Entry, node: Entry)
where
    K: Ord,
{
    let mut curr = tree;
    loop {
        let go_left = arena[node].key < arena[curr].key;
        let next = if go_left {
            arena[curr].left
        } else {
            arena[curr].right
        };
        match next {
            Some(child) => curr = child,
            None => {
                if go_left {
                    arena[curr].left = Some(node);
                } else {
                    arena[curr].right = Some(node);
                }
                arena[node].parent = Some(curr);
                return;
            },
        }
    }
}

/// Returns the first node on the search path from `tree` whose key equals `key`.
pub fn find<K, V>(arena: &Arena<K>, tree: Option<Entry>, key: &V) -> Option<Entry>
where
    K: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(entry) = curr {
        let node = &arena[entry];
        curr = match key.cmp(node.key.borrow()) {
            Ordering::Less => node.left,
            Ordering::Greater => node.right,
            Ordering::Equal => return Some(entry),
        };
    }
    None
}

/// Moves `node` up while its priority is strictly smaller than its parent's.
pub fn sift_up<K>(arena: &mut Arena<K>, root: &mut Option<Entry>, node: Entry) -> Result<()> {
    while let Some(parent) = arena[node].parent {
        if !precedes(arena[node].priority, arena[parent].priority) {
            break;
        }
        rotate_up(arena, root, node)?;
    }
    trace!("sift up {:?} stopped below {:?}", node, arena[node].parent);
    Ok(())
}

/// Moves `node` down while one of its children has a strictly smaller priority, always promoting
/// the child with the smaller priority.
pub fn sift_down<K>(arena: &mut Arena<K>, root: &mut Option<Entry>, node: Entry) -> Result<()> {
    while let Some(child) = preferred_child(arena, node) {
        if !precedes(arena[child].priority, arena[node].priority) {
            break;
        }
        rotate_up(arena, root, child)?;
    }
    trace!("sift down {:?} stopped below {:?}", node, arena[node].parent);
    Ok(())
}

/// Moves `node` down until it is a leaf, regardless of priorities.
///
/// Heap order along the demotion path is broken until `node` is detached, so this must only be
/// called right before `detach`.
pub fn sift_down_to_leaf<K>(
    arena: &mut Arena<K>,
    root: &mut Option<Entry>,
    node: Entry,
) -> Result<()> {
    while let Some(child) = preferred_child(arena, node) {
        rotate_up(arena, root, child)?;
    }
    Ok(())
}

/// Unlinks the leaf `node` from its parent, or empties the tree if it is the root, and frees it.
///
/// # Panics
///
/// Panics if `node` still has children.
pub fn detach<K>(arena: &mut Arena<K>, root: &mut Option<Entry>, node: Entry) -> Node<K> {
    assert!(arena[node].is_leaf(), "Error: attempting to detach an inner node.");
    trace!("detach {:?} from {:?}", node, arena[node].parent);
    match arena[node].parent {
        None => *root = None,
        Some(parent) => {
            if arena[parent].left == Some(node) {
                arena[parent].left = None;
            } else {
                arena[parent].right = None;
            }
        },
    }
    arena.free(&node)
}
