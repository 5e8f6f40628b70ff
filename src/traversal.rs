//! Iterative traversal and shape utilities for any binary tree.
//!
//! The utilities only need read-only access to a node's children, described by `BinaryNode`.
//! Every traversal keeps its own explicit stack or queue, so degenerate (linear) trees of any
//! depth can be walked without exhausting the call stack.

use std::cmp;
use std::collections::VecDeque;
use std::vec::Vec;

/// Read-only access to the children of a node in a binary tree.
///
/// Implementors are typically lightweight handles (references or arena indices paired with a
/// reference to their arena), hence the `Copy` bound.
pub trait BinaryNode: Copy {
    /// Returns the left child of this node.
    fn left(&self) -> Option<Self>;

    /// Returns the right child of this node.
    fn right(&self) -> Option<Self>;
}

/// The order in which the two children of a node are visited.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Left child before right child.
    Forward,
    /// Right child before left child, mirroring the traversal.
    Reverse,
}

impl Direction {
    fn first<N: BinaryNode>(self, node: &N) -> Option<N> {
        match self {
            Direction::Forward => node.left(),
            Direction::Reverse => node.right(),
        }
    }

    fn second<N: BinaryNode>(self, node: &N) -> Option<N> {
        match self {
            Direction::Forward => node.right(),
            Direction::Reverse => node.left(),
        }
    }
}

/// Returns the number of nodes on the longest path from `root` down to a leaf. An empty tree has
/// height 0 and a single node has height 1.
pub fn height<N: BinaryNode>(root: Option<N>) -> usize {
    let mut max_depth = 0;
    let mut stack = Vec::new();
    if let Some(node) = root {
        stack.push((node, 1));
    }
    while let Some((node, depth)) = stack.pop() {
        max_depth = cmp::max(max_depth, depth);
        if let Some(left) = node.left() {
            stack.push((left, depth + 1));
        }
        if let Some(right) = node.right() {
            stack.push((right, depth + 1));
        }
    }
    max_depth
}

/// Returns the number of nodes reachable from `root`.
pub fn count<N: BinaryNode>(root: Option<N>) -> usize {
    PreOrder::new(root, Direction::Forward).count()
}

/// Returns the node reached by following left children from `root` as far as possible.
pub fn leftmost<N: BinaryNode>(root: N) -> N {
    let mut curr = root;
    while let Some(left) = curr.left() {
        curr = left;
    }
    curr
}

/// Returns the node reached by following right children from `root` as far as possible.
pub fn rightmost<N: BinaryNode>(root: N) -> N {
    let mut curr = root;
    while let Some(right) = curr.right() {
        curr = right;
    }
    curr
}

/// An iterator that yields nodes in in-order (left, node, right), or in reverse in-order when
/// constructed with `Direction::Reverse`.
pub struct InOrder<N> {
    current: Option<N>,
    stack: Vec<N>,
    direction: Direction,
}

impl<N: BinaryNode> InOrder<N> {
    pub fn new(root: Option<N>, direction: Direction) -> Self {
        InOrder {
            current: root,
            stack: Vec::new(),
            direction,
        }
    }
}

impl<N: BinaryNode> Iterator for InOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.direction.first(&node);
        }
        self.stack.pop().map(|node| {
            self.current = self.direction.second(&node);
            node
        })
    }
}

/// An iterator that yields nodes in pre-order (node, left, right).
pub struct PreOrder<N> {
    stack: Vec<N>,
    direction: Direction,
}

impl<N: BinaryNode> PreOrder<N> {
    pub fn new(root: Option<N>, direction: Direction) -> Self {
        PreOrder {
            stack: root.into_iter().collect(),
            direction,
        }
    }
}

impl<N: BinaryNode> Iterator for PreOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|node| {
            if let Some(second) = self.direction.second(&node) {
                self.stack.push(second);
            }
            if let Some(first) = self.direction.first(&node) {
                self.stack.push(first);
            }
            node
        })
    }
}

/// An iterator that yields nodes in post-order (left, right, node).
pub struct PostOrder<N> {
    // the flag marks nodes whose children have already been pushed
    stack: Vec<(N, bool)>,
    direction: Direction,
}

impl<N: BinaryNode> PostOrder<N> {
    pub fn new(root: Option<N>, direction: Direction) -> Self {
        PostOrder {
            stack: root.into_iter().map(|node| (node, false)).collect(),
            direction,
        }
    }
}

impl<N: BinaryNode> Iterator for PostOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            if let Some(second) = self.direction.second(&node) {
                self.stack.push((second, false));
            }
            if let Some(first) = self.direction.first(&node) {
                self.stack.push((first, false));
            }
        }
        None
    }
}

/// An iterator that yields nodes level by level, starting at the root.
pub struct LevelOrder<N> {
    queue: VecDeque<N>,
    direction: Direction,
}

impl<N: BinaryNode> LevelOrder<N> {
    pub fn new(root: Option<N>, direction: Direction) -> Self {
        LevelOrder {
            queue: root.into_iter().collect(),
            direction,
        }
    }
}

impl<N: BinaryNode> Iterator for LevelOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            if let Some(first) = self.direction.first(&node) {
                self.queue.push_back(first);
            }
            if let Some(second) = self.direction.second(&node) {
                self.queue.push_back(second);
            }
            node
        })
    }
}
