//! A treap that keeps binary search tree order over keys and min-heap order over priorities,
//! maintained with parent-linked rotations over arena-allocated nodes.
//!
//! - `treap::Treap` is the core structure with caller-supplied priorities.
//! - `randomized::RandomizedTreap` draws priorities from a seedable random source.
//! - `traversal` holds iterative traversal and height utilities for any `BinaryNode`.

pub mod arena;
pub mod error;
pub mod randomized;
pub mod traversal;
pub mod treap;
