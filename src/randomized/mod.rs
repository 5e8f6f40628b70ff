//! Treap whose priorities are drawn uniformly at random, giving an expected logarithmic height
//! without any explicit rebalancing.

mod source;
mod treap;

pub use self::source::{RandomSource, XorShiftSource};
pub use self::treap::{RandomizedTreap, RandomizedTreapIter};
