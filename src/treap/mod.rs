//! Binary search tree over keys that also maintains a min-heap over node priorities.

mod node;
mod search_tree;
mod tree;

pub use self::node::NodeRef;
pub use self::search_tree::{Treap, TreapIntoIter, TreapIter};
