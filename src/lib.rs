#![forbid(unsafe_code)]

// the tree itself
pub mod rbtree;

// ambient stuff
pub mod error;
pub mod logging;

pub use error::{LoggingError, RBTreeError};
pub use rbtree::{Color, InvariantViolation, Key, NodeId, RBTree};
