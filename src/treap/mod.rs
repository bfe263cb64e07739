//! Probabilistic binary search tree where each node also maintains the heap invariant.
//!
//! Nodes live in an [`Arena`](crate::arena::Arena) and refer to their parent and children by
//! [`Handle`](crate::arena::Handle), so a rotation only rewrites a handful of links.

mod entry;
mod map;
mod node;
mod set;
mod tree;
mod validate;

pub use self::map::{TreapMap, TreapMapIntoIter, TreapMapIter, TreapMapKeys};
pub use self::node::Node;
pub use self::set::{TreapSet, TreapSetIntoIter, TreapSetIter};

use std::error;
use std::fmt;
use std::result;

/// An invariant of a treap that does not hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// A key is not strictly between the keys bounding its position.
    KeyOrder,
    /// A child has a higher priority than its parent.
    HeapOrder,
    /// A child does not link back to its parent, or a node is reachable twice.
    BrokenLink,
    /// The root of the tree has a parent.
    RootHasParent,
    /// A link refers to a node that does not exist.
    DanglingHandle,
    /// The arena's free list is not threaded through exactly its vacant slots.
    BrokenFreeList,
    /// The number of reachable nodes differs from the number of stored nodes.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Violation::KeyOrder => write!(f, "keys are out of order"),
            Violation::HeapOrder => write!(f, "a child outranks its parent"),
            Violation::BrokenLink => write!(f, "a child does not link back to its parent"),
            Violation::RootHasParent => write!(f, "the root has a parent"),
            Violation::DanglingHandle => write!(f, "a link refers to a missing node"),
            Violation::BrokenFreeList => write!(f, "the free list of the arena is broken"),
            Violation::SizeMismatch { expected, actual } => {
                write!(f, "expected {} nodes, found {}", expected, actual)
            }
        }
    }
}

impl error::Error for Violation {}

#[derive(Debug)]
pub enum Error {
    SerdeError(bincode::Error),
    Corrupted(Violation),
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Error {
        Error::SerdeError(err)
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Error {
        Error::Corrupted(violation)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::SerdeError(error) => Some(error),
            Error::Corrupted(violation) => Some(violation),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SerdeError(error) => write!(f, "{}", error),
            Error::Corrupted(violation) => write!(f, "corrupted treap: {}", violation),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
