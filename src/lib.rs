//! A randomized binary search tree (treap) whose nodes live in an arena and link to their parents.
//!
//! # Examples
//!
//! ```
//! use treap_collections::TreapSet;
//!
//! let mut set = TreapSet::new();
//! for key in &[5, 3, 8, 1] {
//!     set.add(*key);
//! }
//!
//! assert_eq!(set.size(), 4);
//! assert!(set.contains(&3));
//! assert!(set.is_bst(set.root()) && set.is_heap(set.root()));
//! assert_eq!(set.in_order(set.root()).cloned().collect::<Vec<i32>>(), vec![1, 3, 5, 8]);
//! ```

pub mod arena;
pub mod priority;
pub mod treap;

pub use crate::treap::{TreapMap, TreapSet};
