use crate::arena::Handle;
use crate::priority::{PrioritySource, RandomPriorities};
use crate::treap::map::{TreapMap, TreapMapIntoIter, TreapMapIter, TreapMapKeys};
use crate::treap::node::Node;
use crate::treap::{Result, Violation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::iter::FromIterator;
use std::result;

/// An ordered set implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occurring in its right subtree. The priority of a node is
/// greater than or equal to the priority of both of its children. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// # Examples
/// ```
/// use treap_collections::TreapSet;
///
/// let mut t = TreapSet::new();
/// t.add(0);
/// t.add(3);
///
/// assert_eq!(t.size(), 2);
/// assert!(t.is_bst(t.root()));
/// assert!(t.is_heap(t.root()));
///
/// assert_eq!(t.min(), Some(&0));
/// assert_eq!(t.ceil(&2), Some(&3));
///
/// assert_eq!(t.remove(&0), Some(0));
/// assert_eq!(t.remove(&1), None);
/// ```
pub struct TreapSet<T, P = RandomPriorities> {
    map: TreapMap<T, (), P>,
}

impl<T: Ord> TreapSet<T> {
    /// Constructs a new, empty `TreapSet<T>`
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapSet;
    ///
    /// let t: TreapSet<u32> = TreapSet::new();
    /// ```
    pub fn new() -> Self {
        TreapSet {
            map: TreapMap::new(),
        }
    }
}

impl<T: Ord, P: PrioritySource> TreapSet<T, P> {
    /// Constructs a new, empty `TreapSet<T, P>` that draws node priorities from `priorities`.
    pub fn with_priorities(priorities: P) -> Self {
        TreapSet {
            map: TreapMap::with_priorities(priorities),
        }
    }

    /// Adds a key to the treap. If an equal key already exists in the treap, it is replaced in
    /// place and returned; the shape of the tree does not change.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.add(1), None);
    /// assert_eq!(t.contains(&1), true);
    /// assert_eq!(t.add(1), Some(1));
    /// assert_eq!(t.size(), 1);
    /// ```
    pub fn add(&mut self, key: T) -> Option<T> {
        self.map.insert(key, ()).map(|pair| pair.0)
    }

    /// Removes a key from the treap. If the key exists in the treap, it will return
    /// the associated key. Otherwise it will return `None`.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.contains(&1), false);
    /// t.add(1);
    /// assert_eq!(t.contains(&0), false);
    /// assert_eq!(t.contains(&1), true);
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.map.contains(key)
    }

    /// Returns a key in the treap that is greater than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.map.ceil(key)
    }

    /// Returns a key in the treap that is less than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    pub fn floor(&self, key: &T) -> Option<&T> {
        self.map.floor(key)
    }

    /// Returns the minimum key of the treap. Returns `None` if the treap is empty.
    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    /// Returns the maximum key of the treap. Returns `None` if the treap is empty.
    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Returns `true` if the subtree rooted at `node` is a binary search tree. `None` is an empty
    /// subtree.
    pub fn is_bst(&self, node: Option<Handle>) -> bool {
        self.map.is_bst(node)
    }

    /// Returns `true` if the subtree rooted at `node` is a max-heap on priority. `None` is an
    /// empty subtree.
    pub fn is_heap(&self, node: Option<Handle>) -> bool {
        self.map.is_heap(node)
    }

    /// Verifies the links, size, key order, and priority order of the whole treap.
    pub fn check_invariants(&self) -> result::Result<(), Violation> {
        self.map.check_invariants()
    }
}

impl<T, P> TreapSet<T, P> {
    /// Returns the size of the treap.
    pub fn size(&self) -> usize {
        self.map.size()
    }

    /// Returns `true` if the treap contains no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the handle of the root node, or `None` if the treap is empty.
    pub fn root(&self) -> Option<Handle> {
        self.map.root()
    }

    /// Returns the node a handle refers to, or `None` if the handle does not refer to a node of
    /// this treap.
    pub fn node(&self, handle: Handle) -> Option<&Node<T, ()>> {
        self.map.node(handle)
    }

    /// Returns an iterator over the keys of the subtree rooted at `node` in ascending order. Each
    /// call starts a fresh traversal.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.add(3);
    /// t.add(1);
    /// t.add(2);
    /// assert_eq!(t.in_order(t.root()).collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn in_order(&self, node: Option<Handle>) -> TreapMapKeys<T, ()> {
        self.map.in_order(node)
    }

    /// Returns an iterator over the treap. The iterator will yield keys using in-order traversal.
    pub fn iter(&self) -> TreapSetIter<T> {
        TreapSetIter {
            map_iter: self.map.iter(),
        }
    }
}

impl<T, P> TreapSet<T, P>
where
    T: Ord + Serialize,
    P: PrioritySource,
{
    /// Encodes the treap, including every priority and link, with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.map.to_bytes()
    }
}

impl<T, P> TreapSet<T, P>
where
    T: Ord + DeserializeOwned,
    P: PrioritySource,
{
    /// Decodes a treap produced by `to_bytes`, rejecting it unless every invariant holds.
    pub fn from_bytes(bytes: &[u8], priorities: P) -> Result<Self> {
        Ok(TreapSet {
            map: TreapMap::from_bytes(bytes, priorities)?,
        })
    }
}

impl<T: Ord> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, P: PrioritySource> Extend<T> for TreapSet<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<T: Ord> FromIterator<T> for TreapSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreapSet::new();
        set.extend(iter);
        set
    }
}

impl<T, P> IntoIterator for TreapSet<T, P> {
    type Item = T;
    type IntoIter = TreapSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        TreapSetIntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T: 'a, P> IntoIterator for &'a TreapSet<T, P> {
    type Item = &'a T;
    type IntoIter = TreapSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapSet<T, P>`
///
/// This iterator yields the keys of a treap in ascending order.
pub struct TreapSetIntoIter<T> {
    map_iter: TreapMapIntoIter<T, ()>,
}

impl<T> Iterator for TreapSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `TreapSet<T, P>`
///
/// This iterator traverses the elements of a treap in-order and yields immutable references.
pub struct TreapSetIter<'a, T: 'a> {
    map_iter: TreapMapIter<'a, T, ()>,
}

impl<'a, T: 'a> Iterator for TreapSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}
