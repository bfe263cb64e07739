use crate::arena::Handle;
use crate::priority::{PrioritySource, RandomPriorities};
use crate::treap::node::Node;
use crate::treap::tree::{InOrder, Tree};
use crate::treap::{Error, Result, Violation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::iter::FromIterator;
use std::result;
use std::vec;

/// An ordered map implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occurring in its right subtree. The priority of a node is
/// greater than or equal to the priority of both of its children. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// Every node also links back to its parent, so a newly inserted leaf is rotated upward in place
/// until its parent outranks it.
///
/// # Examples
/// ```
/// use treap_collections::TreapMap;
///
/// let mut t = TreapMap::new();
/// t.insert(0, 1);
/// t.insert(3, 4);
///
/// assert_eq!(t.get(&0), Some(&1));
/// assert_eq!(t.get(&1), None);
/// assert_eq!(t.size(), 2);
///
/// assert_eq!(t.min(), Some(&0));
/// assert_eq!(t.ceil(&2), Some(&3));
///
/// *t.get_mut(&0).unwrap() = 2;
/// assert_eq!(t.remove(&0), Some((0, 2)));
/// assert_eq!(t.remove(&1), None);
/// ```
pub struct TreapMap<T, U, P = RandomPriorities> {
    tree: Tree<T, U>,
    priorities: P,
    size: usize,
}

impl<T: Ord, U> TreapMap<T, U> {
    /// Constructs a new, empty `TreapMap<T, U>` whose priorities are drawn from a randomly seeded
    /// generator.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let t: TreapMap<u32, u32> = TreapMap::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_priorities(RandomPriorities::new())
    }

    /// Constructs a new, empty `TreapMap<T, U>` with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        TreapMap {
            tree: Tree::with_capacity(capacity),
            priorities: RandomPriorities::new(),
            size: 0,
        }
    }
}

impl<T: Ord, U, P: PrioritySource> TreapMap<T, U, P> {
    /// Constructs a new, empty `TreapMap<T, U, P>` that draws node priorities from `priorities`.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::priority::RandomPriorities;
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::with_priorities(RandomPriorities::from_seed([1, 2, 3, 4]));
    /// t.insert(1, 1);
    /// assert_eq!(t.get(&1), Some(&1));
    /// ```
    pub fn with_priorities(priorities: P) -> Self {
        TreapMap {
            tree: Tree::new(),
            priorities,
            size: 0,
        }
    }

    /// Inserts a key-value pair into the treap. If the key already exists in the treap, it will
    /// return and replace the old key-value pair without changing the shape of the tree.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// assert_eq!(t.insert(1, 1), None);
    /// assert_eq!(t.get(&1), Some(&1));
    /// assert_eq!(t.insert(1, 2), Some((1, 1)));
    /// assert_eq!(t.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)> {
        let TreapMap {
            tree,
            priorities,
            size,
        } = self;
        match tree.insert(key, value, priorities) {
            Some(entry) => Some(entry.into_pair()),
            None => {
                *size += 1;
                None
            }
        }
    }

    /// Removes a key-value pair from the treap. If the key exists in the treap, it will return
    /// the associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.remove(&1), Some((1, 1)));
    /// assert_eq!(t.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<(T, U)> {
        let TreapMap { tree, size, .. } = self;
        tree.remove(key).map(|entry| {
            *size -= 1;
            entry.into_pair()
        })
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.contains(&0), false);
    /// assert_eq!(t.contains(&1), true);
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.tree.find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the treap.
    pub fn get(&self, key: &T) -> Option<&U> {
        self.tree.get(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// *t.get_mut(&1).unwrap() = 2;
    /// assert_eq!(t.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        self.tree.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns a key in the treap that is greater than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.ceil(&0), Some(&1));
    /// assert_eq!(t.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    /// Returns a key in the treap that is less than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.floor(&0), None);
    /// assert_eq!(t.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the treap. Returns `None` if the treap is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the treap. Returns `None` if the treap is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns `true` if the subtree rooted at `node` is a binary search tree on key. Every key
    /// is checked against all of its ancestors, not only its parent. `None` is an empty subtree.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// assert!(t.is_bst(t.root()));
    /// t.insert(2, 'b');
    /// t.insert(1, 'a');
    /// assert!(t.is_bst(t.root()));
    /// ```
    pub fn is_bst(&self, node: Option<Handle>) -> bool {
        self.tree.is_bst(node)
    }

    /// Returns `true` if no node in the subtree rooted at `node` has a lower priority than one of
    /// its children. `None` is an empty subtree.
    pub fn is_heap(&self, node: Option<Handle>) -> bool {
        self.tree.is_heap(node)
    }

    /// Verifies the links, size, key order, and priority order of the whole treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let t: TreapMap<_, _> = (0..100).map(|key| (key, key * 2)).collect();
    /// assert!(t.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> result::Result<(), Violation> {
        let count = self.tree.check()?;
        if count != self.size {
            return Err(Violation::SizeMismatch {
                expected: self.size,
                actual: count,
            });
        }
        Ok(())
    }
}

impl<T, U, P> TreapMap<T, U, P> {
    /// Returns the size of the treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// assert_eq!(t.size(), 1);
    /// ```
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the treap contains no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.tree.height(self.tree.root())
    }

    /// Returns the handle of the root node, or `None` if the treap is empty.
    pub fn root(&self) -> Option<Handle> {
        self.tree.root()
    }

    /// Returns the node a handle refers to, or `None` if the handle does not refer to a node of
    /// this treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 'a');
    ///
    /// let root = t.node(t.root().unwrap()).unwrap();
    /// assert_eq!(root.key(), &1);
    /// assert_eq!(root.value(), &'a');
    /// assert!(root.is_root() && root.is_leaf());
    /// ```
    pub fn node(&self, handle: Handle) -> Option<&Node<T, U>> {
        self.tree.node(handle)
    }

    /// Returns an iterator over the keys of the subtree rooted at `node` in ascending order. Each
    /// call starts a fresh traversal.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(3, ());
    /// t.insert(1, ());
    /// t.insert(2, ());
    /// assert_eq!(t.in_order(t.root()).collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert_eq!(t.in_order(None).next(), None);
    /// ```
    pub fn in_order(&self, node: Option<Handle>) -> TreapMapKeys<T, U> {
        TreapMapKeys {
            inner: self.tree.in_order(node),
        }
    }

    /// Returns an iterator over the treap. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::TreapMap;
    ///
    /// let mut t = TreapMap::new();
    /// t.insert(1, 1);
    /// t.insert(3, 3);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapMapIter<T, U> {
        TreapMapIter {
            inner: self.tree.in_order(self.tree.root()),
        }
    }
}

impl<T, U, P> TreapMap<T, U, P>
where
    T: Ord + Serialize,
    U: Serialize,
    P: PrioritySource,
{
    /// Encodes the treap, including every priority and link, with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&(&self.tree, self.size))?)
    }
}

impl<T, U, P> TreapMap<T, U, P>
where
    T: Ord + DeserializeOwned,
    U: DeserializeOwned,
    P: PrioritySource,
{
    /// Decodes a treap produced by `to_bytes`. Nodes inserted afterwards draw their priorities from
    /// `priorities`. The decoded tree is rejected unless every invariant holds.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::priority::RandomPriorities;
    /// use treap_collections::TreapMap;
    ///
    /// let mut t: TreapMap<u32, String> = TreapMap::new();
    /// t.insert(1, String::from("a"));
    /// let bytes = t.to_bytes().unwrap();
    ///
    /// let u: TreapMap<u32, String> =
    ///     TreapMap::from_bytes(&bytes, RandomPriorities::new()).unwrap();
    /// assert_eq!(u.get(&1).map(String::as_str), Some("a"));
    /// ```
    pub fn from_bytes(bytes: &[u8], priorities: P) -> Result<Self> {
        let (tree, size): (Tree<T, U>, usize) = bincode::deserialize(bytes)?;
        let map = TreapMap {
            tree,
            priorities,
            size,
        };
        map.check_invariants().map_err(Error::Corrupted)?;
        Ok(map)
    }
}

impl<T: Ord, U> Default for TreapMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, U, P: PrioritySource> Extend<(T, U)> for TreapMap<T, U, P> {
    fn extend<I: IntoIterator<Item = (T, U)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T: Ord, U> FromIterator<(T, U)> for TreapMap<T, U> {
    fn from_iter<I: IntoIterator<Item = (T, U)>>(iter: I) -> Self {
        let mut map = TreapMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U, P> IntoIterator for TreapMap<T, U, P> {
    type Item = (T, U);
    type IntoIter = TreapMapIntoIter<T, U>;

    fn into_iter(self) -> Self::IntoIter {
        let TreapMap { mut tree, .. } = self;
        let handles: Vec<Handle> = tree.in_order(tree.root()).map(|(handle, _)| handle).collect();
        let entries: Vec<(T, U)> = handles
            .into_iter()
            .map(|handle| tree.arena.free(handle).entry.into_pair())
            .collect();
        TreapMapIntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, T: 'a, U: 'a, P> IntoIterator for &'a TreapMap<T, U, P> {
    type Item = (&'a T, &'a U);
    type IntoIter = TreapMapIter<'a, T, U>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapMap<T, U, P>`
///
/// This iterator yields the entries of a treap in ascending key order.
pub struct TreapMapIntoIter<T, U> {
    inner: vec::IntoIter<(T, U)>,
}

impl<T, U> Iterator for TreapMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator for `TreapMap<T, U, P>`
///
/// This iterator traverses the elements of a treap in-order and yields immutable references.
pub struct TreapMapIter<'a, T: 'a, U: 'a> {
    inner: InOrder<'a, T, U>,
}

impl<'a, T: 'a, U: 'a> Iterator for TreapMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, node)| (node.key(), node.value()))
    }
}

/// An iterator over the keys of a subtree of a `TreapMap<T, U, P>` in ascending order.
pub struct TreapMapKeys<'a, T: 'a, U: 'a> {
    inner: InOrder<'a, T, U>,
}

impl<'a, T: 'a, U: 'a> Iterator for TreapMapKeys<'a, T, U> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, node)| node.key())
    }
}

#[cfg(test)]
mod tests {
    use super::TreapMap;
    use crate::arena::Handle;
    use crate::priority::{RandomPriorities, ScriptedPriorities};
    use crate::treap::node::Node;
    use crate::treap::tree::Tree;
    use crate::treap::{Error, Violation};

    #[test]
    fn test_size_empty() {
        let tree: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(tree.size(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_min_max_empty() {
        let tree: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut tree = TreapMap::new();
        tree.insert(1, 1);
        assert!(tree.contains(&1));
        assert!(!tree.contains(&2));
        assert_eq!(tree.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = TreapMap::new();
        let ret_1 = tree.insert(1, 1);
        let ret_2 = tree.insert(1, 3);
        assert_eq!(tree.get(&1), Some(&3));
        assert_eq!(ret_1, None);
        assert_eq!(ret_2, Some((1, 1)));
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn test_insert_replace_keeps_node() {
        let mut tree = TreapMap::with_priorities(ScriptedPriorities::new(vec![5, 9, 1]));
        tree.insert(2, 'a');
        tree.insert(1, 'b');
        tree.insert(3, 'c');

        let root = tree.root();
        assert_eq!(tree.in_order(root).count(), 3);

        let before: Vec<(Option<Handle>, Option<Handle>, Option<Handle>, u32)> = [1, 2, 3]
            .iter()
            .map(|key| {
                let node = find_node(&tree, *key);
                (node.parent(), node.left(), node.right(), node.priority())
            })
            .collect();

        // The scripted source is exhausted, so a replacement must not draw a priority.
        assert_eq!(tree.insert(1, 'z'), Some((1, 'b')));

        let after: Vec<(Option<Handle>, Option<Handle>, Option<Handle>, u32)> = [1, 2, 3]
            .iter()
            .map(|key| {
                let node = find_node(&tree, *key);
                (node.parent(), node.left(), node.right(), node.priority())
            })
            .collect();
        assert_eq!(before, after);
        assert_eq!(tree.root(), root);
        assert_eq!(tree.get(&1), Some(&'z'));
    }

    fn find_node<'a, P>(tree: &'a TreapMap<u32, char, P>, key: u32) -> &'a Node<u32, char> {
        let mut curr = tree.root();
        while let Some(handle) = curr {
            let node = tree.node(handle).unwrap();
            if *node.key() == key {
                return node;
            }
            curr = if key < *node.key() { node.left() } else { node.right() };
        }
        panic!("key {} not found", key);
    }

    #[test]
    fn test_remove() {
        let mut tree = TreapMap::new();
        tree.insert(1, 1);
        let ret = tree.remove(&1);
        assert!(!tree.contains(&1));
        assert_eq!(ret, Some((1, 1)));
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.remove(&1), None);
    }

    #[test]
    fn test_min_max() {
        let mut tree = TreapMap::new();
        tree.insert(1, 1);
        tree.insert(3, 3);
        tree.insert(5, 5);

        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut tree = TreapMap::new();
        tree.insert(1, 1);
        {
            let value = tree.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(tree.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut tree = TreapMap::new();
        tree.insert(1, 1);
        tree.insert(3, 3);
        tree.insert(5, 5);

        assert_eq!(tree.floor(&0), None);
        assert_eq!(tree.floor(&2), Some(&1));
        assert_eq!(tree.floor(&4), Some(&3));
        assert_eq!(tree.floor(&6), Some(&5));

        assert_eq!(tree.ceil(&0), Some(&1));
        assert_eq!(tree.ceil(&2), Some(&3));
        assert_eq!(tree.ceil(&4), Some(&5));
        assert_eq!(tree.ceil(&6), None);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = TreapMap::new();
        tree.insert(1, 2);
        tree.insert(5, 6);
        tree.insert(3, 4);

        assert_eq!(
            tree.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut tree = TreapMap::new();
        tree.insert(1, 2);
        tree.insert(5, 6);
        tree.insert(3, 4);

        assert_eq!(
            tree.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_in_order_of_subtree() {
        let mut tree = TreapMap::with_priorities(ScriptedPriorities::new(vec![9, 5, 7, 1]));
        tree.insert(5, ());
        tree.insert(3, ());
        tree.insert(8, ());
        tree.insert(4, ());

        let left = tree.node(tree.root().unwrap()).unwrap().left();
        assert_eq!(tree.in_order(left).collect::<Vec<&u32>>(), vec![&3, &4]);
        assert!(tree.is_bst(left));
        assert!(tree.is_heap(left));
    }

    #[test]
    fn test_from_iter_and_extend() {
        let mut tree: TreapMap<u32, u32> = vec![(2, 2), (1, 1)].into_iter().collect();
        tree.extend(vec![(3, 3), (1, 4)]);
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.get(&1), Some(&4));
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut tree = TreapMap::with_priorities(RandomPriorities::from_seed([1, 2, 3, 4]));
        for key in 0..50u32 {
            tree.insert(key, key * 10);
        }
        tree.remove(&7);

        let bytes = tree.to_bytes().unwrap();
        let mut copy: TreapMap<u32, u32> =
            TreapMap::from_bytes(&bytes, RandomPriorities::new()).unwrap();

        assert_eq!(copy.size(), 49);
        assert_eq!(copy.root(), tree.root());
        assert_eq!(copy.iter().collect::<Vec<_>>(), tree.iter().collect::<Vec<_>>());
        copy.insert(7, 70);
        assert!(copy.check_invariants().is_ok());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let ret: Result<TreapMap<u32, u32>, Error> =
            TreapMap::from_bytes(&[1, 2, 3], RandomPriorities::new());
        match ret {
            Err(Error::SerdeError(_)) => {}
            _ => panic!("expected a serde error"),
        }
    }

    #[test]
    fn test_from_bytes_rejects_corrupted_tree() {
        let mut tree: Tree<u32, u32> = Tree::new();
        let root = tree.arena.allocate(Node::new(10, 0, 5, None));
        let child = tree.arena.allocate(Node::new(20, 0, 1, Some(root)));
        tree.arena[root].left = Some(child);
        tree.root = Some(root);

        let bytes = bincode::serialize(&(&tree, 2usize)).unwrap();
        let ret: Result<TreapMap<u32, u32>, Error> =
            TreapMap::from_bytes(&bytes, RandomPriorities::new());
        match ret {
            Err(Error::Corrupted(violation)) => assert_eq!(violation, Violation::KeyOrder),
            _ => panic!("expected a corrupted treap"),
        }
    }

    #[test]
    fn test_from_bytes_rejects_broken_free_list() {
        let mut tree = TreapMap::with_priorities(ScriptedPriorities::new(vec![5, 3]));
        tree.insert(10, 100);
        tree.insert(20, 200);
        tree.remove(&20);
        let (valid, size): (Tree<u32, u32>, usize) =
            bincode::deserialize(&tree.to_bytes().unwrap()).unwrap();
        assert_eq!(size, 1);

        for head in vec![None, Some(tree.root().unwrap()), Some(Handle(99))] {
            let mut copy: Tree<u32, u32> =
                bincode::deserialize(&bincode::serialize(&valid).unwrap()).unwrap();
            copy.arena.head = head;
            let bytes = bincode::serialize(&(&copy, size)).unwrap();
            let ret: Result<TreapMap<u32, u32>, Error> =
                TreapMap::from_bytes(&bytes, RandomPriorities::new());
            match ret {
                Err(Error::Corrupted(violation)) => {
                    assert_eq!(violation, Violation::BrokenFreeList)
                }
                _ => panic!("expected a corrupted treap"),
            }
        }

        let mut copy = valid;
        copy.arena.len = 2;
        let bytes = bincode::serialize(&(&copy, 2usize)).unwrap();
        let ret: Result<TreapMap<u32, u32>, Error> =
            TreapMap::from_bytes(&bytes, RandomPriorities::new());
        match ret {
            Err(Error::Corrupted(violation)) => assert_eq!(violation, Violation::BrokenFreeList),
            _ => panic!("expected a corrupted treap"),
        }
    }

    #[test]
    fn test_check_invariants_size_mismatch() {
        let mut tree = TreapMap::new();
        tree.insert(1, 1);
        tree.size = 2;
        assert_eq!(
            tree.check_invariants(),
            Err(Violation::SizeMismatch { expected: 2, actual: 1 }),
        );
    }
}
