use crate::arena::{Arena, Handle};
use crate::priority::PrioritySource;
use crate::treap::entry::Entry;
use crate::treap::node::{Node, Side};
use log::{debug, trace};
use serde_derive::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::mem;

/// The linked structure of a treap: an arena owning every node and the handle of the root.
#[derive(Serialize, Deserialize, Debug)]
pub struct Tree<T, U> {
    pub(crate) arena: Arena<Node<T, U>>,
    pub(crate) root: Option<Handle>,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn node(&self, handle: Handle) -> Option<&Node<T, U>> {
        self.arena.get(handle)
    }

    /// Returns the number of nodes on the longest path from `node` down to a leaf.
    pub fn height(&self, node: Option<Handle>) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Handle, usize)> = node.into_iter().map(|handle| (handle, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            if let Some(node) = self.arena.get(handle) {
                height = height.max(depth);
                stack.extend(node.left.map(|left| (left, depth + 1)));
                stack.extend(node.right.map(|right| (right, depth + 1)));
            }
        }
        height
    }

    /// Returns an iterator over the subtree rooted at `node` in in-order.
    pub fn in_order(&self, node: Option<Handle>) -> InOrder<T, U> {
        InOrder {
            arena: &self.arena,
            current: node,
            stack: Vec::new(),
        }
    }

    /// Points the link that leads to `old` at `new` instead. A missing `parent` means `old` is the
    /// root of the whole tree.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = &mut self.arena[parent];
                let side = parent_node
                    .child(old)
                    .expect("Error: parent does not link back to its child.");
                parent_node.set_child(side, new);
            }
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Lifts the left child of `pivot` into the position of `pivot`. The former right subtree of
    /// the child becomes the left subtree of `pivot`, and `pivot` becomes the right child.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` has no left child.
    pub(crate) fn rotate_right(&mut self, pivot: Handle) {
        let child = self.arena[pivot]
            .left
            .expect("Error: right rotation requires a left child.");
        trace!("rotating {:?} above {:?}", child, pivot);
        let middle = self.arena[child].right;
        let parent = self.arena[pivot].parent;

        self.replace_child(parent, pivot, Some(child));

        self.arena[child].right = Some(pivot);
        self.arena[pivot].parent = Some(child);

        self.arena[pivot].left = middle;
        if let Some(middle) = middle {
            self.arena[middle].parent = Some(pivot);
        }
    }

    /// Lifts the right child of `pivot` into the position of `pivot`. The former left subtree of
    /// the child becomes the right subtree of `pivot`, and `pivot` becomes the left child.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` has no right child.
    pub(crate) fn rotate_left(&mut self, pivot: Handle) {
        let child = self.arena[pivot]
            .right
            .expect("Error: left rotation requires a right child.");
        trace!("rotating {:?} above {:?}", child, pivot);
        let middle = self.arena[child].left;
        let parent = self.arena[pivot].parent;

        self.replace_child(parent, pivot, Some(child));

        self.arena[child].left = Some(pivot);
        self.arena[pivot].parent = Some(child);

        self.arena[pivot].right = middle;
        if let Some(middle) = middle {
            self.arena[middle].parent = Some(pivot);
        }
    }

    // Equal priorities never rotate.
    fn sift_up(&mut self, handle: Handle) {
        while let Some(parent) = self.arena[handle].parent {
            if self.arena[handle].priority <= self.arena[parent].priority {
                break;
            }
            match self.arena[parent].child(handle) {
                Some(Side::Left) => self.rotate_right(parent),
                Some(Side::Right) => self.rotate_left(parent),
                None => panic!("Error: parent does not link back to its child."),
            }
        }
    }

    /// Rotates `handle` below its higher priority child until it is a leaf, then unlinks and frees
    /// it.
    fn sift_down_and_detach(&mut self, handle: Handle) -> Entry<T, U> {
        loop {
            let (left, right) = {
                let node = &self.arena[handle];
                (node.left, node.right)
            };
            match (left, right) {
                (Some(left), Some(right)) => {
                    if self.arena[left].priority > self.arena[right].priority {
                        self.rotate_right(handle);
                    } else {
                        self.rotate_left(handle);
                    }
                }
                (Some(_), None) => self.rotate_right(handle),
                (None, Some(_)) => self.rotate_left(handle),
                (None, None) => break,
            }
        }
        let parent = self.arena[handle].parent;
        self.replace_child(parent, handle, None);
        debug!("freeing node {:?}", handle);
        self.arena.free(handle).entry
    }
}

impl<T: Ord, U> Tree<T, U> {
    pub fn find(&self, key: &T) -> Option<Handle> {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts a key-value pair, drawing a priority from `priorities` only if a node is created.
    /// If the key already exists, its entry is replaced in place and the old entry is returned.
    pub fn insert<P>(&mut self, key: T, value: U, priorities: &mut P) -> Option<Entry<T, U>>
    where
        P: PrioritySource + ?Sized,
    {
        let mut curr = match self.root {
            Some(root) => root,
            None => {
                let priority = priorities.next_priority();
                let handle = self.arena.allocate(Node::new(key, value, priority, None));
                debug!("created root {:?} with priority {}", handle, priority);
                self.root = Some(handle);
                return None;
            }
        };

        loop {
            let side = match key.cmp(self.arena[curr].key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    let entry = &mut self.arena[curr].entry;
                    return Some(mem::replace(entry, Entry { key, value }));
                }
            };
            let next = match side {
                Side::Left => self.arena[curr].left,
                Side::Right => self.arena[curr].right,
            };
            match next {
                Some(child) => curr = child,
                None => {
                    let priority = priorities.next_priority();
                    let handle = self.arena.allocate(Node::new(key, value, priority, Some(curr)));
                    debug!("created node {:?} with priority {}", handle, priority);
                    self.arena[curr].set_child(side, Some(handle));
                    self.sift_up(handle);
                    return None;
                }
            }
        }
    }

    pub fn remove(&mut self, key: &T) -> Option<Entry<T, U>> {
        self.find(key).map(|handle| self.sift_down_and_detach(handle))
    }

    pub fn get(&self, key: &T) -> Option<&Entry<T, U>> {
        self.find(key).map(|handle| &self.arena[handle].entry)
    }

    pub fn get_mut(&mut self, key: &T) -> Option<&mut Entry<T, U>> {
        match self.find(key) {
            Some(handle) => Some(&mut self.arena[handle].entry),
            None => None,
        }
    }

    pub fn ceil(&self, key: &T) -> Option<&Entry<T, U>> {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key()) {
                Ordering::Greater => node.right,
                Ordering::Less => {
                    ret = Some(&node.entry);
                    node.left
                }
                Ordering::Equal => return Some(&node.entry),
            };
        }
        ret
    }

    pub fn floor(&self, key: &T) -> Option<&Entry<T, U>> {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    ret = Some(&node.entry);
                    node.right
                }
                Ordering::Equal => return Some(&node.entry),
            };
        }
        ret
    }

    pub fn min(&self) -> Option<&Entry<T, U>> {
        self.root.map(|root| {
            let mut curr = &self.arena[root];
            while let Some(left) = curr.left {
                curr = &self.arena[left];
            }
            &curr.entry
        })
    }

    pub fn max(&self) -> Option<&Entry<T, U>> {
        self.root.map(|root| {
            let mut curr = &self.arena[root];
            while let Some(right) = curr.right {
                curr = &self.arena[right];
            }
            &curr.entry
        })
    }
}

/// An in-order iterator over a subtree of a treap.
///
/// The traversal keeps an explicit stack, so it does not recurse no matter how deep the tree is.
pub struct InOrder<'a, T: 'a, U: 'a> {
    arena: &'a Arena<Node<T, U>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T: 'a, U: 'a> Iterator for InOrder<'a, T, U> {
    type Item = (Handle, &'a Node<T, U>);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(handle) = self.current.take() {
            if let Some(node) = arena.get(handle) {
                self.stack.push(handle);
                self.current = node.left;
            }
        }
        self.stack.pop().map(|handle| {
            let node = &arena[handle];
            self.current = node.right;
            (handle, node)
        })
    }
}
