use crate::arena::Handle;
use crate::treap::entry::Entry;
use serde_derive::{Deserialize, Serialize};

/// A node of a treap.
///
/// The key and priority of a node are fixed when it is created. Rotations only rewrite the
/// `parent`, `left` and `right` links, which are handles into the arena owning the tree.
#[derive(Serialize, Deserialize, Debug)]
pub struct Node<T, U> {
    pub(crate) entry: Entry<T, U>,
    pub(crate) priority: u32,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<T, U> Node<T, U> {
    pub(crate) fn new(key: T, value: U, priority: u32, parent: Option<Handle>) -> Self {
        Node {
            entry: Entry { key, value },
            priority,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &T {
        &self.entry.key
    }

    pub fn value(&self) -> &U {
        &self.entry.value
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub fn left(&self) -> Option<Handle> {
        self.left
    }

    pub fn right(&self) -> Option<Handle> {
        self.right
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns `true` if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn child(&self, handle: Handle) -> Option<Side> {
        if self.left == Some(handle) {
            Some(Side::Left)
        } else if self.right == Some(handle) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}
