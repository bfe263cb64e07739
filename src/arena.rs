//! Slot allocator that hands out stable handles.

use serde_derive::{Deserialize, Serialize};
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable reference to an object allocated in an `Arena<T>`.
///
/// A handle stays valid until the object it refers to is freed. Afterwards the slot may be reused
/// by a later allocation, so a handle must not outlive the object it was created for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// Returns the slot index of the handle.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object backed by one `Vec`.
///
/// Freed slots are threaded onto a free list and reused by later allocations, so handles never
/// move while their object is alive. All objects are dropped together with the arena.
///
/// # Examples
///
/// ```
/// use treap_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Arena<T> {
    pub(crate) head: Option<Handle>,
    slots: Vec<Slot<T>>,
    pub(crate) len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle. Vacant slots are reused before
    /// the arena grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle(self.slots.len() - 1)
            }
            Some(handle) => {
                let vacant_slot = mem::replace(&mut self.slots[handle.0], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next) => {
                        self.head = next;
                        handle
                    }
                    Slot::Occupied(_) => panic!("Error: free list points at an occupied slot."),
                }
            }
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.contains(handle) {
            panic!("Error: attempting to free an invalid or vacant slot.");
        }
        let old_slot = mem::replace(&mut self.slots[handle.0], Slot::Vacant(self.head.take()));
        self.head = Some(handle);
        self.len -= 1;
        match old_slot {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns `true` if the handle refers to a live object.
    pub fn contains(&self, handle: Handle) -> bool {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(_)) => true,
            _ => false,
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// *arena.get_mut(x).unwrap() = 3;
    /// assert_eq!(arena[x], 3);
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the free list threads through every vacant slot exactly once and the live
    /// count matches the occupied slots. An arena that fails this check must not allocate.
    pub fn is_consistent(&self) -> bool {
        let vacant = self
            .slots
            .iter()
            .filter(|slot| match slot {
                Slot::Vacant(_) => true,
                Slot::Occupied(_) => false,
            })
            .count();
        if self.len + vacant != self.slots.len() {
            return false;
        }

        // A list that revisits a slot never ends, so more than `vacant` steps means a cycle.
        let mut visited = 0;
        let mut curr = self.head;
        while let Some(handle) = curr {
            if visited == vacant {
                return false;
            }
            match self.slots.get(handle.0) {
                Some(Slot::Vacant(next)) => curr = *next,
                _ => return false,
            }
            visited += 1;
        }
        visited == vacant
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle does not refer to a live object.")
    }
}
