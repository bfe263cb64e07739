//! Sources of node priorities.

use rand::{Rng, SeedableRng, XorShiftRng};

/// A supplier of node priorities.
///
/// A treap draws exactly one priority for every node it creates and never regenerates it. The
/// expected logarithmic depth of the tree relies on the drawn priorities being independent and
/// uniformly distributed.
pub trait PrioritySource {
    /// Returns the priority for the next created node.
    fn next_priority(&mut self) -> u32;
}

/// Random priorities drawn from a `rand::Rng`. This is the default source of every treap.
///
/// # Examples
///
/// ```
/// use treap_collections::priority::{PrioritySource, RandomPriorities};
///
/// let mut a = RandomPriorities::from_seed([1, 2, 3, 4]);
/// let mut b = RandomPriorities::from_seed([1, 2, 3, 4]);
/// assert_eq!(a.next_priority(), b.next_priority());
/// ```
pub struct RandomPriorities<R = XorShiftRng> {
    rng: R,
}

impl RandomPriorities<XorShiftRng> {
    /// Constructs a source backed by a `XorShiftRng` seeded from the operating system.
    pub fn new() -> Self {
        RandomPriorities {
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a reproducible source backed by a `XorShiftRng` with a fixed seed.
    ///
    /// # Panics
    ///
    /// Panics if the seed is all zeroes.
    pub fn from_seed(seed: [u32; 4]) -> Self {
        RandomPriorities {
            rng: XorShiftRng::from_seed(seed),
        }
    }
}

impl<R: Rng> RandomPriorities<R> {
    /// Constructs a source backed by an arbitrary random number generator.
    pub fn with_rng(rng: R) -> Self {
        RandomPriorities { rng }
    }
}

impl<R: Rng> PrioritySource for RandomPriorities<R> {
    fn next_priority(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl Default for RandomPriorities<XorShiftRng> {
    fn default() -> Self {
        Self::new()
    }
}

/// Priorities replayed from a fixed sequence, for reproducing exact tree shapes.
///
/// # Panics
///
/// Drawing more priorities than the sequence holds panics.
///
/// # Examples
///
/// ```
/// use treap_collections::priority::ScriptedPriorities;
/// use treap_collections::TreapSet;
///
/// let mut set = TreapSet::with_priorities(ScriptedPriorities::new(vec![1, 2, 3]));
/// set.add(5);
/// set.add(3);
/// set.add(8);
///
/// let root = set.root().unwrap();
/// assert_eq!(set.node(root).map(|node| *node.key()), Some(8));
/// ```
pub struct ScriptedPriorities<I> {
    priorities: I,
}

impl<I: Iterator<Item = u32>> ScriptedPriorities<I> {
    pub fn new<J>(priorities: J) -> Self
    where
        J: IntoIterator<Item = u32, IntoIter = I>,
    {
        ScriptedPriorities {
            priorities: priorities.into_iter(),
        }
    }
}

impl<I: Iterator<Item = u32>> PrioritySource for ScriptedPriorities<I> {
    fn next_priority(&mut self) -> u32 {
        self.priorities
            .next()
            .expect("Error: scripted priority sequence is exhausted.")
    }
}

#[cfg(test)]
mod tests {
    use super::{PrioritySource, RandomPriorities, ScriptedPriorities};
    use rand::{SeedableRng, XorShiftRng};

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RandomPriorities::from_seed([1, 1, 1, 1]);
        let mut b = RandomPriorities::with_rng(XorShiftRng::from_seed([1, 1, 1, 1]));
        for _ in 0..100 {
            assert_eq!(a.next_priority(), b.next_priority());
        }
    }

    #[test]
    fn test_random_priorities_vary() {
        let mut source = RandomPriorities::new();
        let mut priorities: Vec<u32> = (0..64).map(|_| source.next_priority()).collect();
        priorities.sort();
        priorities.dedup();
        assert!(priorities.len() > 1);
    }

    #[test]
    fn test_scripted_priorities() {
        let mut source = ScriptedPriorities::new(1..4);
        assert_eq!(source.next_priority(), 1);
        assert_eq!(source.next_priority(), 2);
        assert_eq!(source.next_priority(), 3);
    }

    #[test]
    #[should_panic]
    fn test_scripted_priorities_exhausted() {
        let mut source = ScriptedPriorities::new(vec![7]);
        source.next_priority();
        source.next_priority();
    }
}
