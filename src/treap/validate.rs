use crate::arena::Handle;
use crate::treap::tree::Tree;
use crate::treap::Violation;

impl<T, U> Tree<T, U> {
    /// Checks that every child in the subtree rooted at `node` links back to its parent, and
    /// returns the number of nodes in the subtree.
    pub fn check_links(&self, node: Option<Handle>) -> Result<usize, Violation> {
        let mut count = 0;
        let mut stack: Vec<Handle> = node.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = self.arena.get(handle).ok_or(Violation::DanglingHandle)?;
            count += 1;
            if count > self.arena.len() {
                return Err(Violation::BrokenLink);
            }
            for child in node.left.iter().chain(node.right.iter()) {
                let child_node = self.arena.get(*child).ok_or(Violation::DanglingHandle)?;
                if child_node.parent != Some(handle) {
                    return Err(Violation::BrokenLink);
                }
                stack.push(*child);
            }
        }
        Ok(count)
    }

    /// Checks that no node in the subtree rooted at `node` has a lower priority than one of its
    /// children.
    pub fn check_heap(&self, node: Option<Handle>) -> Result<(), Violation> {
        let mut visited = 0;
        let mut stack: Vec<Handle> = node.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = self.arena.get(handle).ok_or(Violation::DanglingHandle)?;
            visited += 1;
            if visited > self.arena.len() {
                return Err(Violation::BrokenLink);
            }
            for child in node.left.iter().chain(node.right.iter()) {
                let child_node = self.arena.get(*child).ok_or(Violation::DanglingHandle)?;
                if child_node.priority > node.priority {
                    return Err(Violation::HeapOrder);
                }
                stack.push(*child);
            }
        }
        Ok(())
    }

    /// Returns `true` if the subtree rooted at `node` is a max-heap on priority. An empty subtree
    /// is a heap.
    pub fn is_heap(&self, node: Option<Handle>) -> bool {
        self.check_heap(node).is_ok()
    }
}

impl<T: Ord, U> Tree<T, U> {
    /// Checks that every key in the subtree rooted at `node` lies strictly between the bounds
    /// imposed by all of its ancestors within the subtree.
    pub fn check_bst(&self, node: Option<Handle>) -> Result<(), Violation> {
        let mut stack: Vec<(Handle, Option<&T>, Option<&T>)> =
            node.into_iter().map(|handle| (handle, None, None)).collect();
        while let Some((handle, lower, upper)) = stack.pop() {
            let node = self.arena.get(handle).ok_or(Violation::DanglingHandle)?;
            let key = node.key();
            if lower.map_or(false, |lower| key <= lower) {
                return Err(Violation::KeyOrder);
            }
            if upper.map_or(false, |upper| key >= upper) {
                return Err(Violation::KeyOrder);
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some(key)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(key), upper));
            }
        }
        Ok(())
    }

    /// Returns `true` if the subtree rooted at `node` is a binary search tree on key. An empty
    /// subtree is a binary search tree.
    pub fn is_bst(&self, node: Option<Handle>) -> bool {
        self.check_bst(node).is_ok()
    }

    /// Checks every invariant of the whole tree and returns its node count.
    pub fn check(&self) -> Result<usize, Violation> {
        if !self.arena.is_consistent() {
            return Err(Violation::BrokenFreeList);
        }
        if let Some(root) = self.root {
            let root_node = self.arena.get(root).ok_or(Violation::DanglingHandle)?;
            if root_node.parent.is_some() {
                return Err(Violation::RootHasParent);
            }
        }
        let count = self.check_links(self.root)?;
        if count != self.arena.len() {
            return Err(Violation::SizeMismatch {
                expected: self.arena.len(),
                actual: count,
            });
        }
        self.check_bst(self.root)?;
        self.check_heap(self.root)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Handle;
    use crate::treap::node::Node;
    use crate::treap::tree::Tree;
    use crate::treap::Violation;

    // Builds a tree from `(key, priority, parent)` triples. The first triple is the root and each
    // later node is attached to the left of its parent if its key is smaller, otherwise to the
    // right, without any ordering or heap checks.
    fn build(nodes: &[(u32, u32, Option<usize>)]) -> Tree<u32, ()> {
        let mut tree = Tree::new();
        let mut handles = Vec::new();
        for &(key, priority, parent) in nodes {
            let parent = parent.map(|index| handles[index]);
            let handle = tree.arena.allocate(Node::new(key, (), priority, parent));
            match parent {
                None => tree.root = Some(handle),
                Some(parent) => {
                    let parent_node: &mut Node<u32, ()> = &mut tree.arena[parent];
                    if key < parent_node.entry.key {
                        parent_node.left = Some(handle);
                    } else {
                        parent_node.right = Some(handle);
                    }
                }
            }
            handles.push(handle);
        }
        tree
    }

    #[test]
    fn test_empty_subtree() {
        let tree: Tree<u32, ()> = Tree::new();
        assert!(tree.is_bst(None));
        assert!(tree.is_heap(None));
        assert_eq!(tree.in_order(None).count(), 0);
        assert_eq!(tree.check(), Ok(0));
    }

    #[test]
    fn test_valid_tree() {
        let tree = build(&[(10, 9, None), (5, 8, Some(0)), (15, 7, Some(0)), (7, 1, Some(1))]);
        assert!(tree.is_bst(tree.root()));
        assert!(tree.is_heap(tree.root()));
        assert_eq!(tree.check(), Ok(4));
    }

    #[test]
    fn test_grandchild_out_of_order() {
        // 12 is greater than its parent 5 but sits in the left subtree of 10.
        let mut tree = build(&[(10, 9, None), (5, 8, Some(0))]);
        let five = tree.node(tree.root().unwrap()).unwrap().left().unwrap();
        let twelve = tree.arena.allocate(Node::new(12, (), 1, Some(five)));
        tree.arena[five].right = Some(twelve);

        assert!(!tree.is_bst(tree.root()));
        assert_eq!(tree.check_bst(tree.root()), Err(Violation::KeyOrder));
        assert!(tree.is_bst(Some(five)));
    }

    #[test]
    fn test_duplicate_key_is_not_bst() {
        let mut tree = build(&[(10, 9, None)]);
        let root = tree.root().unwrap();
        let duplicate = tree.arena.allocate(Node::new(10, (), 1, Some(root)));
        tree.arena[root].right = Some(duplicate);
        assert!(!tree.is_bst(tree.root()));
    }

    #[test]
    fn test_heap_violation() {
        let tree = build(&[(10, 9, None), (5, 8, Some(0)), (7, 12, Some(1))]);
        assert!(tree.is_bst(tree.root()));
        assert!(!tree.is_heap(tree.root()));
        assert_eq!(tree.check(), Err(Violation::HeapOrder));

        let root = tree.node(tree.root().unwrap()).unwrap();
        let five = tree.node(root.left().unwrap()).unwrap();
        let seven = five.right();
        assert!(tree.is_heap(seven));
    }

    #[test]
    fn test_equal_priorities_are_a_heap() {
        let tree = build(&[(10, 3, None), (5, 3, Some(0)), (15, 3, Some(0))]);
        assert!(tree.is_heap(tree.root()));
    }

    #[test]
    fn test_broken_parent_link() {
        let mut tree = build(&[(10, 9, None), (5, 8, Some(0))]);
        let five = tree.node(tree.root().unwrap()).unwrap().left().unwrap();
        tree.arena[five].parent = None;
        assert_eq!(tree.check_links(tree.root()), Err(Violation::BrokenLink));
        assert_eq!(tree.check(), Err(Violation::BrokenLink));
    }

    #[test]
    fn test_root_with_parent() {
        let mut tree = build(&[(10, 9, None), (5, 8, Some(0))]);
        let root = tree.root().unwrap();
        let five = tree.node(root).unwrap().left().unwrap();
        tree.arena[root].parent = Some(five);
        assert_eq!(tree.check(), Err(Violation::RootHasParent));
    }

    #[test]
    fn test_unreachable_node() {
        let mut tree = build(&[(10, 9, None)]);
        tree.arena.allocate(Node::new(3, (), 1, None));
        assert_eq!(
            tree.check(),
            Err(Violation::SizeMismatch { expected: 2, actual: 1 }),
        );
    }

    #[test]
    fn test_dangling_handle() {
        let tree = build(&[(10, 9, None)]);
        assert_eq!(tree.check_bst(Some(Handle(7))), Err(Violation::DanglingHandle));
        assert!(!tree.is_heap(Some(Handle(7))));
        assert_eq!(tree.in_order(Some(Handle(7))).count(), 0);
    }

    #[test]
    fn test_in_order_of_subtree() {
        let tree = build(&[(10, 9, None), (5, 8, Some(0)), (15, 7, Some(0)), (7, 1, Some(1))]);
        let five = tree.node(tree.root().unwrap()).unwrap().left();
        let keys: Vec<u32> = tree.in_order(five).map(|(_, node)| *node.key()).collect();
        assert_eq!(keys, vec![5, 7]);

        let all: Vec<u32> = tree.in_order(tree.root()).map(|(_, node)| *node.key()).collect();
        assert_eq!(all, vec![5, 7, 10, 15]);
    }
}
