//! Non-recursive traversals of an [`OrderedTree`][crate::OrderedTree].

use std::iter::FusedIterator;

use crate::tree::Node;
use crate::util::Side;

/// An in-order walk over the values of a tree, yielding each value once per time it was added.
///
/// Created by [`OrderedTree::iter`][crate::OrderedTree::iter] (ascending) and
/// [`OrderedTree::iter_desc`][crate::OrderedTree::iter_desc] (descending).
///
/// # Examples
///
/// ```
/// use ordered_tree::{Natural, OrderedTree};
///
/// let mut tree = OrderedTree::new(3, Natural);
/// tree.add(1);
/// tree.add(3);
///
/// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&1, &3, &3]);
/// assert_eq!(tree.iter_desc().collect::<Vec<_>>(), vec![&3, &3, &1]);
/// ```
#[derive(Debug)]
pub struct Iter<'a, T, C> {
    /// Nodes whose own value and trailing subtree haven't been visited yet.
    stack: Vec<&'a Node<T, C>>,
    /// The side visited first: `Left` for ascending, `Right` for descending.
    lead: Side,
    /// The value just yielded and how many more copies of it are owed.
    repeat: Option<(&'a T, usize)>,
}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            lead: self.lead,
            repeat: self.repeat,
        }
    }
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(root: &'a Node<T, C>, lead: Side) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            lead,
            repeat: None,
        };
        iter.descend(Some(root));
        iter
    }

    /// Pushes `node` and its whole `lead` spine.
    fn descend(&mut self, mut node: Option<&'a Node<T, C>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.child(self.lead);
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((value, owed)) = &mut self.repeat {
            if *owed > 0 {
                *owed -= 1;
                return Some(*value);
            }
        }

        let node = self.stack.pop()?;
        self.descend(node.child(self.lead.opposite()));
        self.repeat = Some((node.value(), node.count() - 1));
        Some(node.value())
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

/// A pre-order walk over the nodes of a subtree.
pub(crate) struct Nodes<'a, T, C> {
    stack: Vec<&'a Node<T, C>>,
}

impl<'a, T, C> Nodes<'a, T, C> {
    pub(crate) fn new(root: &'a Node<T, C>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, T, C> Iterator for Nodes<'a, T, C> {
    type Item = &'a Node<T, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Natural, OrderedTree, Reversed};

    #[test]
    fn repeats_counts_in_place() {
        let mut tree = OrderedTree::new(2, Natural);
        for v in [1, 3, 1, 2, 2, 3] {
            tree.add(v);
        }

        let asc: Vec<_> = tree.iter().copied().collect();
        assert_eq!(asc, vec![1, 1, 2, 2, 2, 3, 3]);

        let desc: Vec<_> = tree.iter_desc().copied().collect();
        assert_eq!(desc, vec![3, 3, 2, 2, 2, 1, 1]);
    }

    #[test]
    fn follows_comparator_not_ord() {
        let mut tree = OrderedTree::new(5, Reversed(Natural));
        for v in [1, 9, 3, 7] {
            tree.add(v);
        }

        assert_eq!(tree.asc_list(), vec![9, 7, 5, 3, 1]);
        assert_eq!(tree.desc_list(), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn fused() {
        let tree = OrderedTree::new('a', Natural);
        let mut iter = tree.iter();

        assert_eq!(iter.next(), Some(&'a'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn into_iterator() {
        let mut tree = OrderedTree::new(2, Natural);
        tree.add(1);

        let mut seen = Vec::new();
        for v in &tree {
            seen.push(*v);
        }
        assert_eq!(seen, vec![1, 2]);
    }
}
