//! A mutable, duplicate-counting BST ordered by a [`Comparator`].
//!
//! There is no empty tree: an [`OrderedTree`] is created from its first value, and refuses to
//! remove the last one. Adding a value the comparator considers [equal][Comparator::equals] to a
//! stored one bumps that node's count instead of allocating a new node.
//!
//! Nothing is ever rebalanced, so the shape of the tree depends entirely on insertion order.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Natural, OrderedTree, Removal};
//!
//! let mut tree = OrderedTree::new(1, Natural);
//! tree.add(2);
//! tree.add(2);
//! tree.add(0);
//!
//! assert_eq!(tree.asc_list(), vec![0, 1, 2, 2]);
//! assert_eq!(tree.desc_list(), vec![2, 2, 1, 0]);
//!
//! assert_eq!(tree.remove(&2), Ok(Removal::Decremented { remaining: 1 }));
//! assert_eq!(tree.remove(&2), Ok(Removal::Unlinked));
//! assert_eq!(tree.remove(&2), Ok(Removal::NotFound));
//! assert_eq!(tree.find(&2), None);
//! ```

use std::fmt;

use log::trace;

use crate::comparator::{Comparator, Contents};
use crate::error::TreeError;
use crate::iter::{Iter, Nodes};
use crate::util::Side;

/// An owned, possibly empty, child subtree.
type Link<T, C> = Option<Box<Node<T, C>>>;

/// The outcome of a successful [`OrderedTree::remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// No stored value matched so the tree is unchanged.
    NotFound,
    /// The matching node held the value more than once and now holds it `remaining` times.
    Decremented {
        /// How many times the value is still present.
        remaining: usize,
    },
    /// The matching node held its last occurrence and has been taken out of the tree.
    Unlinked,
}

/// A vertex of an [`OrderedTree`]. Each node owns its [`Contents`] and up to two children.
pub struct Node<T, C> {
    contents: Contents<T, C>,
    left: Link<T, C>,
    right: Link<T, C>,
}

impl<T, C> Node<T, C>
where
    C: Comparator<T>,
{
    fn new(prototype: &C, value: T) -> Self {
        Self {
            contents: Contents::new(prototype, value),
            left: None,
            right: None,
        }
    }

    fn new_boxed(prototype: &C, value: T) -> Box<Self> {
        Box::new(Self::new(prototype, value))
    }

    /// Hangs `subtree` off the end of the spine that starts at this node's `direction` child.
    fn graft(&mut self, direction: Side, subtree: Link<T, C>) {
        let Some(subtree) = subtree else {
            return;
        };
        debug_assert!(
            std::iter::successors(Some(&*self), |n| n.child(direction))
                .all(|n| n.contents.admits(direction, subtree.value())),
            "grafted subtree must order {:?} of the whole spine",
            direction,
        );

        let mut slot = self.child_slot_mut(direction);
        while let Some(node) = slot {
            slot = node.child_slot_mut(direction);
        }
        *slot = Some(subtree);
    }
}

impl<T, C> Node<T, C> {
    /// The value stored at this node.
    pub fn value(&self) -> &T {
        self.contents.value()
    }

    /// How many times [`value`][Self::value] has been added. Always at least 1.
    pub fn count(&self) -> usize {
        self.contents.count()
    }

    /// The stored value together with its count and comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Natural, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new(4, Natural);
    /// tree.add(4);
    ///
    /// let contents = tree.root().contents();
    /// assert_eq!(contents.value(), &4);
    /// assert_eq!(contents.count(), 2);
    /// ```
    pub fn contents(&self) -> &Contents<T, C> {
        &self.contents
    }

    /// The subtree of values ordered before this one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The subtree of values ordered after this one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    fn child_slot_mut(&mut self, side: Side) -> &mut Link<T, C> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T, C> fmt::Debug for Node<T, C>
where
    T: fmt::Debug,
{
    // Children are summarised by their values so deep trees don't recurse.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("count", &self.count())
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

/// Copies a subtree bottom-up with an explicit stack.
fn clone_subtree<T, C>(root: Option<&Node<T, C>>) -> Link<T, C>
where
    T: Clone,
    C: Clone,
{
    enum Frame<'a, T, C> {
        /// Copy this subtree and push the copy.
        Enter(Option<&'a Node<T, C>>),
        /// Both children of this node have been copied and pushed, left first.
        Exit(&'a Node<T, C>),
    }

    let mut frames = vec![Frame::Enter(root)];
    let mut copies: Vec<Link<T, C>> = Vec::new();
    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(None) => copies.push(None),
            Frame::Enter(Some(node)) => {
                frames.push(Frame::Exit(node));
                frames.push(Frame::Enter(node.right()));
                frames.push(Frame::Enter(node.left()));
            }
            Frame::Exit(node) => {
                let right = copies.pop().flatten();
                let left = copies.pop().flatten();
                copies.push(Some(Box::new(Node {
                    contents: node.contents.clone(),
                    left,
                    right,
                })));
            }
        }
    }
    copies.pop().flatten()
}

/// Joins the children of a node being removed into a single subtree. `side` is the side of its
/// parent the removed node hung from.
///
/// The child on `side` takes the removed node's place and the other child is grafted at the far
/// end of its opposite-direction spine. Everything on that spine lies between the removed node
/// and its parent, so the grafted subtree keeps its ordering relative to all of it.
fn splice<T, C>(left: Link<T, C>, right: Link<T, C>, side: Side) -> Link<T, C>
where
    C: Comparator<T>,
{
    let (same, opposite) = match side {
        Side::Left => (left, right),
        Side::Right => (right, left),
    };
    match same {
        None => opposite,
        Some(mut same) => {
            same.graft(side.opposite(), opposite);
            Some(same)
        }
    }
}

/// A binary search tree holding values of one type `T`, ordered by the comparator `C`.
///
/// The tree is its root node plus the comparator every new node is cloned from. The root always
/// exists, although removals may overwrite what it holds.
pub struct OrderedTree<T, C> {
    root: Node<T, C>,
    prototype: C,
}

impl<T, C> OrderedTree<T, C>
where
    C: Comparator<T>,
{
    /// Creates a tree holding only `value`. `prototype` is cloned into every node.
    pub fn new(value: T, prototype: C) -> Self {
        Self {
            root: Node::new(&prototype, value),
            prototype,
        }
    }

    /// Adds `value` to the tree. If a stored value [equals][Comparator::equals] it, that value's
    /// count goes up. Otherwise a new leaf is allocated where the walk falls off the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Natural, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new("m", Natural);
    /// tree.add("c");
    /// tree.add("c");
    ///
    /// assert_eq!(tree.root().left().map(|n| n.count()), Some(2));
    /// ```
    pub fn add(&mut self, value: T) {
        let mut node = &mut self.root;
        loop {
            if node.contents.matches(&value) {
                let count = node.contents.increment();
                trace!("absorbed duplicate value, count is now {}", count);
                return;
            }

            let side = node.contents.direction_of(&value);
            let slot = node.child_slot_mut(side);
            match slot {
                Some(child) => node = &mut **child,
                None => {
                    *slot = Some(Node::new_boxed(&self.prototype, value));
                    trace!("allocated new {:?} leaf", side);
                    return;
                }
            }
        }
    }

    /// Returns the stored value equal to `value`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Natural, OrderedTree};
    ///
    /// let tree = OrderedTree::new(1, Natural);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_node(value).map(Node::value)
    }

    /// Whether a value equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// How many times a value equal to `value` is stored, which is 0 if it isn't.
    pub fn count_of(&self, value: &T) -> usize {
        self.find_node(value).map_or(0, Node::count)
    }

    fn find_node(&self, value: &T) -> Option<&Node<T, C>> {
        let mut node = &self.root;
        loop {
            if node.contents.matches(value) {
                return Some(node);
            }
            node = node.child(node.contents.direction_of(value))?;
        }
    }

    /// Removes one occurrence of `value`.
    ///
    /// A value stored more than once is only decremented. A value stored once has its node taken
    /// out and the node's children are re-linked around it. Removing a value that isn't stored
    /// is not an error and leaves the tree untouched.
    ///
    /// # Errors
    ///
    /// [`TreeError::CannotRemoveLast`] if `value` is the only value left in the tree. The tree is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Natural, OrderedTree, Removal, TreeError};
    ///
    /// let mut tree = OrderedTree::new(2, Natural);
    /// tree.add(1);
    /// tree.add(3);
    ///
    /// // Removing the root promotes its right child.
    /// assert_eq!(tree.remove(&2), Ok(Removal::Unlinked));
    /// assert_eq!(tree.root().value(), &3);
    /// assert_eq!(tree.asc_list(), vec![1, 3]);
    ///
    /// assert_eq!(tree.remove(&1), Ok(Removal::Unlinked));
    /// assert_eq!(tree.remove(&3), Err(TreeError::CannotRemoveLast));
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<Removal, TreeError> {
        if self.root.contents.matches(value) {
            return self.remove_root();
        }

        let mut side = self.root.contents.direction_of(value);
        let mut slot = self.root.child_slot_mut(side);
        loop {
            let next = match slot.as_deref() {
                None => return Ok(Removal::NotFound),
                Some(node) if node.contents.matches(value) => break,
                Some(node) => node.contents.direction_of(value),
            };
            slot = match slot {
                Some(node) => node.child_slot_mut(next),
                None => return Ok(Removal::NotFound),
            };
            side = next;
        }

        Ok(Self::unlink(slot, side))
    }

    fn remove_root(&mut self) -> Result<Removal, TreeError> {
        let root = &mut self.root;
        if root.count() > 1 {
            let remaining = root.contents.decrement();
            trace!("decremented root, {} remaining", remaining);
            return Ok(Removal::Decremented { remaining });
        }
        if root.is_leaf() {
            return Err(TreeError::CannotRemoveLast);
        }

        // The root has no parent, so treat it as a right child: its right child is promoted and
        // its left subtree hangs off the promoted node's left spine.
        let left = root.left.take();
        let right = root.right.take();
        let Some(replacement) = splice(left, right, Side::Right) else {
            unreachable!("splicing a root with children yields a subtree");
        };
        *root = *replacement;
        trace!("replaced root with a promoted child");
        Ok(Removal::Unlinked)
    }

    /// Removes one occurrence of the value stored in the node at `slot`, which hangs from the
    /// `side` of its parent.
    fn unlink(slot: &mut Link<T, C>, side: Side) -> Removal {
        match slot {
            Some(target) if target.count() > 1 => {
                let remaining = target.contents.decrement();
                trace!("decremented node, {} remaining", remaining);
                return Removal::Decremented { remaining };
            }
            _ => {}
        }

        let Some(target) = slot.take() else {
            return Removal::NotFound;
        };
        let Node { left, right, .. } = *target;
        *slot = splice(left, right, side);
        trace!("unlinked node from the {:?} of its parent", side);
        Removal::Unlinked
    }
}

impl<T, C> OrderedTree<T, C> {
    /// The root node, for inspecting the shape of the tree.
    pub fn root(&self) -> &Node<T, C> {
        &self.root
    }

    /// Lazily walks every stored value from first to last, repeating each value as many times as
    /// it was added.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(&self.root, Side::Left)
    }

    /// Like [`iter`][Self::iter] but from last to first.
    pub fn iter_desc(&self) -> Iter<'_, T, C> {
        Iter::new(&self.root, Side::Right)
    }

    /// Every stored value in ascending order, duplicates included.
    pub fn asc_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Every stored value in descending order, duplicates included.
    pub fn desc_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter_desc().cloned().collect()
    }

    /// The total number of stored values, counting duplicates. Never 0.
    pub fn len(&self) -> usize {
        Nodes::new(&self.root).map(Node::count).sum()
    }

    /// An `OrderedTree` always holds at least one value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The number of distinct nodes.
    pub fn node_count(&self) -> usize {
        Nodes::new(&self.root).count()
    }

    /// The number of nodes on the longest root-to-leaf path. A lone root has height 1.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        deepest
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> Clone for OrderedTree<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: Node {
                contents: self.root.contents.clone(),
                left: clone_subtree(self.root.left()),
                right: clone_subtree(self.root.right()),
            },
            prototype: self.prototype.clone(),
        }
    }
}

impl<T, C> fmt::Debug for OrderedTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C> Drop for OrderedTree<T, C> {
    // Unbalanced trees can be as deep as they are long, so don't recurse.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T, C>>> = Vec::new();
        stack.extend(self.root.left.take());
        stack.extend(self.root.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
