//! The ordering strategy an [`OrderedTree`][crate::OrderedTree] is built with.
//!
//! A tree never orders its values itself. Instead every node carries its own clone of a
//! [`Comparator`] which it asks two questions: "does this new value belong after mine?" and
//! "is this new value the same as mine?". Neither answer has to agree with [`Ord`] - a
//! comparator for tasks could put urgent work first, and only treat two tasks as the same when
//! their identifiers match.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Comparator, Natural, Reversed};
//!
//! assert!(Natural.compare(&1, &2));
//! assert!(!Natural.compare(&2, &1));
//!
//! assert!(Reversed(Natural).compare(&2, &1));
//! assert!(Reversed(Natural).equals(&2, &2));
//! ```

use crate::util::Side;

/// Compares values of one type for an [`OrderedTree`][crate::OrderedTree].
///
/// [`Clone`] is the "fresh instance" operation: the tree clones the comparator it was built with
/// for every node it allocates, so implementations should be cheap to clone.
///
/// Implementations must be deterministic. Together `compare` and `equals` must describe a total
/// order in which two values are only tied when `equals` says they are the same.
pub trait Comparator<T>: Clone {
    /// Returns `true` if `candidate` is ordered strictly after `stored`.
    fn compare(&self, stored: &T, candidate: &T) -> bool;

    /// Returns `true` if `candidate` is the same value as `stored` for deduplication purposes.
    fn equals(&self, stored: &T, candidate: &T) -> bool;
}

/// Orders values by their [`Ord`] implementation, smallest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    fn compare(&self, stored: &T, candidate: &T) -> bool {
        stored < candidate
    }

    fn equals(&self, stored: &T, candidate: &T) -> bool {
        stored == candidate
    }
}

/// Flips the order of another comparator while keeping its notion of equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T, C: Comparator<T>> Comparator<T> for Reversed<C> {
    fn compare(&self, stored: &T, candidate: &T) -> bool {
        !self.0.equals(stored, candidate) && !self.0.compare(stored, candidate)
    }

    fn equals(&self, stored: &T, candidate: &T) -> bool {
        self.0.equals(stored, candidate)
    }
}

/// A comparator assembled from a pair of closures.
///
/// # Examples
///
/// ```
/// use ordered_tree::{FnComparator, OrderedTree};
///
/// // Shorter strings first, ties broken alphabetically.
/// let by_len = FnComparator::new(
///     |stored: &&str, candidate: &&str| (stored.len(), stored) < (candidate.len(), candidate),
///     |stored: &&str, candidate: &&str| stored == candidate,
/// );
///
/// let mut tree = OrderedTree::new("ccc", by_len);
/// tree.add("a");
/// tree.add("bb");
///
/// assert_eq!(tree.asc_list(), vec!["a", "bb", "ccc"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnComparator<F, G> {
    compare: F,
    equals: G,
}

impl<F, G> FnComparator<F, G> {
    /// Creates a comparator where `compare(stored, candidate)` answers "is `candidate` after
    /// `stored`?" and `equals(stored, candidate)` answers "are they the same value?".
    pub fn new(compare: F, equals: G) -> Self {
        Self { compare, equals }
    }
}

impl<T, F, G> Comparator<T> for FnComparator<F, G>
where
    F: Fn(&T, &T) -> bool + Clone,
    G: Fn(&T, &T) -> bool + Clone,
{
    fn compare(&self, stored: &T, candidate: &T) -> bool {
        (self.compare)(stored, candidate)
    }

    fn equals(&self, stored: &T, candidate: &T) -> bool {
        (self.equals)(stored, candidate)
    }
}

/// What a node stores: its own comparator, the value it holds and how many times that value has
/// been added.
#[derive(Clone, Debug)]
pub struct Contents<T, C> {
    comparator: C,
    value: T,
    count: usize,
}

impl<T, C> Contents<T, C>
where
    C: Comparator<T>,
{
    /// Clones `prototype` and pairs it with `value`, counted once.
    pub(crate) fn new(prototype: &C, value: T) -> Self {
        Self {
            comparator: prototype.clone(),
            value,
            count: 1,
        }
    }

    /// Whether `candidate` should share this node instead of getting its own.
    pub(crate) fn matches(&self, candidate: &T) -> bool {
        self.comparator.equals(&self.value, candidate)
    }

    /// The subtree `candidate` belongs in, assuming it doesn't [match][Self::matches].
    pub(crate) fn direction_of(&self, candidate: &T) -> Side {
        if self.comparator.compare(&self.value, candidate) {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Whether `candidate` may live in this node's subtree on `side`.
    pub(crate) fn admits(&self, side: Side, candidate: &T) -> bool {
        !self.matches(candidate) && self.direction_of(candidate) == side
    }
}

impl<T, C> Contents<T, C> {
    /// The stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// How many times the stored value is present. Always at least 1.
    pub fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn increment(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    /// Drops one occurrence. Callers unlink the node instead of decrementing past 1.
    pub(crate) fn decrement(&mut self) -> usize {
        debug_assert!(self.count > 1, "a node's count must never reach 0");
        self.count -= 1;
        self.count
    }
}
