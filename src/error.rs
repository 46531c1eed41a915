//! Errors returned by [`OrderedTree`][crate::OrderedTree] operations.

use thiserror::Error;

/// The ways a mutation of an [`OrderedTree`][crate::OrderedTree] can be refused. In every case
/// the tree is left exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A value of a different type was offered to a tree through
    /// [`add_any`][crate::OrderedTree::add_any].
    #[error("cannot add mismatching types to ordered tree - expected {expected}, got {found}")]
    TypeMismatch {
        /// The type the tree was constructed with.
        expected: &'static str,
        /// The type that was offered.
        found: &'static str,
    },
    /// Removing the value would leave the tree without a single node.
    #[error("cannot remove last value in tree")]
    CannotRemoveLast,
}
