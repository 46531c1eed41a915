//! Adding values whose type is only known at runtime.
//!
//! [`OrderedTree::add`] can only ever be handed a `T`, so a tree is homogeneous by construction.
//! Callers that only hold values of some arbitrary type (decoded from a plugin boundary, or
//! pulled out of a heterogeneous collection) can go through [`OrderedTree::add_any`] instead,
//! which checks the type before touching the tree.

use std::any::{self, Any};

use crate::comparator::Comparator;
use crate::error::TreeError;
use crate::tree::OrderedTree;

impl<T, C> OrderedTree<T, C>
where
    T: Any,
    C: Comparator<T>,
{
    /// Adds `value` if it is a `T`.
    ///
    /// # Errors
    ///
    /// [`TreeError::TypeMismatch`] if `V` is not `T`. The tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Natural, OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new(String::from("m"), Natural);
    ///
    /// assert!(tree.add_any(String::from("c")).is_ok());
    /// assert!(matches!(tree.add_any(2), Err(TreeError::TypeMismatch { .. })));
    /// assert_eq!(tree.asc_list(), vec!["c", "m"]);
    /// ```
    pub fn add_any<V: Any>(&mut self, value: V) -> Result<(), TreeError> {
        let value: Box<dyn Any> = Box::new(value);
        match value.downcast::<T>() {
            Ok(value) => {
                self.add(*value);
                Ok(())
            }
            Err(_) => Err(TreeError::TypeMismatch {
                expected: any::type_name::<T>(),
                found: any::type_name::<V>(),
            }),
        }
    }
}
