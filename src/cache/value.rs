//! Value Module
//!
//! Defines the size capability every cached value must provide.

use std::rc::Rc;
use std::sync::Arc;

// == Value Trait ==
/// A value that can report how many bytes it occupies.
///
/// The cache never looks inside a value. The reported size is only used to
/// charge the value against the byte budget, so it must stay stable while
/// the value is resident.
///
/// The sum of all resident key and value sizes must fit in `usize`;
/// [`Cache::add`](crate::cache::Cache::add) panics otherwise.
pub trait Value {
    /// Returns the size of the value in bytes.
    fn byte_len(&self) -> usize;
}

impl Value for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for &'static str {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Box<str> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Box<[u8]> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl<T: Value + ?Sized> Value for Arc<T> {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: Value + ?Sized> Value for Rc<T> {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}
