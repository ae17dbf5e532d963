//! Append-only, insertion-ordered response collection.
//!
//! Both the display and pull phases grow their results one record at a time
//! without knowing the final count up front. An allocation failure while
//! growing drops that single record with a logged error instead of aborting
//! the attempt.

use serde::Serialize;

/// Ordered, append-only list of phase responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseList<T> {
    items: Vec<T>,
}

impl<T> ResponseList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a record, keeping insertion order.
    ///
    /// Returns `false` when the list could not grow; the record is dropped.
    pub fn push(&mut self, item: T) -> bool {
        if let Err(err) = self.items.try_reserve(1) {
            tracing::error!(error = %err, "unable to allocate memory to store responses");
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for ResponseList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for ResponseList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResponseList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for ResponseList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}
