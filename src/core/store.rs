use crate::utils::error::{DojoError, Result};
use std::ops::Index;

pub const DEFAULT_CAPACITY: usize = 2;

/// Owning, growable, index-addressable sequence.
///
/// Slots `[0, len)` always hold a live item; the rest of the backing storage
/// is empty. Capacity doubles when an append finds the store full and never
/// shrinks. Removing an item hands ownership back to the caller, so no handle
/// to it can outlive its removal from the store.
#[derive(Debug)]
pub struct RecordStore<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

impl<T> RecordStore<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity is bumped to one so doubling always makes progress.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(1)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn append(&mut self, item: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        self.slots[self.len] = Some(item);
        self.len += 1;
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        self.get(index)
            .ok_or_else(|| DojoError::out_of_bounds(index, self.len))
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        if index >= len {
            return Err(DojoError::out_of_bounds(index, len));
        }
        self.slots[index]
            .as_mut()
            .ok_or_else(|| DojoError::out_of_bounds(index, len))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[index].as_ref()
    }

    /// Removes the item at `index`, closing the gap so later items keep
    /// their relative order.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(DojoError::out_of_bounds(index, self.len));
        }
        let removed = self.slots[index]
            .take()
            .ok_or_else(|| DojoError::out_of_bounds(index, self.len))?;
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        let mut next = Vec::with_capacity(new_capacity);
        next.extend(self.slots[..self.len].iter_mut().map(Option::take));
        next.resize_with(new_capacity, || None);
        self.slots = next.into_boxed_slice();
        tracing::debug!(len = self.len, capacity = new_capacity, "record store grew");
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics when `index` is out of bounds, like slice indexing. Use
/// [`RecordStore::at`] for a recoverable lookup.
impl<T> Index<usize> for RecordStore<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => panic!("index {index} out of bounds for RecordStore of length {}", self.len),
        }
    }
}

impl<T> Extend<T> for RecordStore<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for RecordStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a, T> IntoIterator for &'a RecordStore<T> {
    type Item = &'a T;
    type IntoIter = Box<dyn Iterator<Item = &'a T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
