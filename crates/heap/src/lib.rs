// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! A minimal heap backing `newarray`/`iaload`/`iastore`/`arraylength`.
//!
//! Arrays are the only heap-allocated object this VM knows, so the heap is
//! just an append-only `Vec` of `i32` arrays, addressed by their index.
//! There is no garbage collector: nothing is ever freed or reused, matching
//! the lifetime of the single program run this interpreter executes.

pub mod error;

pub use error::HeapError;

/// A reference to a heap-allocated array: its index into [`Heap`]'s backing
/// store. Negative values never occur in practice (references only ever
/// come from [`Heap::allocate`]) but the type stays `i32` because that is
/// how the interpreter's operand stack stores every value, references
/// included.
pub type Reference = i32;

#[derive(Debug, Default)]
pub struct Heap {
    arrays: Vec<Vec<i32>>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a zero-initialized array of `length` elements and returns
    /// a reference to it. Mirrors `newarray`, which always specifies a
    /// non-negative element count on the operand stack.
    pub fn allocate(&mut self, length: i32) -> Result<Reference, HeapError> {
        if length < 0 {
            return Err(HeapError::new(format!(
                "negative array length: {length}"
            )));
        }
        self.arrays.push(vec![0; length as usize]);
        Ok((self.arrays.len() - 1) as Reference)
    }

    pub fn length(&self, reference: Reference) -> Result<i32, HeapError> {
        Ok(self.array(reference)?.len() as i32)
    }

    pub fn load(&self, reference: Reference, index: i32) -> Result<i32, HeapError> {
        let array = self.array(reference)?;
        self.element_index(array, index)
            .map(|i| array[i])
    }

    pub fn store(&mut self, reference: Reference, index: i32, value: i32) -> Result<(), HeapError> {
        let len = self.array(reference)?.len();
        let element_index = Self::checked_index(index, len)?;
        let array = self.array_mut(reference)?;
        array[element_index] = value;
        Ok(())
    }

    fn array(&self, reference: Reference) -> Result<&Vec<i32>, HeapError> {
        self.arrays
            .get(usize::try_from(reference).map_err(|_| invalid_reference(reference))?)
            .ok_or_else(|| invalid_reference(reference))
    }

    fn array_mut(&mut self, reference: Reference) -> Result<&mut Vec<i32>, HeapError> {
        let index = usize::try_from(reference).map_err(|_| invalid_reference(reference))?;
        self.arrays
            .get_mut(index)
            .ok_or_else(|| invalid_reference(reference))
    }

    fn element_index(&self, array: &[i32], index: i32) -> Result<usize, HeapError> {
        Self::checked_index(index, array.len())
    }

    fn checked_index(index: i32, len: usize) -> Result<usize, HeapError> {
        if index < 0 || index as usize >= len {
            return Err(HeapError::new(format!(
                "array index out of bounds: index {index}, length {len}"
            )));
        }
        Ok(index as usize)
    }
}

fn invalid_reference(reference: Reference) -> HeapError {
    HeapError::new(format!("invalid array reference: {reference}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn allocates_a_zero_initialized_array() {
        let mut heap = Heap::new();
        let r = heap.allocate(3).unwrap();
        assert_eq!(heap.length(r).unwrap(), 3);
        assert_eq!(heap.load(r, 0).unwrap(), 0);
    }

    #[test]
    fn stores_and_loads_elements() {
        let mut heap = Heap::new();
        let r = heap.allocate(2).unwrap();
        heap.store(r, 1, 42).unwrap();
        assert_eq!(heap.load(r, 1).unwrap(), 42);
        assert_eq!(heap.load(r, 0).unwrap(), 0);
    }

    #[test]
    fn rejects_an_out_of_bounds_index() {
        let mut heap = Heap::new();
        let r = heap.allocate(2).unwrap();
        assert!(heap.load(r, 2).is_err());
        assert!(heap.store(r, -1, 1).is_err());
    }

    #[test]
    fn rejects_a_negative_allocation_length() {
        let mut heap = Heap::new();
        assert!(heap.allocate(-1).is_err());
    }

    #[test]
    fn two_allocations_get_distinct_references() {
        let mut heap = Heap::new();
        let a = heap.allocate(1).unwrap();
        let b = heap.allocate(1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_an_unknown_reference() {
        let heap = Heap::new();
        assert!(heap.length(0).is_err());
    }
}
