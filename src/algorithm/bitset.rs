use bitvec::prelude::*;
use std::fmt;

/// Fixed-size set of cell indices
///
/// Uses the zero-based row-major indices of the grid. Iteration is always in
/// ascending order, which is the order results are reported in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSet {
    bits: BitVec,
    capacity: usize,
}

impl CellSet {
    /// Create an empty set able to hold indices `0..capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Build a set from indices, ignoring any outside `0..capacity`
    pub fn from_indices(capacity: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Insert an index; out-of-range indices are ignored
    pub fn insert(&mut self, index: usize) {
        if index < self.capacity {
            self.bits.set(index, true);
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Upper bound (exclusive) of storable indices
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Indices in ascending order, collected
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellSet({} cells: {:?})", self.count(), self.to_vec())
    }
}
