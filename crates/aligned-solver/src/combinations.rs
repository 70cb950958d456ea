//! Explicit-stack enumeration of k-element index combinations.

use tinyvec::ArrayVec;

/// Largest `k` supported by [`Combinations`].
pub(crate) const MAX_K: usize = 10;

/// Enumerates every strictly increasing `k`-tuple of indices in `0..n`, in
/// lexicographic order, without recursion.
///
/// This is a lending iterator: [`Combinations::advance`] returns a slice that
/// borrows the internal cursor array, so no tuple is ever allocated.
#[derive(Debug, Clone)]
pub(crate) struct Combinations {
    n: usize,
    indexes: ArrayVec<[usize; MAX_K]>,
    started: bool,
}

impl Combinations {
    /// Creates the enumeration of `k`-of-`n` combinations.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero or greater than [`MAX_K`].
    pub(crate) fn new(n: usize, k: usize) -> Self {
        assert!((1..=MAX_K).contains(&k), "k must be 1..={MAX_K}, got {k}");
        Self {
            n,
            indexes: (0..k).collect(),
            started: false,
        }
    }

    /// Advances to the next combination.
    pub(crate) fn advance(&mut self) -> Option<&[usize]> {
        let k = self.indexes.len();
        if k > self.n {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indexes.as_slice());
        }
        // Rightmost position that can still move right.
        let mut i = k;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.indexes[i] < self.n - k + i {
                break;
            }
        }
        self.indexes[i] += 1;
        for j in i + 1..k {
            self.indexes[j] = self.indexes[j - 1] + 1;
        }
        Some(self.indexes.as_slice())
    }
}
