//! Memo of aligned sets already proven not to hint.

use aligned_core::{DigitSet, Position};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Entry {
    hash: u64,
    checksum: u32,
}

/// A direct-mapped table from aligned-set hash to the maybe checksum seen the
/// last time the set was searched without result.
///
/// The slot only stores the hash, not the cells, so two different sets whose
/// hashes and checksums both collide share an entry and the second one is
/// skipped without a search. The risk falls with a larger `shift`.
#[derive(Debug, Clone)]
pub(crate) struct NonHinterCache {
    slots: Vec<Entry>,
    mask: u64,
    degree: u64,
    occupied: usize,
}

impl NonHinterCache {
    pub(crate) fn new(shift: u8, degree: usize) -> Self {
        Self {
            slots: Vec::new(),
            mask: (1 << shift) - 1,
            degree: degree as u64,
            occupied: 0,
        }
    }

    /// Returns `true` if the set was remembered and no maybe it depends on
    /// has changed since.
    pub(crate) fn should_skip(
        &self,
        cells: &[Position],
        maybes: &[DigitSet],
        excluders: &[DigitSet],
    ) -> bool {
        if self.occupied == 0 {
            return false;
        }
        let hash = self.hash(cells);
        let entry = self.slots[self.slot(hash)];
        entry.hash == hash && entry.checksum == checksum(maybes, excluders)
    }

    /// Records a set whose combo search found nothing.
    pub(crate) fn remember(
        &mut self,
        cells: &[Position],
        maybes: &[DigitSet],
        excluders: &[DigitSet],
    ) {
        if self.slots.is_empty() {
            self.slots = vec![Entry::default(); self.capacity()];
        }
        let hash = self.hash(cells);
        let slot = self.slot(hash);
        if self.slots[slot] == Entry::default() {
            self.occupied += 1;
        }
        self.slots[slot] = Entry {
            hash,
            checksum: checksum(maybes, excluders),
        };
    }

    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.occupied = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    fn capacity(&self) -> usize {
        usize::try_from(self.mask + 1).unwrap_or(usize::MAX)
    }

    fn slot(&self, hash: u64) -> usize {
        // Bounded by `mask`, which fits the table.
        #[expect(clippy::cast_possible_truncation)]
        let slot = (hash & self.mask) as usize;
        slot
    }

    fn hash(&self, cells: &[Position]) -> u64 {
        // FNV-1a over the cell indexes, seeded with the degree.
        let mut hash = 0xcbf2_9ce4_8422_2325_u64 ^ self.degree;
        for pos in cells {
            hash ^= pos.index() as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        // Spread the high bits into the slot index.
        hash ^ (hash >> 29)
    }
}

fn checksum(maybes: &[DigitSet], excluders: &[DigitSet]) -> u32 {
    maybes
        .iter()
        .chain(excluders)
        .map(|m| u32::from(m.bits()))
        .sum()
}
