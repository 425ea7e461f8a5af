//! Two-level sparse bit vector over `usize`.
//!
//! Level 1 is a sparse map from 64-bit block index to level 2, a single
//! machine word. Only blocks containing at least one set bit are
//! materialized, so a bit vector over a huge but sparsely populated
//! domain costs memory proportional to the number of *occupied* 64-bit
//! words, not the domain size.

use rustc_hash::FxHashMap;

const BITS_PER_BLOCK: usize = u64::BITS as usize;

#[derive(Debug, Clone, Default)]
pub struct SparseBitSet {
    blocks: FxHashMap<usize, u64>,
    count: usize,
}

impl SparseBitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, y: usize) -> bool {
        let (block, bit) = (y / BITS_PER_BLOCK, y % BITS_PER_BLOCK);
        let word = self.blocks.entry(block).or_insert(0);
        let mask = 1u64 << bit;
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.count += 1;
        true
    }

    pub fn remove(&mut self, y: usize) -> bool {
        let (block, bit) = (y / BITS_PER_BLOCK, y % BITS_PER_BLOCK);
        let Some(word) = self.blocks.get_mut(&block) else {
            return false;
        };
        let mask = 1u64 << bit;
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.count -= 1;
        if *word == 0 {
            self.blocks.remove(&block);
        }
        true
    }

    pub fn contains(&self, y: usize) -> bool {
        let (block, bit) = (y / BITS_PER_BLOCK, y % BITS_PER_BLOCK);
        self.blocks
            .get(&block)
            .map_or(false, |word| word & (1u64 << bit) != 0)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> SparseBitSetIter<'_> {
        SparseBitSetIter {
            blocks: self.blocks.iter(),
            current: None,
        }
    }
}

pub struct SparseBitSetIter<'a> {
    blocks: std::collections::hash_map::Iter<'a, usize, u64>,
    current: Option<(usize, u64)>,
}

impl<'a> Iterator for SparseBitSetIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some((block, word)) = self.current {
                if word == 0 {
                    self.current = None;
                    continue;
                }
                let bit = word.trailing_zeros() as usize;
                self.current = Some((block, word & (word - 1)));
                return Some(block * BITS_PER_BLOCK + bit);
            }
            let (&block, &word) = self.blocks.next()?;
            self.current = Some((block, word));
        }
    }
}
