// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-length bit vector over row indices
//!
//! One bit per row of a table. Built once by the bucket filter and read many
//! times afterwards, so the only mutation after construction is `set`.

/// Number of bits per u64 word.
const BITS: usize = 64;

/// Fixed-length bitset backed by `Vec<u64>` words
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Create a bitset of `len` bits, all clear
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(BITS)],
            len,
        }
    }

    /// Number of addressable bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the bitset addresses no bits at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `idx`. Out-of-range indices are ignored.
    #[inline]
    pub fn set(&mut self, idx: usize) {
        if idx < self.len {
            self.words[idx / BITS] |= 1u64 << (idx % BITS);
        }
    }

    /// Check bit `idx`. Out-of-range indices read as clear.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        idx < self.len && (self.words[idx / BITS] & (1u64 << (idx % BITS))) != 0
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate set bits in ascending order
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Ascending iterator over the set bits of a [`BitSet`]
pub struct Ones<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // clear lowest set bit
                return Some(self.word_idx * BITS + bit);
            }
            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_idx];
        }
    }
}
