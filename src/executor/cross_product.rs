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

//! Odometer enumeration of the cross product
//!
//! Given the surviving row indices of each participating table, yields every
//! combination with one row per table. The first table varies slowest and
//! the last fastest, like the digits of an odometer, so the output order is
//! the lexicographic order of the per-table positions.

use super::filter_row::RowIndices;

/// Iterator over all combinations of the given per-table row lists
///
/// Zero tables or any empty list yields no combinations.
#[derive(Debug, Clone)]
pub struct CrossProduct<'a> {
    inputs: &'a [Vec<usize>],
    /// Position into each input list
    cursor: RowIndices,
    exhausted: bool,
}

impl<'a> CrossProduct<'a> {
    pub fn new(inputs: &'a [Vec<usize>]) -> Self {
        let mut product = Self {
            inputs,
            cursor: RowIndices::new(),
            exhausted: true,
        };
        product.reset();
        product
    }

    /// Restart from the first combination
    pub fn reset(&mut self) {
        self.cursor.clear();
        self.cursor.resize(self.inputs.len(), 0);
        self.exhausted = self.inputs.is_empty() || self.inputs.iter().any(Vec::is_empty);
    }

    /// Number of combinations in the full product, saturating
    pub fn total(&self) -> usize {
        if self.inputs.is_empty() {
            return 0;
        }
        self.inputs
            .iter()
            .fold(1usize, |acc, rows| acc.saturating_mul(rows.len()))
    }

    fn advance(&mut self) {
        for level in (0..self.cursor.len()).rev() {
            self.cursor[level] += 1;
            if self.cursor[level] < self.inputs[level].len() {
                return;
            }
            self.cursor[level] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for CrossProduct<'_> {
    type Item = RowIndices;

    fn next(&mut self) -> Option<RowIndices> {
        if self.exhausted {
            return None;
        }
        let current = self
            .cursor
            .iter()
            .zip(self.inputs)
            .map(|(&pos, rows)| rows[pos])
            .collect();
        self.advance();
        Some(current)
    }
}
