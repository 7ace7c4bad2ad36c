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

//! Per-bucket bit-vector filtering
//!
//! Every row of a participating table is tested once against the bucket's
//! predicates (its own, any pushed-down selection predicates and the
//! semi-join check). Survivors are recorded in a bit vector; the cross
//! product only ever visits rows whose bit is set.

use crate::common::BitSet;
use crate::storage::expression::Predicate;
use crate::storage::TableSource;

use super::filter_row::TableRow;
use super::identity::TableId;

/// Outcome of filtering one bucket
#[derive(Debug, Clone)]
pub struct FilterResult {
    table: TableId,
    bits: BitSet,
    errors: usize,
}

impl FilterResult {
    #[inline]
    pub fn table(&self) -> TableId {
        self.table
    }

    /// Bit per source row, set when the row passed
    #[inline]
    pub fn bits(&self) -> &BitSet {
        &self.bits
    }

    /// Indices of passing rows, ascending
    pub fn rows(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Rows tested
    #[inline]
    pub fn scanned(&self) -> usize {
        self.bits.len()
    }

    /// Rows that passed
    #[inline]
    pub fn kept(&self) -> usize {
        self.bits.count_ones()
    }

    /// Predicate evaluations that returned an error
    #[inline]
    pub fn errors(&self) -> usize {
        self.errors
    }
}

/// Test every row of `source` against `predicates` (conjunction)
///
/// With no predicates every row passes. A predicate error excludes the row.
pub fn filter_bucket(
    table: TableId,
    source: &dyn TableSource,
    predicates: &[&dyn Predicate],
) -> FilterResult {
    let row_count = source.row_count();
    let mut bits = BitSet::new(row_count);
    let mut errors = 0;

    'rows: for row in 0..row_count {
        let view = TableRow::new(table, source, row);
        for predicate in predicates {
            match predicate.evaluate(&view) {
                Ok(true) => {}
                Ok(false) => continue 'rows,
                Err(err) => {
                    errors += 1;
                    tracing::debug!(%table, row, error = %err, "bucket predicate failed, row excluded");
                    continue 'rows;
                }
            }
        }
        bits.set(row);
    }

    FilterResult {
        table,
        bits,
        errors,
    }
}
