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

//! Column-identity-indexed row views used to evaluate predicates
//!
//! A filter row never materializes anything: it resolves a [`ColumnId`] to
//! the cell of whichever underlying table row owns that column, or to `None`
//! when no constituent row does.

use smallvec::SmallVec;

use crate::core::Value;
use crate::storage::TableSource;

use super::identity::{ColumnId, TableId};

/// Inline capacity for per-bucket row cursors; joins rarely span more tables
pub(crate) const INLINE_BUCKETS: usize = 4;

/// Row indices of one composite row, one per participating table
pub type RowIndices = SmallVec<[usize; INLINE_BUCKETS]>;

/// Read-only view of a (possibly composite) row addressed by column identity
pub trait FilterRow {
    /// Cell for `column`, or `None` if no constituent row owns it
    fn get(&self, column: ColumnId) -> Option<&Value>;
}

impl<R: FilterRow + ?Sized> FilterRow for &R {
    #[inline]
    fn get(&self, column: ColumnId) -> Option<&Value> {
        (**self).get(column)
    }
}

/// One row of one table
#[derive(Clone, Copy)]
pub struct TableRow<'a> {
    table: TableId,
    source: &'a dyn TableSource,
    row: usize,
}

impl<'a> TableRow<'a> {
    pub fn new(table: TableId, source: &'a dyn TableSource, row: usize) -> Self {
        Self { table, source, row }
    }

    /// Row index within the source table
    #[inline]
    pub fn row_index(&self) -> usize {
        self.row
    }
}

impl FilterRow for TableRow<'_> {
    #[inline]
    fn get(&self, column: ColumnId) -> Option<&Value> {
        if column.table() != self.table {
            return None;
        }
        self.source.element_at(self.row, column.index())
    }
}

/// Participating tables of one execution, in cross-product order
///
/// Maps each [`TableId`] to its position in the product (or to nothing, for
/// a declared table that ended up not participating).
pub struct ProductLayout<'a> {
    slots: Vec<Option<usize>>,
    sources: Vec<&'a dyn TableSource>,
}

impl<'a> ProductLayout<'a> {
    /// Build a layout from `(table, source)` pairs in product order
    ///
    /// `table_count` is the number of handles issued by the selection.
    pub fn new(table_count: usize, tables: impl IntoIterator<Item = (TableId, &'a dyn TableSource)>) -> Self {
        let mut slots = vec![None; table_count];
        let mut sources = Vec::new();
        for (id, source) in tables {
            if let Some(slot) = slots.get_mut(id.index()) {
                *slot = Some(sources.len());
                sources.push(source);
            }
        }
        Self { slots, sources }
    }

    /// Position of `table` in the product
    #[inline]
    pub fn position(&self, table: TableId) -> Option<usize> {
        self.slots.get(table.index()).copied().flatten()
    }

    /// Number of participating tables
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Bind a tuple of row indices to this layout
    #[inline]
    pub fn row<'l>(&'l self, rows: &'l [usize]) -> CompositeRow<'l, 'a> {
        CompositeRow { layout: self, rows }
    }
}

/// One combination produced by the cross product
///
/// Lookups delegate to the constituent row of the column's table.
#[derive(Clone, Copy)]
pub struct CompositeRow<'l, 'a> {
    layout: &'l ProductLayout<'a>,
    rows: &'l [usize],
}

impl CompositeRow<'_, '_> {
    /// Row indices, one per participating table
    #[inline]
    pub fn indices(&self) -> &[usize] {
        self.rows
    }
}

impl FilterRow for CompositeRow<'_, '_> {
    #[inline]
    fn get(&self, column: ColumnId) -> Option<&Value> {
        let pos = self.layout.position(column.table())?;
        let row = *self.rows.get(pos)?;
        self.layout.sources[pos].element_at(row, column.index())
    }
}
