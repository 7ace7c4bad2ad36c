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

//! Table and column identity handles
//!
//! Tables are told apart by the handle they are issued when they enter a
//! selection, never by address or by name. Joining the same table twice
//! therefore yields two independent handles, which is what a self-join needs.

use std::fmt;

/// Opaque handle for one table within one selection
///
/// Issued in declaration order: the base table is `TableId(0)`, each
/// subsequent `join`/`include` gets the next index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(u32);

impl TableId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        TableId(index as u32)
    }

    /// Declaration index of this table
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Identity of one column of this table
    #[inline]
    pub fn column(&self, index: usize) -> ColumnId {
        ColumnId::new(*self, index)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// "This column of this table"
///
/// Equal iff both the table handle and the column index are equal. Stable
/// for the lifetime of a selection regardless of what happens to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId {
    table: TableId,
    index: usize,
}

impl ColumnId {
    #[inline]
    pub fn new(table: TableId, index: usize) -> Self {
        Self { table, index }
    }

    #[inline]
    pub fn table(&self) -> TableId {
        self.table
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.c{}", self.table, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_column_identity() {
        let a = TableId::new(0);
        let b = TableId::new(1);
        assert_eq!(a.column(2), ColumnId::new(a, 2));
        assert_ne!(a.column(2), b.column(2));
        assert_ne!(a.column(2), a.column(3));

        let set: FxHashSet<ColumnId> = [a.column(0), a.column(0), b.column(0)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(b.column(4).to_string(), "t1.c4");
    }
}
