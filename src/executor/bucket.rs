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

//! Buckets: the per-table slice of a selection
//!
//! A bucket records which columns of one table are projected, how the table
//! entered the selection and the predicates that apply to its rows alone.

use crate::core::JoinKind;
use crate::storage::expression::Predicate;
use crate::storage::TableSource;

use super::identity::{ColumnId, TableId};

/// How a table entered the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOrigin {
    /// The table the selection was started from
    Base,
    /// Added with an explicit join
    Joined,
    /// Registered for column resolution only; participates once used
    Included,
}

/// Projected columns of a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Every column, in table order
    All,
    /// The listed column indices, in selection order
    Explicit(Vec<usize>),
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Explicit(Vec::new())
    }
}

impl Projection {
    /// True if nothing has been selected
    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::Explicit(cols) if cols.is_empty())
    }

    /// Add one column; duplicates and already-all projections are unchanged
    pub fn select(&mut self, column: usize) {
        if let Projection::Explicit(cols) = self {
            if !cols.contains(&column) {
                cols.push(column);
            }
        }
    }

    /// Resolve to concrete indices for a table `width` columns wide
    pub fn resolve(&self, width: usize) -> Vec<usize> {
        match self {
            Projection::All => (0..width).collect(),
            Projection::Explicit(cols) => cols.iter().copied().filter(|&c| c < width).collect(),
        }
    }
}

/// One table's part of a selection
pub struct Bucket<'a> {
    table: TableId,
    source: &'a dyn TableSource,
    origin: BucketOrigin,
    join_kind: Option<JoinKind>,
    projection: Projection,
    predicates: Vec<Box<dyn Predicate + 'a>>,
}

impl<'a> Bucket<'a> {
    pub fn new(table: TableId, source: &'a dyn TableSource, origin: BucketOrigin) -> Self {
        let join_kind = match origin {
            BucketOrigin::Joined => Some(JoinKind::Inner),
            BucketOrigin::Base | BucketOrigin::Included => None,
        };
        Self {
            table,
            source,
            origin,
            join_kind,
            projection: Projection::default(),
            predicates: Vec::new(),
        }
    }

    #[inline]
    pub fn table(&self) -> TableId {
        self.table
    }

    #[inline]
    pub fn source(&self) -> &'a dyn TableSource {
        self.source
    }

    #[inline]
    pub fn origin(&self) -> BucketOrigin {
        self.origin
    }

    /// Join kind, once assigned
    ///
    /// Recorded for introspection only; every join executes as an inner join.
    #[inline]
    pub fn join_kind(&self) -> Option<JoinKind> {
        self.join_kind
    }

    pub(crate) fn assign_join_kind(&mut self, kind: JoinKind) {
        self.join_kind.get_or_insert(kind);
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Identity of column `index`, if the table has that column
    pub fn resolve(&self, index: usize) -> Option<ColumnId> {
        (index < self.source.column_count()).then(|| self.table.column(index))
    }

    /// Select column `index`; returns false on a resolution miss
    pub fn select_column(&mut self, index: usize) -> bool {
        if self.resolve(index).is_none() {
            return false;
        }
        self.projection.select(index);
        true
    }

    pub fn select_all(&mut self) {
        self.projection = Projection::All;
    }

    pub(crate) fn add_predicate(&mut self, predicate: Box<dyn Predicate + 'a>) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> impl Iterator<Item = &(dyn Predicate + 'a)> + '_ {
        self.predicates.iter().map(|p| p.as_ref())
    }

    pub fn has_predicates(&self) -> bool {
        !self.predicates.is_empty()
    }

    /// Projected column identities, in projection order
    pub fn selected_columns(&self) -> Vec<ColumnId> {
        self.projection
            .resolve(self.source.column_count())
            .into_iter()
            .map(|i| self.table.column(i))
            .collect()
    }
}

impl std::fmt::Debug for Bucket<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("table", &self.table)
            .field("name", &self.source.name())
            .field("origin", &self.origin)
            .field("join_kind", &self.join_kind)
            .field("projection", &self.projection)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTable;

    #[test]
    fn test_projection() {
        let mut p = Projection::default();
        assert!(p.is_empty());
        p.select(2);
        p.select(0);
        p.select(2);
        assert_eq!(p, Projection::Explicit(vec![2, 0]));
        assert_eq!(p.resolve(2), vec![0]);
        assert_eq!(Projection::All.resolve(3), vec![0, 1, 2]);
    }

    #[test]
    fn test_bucket_selection() {
        let t = MemoryTable::new("t", ["a", "b"]);
        let id = TableId::new(0);
        let mut b = Bucket::new(id, &t, BucketOrigin::Included);
        assert_eq!(b.join_kind(), None);

        assert!(b.select_column(1));
        assert!(!b.select_column(9));
        assert_eq!(b.selected_columns(), vec![id.column(1)]);

        b.select_all();
        b.select_column(0);
        assert_eq!(b.selected_columns(), vec![id.column(0), id.column(1)]);

        b.assign_join_kind(JoinKind::Inner);
        assert_eq!(b.join_kind(), Some(JoinKind::Inner));
    }
}
