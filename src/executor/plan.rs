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

//! Mutable selection declaration
//!
//! A [`SelectionPlan`] collects everything the caller declares: tables,
//! selected columns, join equalities, predicates and the distinct / order /
//! limit directives. [`SelectionPlan::build`] normalizes it into an
//! executable [`Selection`](super::Selection).

use crate::storage::expression::Predicate;
use crate::storage::TableSource;

use super::bucket::{Bucket, BucketOrigin};
use super::column_join::ColumnJoinRegistry;
use super::config::SelectionConfig;
use super::identity::{ColumnId, TableId};
use super::ordering::OrderKey;
use super::selection::Selection;

/// Declarations of one selection, before normalization
#[derive(Debug, Default)]
pub struct SelectionPlan<'a> {
    pub(crate) buckets: Vec<Bucket<'a>>,
    pub(crate) joins: ColumnJoinRegistry,
    pub(crate) filters: Vec<Box<dyn Predicate + 'a>>,
    pub(crate) order: Vec<OrderKey>,
    pub(crate) distinct: bool,
    pub(crate) limit: Option<usize>,
    /// Project every column of every participating table
    pub(crate) all_columns: bool,
}

impl<'a> SelectionPlan<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table and issue its handle
    ///
    /// Handles are issued in declaration order. Registering the same table
    /// twice yields two independent handles.
    pub fn add_table(&mut self, source: &'a dyn TableSource, origin: BucketOrigin) -> TableId {
        let id = TableId::new(self.buckets.len());
        tracing::trace!(table = %id, name = ?source.name(), ?origin, "table registered");
        self.buckets.push(Bucket::new(id, source, origin));
        id
    }

    pub fn buckets(&self) -> &[Bucket<'a>] {
        &self.buckets
    }

    pub fn bucket(&self, table: TableId) -> Option<&Bucket<'a>> {
        self.buckets.get(table.index())
    }

    pub fn bucket_mut(&mut self, table: TableId) -> Option<&mut Bucket<'a>> {
        self.buckets.get_mut(table.index())
    }

    /// Identity of `(table, index)` if both exist in this plan
    pub fn resolve(&self, column: ColumnId) -> Option<ColumnId> {
        self.bucket(column.table())?.resolve(column.index())
    }

    /// Add one column to a table's projection
    ///
    /// A miss (unknown table or column) is a no-op.
    pub fn select_column(&mut self, column: ColumnId) -> bool {
        let selected = self
            .bucket_mut(column.table())
            .is_some_and(|b| b.select_column(column.index()));
        if !selected {
            tracing::debug!(%column, "column selection ignored, no such column");
        }
        selected
    }

    /// Project every column of `table`
    pub fn select_all(&mut self, table: TableId) -> bool {
        match self.bucket_mut(table) {
            Some(bucket) => {
                bucket.select_all();
                true
            }
            None => {
                tracing::debug!(%table, "select-all ignored, no such table");
                false
            }
        }
    }

    /// Project every column of every participating table
    pub fn select_all_tables(&mut self) {
        self.all_columns = true;
    }

    /// Declare `a = b` as a join condition
    ///
    /// Both columns must resolve; otherwise the declaration is dropped.
    pub fn declare_equal(&mut self, a: ColumnId, b: ColumnId) -> bool {
        match (self.resolve(a), self.resolve(b)) {
            (Some(a), Some(b)) => {
                self.joins.declare_equal(a, b);
                true
            }
            _ => {
                tracing::debug!(%a, %b, "join declaration ignored, column does not resolve");
                false
            }
        }
    }

    /// Attach a predicate to one table's bucket filter
    pub fn add_bucket_predicate(&mut self, table: TableId, predicate: Box<dyn Predicate + 'a>) -> bool {
        match self.bucket_mut(table) {
            Some(bucket) => {
                bucket.add_predicate(predicate);
                true
            }
            None => {
                tracing::debug!(%table, "bucket predicate ignored, no such table");
                false
            }
        }
    }

    /// Add a selection-wide predicate, evaluated on joined rows
    pub fn add_filter(&mut self, predicate: Box<dyn Predicate + 'a>) {
        self.filters.push(predicate);
    }

    /// Append an ordering key
    pub fn add_order(&mut self, key: OrderKey) -> bool {
        if self.resolve(key.column).is_none() {
            tracing::debug!(column = %key.column, "order key ignored, column does not resolve");
            return false;
        }
        if !self.order.iter().any(|k| k.column == key.column) {
            self.order.push(key);
        }
        true
    }

    pub fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    /// Keep at most `limit` rows; negative means unlimited
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = usize::try_from(limit).ok();
    }

    /// Normalize into an executable selection
    pub fn build(self, config: SelectionConfig) -> Selection<'a> {
        Selection::normalize(self, config)
    }
}
