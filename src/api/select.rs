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

//! Fluent selection builder
//!
//! ```
//! use joinery::{MemoryTable, Select, row};
//!
//! let employees = MemoryTable::builder("Employees")
//!     .columns(["id", "dept"])
//!     .row(row![1, "eng"])
//!     .row(row![2, "sales"])
//!     .build()
//!     .unwrap();
//! let departments = MemoryTable::builder("Departments")
//!     .columns(["dept", "manager"])
//!     .row(row!["eng", "Alice"])
//!     .build()
//!     .unwrap();
//!
//! let mut select = Select::new(&employees);
//! let emp = select.current();
//! select.column(0).column(1);
//! let dept = select.join(&departments);
//! select.column(1).on_equal(emp.column(1), dept.column(0));
//!
//! let table = select.table().unwrap();
//! assert_eq!(table.rows(), &[row![1, "eng", "Alice"]]);
//! ```

use std::collections::BTreeMap;

use crate::core::{Result, Row, SortDirection, Value};
use crate::executor::{
    BucketOrigin, ColumnId, OrderKey, Selection, SelectionConfig, SelectionOutput, SelectionPlan,
    TableId,
};
use crate::storage::expression::Predicate;
use crate::storage::TableSource;

/// Declares a selection over one or more tables
///
/// Column selections and `on` predicates apply to the *current* table: the
/// base table at first, then the most recently joined one. Every table
/// handle returned by [`Select::join`] or [`Select::include`] can be used to
/// address that table's columns from anywhere in the declaration.
#[derive(Debug)]
pub struct Select<'a> {
    plan: SelectionPlan<'a>,
    current: TableId,
    config: SelectionConfig,
}

impl<'a> Select<'a> {
    /// Start a selection from `table`
    pub fn new<T: TableSource + 'a>(table: &'a T) -> Self {
        let mut plan = SelectionPlan::new();
        let current = plan.add_table(table, BucketOrigin::Base);
        Self {
            plan,
            current,
            config: SelectionConfig::default(),
        }
    }

    /// Handle of the table column selections currently apply to
    pub fn current(&self) -> TableId {
        self.current
    }

    /// Select column `index` of the current table
    pub fn column(&mut self, index: usize) -> &mut Self {
        self.plan.select_column(self.current.column(index));
        self
    }

    /// Select several columns of the current table, in order
    pub fn columns(&mut self, indices: impl IntoIterator<Item = usize>) -> &mut Self {
        for index in indices {
            self.column(index);
        }
        self
    }

    /// Select column `index` of `table`
    pub fn column_of(&mut self, table: TableId, index: usize) -> &mut Self {
        self.plan.select_column(table.column(index));
        self
    }

    /// Select every column of every participating table
    pub fn all_columns(&mut self) -> &mut Self {
        self.plan.select_all_tables();
        self
    }

    /// Select every column of `table`
    pub fn all_columns_of(&mut self, table: TableId) -> &mut Self {
        self.plan.select_all(table);
        self
    }

    /// Inner-join `table`; it becomes the current table
    pub fn join<T: TableSource + 'a>(&mut self, table: &'a T) -> TableId {
        self.current = self.plan.add_table(table, BucketOrigin::Joined);
        self.current
    }

    /// Make `table` addressable without joining it
    ///
    /// The table takes part in the result only once something refers to it:
    /// a selected column, a predicate or a join equality. An order key alone
    /// does not pull it in; such a key is ignored.
    pub fn include<T: TableSource + 'a>(&mut self, table: &'a T) -> TableId {
        self.plan.add_table(table, BucketOrigin::Included)
    }

    /// Require `a = b` in every result row
    pub fn on_equal(&mut self, a: ColumnId, b: ColumnId) -> &mut Self {
        self.plan.declare_equal(a, b);
        self
    }

    /// Filter rows of the current table before joining
    pub fn on<P: Predicate + 'a>(&mut self, predicate: P) -> &mut Self {
        self.plan.add_bucket_predicate(self.current, Box::new(predicate));
        self
    }

    /// Filter joined rows
    pub fn filter<P: Predicate + 'a>(&mut self, predicate: P) -> &mut Self {
        self.plan.add_filter(Box::new(predicate));
        self
    }

    /// Filter joined rows by every predicate in `predicates`
    pub fn filter_all<I, P>(&mut self, predicates: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Predicate + 'a,
    {
        for predicate in predicates {
            self.plan.add_filter(Box::new(predicate));
        }
        self
    }

    /// Drop rows whose projected values repeat an earlier row
    pub fn distinct(&mut self) -> &mut Self {
        self.plan.set_distinct(true);
        self
    }

    /// Append an ordering key; earlier keys take precedence
    pub fn order_by(&mut self, column: ColumnId, direction: SortDirection) -> &mut Self {
        self.plan.add_order(OrderKey::new(column, direction));
        self
    }

    /// Keep the first `limit` rows; negative means unlimited
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.plan.set_limit(limit);
        self
    }

    pub fn with_config(&mut self, config: SelectionConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Finish the declaration
    pub fn prepare(self) -> Selection<'a> {
        self.plan.build(self.config)
    }

    /// Prepare and execute
    pub fn execute(self) -> Result<SelectionOutput> {
        self.prepare().execute()
    }

    /// Prepare, execute and return the result table
    pub fn table(self) -> Result<crate::storage::MemoryTable> {
        self.prepare().table()
    }

    /// Prepare, execute and group the result by its first column
    pub fn sorted_map(self) -> Result<BTreeMap<Value, Vec<Row>>> {
        self.prepare().sorted_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;
    use crate::row;
    use crate::storage::expression::{ComparisonPredicate, InListPredicate};
    use crate::storage::MemoryTable;

    fn people() -> MemoryTable {
        MemoryTable::builder("People")
            .columns(["id", "name", "boss"])
            .row(row![1, "Ann", 0])
            .row(row![2, "Ben", 1])
            .row(row![3, "Cid", 1])
            .row(row![4, "Dee", 2])
            .build()
            .unwrap()
    }

    #[test]
    fn test_current_table_tracking() {
        let p = people();
        let mut select = Select::new(&p);
        let base = select.current();
        let inc = select.include(&p);
        assert_eq!(select.current(), base);
        let joined = select.join(&p);
        assert_eq!(select.current(), joined);
        assert_ne!(inc, joined);
    }

    #[test]
    fn test_self_join() {
        let p = people();
        let mut select = Select::new(&p);
        let staff = select.current();
        select.column(1);
        let boss = select.join(&p);
        select.column(1).on_equal(staff.column(2), boss.column(0));
        select.order_by(staff.column(0), SortDirection::Descending);

        let out = select.execute().unwrap();
        assert_eq!(
            out.table.rows(),
            &[row!["Dee", "Ben"], row!["Cid", "Ann"], row!["Ben", "Ann"]]
        );
        assert_eq!(out.table.name(), Some("People"));
        assert_eq!(
            out.table.column_titles().collect::<Vec<_>>(),
            vec![Some("People.name"), Some("People.name")]
        );
    }

    #[test]
    fn test_all_columns_of_one_table() {
        let p = people();
        let mut select = Select::new(&p);
        let staff = select.current();
        select.column(1);
        let boss = select.join(&p);
        select
            .all_columns_of(boss)
            .on_equal(staff.column(2), boss.column(0))
            .filter(ComparisonPredicate::with_value(staff.column(0), Operator::Eq, Value::integer(4)));

        let table = select.table().unwrap();
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.rows(), &[row!["Dee", 2, "Ben", 1]]);
    }

    #[test]
    fn test_on_and_filter() {
        let p = people();
        let mut select = Select::new(&p);
        let t = select.current();
        select
            .column(0)
            .on(ComparisonPredicate::with_value(t.column(0), Operator::Gt, Value::integer(1)))
            .filter(InListPredicate::new(t.column(1), [Value::text("Ben"), Value::text("Dee")]));
        let table = select.table().unwrap();
        assert_eq!(table.rows(), &[row![2], row![4]]);
    }

    #[test]
    fn test_filter_all_boxed() {
        let p = people();
        let mut select = Select::new(&p);
        let t = select.current();
        let predicates: Vec<Box<dyn Predicate>> = vec![
            Box::new(ComparisonPredicate::with_value(t.column(2), Operator::Eq, Value::integer(1))),
            Box::new(ComparisonPredicate::with_value(t.column(0), Operator::Ne, Value::integer(2))),
        ];
        select.column(1).filter_all(predicates);
        assert_eq!(select.table().unwrap().rows(), &[row!["Cid"]]);
    }

    #[test]
    fn test_resolution_misses_are_ignored() {
        let p = people();
        let mut select = Select::new(&p);
        let t = select.current();
        select.column(0).column(42).on_equal(t.column(0), t.column(99));
        let table = select.table().unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 4);
    }
}
