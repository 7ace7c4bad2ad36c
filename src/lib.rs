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

//! # Joinery - in-memory relational selection and join engine
//!
//! Joinery runs relational selections over tables held in memory: projection
//! across several tables, inner equality joins, row predicates, distinct,
//! ordering and top-N truncation. Every selection materializes a new,
//! independent [`MemoryTable`].
//!
//! ## Key Features
//!
//! - **Transitive join groups** - `a = b` and `b = c` form one join condition
//! - **Semi-join pruning** - rows whose join key has no partner anywhere are
//!   dropped before the cross product is enumerated
//! - **Bit-vector bucket filters** - each table is scanned once per selection
//! - **Predicate pushdown** - single-table predicates run inside bucket filters
//! - **Self-joins** - the same table can be joined any number of times
//!
//! ## Quick Start
//!
//! ```rust
//! use joinery::{row, MemoryTable, SortDirection};
//!
//! let employees = MemoryTable::builder("Employees")
//!     .columns(["id", "dept"])
//!     .row(row![1, "eng"])
//!     .row(row![2, "sales"])
//!     .row(row![3, "eng"])
//!     .build()
//!     .unwrap();
//!
//! let mut select = joinery::select(&employees);
//! let emp = select.current();
//! select
//!     .all_columns()
//!     .order_by(emp.column(0), SortDirection::Descending)
//!     .limit(2);
//!
//! let table = select.table().unwrap();
//! assert_eq!(table.rows(), &[row![3, "eng"], row![2, "sales"]]);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Fluent declaration interface ([`Select`])
//! - [`core`] - Core types ([`Value`], [`Row`], [`Error`])
//! - [`storage`] - Table access contract, [`MemoryTable`] and predicates
//! - [`executor`] - Normalization, filtering, cross product and materialization
//! - [`common`] - Bit vectors and hash map aliases

pub mod api;
pub mod common;
pub mod core;
pub mod executor;
pub mod storage;

// Re-export main types for convenience
pub use core::{Error, JoinKind, Operator, Result, Row, SortDirection, Value};

pub use api::Select;

pub use executor::{
    ColumnId, FilterRow, OrderKey, Selection, SelectionConfig, SelectionOutput, SelectionStats,
    TableId,
};

pub use storage::{MemoryTable, MemoryTableBuilder, TableSource};

// Re-export predicate types
pub use storage::{
    predicate_fn, AndPredicate, ComparisonPredicate, FnPredicate, InListPredicate, LikePredicate,
    NotPredicate, NullCheckPredicate, Operand, OrPredicate, Predicate,
};

/// Start a selection from `table`
///
/// Shorthand for [`Select::new`].
pub fn select<T: TableSource>(table: &T) -> Select<'_> {
    Select::new(table)
}
