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

//! Row predicates
//!
//! A predicate decides whether a [`FilterRow`] survives filtering. Bucket
//! predicates see one table row at a time; selection-wide predicates see the
//! composite rows of the cross product. Either way a predicate only ever
//! addresses cells by [`ColumnId`].
//!
//! # Stock predicates
//!
//! - [`ComparisonPredicate`] - `column <op> constant` or `column <op> column`
//! - [`LikePredicate`] - SQL LIKE pattern matching
//! - [`InListPredicate`] - membership in a constant list
//! - [`NullCheckPredicate`] - IS NULL / IS NOT NULL
//! - [`AndPredicate`], [`OrPredicate`], [`NotPredicate`] - logical combinators
//! - [`FnPredicate`] - any closure over a filter row

pub mod comparison;
pub mod function;
pub mod in_list;
pub mod like;
pub mod logical;
pub mod null_check;

use std::fmt::Debug;

use crate::core::Result;
use crate::executor::{ColumnId, FilterRow, TableId};

pub use comparison::{ComparisonPredicate, Operand};
pub use function::{predicate_fn, FnPredicate};
pub use in_list::InListPredicate;
pub use like::LikePredicate;
pub use logical::{AndPredicate, NotPredicate, OrPredicate};
pub use null_check::NullCheckPredicate;

/// A row-level filter condition
///
/// Predicates must be pure. A row is kept only if `evaluate` returns
/// `Ok(true)`; `Ok(false)` and `Err(_)` both exclude it, the latter is
/// additionally counted in the selection statistics.
pub trait Predicate: Debug {
    /// Decide whether `row` is included
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool>;

    /// Columns this predicate reads, if known
    ///
    /// `None` marks an opaque predicate. When every referenced column
    /// belongs to one table, a selection-wide predicate is pushed down into
    /// that table's bucket filter.
    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        None
    }
}

impl<P: Predicate + ?Sized> Predicate for Box<P> {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        (**self).evaluate(row)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        (**self).referenced_columns()
    }
}

impl<P: Predicate + ?Sized> Predicate for &P {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        (**self).evaluate(row)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        (**self).referenced_columns()
    }
}

/// The single table a predicate reads from, if it reads from exactly one
pub fn single_table(predicate: &dyn Predicate) -> Option<TableId> {
    let columns = predicate.referenced_columns()?;
    let first = columns.first()?.table();
    columns
        .iter()
        .all(|c| c.table() == first)
        .then_some(first)
}

/// Union of the referenced columns of several predicates; `None` if any is opaque
pub(crate) fn union_columns<'p, I, P>(predicates: I) -> Option<Vec<ColumnId>>
where
    I: IntoIterator<Item = &'p P>,
    P: Predicate + ?Sized + 'p,
{
    let mut out = Vec::new();
    for p in predicates {
        for c in p.referenced_columns()? {
            if !out.contains(&c) {
                out.push(c);
            }
        }
    }
    Some(out)
}
