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

//! Table access contract consumed by the selection engine
//!
//! The engine never mutates a source table and only needs a handful of
//! read operations: dimensions, cell access, titles and the table name.
//! Anything that can answer those can take part in a selection.

use std::sync::Arc;

use crate::core::Value;

/// Read-only view of a rectangular table of [`Value`]s
///
/// Invariant: every `(row, column)` with `row < row_count()` and
/// `column < column_count()` resolves through `element_at`. Indices outside
/// that range resolve to `None` rather than panicking.
pub trait TableSource {
    /// Table name, if the table has one
    fn name(&self) -> Option<&str>;

    /// Number of rows
    fn row_count(&self) -> usize;

    /// Number of columns
    fn column_count(&self) -> usize;

    /// Cell at `(row, column)`
    fn element_at(&self, row: usize, column: usize) -> Option<&Value>;

    /// Title of a column
    fn column_title(&self, column: usize) -> Option<&str>;

    /// Title of a row
    fn row_title(&self, _row: usize) -> Option<&str> {
        None
    }

    /// Values of one column, top to bottom
    ///
    /// Yields nothing for a column index past the table width.
    fn column(&self, column: usize) -> Box<dyn Iterator<Item = &Value> + '_> {
        if column >= self.column_count() {
            return Box::new(std::iter::empty());
        }
        Box::new((0..self.row_count()).filter_map(move |row| self.element_at(row, column)))
    }

    /// Values of one row, left to right
    fn row(&self, row: usize) -> Box<dyn Iterator<Item = &Value> + '_> {
        if row >= self.row_count() {
            return Box::new(std::iter::empty());
        }
        Box::new((0..self.column_count()).filter_map(move |column| self.element_at(row, column)))
    }
}

macro_rules! forward_table_source {
    () => {
        fn name(&self) -> Option<&str> {
            (**self).name()
        }

        fn row_count(&self) -> usize {
            (**self).row_count()
        }

        fn column_count(&self) -> usize {
            (**self).column_count()
        }

        fn element_at(&self, row: usize, column: usize) -> Option<&Value> {
            (**self).element_at(row, column)
        }

        fn column_title(&self, column: usize) -> Option<&str> {
            (**self).column_title(column)
        }

        fn row_title(&self, row: usize) -> Option<&str> {
            (**self).row_title(row)
        }

        fn column(&self, column: usize) -> Box<dyn Iterator<Item = &Value> + '_> {
            (**self).column(column)
        }

        fn row(&self, row: usize) -> Box<dyn Iterator<Item = &Value> + '_> {
            (**self).row(row)
        }
    };
}

impl<T: TableSource + ?Sized> TableSource for &T {
    forward_table_source!();
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    forward_table_source!();
}

impl<T: TableSource + ?Sized> TableSource for Arc<T> {
    forward_table_source!();
}

// Lets callers hold a read lock on every participating table for the
// duration of a selection and hand the guards straight to the builder.
impl<T: TableSource + ?Sized> TableSource for parking_lot::RwLockReadGuard<'_, T> {
    forward_table_source!();
}
