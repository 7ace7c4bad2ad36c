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

//! Closure-backed predicates

use std::fmt;

use super::Predicate;
use crate::core::Result;
use crate::executor::{ColumnId, FilterRow};

/// Predicate wrapping an arbitrary closure
///
/// Opaque to pushdown unless the columns it reads are declared with
/// [`FnPredicate::reading`].
pub struct FnPredicate<F> {
    func: F,
    columns: Option<Vec<ColumnId>>,
}

impl<F> FnPredicate<F>
where
    F: Fn(&dyn FilterRow) -> Result<bool>,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            columns: None,
        }
    }

    /// Declare the columns the closure reads
    pub fn reading(mut self, columns: impl IntoIterator<Item = ColumnId>) -> Self {
        self.columns = Some(columns.into_iter().collect());
        self
    }
}

/// Shorthand for [`FnPredicate::new`]
pub fn predicate_fn<F>(func: F) -> FnPredicate<F>
where
    F: Fn(&dyn FilterRow) -> Result<bool>,
{
    FnPredicate::new(func)
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&dyn FilterRow) -> Result<bool>,
{
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        (self.func)(row)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        self.columns.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::executor::TableId;
    use crate::storage::expression::test_util::MapRow;

    #[test]
    fn test_fn_predicate() {
        let c = TableId::new(0).column(0);
        let even = predicate_fn(move |row| {
            Ok(row
                .get(c)
                .and_then(Value::as_int64)
                .is_some_and(|n| n % 2 == 0))
        })
        .reading([c]);

        assert!(even.evaluate(&MapRow(vec![(c, Value::integer(4))])).unwrap());
        assert!(!even.evaluate(&MapRow(vec![(c, Value::integer(3))])).unwrap());
        assert_eq!(even.referenced_columns(), Some(vec![c]));
    }
}
