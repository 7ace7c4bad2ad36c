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

//! IS NULL / IS NOT NULL predicate

use super::Predicate;
use crate::core::Result;
use crate::executor::{ColumnId, FilterRow};

/// Tests a column for NULL
///
/// A column that does not resolve satisfies neither check.
#[derive(Debug, Clone)]
pub struct NullCheckPredicate {
    column: ColumnId,
    is_null: bool,
}

impl NullCheckPredicate {
    /// `column IS NULL`
    pub fn is_null(column: ColumnId) -> Self {
        Self {
            column,
            is_null: true,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: ColumnId) -> Self {
        Self {
            column,
            is_null: false,
        }
    }
}

impl Predicate for NullCheckPredicate {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        Ok(match row.get(self.column) {
            Some(v) => v.is_null() == self.is_null,
            None => false,
        })
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        Some(vec![self.column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::executor::TableId;
    use crate::storage::expression::test_util::MapRow;

    #[test]
    fn test_null_checks() {
        let c = TableId::new(0).column(0);
        let null_row = MapRow(vec![(c, Value::null_unknown())]);
        let value_row = MapRow(vec![(c, Value::integer(1))]);
        let empty = MapRow(vec![]);

        assert!(NullCheckPredicate::is_null(c).evaluate(&null_row).unwrap());
        assert!(!NullCheckPredicate::is_null(c).evaluate(&value_row).unwrap());
        assert!(NullCheckPredicate::is_not_null(c).evaluate(&value_row).unwrap());
        assert!(!NullCheckPredicate::is_null(c).evaluate(&empty).unwrap());
        assert!(!NullCheckPredicate::is_not_null(c).evaluate(&empty).unwrap());
    }
}
