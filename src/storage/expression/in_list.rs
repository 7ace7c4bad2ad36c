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

//! IN / NOT IN predicate over a constant list

use std::fmt;

use rustc_hash::FxHashSet;

use super::Predicate;
use crate::core::{Result, Value};
use crate::executor::{ColumnId, FilterRow};

/// Membership of a column value in a set of constants
///
/// NULL values never match, in either polarity. NULLs in the list are dropped.
pub struct InListPredicate {
    column: ColumnId,
    values: FxHashSet<Value>,
    negated: bool,
}

impl InListPredicate {
    /// `column IN (values...)`
    pub fn new<I, V>(column: ColumnId, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            column,
            values: values
                .into_iter()
                .map(Into::into)
                .filter(|v: &Value| !v.is_null())
                .collect(),
            negated: false,
        }
    }

    /// `column NOT IN (values...)`
    pub fn not_in<I, V>(column: ColumnId, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut p = Self::new(column, values);
        p.negated = true;
        p
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for InListPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.negated { "NOT IN" } else { "IN" };
        write!(f, "{} {} ({} values)", self.column, op, self.values.len())
    }
}

impl Predicate for InListPredicate {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        match row.get(self.column) {
            Some(v) if !v.is_null() => Ok(self.values.contains(v) != self.negated),
            _ => Ok(false),
        }
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        Some(vec![self.column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::TableId;
    use crate::storage::expression::test_util::MapRow;

    #[test]
    fn test_in_list() {
        let c = TableId::new(0).column(1);
        let p = InListPredicate::new(c, ["eng", "hr"]);
        assert_eq!(p.len(), 2);
        assert!(p.evaluate(&MapRow(vec![(c, Value::text("eng"))])).unwrap());
        assert!(!p.evaluate(&MapRow(vec![(c, Value::text("sales"))])).unwrap());

        let p = InListPredicate::not_in(c, ["eng"]);
        assert!(p.evaluate(&MapRow(vec![(c, Value::text("sales"))])).unwrap());
        assert!(!p.evaluate(&MapRow(vec![(c, Value::null_unknown())])).unwrap());
    }

    #[test]
    fn test_in_list_numeric_cross_type() {
        let c = TableId::new(0).column(0);
        let p = InListPredicate::new(c, [1i64, 2, 3]);
        assert!(p.evaluate(&MapRow(vec![(c, Value::float(2.0))])).unwrap());
        let p = InListPredicate::new(c, vec![Value::integer(1), Value::null_unknown()]);
        assert_eq!(p.len(), 1);
    }
}
