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

//! Comparison predicate: `column <op> constant` or `column <op> column`

use crate::core::{Operator, Result, Value};
use crate::executor::{ColumnId, FilterRow};

use super::Predicate;

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A constant
    Value(Value),
    /// Another column of the same (composite) row
    Column(ColumnId),
}

/// Compares one column against a constant or another column
///
/// NULL on either side, or a column that does not resolve, makes the
/// comparison false. Equality works across any two types; ordering
/// operators on incomparable types are an evaluation error.
#[derive(Debug, Clone)]
pub struct ComparisonPredicate {
    column: ColumnId,
    operator: Operator,
    operand: Operand,
}

impl ComparisonPredicate {
    pub fn new(column: ColumnId, operator: Operator, operand: Operand) -> Self {
        Self {
            column,
            operator,
            operand,
        }
    }

    /// `column <op> value`
    pub fn with_value(column: ColumnId, operator: Operator, value: impl Into<Value>) -> Self {
        Self::new(column, operator, Operand::Value(value.into()))
    }

    /// `column <op> other`
    pub fn with_column(column: ColumnId, operator: Operator, other: ColumnId) -> Self {
        Self::new(column, operator, Operand::Column(other))
    }

    pub fn column(&self) -> ColumnId {
        self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }
}

impl Predicate for ComparisonPredicate {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        let left = match row.get(self.column) {
            Some(v) if !v.is_null() => v,
            _ => return Ok(false),
        };
        let right = match &self.operand {
            Operand::Value(v) => v,
            Operand::Column(c) => match row.get(*c) {
                Some(v) => v,
                None => return Ok(false),
            },
        };
        if right.is_null() {
            return Ok(false);
        }

        match self.operator {
            Operator::Eq => Ok(left == right),
            Operator::Ne => Ok(left != right),
            op => Ok(op.matches(left.compare(right)?)),
        }
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        match &self.operand {
            Operand::Value(_) => Some(vec![self.column]),
            Operand::Column(other) => Some(vec![self.column, *other]),
        }
    }
}
