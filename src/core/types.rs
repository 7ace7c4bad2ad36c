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

//! Core type definitions for joinery
//!
//! This module defines the small enumerations shared by every layer:
//! Operator, SortDirection and JoinKind.

use std::fmt;
use std::str::FromStr;

use super::error::Error;

/// Comparison operators used by [`ComparisonPredicate`](crate::storage::expression::ComparisonPredicate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operator {
    /// Equality (=)
    Eq = 0,

    /// Inequality (!=)
    Ne = 1,

    /// Greater than (>)
    Gt = 2,

    /// Greater than or equal (>=)
    Gte = 3,

    /// Less than (<)
    Lt = 4,

    /// Less than or equal (<=)
    Lte = 5,
}

impl Operator {
    /// Returns the negation of this operator
    pub fn negate(&self) -> Self {
        match self {
            Operator::Eq => Operator::Ne,
            Operator::Ne => Operator::Eq,
            Operator::Gt => Operator::Lte,
            Operator::Gte => Operator::Lt,
            Operator::Lt => Operator::Gte,
            Operator::Lte => Operator::Gt,
        }
    }

    /// Returns true if `ordering` (left compared to right) satisfies this operator
    pub fn matches(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Operator::Eq => ordering == Equal,
            Operator::Ne => ordering != Equal,
            Operator::Gt => ordering == Greater,
            Operator::Gte => ordering != Less,
            Operator::Lt => ordering == Less,
            Operator::Lte => ordering != Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::Ne => write!(f, "!="),
            Operator::Gt => write!(f, ">"),
            Operator::Gte => write!(f, ">="),
            Operator::Lt => write!(f, "<"),
            Operator::Lte => write!(f, "<="),
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            _ => Err(Error::invalid_argument(format!("unknown operator: {}", s))),
        }
    }
}

/// Direction of one ORDER BY key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply the direction to an ascending ordering
    #[inline]
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

/// How a table participates in a selection
///
/// Only inner equality joins are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "INNER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_operator_matches() {
        assert!(Operator::Eq.matches(Ordering::Equal));
        assert!(!Operator::Eq.matches(Ordering::Less));
        assert!(Operator::Gte.matches(Ordering::Equal));
        assert!(Operator::Gte.matches(Ordering::Greater));
        assert!(!Operator::Lt.matches(Ordering::Greater));
        for op in [
            Operator::Eq,
            Operator::Ne,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
        ] {
            for ord in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
                assert_ne!(op.matches(ord), op.negate().matches(ord));
            }
        }
    }

    #[test]
    fn test_operator_round_trip_display() {
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::Ne);
        assert_eq!(Operator::Lte.to_string(), "<=");
        assert!("LIKE".parse::<Operator>().is_err());
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Less),
            Ordering::Greater
        );
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
        assert_eq!(JoinKind::default(), JoinKind::Inner);
    }
}
