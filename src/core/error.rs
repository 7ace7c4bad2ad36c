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

//! Error types for joinery
//!
//! Column resolution misses are no-ops and predicate failures only exclude
//! the offending row, so neither reaches the caller. What remains are
//! construction errors for tables and predicates, plus the comparison errors
//! raised by [`Value::compare`](crate::core::Value::compare).

use thiserror::Error;

/// Result type alias for joinery operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Row width does not match the table's column count
    #[error("table columns don't match, expected {expected}, got {got}")]
    TableColumnsNotMatch { expected: usize, got: usize },

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// LIKE pattern could not be compiled
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("cannot compare NULL with non-NULL value")]
    NullComparison,

    #[error("cannot compare incompatible types")]
    IncomparableTypes,

    /// Raised by user predicates that cannot decide a row
    #[error("predicate failed: {0}")]
    PredicateFailed(String),
}

impl Error {
    pub fn table_columns_not_match(expected: usize, got: usize) -> Self {
        Error::TableColumnsNotMatch { expected, got }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn predicate_failed(message: impl Into<String>) -> Self {
        Error::PredicateFailed(message.into())
    }

    /// True for errors raised by a value comparison
    pub fn is_comparison_error(&self) -> bool {
        matches!(self, Error::NullComparison | Error::IncomparableTypes)
    }
}
