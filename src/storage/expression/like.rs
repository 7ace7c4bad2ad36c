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

//! LIKE predicate for SQL-style pattern matching
//!
//! - `%` matches any sequence of characters (including empty)
//! - `_` matches any single character
//!
//! Non-text values are matched against their display form, so
//! `id LIKE '1%'` works on an integer column.

use std::fmt;

use regex::Regex;

use super::Predicate;
use crate::core::{Error, Result};
use crate::executor::{ColumnId, FilterRow};

/// Matches a column value against a LIKE pattern
pub struct LikePredicate {
    column: ColumnId,
    pattern: String,
    case_insensitive: bool,
    negated: bool,
    regex: Regex,
}

impl LikePredicate {
    /// `column LIKE pattern`
    pub fn new(column: ColumnId, pattern: impl Into<String>) -> Result<Self> {
        Self::build(column, pattern.into(), false, false)
    }

    /// `column ILIKE pattern` (case-insensitive)
    pub fn new_ilike(column: ColumnId, pattern: impl Into<String>) -> Result<Self> {
        Self::build(column, pattern.into(), true, false)
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(column: ColumnId, pattern: impl Into<String>) -> Result<Self> {
        Self::build(column, pattern.into(), false, true)
    }

    fn build(column: ColumnId, pattern: String, case_insensitive: bool, negated: bool) -> Result<Self> {
        let regex = compile_pattern(&pattern, case_insensitive)
            .map_err(|e| Error::invalid_pattern(&pattern, e.to_string()))?;
        Ok(Self {
            column,
            pattern,
            case_insensitive,
            negated,
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Translate a LIKE pattern into an anchored regex
fn compile_pattern(pattern: &str, case_insensitive: bool) -> std::result::Result<Regex, regex::Error> {
    let mut regex_pattern = String::with_capacity(pattern.len() * 2 + 8);
    // wildcards must also match newlines
    regex_pattern.push_str(if case_insensitive { "(?is)" } else { "(?s)" });
    regex_pattern.push('^');
    for c in pattern.chars() {
        match c {
            '%' => regex_pattern.push_str(".*"),
            '_' => regex_pattern.push('.'),
            c => regex_pattern.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    regex_pattern.push('$');
    Regex::new(&regex_pattern)
}

impl fmt::Debug for LikePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match (self.negated, self.case_insensitive) {
            (false, false) => "LIKE",
            (false, true) => "ILIKE",
            (true, false) => "NOT LIKE",
            (true, true) => "NOT ILIKE",
        };
        write!(f, "{} {} '{}'", self.column, op, self.pattern)
    }
}

impl Predicate for LikePredicate {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        let value = match row.get(self.column) {
            Some(v) if !v.is_null() => v,
            _ => return Ok(false),
        };
        let matched = match value.as_str() {
            Some(s) => self.regex.is_match(s),
            None => self.regex.is_match(&value.to_string()),
        };
        Ok(matched != self.negated)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        Some(vec![self.column])
    }
}
