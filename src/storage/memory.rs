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

//! Array-backed in-memory table
//!
//! `MemoryTable` is both the default source table and the shape every
//! selection result is materialized into.

use std::fmt;

use crate::core::{Error, Result, Row, Value};

use super::table::TableSource;

/// Rectangular, row-major table of values with optional titles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryTable {
    name: Option<String>,
    column_titles: Vec<Option<String>>,
    row_titles: Vec<Option<String>>,
    rows: Vec<Row>,
}

impl MemoryTable {
    /// Create an empty named table with the given column titles
    pub fn new<I, S>(name: impl Into<String>, column_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            column_titles: column_titles.into_iter().map(|t| Some(t.into())).collect(),
            row_titles: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Create an empty unnamed table with `column_count` untitled columns
    pub fn with_width(column_count: usize) -> Self {
        Self {
            name: None,
            column_titles: vec![None; column_count],
            row_titles: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Start building a named table
    pub fn builder(name: impl Into<String>) -> MemoryTableBuilder {
        MemoryTableBuilder::new(name)
    }

    /// Build a table from a matrix of values
    ///
    /// Every row must be exactly as wide as `column_titles`.
    pub fn from_rows<I, S>(name: Option<String>, column_titles: I, rows: Vec<Row>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self {
            name,
            column_titles: column_titles.into_iter().map(|t| Some(t.into())).collect(),
            row_titles: Vec::with_capacity(rows.len()),
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row, checking its width
    pub fn push_row(&mut self, row: impl Into<Row>) -> Result<()> {
        self.push_titled_row(None, row)
    }

    /// Append a row with an optional row title
    pub fn push_titled_row(&mut self, title: Option<String>, row: impl Into<Row>) -> Result<()> {
        let row = row.into();
        if row.len() != self.column_titles.len() {
            return Err(Error::table_columns_not_match(
                self.column_titles.len(),
                row.len(),
            ));
        }
        self.rows.push(row);
        self.row_titles.push(title);
        Ok(())
    }

    /// Set or clear the table name
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Set the title of an existing column
    pub fn set_column_title(&mut self, column: usize, title: impl Into<String>) -> Result<()> {
        match self.column_titles.get_mut(column) {
            Some(slot) => {
                *slot = Some(title.into());
                Ok(())
            }
            None => Err(Error::ColumnNotFound(column.to_string())),
        }
    }

    /// Index of the first column with the given title
    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.column_titles
            .iter()
            .position(|t| t.as_deref() == Some(title))
    }

    /// Borrow a row
    #[inline]
    pub fn row_at(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// All rows in order
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column titles in order
    pub fn column_titles(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.column_titles.iter().map(|t| t.as_deref())
    }

    /// Consume the table, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableSource for MemoryTable {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn column_count(&self) -> usize {
        self.column_titles.len()
    }

    #[inline]
    fn element_at(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    fn column_title(&self, column: usize) -> Option<&str> {
        self.column_titles.get(column).and_then(|t| t.as_deref())
    }

    fn row_title(&self, row: usize) -> Option<&str> {
        self.row_titles.get(row).and_then(|t| t.as_deref())
    }

    fn row(&self, row: usize) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self.rows.get(row) {
            Some(r) => Box::new(r.iter()),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl fmt::Display for MemoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "{}", name)?;
        }
        let titles: Vec<&str> = self
            .column_titles
            .iter()
            .map(|t| t.as_deref().unwrap_or(""))
            .collect();
        writeln!(f, "{}", titles.join(" | "))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

/// Builder for [`MemoryTable`]
///
/// Row width errors are deferred to `build()` so the builder can be chained.
#[derive(Debug, Clone)]
pub struct MemoryTableBuilder {
    name: String,
    columns: Vec<String>,
    rows: Vec<(Option<String>, Row)>,
}

impl MemoryTableBuilder {
    /// Create a new builder for a named table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Add a column title
    pub fn column(mut self, title: impl Into<String>) -> Self {
        self.columns.push(title.into());
        self
    }

    /// Add several column titles
    pub fn columns<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(titles.into_iter().map(Into::into));
        self
    }

    /// Add a row
    pub fn row(mut self, row: impl Into<Row>) -> Self {
        self.rows.push((None, row.into()));
        self
    }

    /// Add a titled row
    pub fn titled_row(mut self, title: impl Into<String>, row: impl Into<Row>) -> Self {
        self.rows.push((Some(title.into()), row.into()));
        self
    }

    /// Validate row widths and build the table
    pub fn build(self) -> Result<MemoryTable> {
        let mut table = MemoryTable::new(self.name, self.columns);
        for (title, row) in self.rows {
            table.push_titled_row(title, row)?;
        }
        Ok(table)
    }
}
