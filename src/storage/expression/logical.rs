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

//! Logical predicates (AND, OR, NOT)

use super::{union_columns, Predicate};
use crate::core::Result;
use crate::executor::{ColumnId, FilterRow};

/// True if all children are true; short-circuits on the first false
///
/// An empty AND is true.
#[derive(Debug, Default)]
pub struct AndPredicate<'a> {
    children: Vec<Box<dyn Predicate + 'a>>,
}

impl<'a> AndPredicate<'a> {
    pub fn new(children: Vec<Box<dyn Predicate + 'a>>) -> Self {
        Self { children }
    }

    /// AND of two predicates
    pub fn and(left: impl Predicate + 'a, right: impl Predicate + 'a) -> Self {
        Self::new(vec![Box::new(left), Box::new(right)])
    }

    pub fn push(&mut self, predicate: impl Predicate + 'a) {
        self.children.push(Box::new(predicate));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Predicate for AndPredicate<'_> {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        for child in &self.children {
            if !child.evaluate(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        union_columns(self.children.iter())
    }
}

/// True if any child is true; short-circuits on the first true
///
/// An empty OR is false.
#[derive(Debug, Default)]
pub struct OrPredicate<'a> {
    children: Vec<Box<dyn Predicate + 'a>>,
}

impl<'a> OrPredicate<'a> {
    pub fn new(children: Vec<Box<dyn Predicate + 'a>>) -> Self {
        Self { children }
    }

    /// OR of two predicates
    pub fn or(left: impl Predicate + 'a, right: impl Predicate + 'a) -> Self {
        Self::new(vec![Box::new(left), Box::new(right)])
    }

    pub fn push(&mut self, predicate: impl Predicate + 'a) {
        self.children.push(Box::new(predicate));
    }
}

impl Predicate for OrPredicate<'_> {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        for child in &self.children {
            if child.evaluate(row)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        union_columns(self.children.iter())
    }
}

/// Negation of a child predicate
///
/// Errors from the child propagate rather than being negated.
#[derive(Debug)]
pub struct NotPredicate<'a> {
    inner: Box<dyn Predicate + 'a>,
}

impl<'a> NotPredicate<'a> {
    pub fn new(inner: impl Predicate + 'a) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Predicate for NotPredicate<'_> {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        Ok(!self.inner.evaluate(row)?)
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        self.inner.referenced_columns()
    }
}
