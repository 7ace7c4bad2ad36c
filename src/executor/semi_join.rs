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

//! Semi-join precomputation
//!
//! For every column-join group the set of values that occur in *all* member
//! columns is computed up front. A row whose join-key value is outside that
//! intersection cannot take part in any joined row, so it can be dropped by
//! the bucket filter before the cross product ever sees it.
//!
//! Membership is necessary but not sufficient: it proves a partner exists
//! somewhere, not that a particular combination matches. The executor still
//! re-checks equality on every composite row.

use crate::common::{new_value_set_with_capacity, ValueSet};
use crate::core::Result;
use crate::storage::expression::Predicate;
use crate::storage::TableSource;

use super::column_join::ColumnJoinGroup;
use super::filter_row::FilterRow;
use super::identity::{ColumnId, TableId};

/// Intersection sets, one per column-join group
#[derive(Debug, Clone, Default)]
pub struct SemiJoinIndex {
    entries: Vec<(Vec<ColumnId>, ValueSet)>,
}

impl SemiJoinIndex {
    /// Scan every member column of every group once
    ///
    /// `resolve` maps a table handle to its source; a member whose table does
    /// not resolve contributes an empty set. NULLs are never members.
    pub fn build<'a, F>(groups: &[ColumnJoinGroup], resolve: F) -> Self
    where
        F: Fn(TableId) -> Option<&'a dyn TableSource>,
    {
        let mut entries = Vec::with_capacity(groups.len());
        for group in groups {
            let mut current: Option<ValueSet> = None;
            for &column in group.members() {
                let source = resolve(column.table());
                let next = match (source, current.as_ref()) {
                    (None, _) => ValueSet::default(),
                    (Some(src), None) => {
                        let mut set = new_value_set_with_capacity(src.row_count());
                        set.extend(src.column(column.index()).filter(|v| !v.is_null()).cloned());
                        set
                    }
                    (Some(src), Some(seen)) => {
                        let mut hits = new_value_set_with_capacity(seen.len());
                        for v in src.column(column.index()) {
                            if seen.contains(v) && !hits.contains(v) {
                                hits.insert(v.clone());
                            }
                        }
                        hits
                    }
                };
                let empty = next.is_empty();
                current = Some(next);
                if empty {
                    break;
                }
            }
            tracing::trace!(
                group = ?group.members(),
                values = current.as_ref().map_or(0, |s| s.len()),
                "semi-join intersection built"
            );
            entries.push((group.members().to_vec(), current.unwrap_or_default()));
        }
        Self { entries }
    }

    /// Number of groups indexed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Intersection set of the `i`-th group
    pub fn values(&self, group: usize) -> Option<&ValueSet> {
        self.entries.get(group).map(|(_, set)| set)
    }

    /// Pruning predicate for one table, or `None` if no group touches it
    pub fn predicate_for(&self, table: TableId) -> Option<SemiJoinPredicate<'_>> {
        let checks: Vec<(ColumnId, &ValueSet)> = self
            .entries
            .iter()
            .flat_map(|(members, set)| {
                members
                    .iter()
                    .filter(move |c| c.table() == table)
                    .map(move |c| (*c, set))
            })
            .collect();
        if checks.is_empty() {
            None
        } else {
            Some(SemiJoinPredicate { checks })
        }
    }
}

/// Rejects rows whose join-key values fall outside the group intersections
#[derive(Debug)]
pub struct SemiJoinPredicate<'s> {
    checks: Vec<(ColumnId, &'s ValueSet)>,
}

impl Predicate for SemiJoinPredicate<'_> {
    fn evaluate(&self, row: &dyn FilterRow) -> Result<bool> {
        Ok(self.checks.iter().all(|(column, set)| match row.get(*column) {
            Some(v) => !v.is_null() && set.contains(v),
            None => false,
        }))
    }

    fn referenced_columns(&self) -> Option<Vec<ColumnId>> {
        Some(self.checks.iter().map(|(c, _)| *c).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::executor::column_join::ColumnJoinRegistry;
    use crate::executor::filter_row::TableRow;
    use crate::row;
    use crate::storage::MemoryTable;

    fn employees() -> MemoryTable {
        MemoryTable::builder("Employees")
            .columns(["id", "dept"])
            .row(row![1, "eng"])
            .row(row![2, "sales"])
            .row(row![3, "eng"])
            .row(row![4, "ops"])
            .row(crate::core::Row::from_values(vec![Value::integer(5), Value::null_unknown()]))
            .build()
            .unwrap()
    }

    fn departments() -> MemoryTable {
        MemoryTable::builder("Departments")
            .columns(["dept", "manager"])
            .row(row!["eng", "Alice"])
            .row(row!["sales", "Bob"])
            .row(row!["hr", "Carol"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_intersection_and_predicate() {
        let emp = employees();
        let dept = departments();
        let (e, d) = (TableId::new(0), TableId::new(1));
        let mut reg = ColumnJoinRegistry::new();
        reg.declare_equal(e.column(1), d.column(0));

        let index = SemiJoinIndex::build(&reg.groups(), |t| match t.index() {
            0 => Some(&emp as &dyn TableSource),
            1 => Some(&dept as &dyn TableSource),
            _ => None,
        });
        assert_eq!(index.len(), 1);
        let set = index.values(0).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Value::text("eng")));
        assert!(set.contains(&Value::text("sales")));

        let pred = index.predicate_for(e).unwrap();
        let kept: Vec<usize> = (0..emp.row_count())
            .filter(|&r| pred.evaluate(&TableRow::new(e, &emp, r)).unwrap())
            .collect();
        // ops has no department, NULL never joins
        assert_eq!(kept, vec![0, 1, 2]);

        let pred = index.predicate_for(d).unwrap();
        assert!(!pred.evaluate(&TableRow::new(d, &dept, 2)).unwrap());
        assert!(index.predicate_for(TableId::new(2)).is_none());
    }

    #[test]
    fn test_unresolved_member_empties_group() {
        let emp = employees();
        let (e, missing) = (TableId::new(0), TableId::new(7));
        let mut reg = ColumnJoinRegistry::new();
        reg.declare_equal(e.column(1), missing.column(0));

        let index = SemiJoinIndex::build(&reg.groups(), |t| {
            (t.index() == 0).then_some(&emp as &dyn TableSource)
        });
        assert!(index.values(0).unwrap().is_empty());
    }
}
