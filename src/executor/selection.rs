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

//! Selection executor
//!
//! Runs a normalized selection end to end:
//!
//! 1. Each participating bucket is filtered into a bit vector using its own
//!    predicates, any pushed-down selection predicates and, when enabled, the
//!    semi-join membership check.
//! 2. The surviving rows are combined by the odometer cross product, first
//!    bucket slowest.
//! 3. Every combination is re-checked against the column-join groups, since
//!    semi-join membership proves only that a partner may exist.
//! 4. Remaining selection predicates run on the composite row.
//! 5. Survivors are projected, de-duplicated, ordered and truncated, then
//!    materialized into a new [`MemoryTable`].

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::core::{Result, Row, Value, NULL_VALUE};
use crate::storage::expression::{single_table, Predicate};
use crate::storage::{MemoryTable, TableSource};

use super::bit_filter::filter_bucket;
use super::bucket::{Bucket, BucketOrigin};
use super::column_join::ColumnJoinGroup;
use super::config::SelectionConfig;
use super::cross_product::CrossProduct;
use super::filter_row::{CompositeRow, FilterRow, ProductLayout};
use super::identity::{ColumnId, TableId};
use super::ordering::{compare_keys, stable_sort_by, OrderKey};
use super::plan::SelectionPlan;
use super::semi_join::SemiJoinIndex;

/// Counters collected while executing a selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionStats {
    /// Source rows tested by bucket filters
    pub rows_scanned: usize,
    /// Source rows that passed their bucket filter
    pub rows_kept: usize,
    /// Combinations produced by the cross product
    pub combinations: usize,
    /// Combinations dropped by the join equality re-check
    pub join_rejects: usize,
    /// Predicate evaluations that returned an error
    pub predicate_errors: usize,
    /// Rows in the result
    pub rows_emitted: usize,
}

/// Result of one execution
#[derive(Debug, Clone)]
pub struct SelectionOutput {
    pub table: MemoryTable,
    pub stats: SelectionStats,
    /// Distinct names of the participating tables, in declaration order
    pub source_tables: Vec<String>,
}

/// A normalized, executable selection
///
/// Executing does not consume or change the selection; it can be run again
/// against the (possibly updated) source tables.
pub struct Selection<'a> {
    buckets: Vec<Bucket<'a>>,
    /// Indices of participating buckets, in product order
    participating: Vec<usize>,
    groups: Vec<ColumnJoinGroup>,
    filters: Vec<Box<dyn Predicate + 'a>>,
    /// Filter indices evaluated inside each bucket's filter
    pushed: Vec<Vec<usize>>,
    /// Filter indices evaluated on composite rows
    residual: Vec<usize>,
    projection: Vec<ColumnId>,
    order: Vec<OrderKey>,
    distinct: bool,
    limit: Option<usize>,
    config: SelectionConfig,
}

impl<'a> Selection<'a> {
    pub(crate) fn normalize(plan: SelectionPlan<'a>, config: SelectionConfig) -> Self {
        let SelectionPlan {
            mut buckets,
            joins,
            filters,
            order,
            distinct,
            limit,
            all_columns,
        } = plan;

        let groups = joins.groups();
        let referenced: Vec<Vec<TableId>> = filters
            .iter()
            .map(|f| {
                let mut tables: Vec<TableId> = f
                    .referenced_columns()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| c.table())
                    .collect();
                tables.dedup();
                tables
            })
            .collect();

        let participating: Vec<usize> = buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| {
                let t = b.table();
                b.origin() != BucketOrigin::Included
                    || !b.projection().is_empty()
                    || b.has_predicates()
                    || groups.iter().any(|g| g.touches(t))
                    || referenced.iter().any(|r| r.contains(&t))
            })
            .map(|(i, _)| i)
            .collect();

        // explicit or implicit select-all
        if all_columns || participating.iter().all(|&i| buckets[i].projection().is_empty()) {
            for &i in &participating {
                buckets[i].select_all();
            }
        }
        for &i in &participating {
            buckets[i].assign_join_kind(config.default_join_kind);
        }

        let order: Vec<OrderKey> = order
            .into_iter()
            .filter(|key| {
                let kept = participating.contains(&key.column.table().index());
                if !kept {
                    tracing::debug!(column = %key.column, "order key ignored, table does not participate");
                }
                kept
            })
            .collect();

        let mut pushed = vec![Vec::new(); buckets.len()];
        let mut residual = Vec::new();
        for (i, filter) in filters.iter().enumerate() {
            let target = single_table(filter.as_ref())
                .filter(|_| config.predicate_pushdown)
                .filter(|t| participating.contains(&t.index()));
            match target {
                Some(t) => pushed[t.index()].push(i),
                None => residual.push(i),
            }
        }

        let projection: Vec<ColumnId> = participating
            .iter()
            .flat_map(|&i| buckets[i].selected_columns())
            .collect();

        tracing::debug!(
            tables = buckets.len(),
            participating = participating.len(),
            join_groups = groups.len(),
            pushed_down = filters.len() - residual.len(),
            columns = projection.len(),
            "selection normalized"
        );

        Self {
            buckets,
            participating,
            groups,
            filters,
            pushed,
            residual,
            projection,
            order,
            distinct,
            limit,
            config,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Handles of the participating tables, in product order
    pub fn tables(&self) -> impl Iterator<Item = TableId> + '_ {
        self.participating.iter().map(|&i| self.buckets[i].table())
    }

    /// Join conditions after transitive merging
    pub fn join_groups(&self) -> &[ColumnJoinGroup] {
        &self.groups
    }

    /// Projected columns, bucket order then selection order
    pub fn columns(&self) -> &[ColumnId] {
        &self.projection
    }

    /// Distinct names of the participating tables, in declaration order
    pub fn source_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.participating_sources().filter_map(|s| s.name()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Name given to the result table
    ///
    /// No participating tables gives no name; one gives that table's name;
    /// several give their distinct names joined by a space.
    pub fn result_name(&self) -> Option<String> {
        match self.participating.as_slice() {
            [] => None,
            [only] => self.buckets[*only].source().name().map(str::to_string),
            _ => {
                let names = self.source_tables();
                (!names.is_empty()).then(|| names.join(" "))
            }
        }
    }

    /// Run the selection and materialize the result
    pub fn execute(&self) -> Result<SelectionOutput> {
        let layout = ProductLayout::new(
            self.buckets.len(),
            self.participating
                .iter()
                .map(|&i| (self.buckets[i].table(), self.buckets[i].source())),
        );
        let mut stats = SelectionStats::default();

        let semi_join = (self.config.semi_join && !self.groups.is_empty())
            .then(|| SemiJoinIndex::build(&self.groups, |t| self.source_of(t)));

        let mut inputs: Vec<Vec<usize>> = Vec::with_capacity(self.participating.len());
        for &i in &self.participating {
            let bucket = &self.buckets[i];
            let semi = semi_join.as_ref().and_then(|idx| idx.predicate_for(bucket.table()));

            let mut predicates: Vec<&dyn Predicate> = bucket.predicates().map(|p| p as &dyn Predicate).collect();
            predicates.extend(self.pushed[i].iter().map(|&f| self.filters[f].as_ref() as &dyn Predicate));
            if let Some(semi) = &semi {
                predicates.push(semi);
            }

            let result = filter_bucket(bucket.table(), bucket.source(), &predicates);
            tracing::trace!(
                table = %bucket.table(),
                scanned = result.scanned(),
                kept = result.kept(),
                "bucket filtered"
            );
            stats.rows_scanned += result.scanned();
            stats.rows_kept += result.kept();
            stats.predicate_errors += result.errors();
            inputs.push(result.rows());
        }

        // without ordering the limit can stop enumeration early
        let early_limit = if self.order.is_empty() { self.limit } else { None };
        let mut seen: FxHashSet<Row> = FxHashSet::default();
        let mut collected: Vec<(Row, Vec<Option<Value>>)> = Vec::new();

        if early_limit != Some(0) {
            for indices in CrossProduct::new(&inputs) {
                stats.combinations += 1;
                let composite = layout.row(&indices);

                if !self.joins_hold(&composite) {
                    stats.join_rejects += 1;
                    continue;
                }
                match self.residual_pass(&composite) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        stats.predicate_errors += 1;
                        tracing::debug!(rows = ?composite.indices(), error = %err, "selection predicate failed, row excluded");
                        continue;
                    }
                }

                let row: Row = self
                    .projection
                    .iter()
                    .map(|c| composite.get(*c).cloned().unwrap_or(NULL_VALUE))
                    .collect();
                if self.distinct && !seen.insert(row.clone()) {
                    continue;
                }
                let keys = self.order.iter().map(|k| composite.get(k.column).cloned()).collect();
                collected.push((row, keys));

                if early_limit == Some(collected.len()) {
                    break;
                }
            }
        }

        if !self.order.is_empty() {
            stable_sort_by(&mut collected, |a, b| compare_keys(&self.order, &a.1, &b.1));
        }
        if let Some(limit) = self.limit {
            collected.truncate(limit);
        }
        stats.rows_emitted = collected.len();

        let titles: Vec<String> = self.projection.iter().map(|c| self.column_title(*c)).collect();
        let rows = collected.into_iter().map(|(row, _)| row).collect();
        let table = MemoryTable::from_rows(self.result_name(), titles, rows)?;

        if self.config.collect_stats {
            tracing::debug!(
                rows_scanned = stats.rows_scanned,
                rows_kept = stats.rows_kept,
                combinations = stats.combinations,
                join_rejects = stats.join_rejects,
                predicate_errors = stats.predicate_errors,
                rows_emitted = stats.rows_emitted,
                "selection executed"
            );
        } else {
            stats = SelectionStats::default();
        }

        Ok(SelectionOutput {
            table,
            stats,
            source_tables: self.source_tables(),
        })
    }

    /// Run the selection and return only the result table
    pub fn table(&self) -> Result<MemoryTable> {
        self.execute().map(|out| out.table)
    }

    /// Result rows grouped by their first column, ordered by key
    ///
    /// Rows keep their result order within a key. A result with no columns
    /// gives an empty map.
    pub fn sorted_map(&self) -> Result<BTreeMap<Value, Vec<Row>>> {
        let table = self.table()?;
        let mut map: BTreeMap<Value, Vec<Row>> = BTreeMap::new();
        if table.column_count() == 0 {
            return Ok(map);
        }
        for row in table.into_rows() {
            if let Some(key) = row.get(0).cloned() {
                map.entry(key).or_default().push(row);
            }
        }
        Ok(map)
    }

    fn participating_sources(&self) -> impl Iterator<Item = &'a dyn TableSource> + '_ {
        self.participating.iter().map(|&i| self.buckets[i].source())
    }

    fn source_of(&self, table: TableId) -> Option<&'a dyn TableSource> {
        self.buckets.get(table.index()).map(|b| b.source())
    }

    /// Every group's members present, non-null and equal
    ///
    /// `Value` equality is transitive, so each member is checked against
    /// the first.
    fn joins_hold(&self, row: &CompositeRow<'_, '_>) -> bool {
        self.groups.iter().all(|group| {
            let mut members = group.members().iter().map(|c| row.get(*c));
            let Some(Some(first)) = members.next() else {
                return false;
            };
            !first.is_null() && members.all(|v| v.is_some_and(|v| first.join_eq(v)))
        })
    }

    fn residual_pass(&self, row: &CompositeRow<'_, '_>) -> Result<bool> {
        for &f in &self.residual {
            if !self.filters[f].evaluate(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `"<table name>.<column title>"`, missing parts rendered empty
    fn column_title(&self, column: ColumnId) -> String {
        let source = self.source_of(column.table());
        let table = source.and_then(|s| s.name()).unwrap_or("");
        let title = source.and_then(|s| s.column_title(column.index())).unwrap_or("");
        format!("{table}.{title}")
    }
}

impl std::fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("buckets", &self.buckets)
            .field("participating", &self.participating)
            .field("groups", &self.groups)
            .field("filters", &self.filters.len())
            .field("projection", &self.projection)
            .field("order", &self.order)
            .field("distinct", &self.distinct)
            .field("limit", &self.limit)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, JoinKind, Operator};
    use crate::row;
    use crate::storage::expression::{predicate_fn, ComparisonPredicate};

    fn employees() -> MemoryTable {
        MemoryTable::builder("Employees")
            .columns(["id", "dept"])
            .row(row![1, "eng"])
            .row(row![2, "sales"])
            .row(row![3, "eng"])
            .build()
            .unwrap()
    }

    fn departments() -> MemoryTable {
        MemoryTable::builder("Departments")
            .columns(["dept", "manager"])
            .row(row!["eng", "Alice"])
            .row(row!["sales", "Bob"])
            .build()
            .unwrap()
    }

    fn join_plan<'a>(emp: &'a MemoryTable, dept: &'a MemoryTable) -> (SelectionPlan<'a>, TableId, TableId) {
        let mut plan = SelectionPlan::new();
        let e = plan.add_table(emp, BucketOrigin::Base);
        let d = plan.add_table(dept, BucketOrigin::Joined);
        plan.select_column(e.column(0));
        plan.select_column(e.column(1));
        plan.select_column(d.column(1));
        plan.declare_equal(e.column(1), d.column(0));
        (plan, e, d)
    }

    #[test]
    fn test_join_stats_and_titles() {
        let (emp, dept) = (employees(), departments());
        let (plan, _, _) = join_plan(&emp, &dept);
        let out = plan.build(SelectionConfig::default()).execute().unwrap();

        assert_eq!(out.table.rows(), &[row![1, "eng", "Alice"], row![2, "sales", "Bob"], row![3, "eng", "Alice"]]);
        assert_eq!(
            out.table.column_titles().collect::<Vec<_>>(),
            vec![Some("Employees.id"), Some("Employees.dept"), Some("Departments.manager")]
        );
        assert_eq!(out.table.name(), Some("Employees Departments"));
        assert_eq!(out.source_tables, vec!["Employees".to_string(), "Departments".to_string()]);
        assert_eq!(out.stats.rows_scanned, 5);
        assert_eq!(out.stats.combinations, 6);
        assert_eq!(out.stats.join_rejects, 3);
        assert_eq!(out.stats.rows_emitted, 3);
    }

    #[test]
    fn test_semi_join_prunes_without_changing_result() {
        let (emp, dept) = (employees(), departments());
        let with = {
            let (plan, _, _) = join_plan(&emp, &dept);
            plan.build(SelectionConfig::default()).execute().unwrap()
        };
        let without = {
            let (plan, _, _) = join_plan(&emp, &dept);
            plan.build(SelectionConfig::exhaustive()).execute().unwrap()
        };
        assert_eq!(with.table, without.table);
        assert_eq!(without.stats.combinations, 6);
        assert!(with.stats.combinations <= without.stats.combinations);
    }

    #[test]
    fn test_pushdown_equivalence() {
        let (emp, dept) = (employees(), departments());
        let run = |config: SelectionConfig| {
            let (mut plan, e, _) = join_plan(&emp, &dept);
            plan.add_filter(Box::new(ComparisonPredicate::with_value(
                e.column(0),
                Operator::Gt,
                Value::integer(1),
            )));
            plan.build(config).execute().unwrap()
        };
        let pushed = run(SelectionConfig::default().with_semi_join(false));
        let residual = run(SelectionConfig::exhaustive());
        assert_eq!(pushed.table, residual.table);
        assert_eq!(pushed.table.row_count(), 2);
        // pushed down, the filtered employee never reaches the product
        assert_eq!(pushed.stats.combinations, 4);
        assert_eq!(residual.stats.combinations, 6);
    }

    #[test]
    fn test_residual_predicate_errors_are_counted() {
        let (emp, dept) = (employees(), departments());
        let (mut plan, e, _) = join_plan(&emp, &dept);
        plan.add_filter(Box::new(predicate_fn(move |row| {
            match row.get(e.column(0)).and_then(|v| v.as_int64()) {
                Some(2) => Err(Error::predicate_failed("no sales")),
                _ => Ok(true),
            }
        })));
        let out = plan.build(SelectionConfig::default()).execute().unwrap();
        assert_eq!(out.table.row_count(), 2);
        assert_eq!(out.stats.predicate_errors, 1);
    }

    #[test]
    fn test_quiet_config_skips_stats() {
        let emp = employees();
        let mut plan = SelectionPlan::new();
        plan.add_table(&emp, BucketOrigin::Base);
        let out = plan.build(SelectionConfig::quiet()).execute().unwrap();
        assert_eq!(out.table.row_count(), 3);
        assert_eq!(out.stats, SelectionStats::default());
    }

    #[test]
    fn test_included_table_participation() {
        let (emp, dept) = (employees(), departments());
        let mut plan = SelectionPlan::new();
        let e = plan.add_table(&emp, BucketOrigin::Base);
        plan.add_table(&dept, BucketOrigin::Included);
        plan.select_column(e.column(0));
        let selection = plan.build(SelectionConfig::default());

        assert_eq!(selection.tables().collect::<Vec<_>>(), vec![e]);
        assert_eq!(selection.buckets[0].join_kind(), Some(JoinKind::Inner));
        assert_eq!(selection.buckets[1].join_kind(), None);
        assert_eq!(selection.result_name().as_deref(), Some("Employees"));
        assert_eq!(selection.table().unwrap().row_count(), 3);
    }

    #[test]
    fn test_order_key_on_absent_table_is_dropped() {
        let (emp, dept) = (employees(), departments());
        let mut plan = SelectionPlan::new();
        let e = plan.add_table(&emp, BucketOrigin::Base);
        let d = plan.add_table(&dept, BucketOrigin::Included);
        plan.select_column(e.column(0));
        plan.add_order(OrderKey::ascending(d.column(1)));
        plan.add_order(OrderKey::descending(e.column(0)));
        let selection = plan.build(SelectionConfig::default());

        assert_eq!(selection.order.len(), 1);
        assert_eq!(selection.order[0].column, e.column(0));
        assert_eq!(selection.table().unwrap().rows(), &[row![3], row![2], row![1]]);
    }

    #[test]
    fn test_unnamed_table_titles() {
        let mut t = MemoryTable::with_width(2);
        t.push_row(row![1, 2]).unwrap();
        let mut plan = SelectionPlan::new();
        plan.add_table(&t, BucketOrigin::Base);
        let out = plan.build(SelectionConfig::default()).execute().unwrap();
        assert_eq!(out.table.name(), None);
        assert_eq!(out.table.column_titles().collect::<Vec<_>>(), vec![Some("."), Some(".")]);
        assert!(out.source_tables.is_empty());
    }

    #[test]
    fn test_sorted_map_groups_by_first_column() {
        let emp = employees();
        let mut plan = SelectionPlan::new();
        let e = plan.add_table(&emp, BucketOrigin::Base);
        plan.select_column(e.column(1));
        plan.select_column(e.column(0));
        let map = plan.build(SelectionConfig::default()).sorted_map().unwrap();

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![Value::text("eng"), Value::text("sales")]);
        assert_eq!(map[&Value::text("eng")], vec![row!["eng", 1], row!["eng", 3]]);
    }
}
