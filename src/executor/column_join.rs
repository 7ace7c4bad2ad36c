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

//! Column-join registry
//!
//! Pairwise `a = b` declarations are merged into disjoint equivalence
//! classes ("column-join groups"). Each group is one join condition: every
//! member column must hold the same value in a joined row.
//!
//! Implemented as a disjoint-set forest over [`ColumnId`]s with path
//! compression and union by rank.

use crate::common::{new_handle_map, HandleMap};

use super::identity::{ColumnId, TableId};

type ColumnMap<V> = HandleMap<ColumnId, V>;

/// One equivalence class of mutually equal columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnJoinGroup {
    members: Vec<ColumnId>,
}

impl ColumnJoinGroup {
    /// Member columns in first-declaration order
    #[inline]
    pub fn members(&self) -> &[ColumnId] {
        &self.members
    }

    /// Number of member columns
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members belonging to `table`
    pub fn columns_of(&self, table: TableId) -> impl Iterator<Item = ColumnId> + '_ {
        self.members.iter().copied().filter(move |c| c.table() == table)
    }

    /// True if any member belongs to `table`
    pub fn touches(&self, table: TableId) -> bool {
        self.members.iter().any(|c| c.table() == table)
    }
}

/// Disjoint-set registry of equality-join declarations
#[derive(Debug, Clone, Default)]
pub struct ColumnJoinRegistry {
    /// Dense node index per column
    index: ColumnMap<usize>,
    /// Column of each node, in first-seen order
    columns: Vec<ColumnId>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Declarations received, including degenerate ones
    declarations: usize,
}

impl ColumnJoinRegistry {
    pub fn new() -> Self {
        Self {
            index: new_handle_map(),
            ..Default::default()
        }
    }

    /// Declare `a = b`
    ///
    /// Merges the groups of `a` and `b`, creating either as needed.
    pub fn declare_equal(&mut self, a: ColumnId, b: ColumnId) {
        self.declarations += 1;
        let na = self.node(a);
        let nb = self.node(b);
        self.union(na, nb);
    }

    /// Number of `declare_equal` calls received
    pub fn declaration_count(&self) -> usize {
        self.declarations
    }

    /// True if no column has been declared
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True if `a` and `b` are in the same group
    pub fn same_group(&self, a: ColumnId, b: ColumnId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&na), Some(&nb)) => self.find_const(na) == self.find_const(nb),
            _ => a == b,
        }
    }

    /// The disjoint groups, each with at least two distinct columns
    ///
    /// Groups are ordered by their earliest-declared member; members keep
    /// first-seen order.
    pub fn groups(&self) -> Vec<ColumnJoinGroup> {
        let mut root_slot: ColumnMap<usize> = new_handle_map();
        let mut groups: Vec<ColumnJoinGroup> = Vec::new();
        for (node, &column) in self.columns.iter().enumerate() {
            let root = self.columns[self.find_const(node)];
            let slot = *root_slot.entry(root).or_insert_with(|| {
                groups.push(ColumnJoinGroup {
                    members: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].members.push(column);
        }
        groups.retain(|g| g.members.len() >= 2);
        groups
    }

    fn node(&mut self, column: ColumnId) -> usize {
        if let Some(&n) = self.index.get(&column) {
            return n;
        }
        let n = self.columns.len();
        self.index.insert(column, n);
        self.columns.push(column);
        self.parent.push(n);
        self.rank.push(0);
        n
    }

    fn find(&mut self, mut n: usize) -> usize {
        let mut root = n;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        while self.parent[n] != root {
            let next = self.parent[n];
            self.parent[n] = root;
            n = next;
        }
        root
    }

    fn find_const(&self, mut n: usize) -> usize {
        while self.parent[n] != n {
            n = self.parent[n];
        }
        n
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
    }
}
