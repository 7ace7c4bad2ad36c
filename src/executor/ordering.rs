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

//! Multi-key row ordering
//!
//! Rows are compared key by key. At each level a missing value, a NULL on
//! either side or a pair of incomparable values does not decide, and the
//! comparison falls through to the next key. Because such levels make the
//! comparator non-transitive, sorting uses a stable merge sort that never
//! relies on the comparator being a total order.

use std::cmp::Ordering;

use crate::core::{SortDirection, Value};

use super::identity::ColumnId;

/// One ORDER BY key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl OrderKey {
    pub fn new(column: ColumnId, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    pub fn ascending(column: ColumnId) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: ColumnId) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

/// Compare two rows' key values level by level
///
/// `a[i]` and `b[i]` are the values of `keys[i]`, `None` when the column was
/// not present in the row.
pub fn compare_keys(keys: &[OrderKey], a: &[Option<Value>], b: &[Option<Value>]) -> Ordering {
    for (level, key) in keys.iter().enumerate() {
        let (Some(Some(av)), Some(Some(bv))) = (a.get(level), b.get(level)) else {
            continue;
        };
        if av.is_null() || bv.is_null() {
            continue;
        }
        match av.compare(bv) {
            Ok(Ordering::Equal) | Err(_) => continue,
            Ok(ord) => return key.direction.apply(ord),
        }
    }
    Ordering::Equal
}

/// Stable bottom-up merge sort
///
/// Ties keep their input order. The comparator only needs to be
/// deterministic; an inconsistent one yields some permutation, never a panic.
pub fn stable_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch: Vec<usize> = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        scratch.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                // right side wins only when strictly smaller
                if compare(&items[order[j]], &items[order[i]]) == Ordering::Less {
                    scratch.push(order[j]);
                    j += 1;
                } else {
                    scratch.push(order[i]);
                    i += 1;
                }
            }
            scratch.extend_from_slice(&order[i..mid]);
            scratch.extend_from_slice(&order[j..end]);
            start = end;
        }
        std::mem::swap(&mut order, &mut scratch);
        width *= 2;
    }

    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.into_iter().filter_map(|idx| slots[idx].take()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::TableId;

    fn keys() -> Vec<OrderKey> {
        let t = TableId::new(0);
        vec![OrderKey::ascending(t.column(0)), OrderKey::descending(t.column(1))]
    }

    fn vals(a: Option<i64>, b: Option<i64>) -> Vec<Option<Value>> {
        vec![a.map(Value::integer), b.map(Value::integer)]
    }

    #[test]
    fn test_compare_levels() {
        let k = keys();
        assert_eq!(compare_keys(&k, &vals(Some(1), Some(0)), &vals(Some(2), Some(0))), Ordering::Less);
        // first level ties, second is descending
        assert_eq!(compare_keys(&k, &vals(Some(1), Some(5)), &vals(Some(1), Some(3))), Ordering::Less);
        // missing first level falls through
        assert_eq!(compare_keys(&k, &vals(None, Some(1)), &vals(Some(9), Some(2))), Ordering::Greater);
        assert_eq!(compare_keys(&k, &vals(None, None), &vals(Some(9), Some(2))), Ordering::Equal);
    }

    #[test]
    fn test_null_and_incomparable_do_not_decide() {
        let k = keys();
        let a = vec![Some(Value::null_unknown()), Some(Value::integer(1))];
        let b = vec![Some(Value::integer(3)), Some(Value::integer(2))];
        assert_eq!(compare_keys(&k, &a, &b), Ordering::Greater);

        let a = vec![Some(Value::text("x")), Some(Value::integer(1))];
        assert_eq!(compare_keys(&k, &a, &b), Ordering::Greater);
    }

    #[test]
    fn test_stable_sort() {
        let mut items = vec![(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        stable_sort_by(&mut items, |x, y| x.0.cmp(&y.0));
        assert_eq!(items, vec![(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);

        let mut one = vec![7];
        stable_sort_by(&mut one, |a: &i32, b| a.cmp(b));
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_sort_tolerates_inconsistent_comparator() {
        let mut items: Vec<u32> = (0..50).rev().collect();
        stable_sort_by(&mut items, |a, b| if (a + b) % 3 == 0 { Ordering::Equal } else { a.cmp(b) });
        assert_eq!(items.len(), 50);
    }
}
