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

//! Hash map aliases
//!
//! Selection state is keyed by small `Copy` handles (`TableId`, `ColumnId`)
//! and by `Value`s, none of which need DoS-resistant hashing. FxHash is used
//! throughout.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::Value;

/// Map keyed by a small `Copy` handle
pub type HandleMap<K, V> = FxHashMap<K, V>;

/// Set of distinct cell values (semi-join intersection sets)
pub type ValueSet = FxHashSet<Value>;

/// Create an empty HandleMap
#[inline]
pub fn new_handle_map<K, V>() -> HandleMap<K, V> {
    FxHashMap::default()
}

/// Create a new ValueSet with the given capacity
#[inline]
pub fn new_value_set_with_capacity(capacity: usize) -> ValueSet {
    FxHashSet::with_capacity_and_hasher(capacity, Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_map_any_key() {
        let mut by_pair: HandleMap<(u32, usize), &str> = new_handle_map();
        by_pair.insert((0, 1), "a");
        assert_eq!(by_pair.get(&(0, 1)), Some(&"a"));

        let mut set = new_value_set_with_capacity(4);
        set.insert(Value::integer(1));
        assert!(set.contains(&Value::float(1.0)));
    }
}
