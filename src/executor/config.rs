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

//! Selection executor configuration
//!

use crate::core::JoinKind;

/// Knobs for one selection execution
///
/// None of these change which rows a selection returns, only how much work
/// is done to find them and what is recorded along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Prune bucket rows with the semi-join intersection sets before the
    /// cross product
    /// Default: true
    pub semi_join: bool,

    /// Join kind assigned to tables that enter the selection without an
    /// explicit join (the base table and included tables). Recorded on the
    /// bucket for introspection only; execution is always an inner join.
    /// Default: Inner
    pub default_join_kind: JoinKind,

    /// Populate `SelectionStats` and log them at debug level
    /// Default: true
    pub collect_stats: bool,

    /// Push single-table selection predicates down into bucket filters
    /// Default: true
    pub predicate_pushdown: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            semi_join: true,
            default_join_kind: JoinKind::Inner,
            collect_stats: true,
            predicate_pushdown: true,
        }
    }
}

impl SelectionConfig {
    /// Creates a new SelectionConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain nested enumeration: no pruning, no pushdown
    ///
    /// Every row of every participating table reaches the cross product.
    /// Useful as a reference when checking an optimized run.
    pub fn exhaustive() -> Self {
        Self {
            semi_join: false,
            predicate_pushdown: false,
            ..Self::default()
        }
    }

    /// Defaults without statistics bookkeeping
    pub fn quiet() -> Self {
        Self {
            collect_stats: false,
            ..Self::default()
        }
    }

    pub fn with_semi_join(mut self, enabled: bool) -> Self {
        self.semi_join = enabled;
        self
    }

    pub fn with_predicate_pushdown(mut self, enabled: bool) -> Self {
        self.predicate_pushdown = enabled;
        self
    }

    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.collect_stats = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let c = SelectionConfig::new();
        assert!(c.semi_join && c.predicate_pushdown && c.collect_stats);
        assert_eq!(c.default_join_kind, JoinKind::Inner);

        let c = SelectionConfig::exhaustive();
        assert!(!c.semi_join && !c.predicate_pushdown);
        assert!(c.collect_stats);

        assert!(!SelectionConfig::quiet().collect_stats);
        assert!(!SelectionConfig::new().with_semi_join(false).semi_join);
    }
}
