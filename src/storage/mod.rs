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

//! Storage module
//!
//! This module contains the table-facing components:
//! - The `TableSource` access contract every input table satisfies
//! - `MemoryTable`, the array-backed table results are materialized into
//! - The predicate system used for row filtering

pub mod expression;
pub mod memory;
pub mod table;

pub use memory::{MemoryTable, MemoryTableBuilder};
pub use table::TableSource;

// Re-export predicate types at storage level for convenience
pub use expression::{
    predicate_fn, AndPredicate, ComparisonPredicate, FnPredicate, InListPredicate, LikePredicate,
    NotPredicate, NullCheckPredicate, Operand, OrPredicate, Predicate,
};
