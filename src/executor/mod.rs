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
//! Turns a declared selection into a materialized table.
//!
//! # Pipeline
//!
//! ```text
//! SelectionPlan (declarations)
//!   ↓  normalize: participation, implicit select-all, pushdown
//! Selection
//!   ↓  per bucket: bit-vector filter (local + pushed-down + semi-join)
//! CrossProduct (odometer, first bucket slowest)
//!   ↓  join-group equality re-check, selection predicates
//! distinct → order → limit → project
//!   ↓
//! MemoryTable
//! ```
//!
//! # Components
//!
//! - [`ColumnJoinRegistry`] - union-find over equality declarations
//! - [`SemiJoinIndex`] - per-group value intersections for pruning
//! - [`filter_bucket`] - one-pass bit-vector filtering of a table
//! - [`CrossProduct`] - combinations of the filtered rows
//! - [`Selection`] - the executor itself

pub mod bit_filter;
pub mod bucket;
pub mod column_join;
pub mod config;
pub mod cross_product;
pub mod filter_row;
pub mod identity;
pub mod ordering;
pub mod plan;
pub mod selection;
pub mod semi_join;

pub use bit_filter::{filter_bucket, FilterResult};
pub use bucket::{Bucket, BucketOrigin, Projection};
pub use column_join::{ColumnJoinGroup, ColumnJoinRegistry};
pub use config::SelectionConfig;
pub use cross_product::CrossProduct;
pub use filter_row::{CompositeRow, FilterRow, ProductLayout, RowIndices, TableRow};
pub use identity::{ColumnId, TableId};
pub use ordering::OrderKey;
pub use plan::SelectionPlan;
pub use selection::{Selection, SelectionOutput, SelectionStats};
pub use semi_join::{SemiJoinIndex, SemiJoinPredicate};
