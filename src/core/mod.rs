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

//! Core types and definitions for joinery
//!
//! - [`Operator`] - comparison operators (=, !=, >, <, etc.)
//! - [`SortDirection`] - ORDER BY direction
//! - [`JoinKind`] - how a table participates in a selection
//! - [`Value`] - runtime cell values with type information
//! - [`Row`] - a materialized row
//! - [`Error`] - error types

pub mod error;
pub mod row;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use types::{JoinKind, Operator, SortDirection};
pub use value::{Value, NULL_VALUE};
