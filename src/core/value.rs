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

//! Cell values
//!
//! Every table taking part in a selection exposes its cells as [`Value`], so
//! join keys from different tables can be hashed, intersected and compared
//! against each other.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::{Error, Result};

/// A single cell
///
/// Text uses `Arc<str>` so that projecting a joined row into the result
/// table clones a pointer, not the string.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(Arc<str>),
    Boolean(bool),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
}

/// NULL, usable in const contexts and as a fill-in for missing cells
pub const NULL_VALUE: Value = Value::Null;

impl Value {
    pub fn null_unknown() -> Self {
        Value::Null
    }

    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    pub fn text(value: impl AsRef<str>) -> Self {
        Value::Text(Arc::from(value.as_ref()))
    }

    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Lowercase name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
            Value::Timestamp(_) => "timestamp",
        }
    }

    /// Integer view; floats truncate, numeric text parses
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            Value::Text(s) => s.parse().ok(),
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::Null | Value::Timestamp(_) => None,
        }
    }

    /// Borrow the text of a `Text` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering between two values
    ///
    /// Two NULLs are equal; NULL against anything else is
    /// [`Error::NullComparison`]. Integers and floats compare by exact
    /// numeric value, without rounding the integer to `f64`.
    /// Any other mix of variants is [`Error::IncomparableTypes`].
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) | (_, Value::Null) => Err(Error::NullComparison),
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(total_cmp_nan_last(*a, *b)),
            (Value::Integer(a), Value::Float(b)) => Ok(cmp_int_float(*a, *b)),
            (Value::Float(a), Value::Integer(b)) => Ok(cmp_int_float(*b, *a).reverse()),
            _ => Err(Error::IncomparableTypes),
        }
    }

    /// Join equality: both sides non-NULL and equal
    ///
    /// A NULL never satisfies a join, not even against another NULL.
    #[inline]
    pub fn join_eq(&self, other: &Value) -> bool {
        !self.is_null() && !other.is_null() && self == other
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::Timestamp(_) => 4,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            // whole floats print without a fractional part
            Value::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Timestamp(t) => f.write_str(&t.to_rfc3339()),
        }
    }
}

/// NULL equals NULL here so that rows can be deduplicated and grouped.
/// Join matching goes through [`Value::join_eq`] instead.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
                cmp_int_float(*i, *f) == Ordering::Equal
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            // Integer(5) == Float(5.0): whole floats hash as their i64
            Value::Integer(v) => v.hash(state),
            Value::Float(v) => match float_as_exact_int(*v) {
                Some(i) => i.hash(state),
                None if v.is_nan() => f64::NAN.to_bits().hash(state),
                None => v.to_bits().hash(state),
            },
            Value::Text(s) => s.hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Timestamp(t) => t.hash(state),
        }
    }
}

// partial_cmp follows `compare` (NULL against a value is None); Ord below
// is the total order used for BTreeMap keys.
#[allow(clippy::non_canonical_partial_ord_impl)]
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

/// NULL first, then booleans, numbers, text and timestamps
///
/// Integers and floats interleave by exact numeric value, NaN after every
/// number.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.compare(other).unwrap_or(Ordering::Equal))
    }
}

/// 2^63 as f64; every float in `[-2^63, 2^63)` truncates to an exact i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact ordering of an integer against a float, NaN after every number
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64)).then_with(|| {
        if f > whole {
            Ordering::Less
        } else if f < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

/// The i64 a float is exactly equal to, if any (-0.0 maps to 0)
fn float_as_exact_int(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f)).then_some(f as i64)
}

fn total_cmp_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

macro_rules! value_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(impl From<$ty> for Value {
            fn from($v: $ty) -> Self {
                $body
            }
        })*
    };
}

value_from! {
    i64 => |v| Value::Integer(v),
    i32 => |v| Value::Integer(i64::from(v)),
    u32 => |v| Value::Integer(i64::from(v)),
    f64 => |v| Value::Float(v),
    bool => |v| Value::Boolean(v),
    &str => |v| Value::Text(Arc::from(v)),
    String => |v| Value::Text(Arc::from(v)),
    DateTime<Utc> => |v| Value::Timestamp(v),
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(NULL_VALUE, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(42), Value::integer(42));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(Option::<i64>::None), NULL_VALUE);
        assert_eq!(Value::text("42").as_int64(), Some(42));
        assert_eq!(Value::float(3.5).as_int64(), Some(3));
        assert_eq!(Value::timestamp(Utc::now()).as_int64(), None);
        assert_eq!(Value::boolean(true).kind(), "boolean");
        assert_eq!(Value::default(), NULL_VALUE);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Value::integer(5), Value::float(5.0));
        assert_ne!(Value::integer(5), Value::text("5"));
        assert_eq!(Value::null_unknown(), NULL_VALUE);
        assert_ne!(Value::null_unknown(), Value::integer(0));
        assert_eq!(Value::float(f64::NAN), Value::float(f64::NAN));
    }

    #[test]
    fn test_join_eq_rejects_null() {
        assert!(Value::text("eng").join_eq(&Value::text("eng")));
        assert!(!Value::null_unknown().join_eq(&Value::null_unknown()));
        assert!(!Value::null_unknown().join_eq(&Value::integer(1)));
        assert!(Value::integer(1).join_eq(&Value::float(1.0)));
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Value::integer(1).compare(&Value::integer(2)),
            Ok(Ordering::Less)
        );
        assert_eq!(
            Value::float(2.5).compare(&Value::integer(2)),
            Ok(Ordering::Greater)
        );
        assert_eq!(
            Value::text("b").compare(&Value::text("a")),
            Ok(Ordering::Greater)
        );
        assert_eq!(
            Value::null_unknown().compare(&Value::integer(0)),
            Err(Error::NullComparison)
        );
        assert_eq!(
            Value::boolean(true).compare(&Value::integer(1)),
            Err(Error::IncomparableTypes)
        );
    }

    #[test]
    fn test_total_order() {
        let mut values = vec![
            Value::text("a"),
            Value::integer(3),
            Value::null_unknown(),
            Value::float(1.5),
            Value::boolean(false),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::null_unknown(),
                Value::boolean(false),
                Value::float(1.5),
                Value::integer(3),
                Value::text("a"),
            ]
        );
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        let mut set = FxHashSet::default();
        set.insert(Value::integer(5));
        assert!(set.contains(&Value::float(5.0)));
        set.insert(Value::float(0.0));
        assert!(set.contains(&Value::float(-0.0)));
        assert!(!set.contains(&Value::text("5")));
    }

    #[test]
    fn test_int_float_equality_is_exact() {
        let big = 1i64 << 53;
        let f = Value::float(big as f64);
        assert_eq!(Value::integer(big), f);
        assert_ne!(Value::integer(big + 1), f);
        assert_eq!(Value::integer(big + 1).cmp(&f), Ordering::Greater);
        assert_eq!(f.compare(&Value::integer(big + 1)), Ok(Ordering::Less));
        assert_eq!(Value::integer(2).compare(&Value::float(2.5)), Ok(Ordering::Less));
        assert_eq!(Value::integer(-2).compare(&Value::float(-2.5)), Ok(Ordering::Greater));
        assert_eq!(Value::integer(i64::MAX).compare(&Value::float(f64::INFINITY)), Ok(Ordering::Less));
        assert_eq!(Value::integer(0).compare(&Value::float(f64::NAN)), Ok(Ordering::Less));

        let mut set = FxHashSet::default();
        set.insert(Value::integer(big));
        assert!(set.contains(&f));
        assert!(!set.contains(&Value::integer(big + 1)));
    }

    #[test]
    fn test_display() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(Value::integer(7).to_string(), "7");
        assert_eq!(Value::float(2.0).to_string(), "2");
        assert_eq!(Value::float(1.25).to_string(), "1.25");
        assert_eq!(Value::null_unknown().to_string(), "NULL");
        assert_eq!(Value::boolean(false).to_string(), "false");
        assert_eq!(Value::timestamp(ts).to_string(), "2024-01-15T10:30:00+00:00");
    }
}
