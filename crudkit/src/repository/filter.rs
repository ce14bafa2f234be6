//! Filter conditions for repository queries
//!
//! A [`FilterCondition`] is one `(field, operator, value)` predicate. A list
//! of conditions is applied conjunctively, in list order, when building a
//! query.
//!
//! # Example
//!
//! ```rust
//! use crudkit::repository::FilterCondition;
//!
//! let filters = vec![
//!     FilterCondition::eq("email", "alice@example.com"),
//!     FilterCondition::ilike("first_name", "ali"),
//! ];
//! ```

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Comparison operators supported by the query builder
///
/// The set is closed: an operator that does not exist cannot be
/// constructed, and parsing an unknown operator name is an error rather
/// than a silently skipped condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Equal to (=)
    Eq,
    /// Strictly greater than (>)
    Gt,
    /// Greater than or equal to (>=)
    Gte,
    /// Strictly less than (<)
    Lt,
    /// Less than or equal to (<=)
    Lte,
    /// Case-sensitive substring match (LIKE, value wrapped in `%`)
    Like,
    /// Case-insensitive substring match (ILIKE, value wrapped in `%`)
    Ilike,
}

impl FilterOp {
    /// SQL fragment for this operator
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
        }
    }

    /// Whether the bound value is wrapped in `%` wildcards
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Like | Self::Ilike)
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Ilike => "ilike",
        };
        write!(f, "{name}")
    }
}

/// Error returned when parsing an unknown operator name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterOp(pub String);

impl fmt::Display for UnknownFilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter operator: {}", self.0)
    }
}

impl std::error::Error for UnknownFilterOp {}

impl FromStr for FilterOp {
    type Err = UnknownFilterOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "like" => Ok(Self::Like),
            "ilike" => Ok(Self::Ilike),
            other => Err(UnknownFilterOp(other.to_string())),
        }
    }
}

/// An owned value that can be bound into a query
///
/// Covers the column types the toolkit works with. Values are always bound
/// as parameters, never interpolated into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// String value
    Text(String),
    /// 64-bit integer value
    Integer(i64),
    /// 64-bit floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// UUID value
    Uuid(Uuid),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

/// A single filter condition for querying entities
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// The field name to filter on
    pub field: String,
    /// The comparison operator
    pub op: FilterOp,
    /// The value to compare against
    pub value: SqlValue,
}

impl FilterCondition {
    /// Create a new filter condition
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<SqlValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Create an equality filter (field = value)
    pub fn eq(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Create a greater-than filter (field > value)
    pub fn gt(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(field, FilterOp::Gt, value)
    }

    /// Create a greater-than-or-equal filter (field >= value)
    pub fn gte(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    /// Create a less-than filter (field < value)
    pub fn lt(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(field, FilterOp::Lt, value)
    }

    /// Create a less-than-or-equal filter (field <= value)
    pub fn lte(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }

    /// Create a case-sensitive substring filter
    ///
    /// The value is wrapped in `%` wildcards on both sides at build time,
    /// so `like("name", "ndr")` matches any name containing "ndr".
    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Like, SqlValue::Text(value.into()))
    }

    /// Create a case-insensitive substring filter
    pub fn ilike(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Ilike, SqlValue::Text(value.into()))
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// Render a condition list for error messages ("field op value, ...")
pub(crate) fn describe_conditions(conditions: &[FilterCondition]) -> String {
    conditions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_op_as_sql() {
        assert_eq!(FilterOp::Eq.as_sql(), "=");
        assert_eq!(FilterOp::Gt.as_sql(), ">");
        assert_eq!(FilterOp::Gte.as_sql(), ">=");
        assert_eq!(FilterOp::Lt.as_sql(), "<");
        assert_eq!(FilterOp::Lte.as_sql(), "<=");
        assert_eq!(FilterOp::Like.as_sql(), "LIKE");
        assert_eq!(FilterOp::Ilike.as_sql(), "ILIKE");
    }

    #[test]
    fn test_op_is_pattern() {
        assert!(FilterOp::Like.is_pattern());
        assert!(FilterOp::Ilike.is_pattern());
        assert!(!FilterOp::Eq.is_pattern());
        assert!(!FilterOp::Gte.is_pattern());
    }

    #[test]
    fn test_op_parse_known() {
        for name in ["eq", "gt", "gte", "lt", "lte", "like", "ilike"] {
            let op: FilterOp = name.parse().unwrap();
            assert_eq!(op.to_string(), name);
        }
    }

    #[test]
    fn test_op_parse_unknown_is_error() {
        let err = "between".parse::<FilterOp>().unwrap_err();
        assert_eq!(err, UnknownFilterOp("between".to_string()));
        assert!(err.to_string().contains("between"));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(SqlValue::from("x"), SqlValue::Text("x".to_string()));
        assert_eq!(SqlValue::from(7_i32), SqlValue::Integer(7));
        assert_eq!(SqlValue::from(7_i64), SqlValue::Integer(7));
        assert_eq!(SqlValue::from(1.5), SqlValue::Float(1.5));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(true));

        let id = Uuid::new_v4();
        assert_eq!(SqlValue::from(id), SqlValue::Uuid(id));
    }

    #[test]
    fn test_condition_constructors() {
        let cond = FilterCondition::eq("email", "a@b.c");
        assert_eq!(cond.field, "email");
        assert_eq!(cond.op, FilterOp::Eq);
        assert_eq!(cond.value, SqlValue::Text("a@b.c".to_string()));

        let cond = FilterCondition::gte("age", 18);
        assert_eq!(cond.op, FilterOp::Gte);
        assert_eq!(cond.value, SqlValue::Integer(18));

        let cond = FilterCondition::ilike("first_name", "ndr");
        assert_eq!(cond.op, FilterOp::Ilike);
    }

    #[test]
    fn test_condition_display() {
        let cond = FilterCondition::eq("email", "a@b.c");
        assert_eq!(cond.to_string(), "email eq a@b.c");
    }

    #[test]
    fn test_describe_conditions() {
        let conds = vec![
            FilterCondition::eq("email", "a@b.c"),
            FilterCondition::lt("age", 30),
        ];
        assert_eq!(describe_conditions(&conds), "email eq a@b.c, age lt 30");
    }
}
