//! Query configuration and SQL construction
//!
//! [`FindQuery`] aggregates filter conditions, offset, limit, ordering, and
//! the streaming fetch size into one value passed to a repository read. The
//! build functions below translate it into parameterized statements via
//! [`sqlx::QueryBuilder`]; field names are validated against the entity's
//! column whitelist before any SQL is produced, and values are always bound,
//! never spliced into the statement text.

use sqlx::{Postgres, QueryBuilder};

use super::error::{RepositoryError, RepositoryOperation, RepositoryResult};
use super::filter::{FilterCondition, SqlValue};

/// Default number of rows fetched per round trip when streaming
pub const DEFAULT_FETCH_SIZE: u64 = 1000;

/// One column assignment of a partial update
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    /// The column to assign
    pub column: String,
    /// The value to assign to it
    pub value: SqlValue,
}

impl ColumnValue {
    /// Create a new column assignment
    pub fn new(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Query configuration for repository reads
///
/// Constructed per call and discarded once the query has executed; holds no
/// connection state.
///
/// # Example
///
/// ```rust
/// use crudkit::repository::{FilterCondition, FindQuery};
///
/// let query = FindQuery::new()
///     .condition(FilterCondition::ilike("first_name", "ndr"))
///     .order_by("-first_name,email")
///     .offset(1)
///     .limit(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    /// Conditions applied conjunctively, in list order
    pub conditions: Vec<FilterCondition>,
    /// Rows to skip
    pub offset: Option<u64>,
    /// Maximum rows to return
    pub limit: Option<u64>,
    /// Order-by fields in priority order; a leading `-` means descending
    pub order_by: Vec<String>,
    /// Rows fetched per round trip when streaming (min 1)
    pub fetch_size: u64,
}

impl Default for FindQuery {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            offset: None,
            limit: None,
            order_by: Vec::new(),
            fetch_size: DEFAULT_FETCH_SIZE,
        }
    }
}

impl FindQuery {
    /// Create an empty query configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the condition list
    #[must_use]
    pub fn conditions(mut self, conditions: Vec<FilterCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Append a single condition
    #[must_use]
    pub fn condition(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Set the row offset
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the row limit
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the ordering from a comma-separated field list
    ///
    /// Each field may carry a leading `-` for descending order; fields apply
    /// in listed priority order. `order_by("-username,email")` sorts by
    /// username descending, then email ascending.
    #[must_use]
    pub fn order_by(mut self, fields: &str) -> Self {
        self.order_by = fields
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(ToString::to_string)
            .collect();
        self
    }

    /// Set the streaming fetch size (clamped to at least 1)
    #[must_use]
    pub fn fetch_size(mut self, fetch_size: u64) -> Self {
        self.fetch_size = fetch_size.max(1);
        self
    }
}

/// Fail unless `field` is a column of `table`
fn check_column(
    operation: RepositoryOperation,
    table: &str,
    columns: &[&str],
    field: &str,
) -> RepositoryResult<()> {
    if columns.contains(&field) {
        Ok(())
    } else {
        Err(RepositoryError::unknown_field(operation, field, table))
    }
}

/// Bind an owned copy of `value` as the next parameter
fn push_bind_value(qb: &mut QueryBuilder<'static, Postgres>, value: &SqlValue) {
    match value {
        SqlValue::Text(v) => qb.push_bind(v.clone()),
        SqlValue::Integer(v) => qb.push_bind(*v),
        SqlValue::Float(v) => qb.push_bind(*v),
        SqlValue::Bool(v) => qb.push_bind(*v),
        SqlValue::Uuid(v) => qb.push_bind(*v),
    };
}

/// Append `WHERE`/`AND` predicates for each condition, in list order
///
/// Pattern operators wrap the value in `%` wildcards on both sides before
/// binding it.
pub(crate) fn push_filters(
    qb: &mut QueryBuilder<'static, Postgres>,
    operation: RepositoryOperation,
    table: &str,
    columns: &[&str],
    conditions: &[FilterCondition],
) -> RepositoryResult<()> {
    for (i, cond) in conditions.iter().enumerate() {
        check_column(operation, table, columns, &cond.field)?;

        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(&cond.field);
        qb.push(" ");
        qb.push(cond.op.as_sql());
        qb.push(" ");

        if cond.op.is_pattern() {
            let raw = match &cond.value {
                SqlValue::Text(v) => v.clone(),
                other => other.to_string(),
            };
            qb.push_bind(format!("%{raw}%"));
        } else {
            push_bind_value(qb, &cond.value);
        }
    }
    Ok(())
}

/// Append an `ORDER BY` clause from raw field names
///
/// A leading `-` selects `DESC`; fields keep their listed priority order.
fn push_order_by(
    qb: &mut QueryBuilder<'static, Postgres>,
    operation: RepositoryOperation,
    table: &str,
    columns: &[&str],
    order_by: &[String],
) -> RepositoryResult<()> {
    for (i, raw) in order_by.iter().enumerate() {
        let (field, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, "DESC"),
            None => (raw.as_str(), "ASC"),
        };
        check_column(operation, table, columns, field)?;

        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(field);
        qb.push(" ");
        qb.push(direction);
    }
    Ok(())
}

/// Build one batch of a streamed `SELECT`
///
/// `batch_offset` and `batch_limit` are the already-combined values for this
/// round trip (the caller folds the query's own offset/limit into them).
pub(crate) fn build_select_batch(
    table: &str,
    columns: &[&str],
    query: &FindQuery,
    batch_offset: u64,
    batch_limit: u64,
) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", columns.join(", "), table));
    push_filters(&mut qb, RepositoryOperation::Find, table, columns, &query.conditions)?;
    push_order_by(&mut qb, RepositoryOperation::Find, table, columns, &query.order_by)?;
    qb.push(" LIMIT ");
    qb.push_bind(batch_limit as i64);
    qb.push(" OFFSET ");
    qb.push_bind(batch_offset as i64);
    Ok(qb)
}

/// Build a `SELECT COUNT(*)` over the filtered table
pub(crate) fn build_count(
    table: &str,
    columns: &[&str],
    conditions: &[FilterCondition],
) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
    push_filters(&mut qb, RepositoryOperation::Count, table, columns, conditions)?;
    Ok(qb)
}

/// Build an `INSERT ... RETURNING` for a full row
pub(crate) fn build_insert(
    table: &str,
    columns: &[&str],
    values: &[SqlValue],
) -> QueryBuilder<'static, Postgres> {
    let column_list = columns.join(", ");
    let mut qb = QueryBuilder::new(format!("INSERT INTO {table} ({column_list}) VALUES ("));
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_bind_value(&mut qb, value);
    }
    qb.push(format!(") RETURNING {column_list}"));
    qb
}

/// Build an `UPDATE ... WHERE id = $n` from a partial value set
///
/// An empty value set is rejected: it cannot produce a valid statement.
pub(crate) fn build_update(
    table: &str,
    columns: &[&str],
    id: uuid::Uuid,
    values: &[ColumnValue],
) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    if values.is_empty() {
        return Err(RepositoryError::invalid_query(
            RepositoryOperation::UpdateById,
            "update requires at least one column value",
        ));
    }

    let mut qb = QueryBuilder::new(format!("UPDATE {table} SET "));
    for (i, cv) in values.iter().enumerate() {
        check_column(RepositoryOperation::UpdateById, table, columns, &cv.column)?;
        if i > 0 {
            qb.push(", ");
        }
        qb.push(&cv.column);
        qb.push(" = ");
        push_bind_value(&mut qb, &cv.value);
    }
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    Ok(qb)
}

/// Build a `DELETE` over the filtered table
pub(crate) fn build_delete(
    table: &str,
    columns: &[&str],
    conditions: &[FilterCondition],
) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {table}"));
    push_filters(&mut qb, RepositoryOperation::Delete, table, columns, conditions)?;
    Ok(qb)
}
