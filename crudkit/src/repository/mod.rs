//! Repository abstraction for database CRUD
//!
//! One [`Repository`] binds one [`Entity`] to one table and exposes
//! count/find/find_one/create/update_by_id/delete over it, translating
//! declarative [`FilterCondition`] lists and a [`FindQuery`] configuration
//! into parameterized SQL.
//!
//! # Example
//!
//! ```rust,ignore
//! use crudkit::repository::{FilterCondition, FindQuery, PgRepository, Repository};
//!
//! let repo: PgRepository<User> = PgRepository::new(pool);
//!
//! let active: i64 = repo.count(&[FilterCondition::eq("email", "a@b.c")]).await?;
//!
//! let query = FindQuery::new()
//!     .condition(FilterCondition::ilike("first_name", "ndr"))
//!     .order_by("-first_name")
//!     .limit(10);
//! let mut rows = repo.find::<ApiUser>(query);
//! while let Some(user) = rows.try_next().await? {
//!     // ...
//! }
//! ```

mod entity;
mod error;
mod filter;
mod pg;
mod query;
mod traits;

pub use entity::Entity;
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult};
pub use filter::{FilterCondition, FilterOp, SqlValue, UnknownFilterOp};
pub use pg::PgRepository;
pub use query::{ColumnValue, FindQuery, DEFAULT_FETCH_SIZE};
pub use traits::Repository;
