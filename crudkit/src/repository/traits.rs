//! Repository trait definition
//!
//! One repository binds one [`Entity`] to one table and exposes the full
//! CRUD contract over it. The response schema is a per-call generic: the
//! same repository can project rows into different output types (e.g. a
//! user record with and without its password hash).
//!
//! Methods returning futures use RPITIT; `find` returns a stream directly,
//! since constructing it performs no I/O.

use std::future::Future;

use futures::stream::BoxStream;
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use uuid::Uuid;

use super::entity::Entity;
use super::error::RepositoryResult;
use super::filter::FilterCondition;
use super::query::{ColumnValue, FindQuery};

/// CRUD contract over one entity type
///
/// All mutating operations run inside their own transaction: success
/// commits once, any failure rolls back before the error is surfaced.
/// There is no multi-operation transaction scope.
pub trait Repository<E: Entity>: Send + Sync {
    /// Count rows matching the conditions (all rows when empty)
    fn count(
        &self,
        conditions: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<i64>> + Send;

    /// Stream rows matching the query configuration, converted to `R`
    ///
    /// The stream is finite and not restartable; a fresh call re-issues
    /// the underlying query. Rows are fetched in batches of
    /// `query.fetch_size`, bounding peak memory for large scans.
    fn find<R>(&self, query: FindQuery) -> BoxStream<'static, RepositoryResult<R>>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;

    /// Return the first row matching the conditions, or a not-found error
    /// naming the entity and the conditions
    fn find_one<R>(
        &self,
        conditions: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<R>> + Send
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;

    /// Persist the entity, assigning a fresh id when unset, and return the
    /// stored row as `R`
    fn create<R>(&self, entity: &E) -> impl Future<Output = RepositoryResult<R>> + Send
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;

    /// Apply a partial update to the row with the given id, then re-fetch
    /// and return it as `R`
    ///
    /// When the id matches no row, the re-fetch fails with a not-found
    /// error.
    fn update_by_id<R>(
        &self,
        id: Uuid,
        values: &[ColumnValue],
    ) -> impl Future<Output = RepositoryResult<R>> + Send
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;

    /// Delete all rows matching the conditions, returning the count
    /// deleted; matching nothing yields 0, not an error
    fn delete(
        &self,
        conditions: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<u64>> + Send;
}
