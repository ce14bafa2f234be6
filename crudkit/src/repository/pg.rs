//! PostgreSQL repository backed by a sqlx connection pool
//!
//! [`PgRepository`] is the generic [`Repository`] implementation: one
//! instance per entity type, all sharing the process-wide [`PgPool`].
//! Connections are drawn from the pool per operation and returned when the
//! operation completes; nothing is held across calls.

use std::marker::PhantomData;

use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::entity::Entity;
use super::error::{RepositoryError, RepositoryOperation, RepositoryResult};
use super::filter::{describe_conditions, FilterCondition};
use super::query::{
    build_count, build_delete, build_insert, build_select_batch, build_update, ColumnValue,
    FindQuery,
};
use super::traits::Repository;

/// Generic PostgreSQL repository for one entity type
///
/// # Example
///
/// ```rust,ignore
/// let repo: PgRepository<User> = PgRepository::new(pool.clone());
/// let user: ApiUser = repo
///     .find_one(&[FilterCondition::eq("email", "alice@example.com")])
///     .await?;
/// ```
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> PgRepository<E> {
    /// Create a repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Cursor state for one streamed read
struct FindState {
    pool: PgPool,
    query: FindQuery,
    yielded: u64,
    exhausted: bool,
}

impl FindState {
    /// Rows to request in the next round trip, or `None` when done
    fn next_batch_limit(&self) -> Option<u64> {
        if self.exhausted {
            return None;
        }
        match self.query.limit {
            Some(limit) => {
                let remaining = limit.saturating_sub(self.yielded);
                if remaining == 0 {
                    None
                } else {
                    Some(remaining.min(self.query.fetch_size))
                }
            }
            None => Some(self.query.fetch_size),
        }
    }
}

impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn count(&self, conditions: &[FilterCondition]) -> RepositoryResult<i64> {
        let mut qb = build_count(E::TABLE, E::COLUMNS, conditions)?;
        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::Count, e).with_entity(E::ENTITY)
            })
    }

    fn find<R>(&self, query: FindQuery) -> BoxStream<'static, RepositoryResult<R>>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let state = FindState {
            pool: self.pool.clone(),
            query,
            yielded: 0,
            exhausted: false,
        };

        stream::try_unfold(state, |mut state| async move {
            let Some(batch_limit) = state.next_batch_limit() else {
                return Ok(None);
            };
            let batch_offset = state.query.offset.unwrap_or(0) + state.yielded;

            let rows: Vec<R> = {
                let mut qb = build_select_batch(
                    E::TABLE,
                    E::COLUMNS,
                    &state.query,
                    batch_offset,
                    batch_limit,
                )?;
                qb.build_query_as::<R>()
                    .fetch_all(&state.pool)
                    .await
                    .map_err(|e| {
                        RepositoryError::from_sqlx(RepositoryOperation::Find, e)
                            .with_entity(E::ENTITY)
                    })?
            };

            let fetched = rows.len() as u64;
            state.yielded += fetched;
            if fetched < batch_limit {
                state.exhausted = true;
            }
            if rows.is_empty() {
                Ok(None)
            } else {
                Ok(Some((
                    stream::iter(rows.into_iter().map(Ok::<R, RepositoryError>)),
                    state,
                )))
            }
        })
        .try_flatten()
        .boxed()
    }

    async fn find_one<R>(&self, conditions: &[FilterCondition]) -> RepositoryResult<R>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let query = FindQuery::new().conditions(conditions.to_vec()).limit(1);
        let mut rows = self.find::<R>(query);
        match rows.try_next().await? {
            Some(row) => Ok(row),
            None => Err(RepositoryError::not_found(
                E::ENTITY,
                describe_conditions(conditions),
            )),
        }
    }

    async fn create<R>(&self, entity: &E) -> RepositoryResult<R>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let id = entity.id().unwrap_or_else(Uuid::new_v4);
        let values = entity.insert_values(id);
        let mut qb = build_insert(E::TABLE, E::COLUMNS, &values);

        let mut tx = self.pool.begin().await.map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Create, e).with_entity(E::ENTITY)
        })?;

        let row = match qb.build_query_as::<R>().fetch_one(&mut *tx).await {
            Ok(row) => row,
            Err(e) => {
                tx.rollback().await.ok();
                return Err(
                    RepositoryError::from_sqlx(RepositoryOperation::Create, e)
                        .with_entity(E::ENTITY),
                );
            }
        };

        tx.commit().await.map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Create, e).with_entity(E::ENTITY)
        })?;

        Ok(row)
    }

    async fn update_by_id<R>(&self, id: Uuid, values: &[ColumnValue]) -> RepositoryResult<R>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let mut qb = build_update(E::TABLE, E::COLUMNS, id, values)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::UpdateById, e).with_entity(E::ENTITY)
        })?;

        if let Err(e) = qb.build().execute(&mut *tx).await {
            tx.rollback().await.ok();
            return Err(
                RepositoryError::from_sqlx(RepositoryOperation::UpdateById, e)
                    .with_entity(E::ENTITY),
            );
        }

        tx.commit().await.map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::UpdateById, e).with_entity(E::ENTITY)
        })?;

        // Re-fetch so the caller sees exactly what was stored; a missing
        // row surfaces here as not-found.
        self.find_one::<R>(&[FilterCondition::eq("id", id)])
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::UpdateById))
    }

    async fn delete(&self, conditions: &[FilterCondition]) -> RepositoryResult<u64> {
        let mut qb = build_delete(E::TABLE, E::COLUMNS, conditions)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Delete, e).with_entity(E::ENTITY)
        })?;

        let result = match qb.build().execute(&mut *tx).await {
            Ok(result) => result,
            Err(e) => {
                tx.rollback().await.ok();
                return Err(
                    RepositoryError::from_sqlx(RepositoryOperation::Delete, e)
                        .with_entity(E::ENTITY),
                );
            }
        };

        tx.commit().await.map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Delete, e).with_entity(E::ENTITY)
        })?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(limit: Option<u64>, fetch_size: u64, yielded: u64) -> FindState {
        FindState {
            pool: PgPool::connect_lazy("postgres://localhost/unused").unwrap(),
            query: {
                let mut q = FindQuery::new().fetch_size(fetch_size);
                if let Some(limit) = limit {
                    q = q.limit(limit);
                }
                q
            },
            yielded,
            exhausted: false,
        }
    }

    #[tokio::test]
    async fn test_batch_limit_without_user_limit() {
        let st = state(None, 1000, 0);
        assert_eq!(st.next_batch_limit(), Some(1000));
    }

    #[tokio::test]
    async fn test_batch_limit_capped_by_user_limit() {
        let st = state(Some(10), 1000, 0);
        assert_eq!(st.next_batch_limit(), Some(10));
    }

    #[tokio::test]
    async fn test_batch_limit_shrinks_as_rows_are_yielded() {
        let st = state(Some(25), 10, 20);
        assert_eq!(st.next_batch_limit(), Some(5));
    }

    #[tokio::test]
    async fn test_batch_limit_none_when_limit_reached() {
        let st = state(Some(10), 10, 10);
        assert_eq!(st.next_batch_limit(), None);
    }

    #[tokio::test]
    async fn test_batch_limit_none_when_exhausted() {
        let mut st = state(None, 1000, 50);
        st.exhausted = true;
        assert_eq!(st.next_batch_limit(), None);
    }
}
