//! Service layer between the routes and the repository
//!
//! [`CrudService`] is the pluggable seam of the route factory: the router
//! only ever talks to this trait. [`EntityCrud`] is the default handler
//! set, delegating straight to a [`PgRepository`]; a concrete service can
//! use it as-is, or embed it and override individual actions (the User
//! service overrides `create` to hash the password first).

use async_trait::async_trait;
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::marker::PhantomData;
use uuid::Uuid;

use super::error::ApiError;
use super::query::ListParams;
use super::response::ListPage;
use crate::repository::{ColumnValue, Entity, FilterCondition, PgRepository, Repository};

/// Conversion of a partial-update DTO into column assignments
///
/// Unset (`None`) fields must be omitted from the output, so a PATCH only
/// touches the fields it carries.
pub trait IntoColumnValues {
    /// The column assignments this DTO represents
    fn into_column_values(self) -> Vec<ColumnValue>;
}

/// The five CRUD actions a collection exposes
///
/// Implementations are passed to [`crud_router`](super::crud_router) as
/// `Arc<S>`; each route delegates to the matching method.
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    /// Input type for `create`
    type Create: DeserializeOwned + Send + 'static;
    /// Input type for `update` (partial; unset fields untouched)
    type Update: DeserializeOwned + Send + 'static;
    /// Output projection returned by every action
    type Response: Serialize + Send + 'static;

    /// Persist a new entity and return its stored projection
    async fn create(&self, dto: Self::Create) -> Result<Self::Response, ApiError>;

    /// Fetch one entity by id
    async fn get(&self, id: Uuid) -> Result<Self::Response, ApiError>;

    /// Fetch one page of entities plus the total count
    async fn list(&self, params: &ListParams) -> Result<ListPage<Self::Response>, ApiError>;

    /// Partially update an entity by id and return the stored result
    async fn update(&self, id: Uuid, dto: Self::Update) -> Result<Self::Response, ApiError>;

    /// Delete an entity by id, returning the number of rows removed
    async fn delete(&self, id: Uuid) -> Result<u64, ApiError>;
}

/// Default CRUD handlers over a [`PgRepository`]
///
/// Generic over the entity `E`, the create DTO `C`, the update DTO `U`,
/// and the response projection `R`.
pub struct EntityCrud<E, C, U, R> {
    repo: PgRepository<E>,
    _marker: PhantomData<fn() -> (C, U, R)>,
}

impl<E, C, U, R> EntityCrud<E, C, U, R>
where
    E: Entity,
{
    /// Create the default handler set over the given repository
    pub fn new(repo: PgRepository<E>) -> Self {
        Self {
            repo,
            _marker: PhantomData,
        }
    }

    /// The underlying repository, for services that override actions
    pub fn repository(&self) -> &PgRepository<E> {
        &self.repo
    }
}

#[async_trait]
impl<E, C, U, R> CrudService for EntityCrud<E, C, U, R>
where
    E: Entity,
    C: Into<E> + DeserializeOwned + Send + 'static,
    U: IntoColumnValues + DeserializeOwned + Send + 'static,
    R: Serialize + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    type Create = C;
    type Update = U;
    type Response = R;

    async fn create(&self, dto: C) -> Result<R, ApiError> {
        let entity: E = dto.into();
        Ok(self.repo.create::<R>(&entity).await?)
    }

    async fn get(&self, id: Uuid) -> Result<R, ApiError> {
        Ok(self
            .repo
            .find_one::<R>(&[FilterCondition::eq("id", id)])
            .await?)
    }

    async fn list(&self, params: &ListParams) -> Result<ListPage<R>, ApiError> {
        let results: Vec<R> = self.repo.find::<R>(params.to_find_query()).try_collect().await?;
        let count = self.repo.count(&[]).await?;
        Ok(ListPage { count, results })
    }

    async fn update(&self, id: Uuid, dto: U) -> Result<R, ApiError> {
        let values = dto.into_column_values();
        Ok(self.repo.update_by_id::<R>(id, &values).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ApiError> {
        Ok(self.repo.delete(&[FilterCondition::eq("id", id)]).await?)
    }
}
