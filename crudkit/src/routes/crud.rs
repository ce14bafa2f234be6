//! CRUD route factory
//!
//! Wires up to five standard routes for one entity onto an axum [`Router`]:
//!
//! | Action | Route            |
//! |--------|------------------|
//! | create | `POST /`         |
//! | list   | `GET /`          |
//! | get    | `GET /{id}`      |
//! | update | `PATCH /{id}`    |
//! | delete | `DELETE /{id}`   |
//!
//! Every route delegates to a [`CrudService`] passed in at registration
//! time; [`CrudActions`] selects which routes are mounted.
//!
//! # Example
//!
//! ```rust,ignore
//! let service = Arc::new(UserService::new(pool));
//! let app = Router::new()
//!     .nest("/users", crud_router("User", service, CrudActions::all()));
//! ```

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use super::error::ApiError;
use super::query::ListParams;
use super::response::{ListEnvelope, NoContent};
use super::service::CrudService;

/// Selects which CRUD actions the factory mounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudActions {
    /// Mount `GET /{id}`
    pub get: bool,
    /// Mount `GET /`
    pub list: bool,
    /// Mount `POST /`
    pub create: bool,
    /// Mount `PATCH /{id}`
    pub update: bool,
    /// Mount `DELETE /{id}`
    pub delete: bool,
}

impl CrudActions {
    /// All five actions
    #[must_use]
    pub const fn all() -> Self {
        Self {
            get: true,
            list: true,
            create: true,
            update: true,
            delete: true,
        }
    }

    /// No actions; enable individually from here
    #[must_use]
    pub const fn none() -> Self {
        Self {
            get: false,
            list: false,
            create: false,
            update: false,
            delete: false,
        }
    }

    /// Read-only surface: get and list
    #[must_use]
    pub const fn read_only() -> Self {
        Self {
            get: true,
            list: true,
            create: false,
            update: false,
            delete: false,
        }
    }
}

impl Default for CrudActions {
    fn default() -> Self {
        Self::all()
    }
}

/// Router state shared by the generated handlers
pub struct CrudState<S> {
    entity: Arc<str>,
    service: Arc<S>,
}

impl<S> Clone for CrudState<S> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            service: self.service.clone(),
        }
    }
}

/// Build a router exposing the selected CRUD actions for one entity
///
/// `entity_name` only feeds logging; routing is determined by where the
/// caller nests the returned router.
pub fn crud_router<S: CrudService>(
    entity_name: &str,
    service: Arc<S>,
    actions: CrudActions,
) -> Router {
    let state = CrudState {
        entity: Arc::from(entity_name),
        service,
    };

    let mut router = Router::new();
    if actions.create {
        router = router.route("/", post(create_entity::<S>));
    }
    if actions.list {
        router = router.route("/", get(list_entities::<S>));
    }
    if actions.get {
        router = router.route("/{id}", get(get_entity::<S>));
    }
    if actions.update {
        router = router.route("/{id}", patch(update_entity::<S>));
    }
    if actions.delete {
        router = router.route("/{id}", delete(delete_entity::<S>));
    }
    router.with_state(state)
}

async fn create_entity<S: CrudService>(
    State(state): State<CrudState<S>>,
    Json(dto): Json<S::Create>,
) -> Result<Json<S::Response>, ApiError> {
    tracing::debug!(entity = %state.entity, "create");
    let created = state.service.create(dto).await?;
    Ok(Json(created))
}

async fn list_entities<S: CrudService>(
    State(state): State<CrudState<S>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ListEnvelope<S::Response>>, ApiError> {
    tracing::debug!(entity = %state.entity, offset = params.offset, limit = params.limit, "list");
    let page = state.service.list(&params).await?;
    Ok(Json(ListEnvelope::paginate(page, uri.path(), &params)))
}

async fn get_entity<S: CrudService>(
    State(state): State<CrudState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<S::Response>, ApiError> {
    tracing::debug!(entity = %state.entity, %id, "get");
    let found = state.service.get(id).await?;
    Ok(Json(found))
}

async fn update_entity<S: CrudService>(
    State(state): State<CrudState<S>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<S::Update>,
) -> Result<Json<S::Response>, ApiError> {
    tracing::debug!(entity = %state.entity, %id, "update");
    let updated = state.service.update(id, dto).await?;
    Ok(Json(updated))
}

async fn delete_entity<S: CrudService>(
    State(state): State<CrudState<S>>,
    Path(id): Path<Uuid>,
) -> Result<NoContent, ApiError> {
    tracing::debug!(entity = %state.entity, %id, "delete");
    let deleted = state.service.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found());
    }
    Ok(NoContent)
}
