//! User CRUD service built on crudkit

pub mod service;
pub mod user;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sqlx::PgPool;

use crudkit::health::{health, readiness};
use crudkit::routes::{crud_router, CrudActions};

use service::UserService;

/// Build the application router: the User collection plus probes
pub fn app(pool: PgPool) -> Router {
    let users = Arc::new(UserService::new(pool.clone()));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .with_state(pool)
        .nest("/users", crud_router("User", users, CrudActions::all()))
}
