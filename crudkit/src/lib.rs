//! # crudkit
//!
//! Generic CRUD service toolkit over PostgreSQL: a repository abstraction
//! with declarative filtering, ordering, and streamed pagination, plus an
//! axum route factory that turns one entity into a REST collection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crudkit::prelude::*;
//!
//! # use crudkit::error::Result;
//! # async fn run<S: CrudService>(service: Arc<S>) -> Result<()> {
//! let config = Config::load_for_service("user-service")?;
//! init_tracing(&config);
//!
//! let pool = create_pool(&config.database).await?;
//!
//! let app = Router::new()
//!     .nest("/users", crud_router("User", service, CrudActions::all()));
//!
//! Server::new(config).serve(app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod observability;
pub mod pagination;
pub mod password;
pub mod repository;
pub mod routes;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, ServiceConfig};
    pub use crate::database::create_pool;
    pub use crate::error::{Error, Result};
    pub use crate::health::{health, readiness};
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{next_page_url, previous_page_url};
    pub use crate::password::{PasswordConfig, PasswordHasher};
    pub use crate::repository::{
        ColumnValue, Entity, FilterCondition, FilterOp, FindQuery, PgRepository, Repository,
        RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult, SqlValue,
    };
    pub use crate::routes::{
        crud_router, ApiError, ApiErrorKind, CrudActions, CrudService, EntityCrud, ErrorBody,
        IntoColumnValues, ListEnvelope, ListPage, ListParams, NoContent,
    };
    pub use crate::server::Server;

    pub use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{delete, get, patch, post},
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use async_trait::async_trait;

    pub use futures::{Stream, StreamExt, TryStreamExt};

    pub use uuid::Uuid;
}
