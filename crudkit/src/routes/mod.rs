//! REST CRUD routing
//!
//! The route factory ([`crud_router`]) mounts standard collection routes
//! for one entity, each delegating to a pluggable [`CrudService`]. The
//! default handler set is [`EntityCrud`]; services override individual
//! actions by wrapping it.

mod crud;
mod error;
mod query;
mod response;
mod service;

pub use crud::{crud_router, CrudActions};
pub use error::{ApiError, ApiErrorKind, ErrorBody};
pub use query::{ListParams, DEFAULT_LIST_LIMIT};
pub use response::{ListEnvelope, ListPage, NoContent};
pub use service::{CrudService, EntityCrud, IntoColumnValues};
