//! User CRUD service
//!
//! Wraps the default [`EntityCrud`] handler set and overrides `create` so
//! the plaintext password is hashed before anything touches storage. All
//! other actions delegate unchanged.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crudkit::password::PasswordHasher;
use crudkit::repository::PgRepository;
use crudkit::repository::Repository;
use crudkit::routes::{ApiError, CrudService, EntityCrud, ListPage, ListParams};

use crate::user::{ApiUser, CreateUser, UpdateUser, User};

/// CRUD service for the User collection
pub struct UserService {
    crud: EntityCrud<User, CreateUser, UpdateUser, ApiUser>,
    hasher: PasswordHasher,
}

impl UserService {
    /// Build the service over the shared connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: EntityCrud::new(PgRepository::new(pool)),
            hasher: PasswordHasher::default(),
        }
    }

    /// The password hasher in use
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }
}

#[async_trait]
impl CrudService for UserService {
    type Create = CreateUser;
    type Update = UpdateUser;
    type Response = ApiUser;

    async fn create(&self, dto: CreateUser) -> Result<ApiUser, ApiError> {
        let hash = self
            .hasher
            .hash(&dto.password)
            .map_err(|e| ApiError::unprocessable(format!("An error occurred: {e}")))?;

        let mut user: User = dto.into();
        user.password = hash;

        Ok(self.crud.repository().create::<ApiUser>(&user).await?)
    }

    async fn get(&self, id: Uuid) -> Result<ApiUser, ApiError> {
        self.crud.get(id).await
    }

    async fn list(&self, params: &ListParams) -> Result<ListPage<ApiUser>, ApiError> {
        self.crud.list(params).await
    }

    async fn update(&self, id: Uuid, dto: UpdateUser) -> Result<ApiUser, ApiError> {
        self.crud.update(id, dto).await
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ApiError> {
        self.crud.delete(id).await
    }
}
