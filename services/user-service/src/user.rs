//! User entity and API schemas
//!
//! The stored record carries the password hash; [`ApiUser`] is the output
//! projection and deliberately has no password field, so the hash cannot
//! leak through any response.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crudkit::repository::{ColumnValue, Entity, SqlValue};
use crudkit::routes::IntoColumnValues;

/// The stored user record
#[derive(Debug, Clone)]
pub struct User {
    pub id: Option<Uuid>,
    pub email: String,
    /// Argon2id PHC string, never plaintext
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Entity for User {
    const ENTITY: &'static str = "User";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] =
        &["id", "email", "password", "first_name", "last_name"];

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn insert_values(&self, id: Uuid) -> Vec<SqlValue> {
        vec![
            SqlValue::Uuid(id),
            SqlValue::Text(self.email.clone()),
            SqlValue::Text(self.password.clone()),
            SqlValue::Text(self.first_name.clone()),
            SqlValue::Text(self.last_name.clone()),
        ]
    }
}

/// Create payload; the plaintext password is replaced with its hash
/// before the record reaches the repository
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<CreateUser> for User {
    fn from(dto: CreateUser) -> Self {
        Self {
            id: None,
            email: dto.email,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

/// Output projection of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ApiUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial update payload; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl IntoColumnValues for UpdateUser {
    fn into_column_values(self) -> Vec<ColumnValue> {
        let mut values = Vec::new();
        if let Some(first_name) = self.first_name {
            values.push(ColumnValue::new("first_name", first_name));
        }
        if let Some(last_name) = self.last_name {
            values.push(ColumnValue::new("last_name", last_name));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_values_align_with_columns() {
        let user = User {
            id: None,
            email: "alice@example.com".to_string(),
            password: "$argon2id$...".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
        };
        let id = Uuid::new_v4();
        let values = user.insert_values(id);
        assert_eq!(values.len(), User::COLUMNS.len());
        assert_eq!(values[0], SqlValue::Uuid(id));
        assert_eq!(values[1], SqlValue::Text("alice@example.com".to_string()));
    }

    #[test]
    fn test_create_dto_converts_without_id() {
        let user: User = CreateUser {
            email: "alice@example.com".to_string(),
            password: "plaintext".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
        }
        .into();
        assert!(user.id.is_none());
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_api_user_has_no_password_field() {
        let api_user = ApiUser {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
        };
        let json = serde_json::to_value(&api_user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = UpdateUser {
            first_name: Some("Alicia".to_string()),
            last_name: None,
        };
        let values = update.into_column_values();
        assert_eq!(values, vec![ColumnValue::new("first_name", "Alicia")]);
    }

    #[test]
    fn test_update_with_nothing_set_is_empty() {
        assert!(UpdateUser::default().into_column_values().is_empty());
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: UpdateUser = serde_json::from_str(r#"{"last_name": "Jones"}"#).unwrap();
        assert_eq!(update.first_name, None);
        assert_eq!(update.last_name.as_deref(), Some("Jones"));
    }
}
