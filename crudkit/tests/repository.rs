//! Repository integration tests against a live PostgreSQL instance
//!
//! These tests need a database; point `DATABASE_URL` at a scratch
//! PostgreSQL and run with `cargo test -- --ignored --test-threads=1`
//! (the tests share one fixture table and truncate it between runs).

use futures::TryStreamExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crudkit::repository::{
    ColumnValue, Entity, FilterCondition, FindQuery, PgRepository, Repository,
    RepositoryErrorKind, SqlValue,
};

#[derive(Debug, Clone)]
struct Account {
    id: Option<Uuid>,
    username: String,
    password: String,
}

impl Entity for Account {
    const ENTITY: &'static str = "Account";
    const TABLE: &'static str = "crudkit_test_account";
    const COLUMNS: &'static [&'static str] = &["id", "username", "password"];

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn insert_values(&self, id: Uuid) -> Vec<SqlValue> {
        vec![
            SqlValue::Uuid(id),
            SqlValue::Text(self.username.clone()),
            SqlValue::Text(self.password.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    password: String,
}

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("failed to connect to test database")
}

async fn fresh_repo(pool: &PgPool) -> PgRepository<Account> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS crudkit_test_account (
            id UUID PRIMARY KEY,
            username VARCHAR(255) NOT NULL,
            password VARCHAR(255) NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("failed to create test table");

    sqlx::query("TRUNCATE crudkit_test_account")
        .execute(pool)
        .await
        .expect("failed to truncate test table");

    PgRepository::new(pool.clone())
}

fn account(username: &str, password: &str) -> Account {
    Account {
        id: None,
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Seed the canonical three-row fixture set
async fn seed(repo: &PgRepository<Account>) {
    for (username, password) in [
        ("andrey", "secret0"),
        ("paul", "secret1"),
        ("andrew", "secret2"),
    ] {
        let _: AccountRow = repo.create(&account(username, password)).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn create_assigns_id_and_roundtrips() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;

    let created: AccountRow = repo.create(&account("andrey", "secret")).await.unwrap();
    assert_eq!(created.username, "andrey");
    assert_eq!(created.password, "secret");

    let fetched: AccountRow = repo
        .find_one(&[FilterCondition::eq("id", created.id)])
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn count_tracks_deletions() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;
    seed(&repo).await;

    assert_eq!(repo.count(&[]).await.unwrap(), 3);

    let deleted = repo
        .delete(&[FilterCondition::eq("username", "andrey")])
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(repo.count(&[]).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn ilike_matches_exactly_the_substring_rows() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;
    seed(&repo).await;

    let query = FindQuery::new().condition(FilterCondition::ilike("username", "ndr"));
    let rows: Vec<AccountRow> = repo.find(query).try_collect().await.unwrap();

    let mut names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["andrew", "andrey"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn order_by_descending_with_limit_and_offset() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;
    seed(&repo).await;

    let base = FindQuery::new()
        .condition(FilterCondition::ilike("username", "ndr"))
        .order_by("-username")
        .limit(1);

    let rows: Vec<AccountRow> = repo.find(base.clone()).try_collect().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "andrey");

    let rows: Vec<AccountRow> = repo.find(base.offset(1)).try_collect().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "andrew");
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn find_streams_across_small_batches() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;
    for i in 0..7 {
        let _: AccountRow = repo
            .create(&account(&format!("user{i:02}"), "pw"))
            .await
            .unwrap();
    }

    // fetch_size 2 forces four round trips; the stream output is unchanged
    let query = FindQuery::new().order_by("username").fetch_size(2);
    let rows: Vec<AccountRow> = repo.find(query).try_collect().await.unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].username, "user00");
    assert_eq!(rows[6].username, "user06");
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn unknown_field_fails_before_touching_the_database() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;
    seed(&repo).await;

    let query = FindQuery::new().condition(FilterCondition::eq("nickname", "x"));
    let err = repo
        .find::<AccountRow>(query)
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::UnknownField);

    // No partial results either: the same filters fail count too
    let err = repo
        .count(&[FilterCondition::eq("nickname", "x")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::UnknownField);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn update_by_id_returns_stored_row() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;

    let created: AccountRow = repo.create(&account("andrey", "secret")).await.unwrap();
    let updated: AccountRow = repo
        .update_by_id(created.id, &[ColumnValue::new("password", "newsecret")])
        .await
        .unwrap();

    assert_eq!(updated.username, "andrey");
    assert_eq!(updated.password, "newsecret");
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn update_by_id_missing_row_is_not_found() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;

    let err = repo
        .update_by_id::<AccountRow>(Uuid::new_v4(), &[ColumnValue::new("password", "x")])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn delete_matching_nothing_returns_zero() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;
    seed(&repo).await;

    let deleted = repo
        .delete(&[FilterCondition::eq("username", "nobody")])
        .await
        .unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(repo.count(&[]).await.unwrap(), 3);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn find_one_missing_names_entity_and_conditions() {
    let pool = pool().await;
    let repo = fresh_repo(&pool).await;

    let err = repo
        .find_one::<AccountRow>(&[FilterCondition::eq("username", "ghost")])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    let message = err.to_string();
    assert!(message.contains("Account"));
    assert!(message.contains("username eq ghost"));
}
