/**
 * User Model and Storage
 *
 * This module holds user records and the store that persists them.
 *
 * Users live in the `users` table of PostgreSQL when `DATABASE_URL` is
 * configured. Without a database the server keeps users in memory, which is
 * enough for development and for the integration tests.
 *
 * Invariants:
 * - the lowercased email is the uniqueness key
 * - only bcrypt hashes are stored, never the plaintext password
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Lowercased email address (unique)
    pub email: String,
    /// Hashed password (bcrypt); `None` for accounts created by an external provider
    pub password_hash: Option<String>,
    /// Profile image URL
    pub image: Option<String>,
    /// When the email address was verified
    pub email_verified: Option<DateTime<Utc>>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// User store errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Normalize an email address into its storage key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// In-memory user table
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

/// Where user records are kept
///
/// One store is created at startup and shared by every handler through
/// `AppState`; the Postgres variant wraps the process-wide connection pool.
#[derive(Debug, Clone)]
pub enum UserStore {
    Postgres(PgPool),
    Memory(MemoryUserStore),
}

impl UserStore {
    /// Create an empty in-memory store
    pub fn memory() -> Self {
        Self::Memory(MemoryUserStore::default())
    }

    /// Short name of the storage backend, for logs
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Create a new user
    ///
    /// # Arguments
    /// * `new_user` - Name, email and password hash; the email is normalized here
    ///
    /// # Returns
    /// Created user, or `UserStoreError::DuplicateEmail` when the email is taken
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let email = normalize_email(&new_user.email);
        match self {
            Self::Postgres(pool) => {
                create_user_pg(pool, new_user.name, email, new_user.password_hash).await
            }
            Self::Memory(store) => {
                let mut users = store.users.write().await;
                if users.values().any(|u| u.email == email) {
                    return Err(UserStoreError::DuplicateEmail(email));
                }
                let now = Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    name: new_user.name,
                    email,
                    password_hash: Some(new_user.password_hash),
                    image: None,
                    email_verified: None,
                    created_at: now,
                    updated_at: now,
                };
                users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    /// Get user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let email = normalize_email(email);
        match self {
            Self::Postgres(pool) => Ok(get_user_by_email(pool, &email).await?),
            Self::Memory(store) => Ok(store
                .users
                .read()
                .await
                .values()
                .find(|u| u.email == email)
                .cloned()),
        }
    }

    /// Get user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError> {
        match self {
            Self::Postgres(pool) => Ok(get_user_by_id(pool, id).await?),
            Self::Memory(store) => Ok(store.users.read().await.get(&id).cloned()),
        }
    }
}

async fn create_user_pg(
    pool: &PgPool,
    name: String,
    email: String,
    password_hash: String,
) -> Result<User, UserStoreError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let result = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, password_hash, image, email_verified, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(UserStoreError::DuplicateEmail(email))
        }
        Err(e) => Err(e.into()),
    }
}

async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, image, email_verified, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, image, email_verified, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
