/**
 * Server Configuration
 *
 * Storage setup for the server: connects the PostgreSQL pool when a
 * `DATABASE_URL` is configured and falls back to the in-memory user store
 * otherwise.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. Without a
 * reachable database the server keeps running on the in-memory store, which
 * loses users on restart.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::backend::auth::users::UserStore;

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if the connection fails
pub async fn load_database(database_url: &str) -> Option<PgPool> {
    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - schema might not be up to date");
        }
    }

    Some(pool)
}

/// Pick the user store for this process
pub async fn load_user_store(database_url: Option<&str>) -> UserStore {
    let Some(url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Users will be kept in memory only.");
        return UserStore::memory();
    };

    match load_database(url).await {
        Some(pool) => UserStore::Postgres(pool),
        None => {
            tracing::warn!("Database unavailable. Users will be kept in memory only.");
            UserStore::memory()
        }
    }
}
