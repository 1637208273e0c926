//! Database connection management

use sqlx::{PgPool, postgres::PgPoolOptions};

/// Maximum pooled connections per process.
pub const MAX_CONNECTIONS: u32 = 10;

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}
