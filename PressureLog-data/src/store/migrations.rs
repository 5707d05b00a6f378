use rusqlite::Connection;
use tracing::info;

use super::errors::StoreError;

/// Run SQLite migrations for the key-value table
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    info!("Running SQLite store migrations");

    create_kv_table(conn)?;
    create_updated_at_index(conn)?;

    info!("SQLite store migrations completed successfully");
    Ok(())
}

/// Create the key-value table
fn create_kv_table(conn: &Connection) -> Result<(), StoreError> {
    info!("Creating kv_store table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| StoreError::Migration(e.to_string()))?;

    Ok(())
}

/// Create index on the modification time
fn create_updated_at_index(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_kv_store_updated_at
        ON kv_store (updated_at DESC)",
        [],
    )
    .map_err(|e| StoreError::Migration(format!("Failed to create index: {}", e)))?;

    Ok(())
}
