//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime` without depending directly on `common`.

/// Make sure a file-backed SQLite database can be created.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    common::env::ensure_database_dir(database_url).await
}
