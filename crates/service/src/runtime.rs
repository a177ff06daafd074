//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_data_dir` without depending directly on `common`.

/// Ensure the durable slot directory exists before the store opens it.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir).await
}
