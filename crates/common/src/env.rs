//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the data directory exists and is writable.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.permissions().readonly() => {
            warn!(%data_dir, "data directory is read-only; every mutation will fail to persist");
        }
        Ok(_) => info!(%data_dir, "data directory ready"),
        Err(e) => return Err(anyhow::anyhow!("cannot stat {data_dir}: {e}")),
    }
    Ok(())
}
