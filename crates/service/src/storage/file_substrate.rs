use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{DurableSubstrate, SubstrateError};

/// One `<dir>/<slot>.json` file per slot.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous slot content intact.
#[derive(Clone, Debug)]
pub struct FileSubstrate {
    dir: PathBuf,
}

impl FileSubstrate {
    /// Open the substrate rooted at `dir`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, SubstrateError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| SubstrateError::Io { slot: dir.display().to_string(), source })?;
        Ok(Arc::new(Self { dir }))
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

#[async_trait]
impl DurableSubstrate for FileSubstrate {
    async fn read(&self, slot: &str) -> Result<Option<String>, SubstrateError> {
        match fs::read_to_string(self.slot_path(slot)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SubstrateError::Io { slot: slot.to_string(), source }),
        }
    }

    async fn write(&self, slot: &str, payload: &str) -> Result<(), SubstrateError> {
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!(".{slot}.json.tmp"));
        let io_err = |source| SubstrateError::Io { slot: slot.to_string(), source };
        fs::write(&tmp, payload).await.map_err(io_err)?;
        fs::rename(&tmp, &path).await.map_err(io_err)?;
        debug!(slot, bytes = payload.len(), path = %path.display(), "slot written");
        Ok(())
    }
}
