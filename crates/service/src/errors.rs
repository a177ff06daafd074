use thiserror::Error;

use crate::storage::SubstrateError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("store is not ready: hydration has not completed")]
    NotReady,
    /// The in-memory change was applied; only the durable copy is stale.
    #[error("failed to persist `{slot}`: {source}")]
    Persist {
        slot: &'static str,
        #[source]
        source: SubstrateError,
    },
    #[error("failed to encode `{slot}`: {reason}")]
    Encode { slot: &'static str, reason: String },
}
