//! Durable substrates for the record store
//!
//! A substrate is a plain key-value store of named slots, each holding the
//! JSON text of one record set. The store writes a whole slot per mutation.

use async_trait::async_trait;
use thiserror::Error;

pub mod file_substrate;
pub mod memory_substrate;

pub use file_substrate::FileSubstrate;
pub use memory_substrate::MemorySubstrate;

#[derive(Debug, Error)]
pub enum SubstrateError {
    #[error("io error on slot `{slot}`: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },
    #[error("quota exceeded writing `{slot}`: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { slot: String, needed: usize, quota: usize },
}

/// Trait abstraction for the slot storage behind the store.
/// Implementations can be file-backed, in-memory, or remote KV.
#[async_trait]
pub trait DurableSubstrate: Send + Sync {
    /// Returns `None` when the slot was never written.
    async fn read(&self, slot: &str) -> Result<Option<String>, SubstrateError>;
    /// Replaces the slot's content.
    async fn write(&self, slot: &str, payload: &str) -> Result<(), SubstrateError>;
}
