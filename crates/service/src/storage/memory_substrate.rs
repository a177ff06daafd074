use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use super::{DurableSubstrate, SubstrateError};

/// In-process slot map with an optional total byte quota, the way browser
/// storage rejects writes once its budget is used up.
#[derive(Debug, Default)]
pub struct MemorySubstrate {
    slots: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { slots: Mutex::default(), quota: Some(quota) }
    }

    /// Seed a slot directly, bypassing the quota.
    pub fn insert_raw(&self, slot: &str, payload: impl Into<String>) {
        self.lock().insert(slot.to_string(), payload.into());
    }

    pub fn raw(&self, slot: &str) -> Option<String> {
        self.lock().get(slot).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a consistent map: writes replace whole slots
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DurableSubstrate for MemorySubstrate {
    async fn read(&self, slot: &str) -> Result<Option<String>, SubstrateError> {
        Ok(self.raw(slot))
    }

    async fn write(&self, slot: &str, payload: &str) -> Result<(), SubstrateError> {
        let mut slots = self.lock();
        if let Some(quota) = self.quota {
            let others: usize = slots.iter().filter(|(k, _)| k.as_str() != slot).map(|(k, v)| k.len() + v.len()).sum();
            let needed = others + slot.len() + payload.len();
            if needed > quota {
                return Err(SubstrateError::QuotaExceeded { slot: slot.to_string(), needed, quota });
            }
        }
        slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}
