use std::sync::Arc;

use chrono::{DateTime, Utc};
use models::{
    DeviceFields, InstallationFields, ProductFields, Record, RecordId, RenewalFields, RmaFields, ScheduleFields,
};
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::collection::{Collection, Collections, StoredKind};
use crate::dashboard::DashboardSummary;
use crate::errors::ServiceError;
use crate::ids::IdGenerator;
use crate::storage::DurableSubstrate;

/// Lifecycle of a [`DataStore`]. Moves forward only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Uninitialized,
    Hydrating,
    Ready,
}

/// Outcome of loading one slot during hydration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Loaded,
    Absent,
    /// Present but not a valid record list; the set starts empty.
    Malformed,
    /// The substrate failed to read; the set starts empty.
    Unreadable,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    pub slot: &'static str,
    pub status: SlotStatus,
    pub records: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HydrateReport {
    pub slots: Vec<SlotReport>,
}

impl HydrateReport {
    pub fn slot(&self, slot: &str) -> Option<&SlotReport> {
        self.slots.iter().find(|s| s.slot == slot)
    }
}

/// In-memory store of the six record sets, mirrored into a durable substrate.
///
/// Created `Uninitialized`; [`DataStore::hydrate`] loads every slot once and
/// flips the store to `Ready`. Until then every read and mutation fails with
/// [`ServiceError::NotReady`]. After each successful mutation the affected
/// set (and only that set) is written back in full before the call returns.
///
/// All mutations run under one write lock, so concurrent callers observe
/// them in a single total order and the last write to a slot wins.
pub struct DataStore {
    substrate: Arc<dyn DurableSubstrate>,
    ids: IdGenerator,
    inner: RwLock<Collections>,
    phase: watch::Sender<Phase>,
}

impl DataStore {
    pub fn new(substrate: Arc<dyn DurableSubstrate>) -> Arc<Self> {
        Self::with_ids(substrate, IdGenerator::new())
    }

    pub fn with_ids(substrate: Arc<dyn DurableSubstrate>, ids: IdGenerator) -> Arc<Self> {
        let (phase, _) = watch::channel(Phase::Uninitialized);
        Arc::new(Self { substrate, ids, inner: RwLock::new(Collections::default()), phase })
    }

    /// Construct and hydrate in one step.
    pub async fn open(substrate: Arc<dyn DurableSubstrate>) -> Arc<Self> {
        let store = Self::new(substrate);
        store.hydrate().await;
        store
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Resolves once hydration has completed.
    pub async fn ready(&self) {
        let mut rx = self.phase.subscribe();
        // the sender lives in `self`, so the channel cannot close while we wait
        let _ = rx.wait_for(|p| *p == Phase::Ready).await;
    }

    /// Load every slot from the substrate. Runs at most once; later calls
    /// return an empty report without touching the substrate.
    pub async fn hydrate(&self) -> HydrateReport {
        let mut all = self.inner.write().await;
        let started = self.phase.send_if_modified(|p| {
            if *p == Phase::Uninitialized {
                *p = Phase::Hydrating;
                true
            } else {
                false
            }
        });
        if !started {
            debug!(phase = ?self.phase(), "hydrate skipped; store already initialized");
            return HydrateReport::default();
        }

        let mut report = HydrateReport::default();
        all.schedules = self.load_slot::<ScheduleFields>(&mut report).await;
        all.renewals = self.load_slot::<RenewalFields>(&mut report).await;
        all.rmas = self.load_slot::<RmaFields>(&mut report).await;
        all.installations = self.load_slot::<InstallationFields>(&mut report).await;
        all.products = self.load_slot::<ProductFields>(&mut report).await;
        all.devices = self.load_slot::<DeviceFields>(&mut report).await;

        for id in all.ids() {
            self.ids.observe(id);
        }

        self.phase.send_replace(Phase::Ready);
        info!(
            records = all.ids().count(),
            malformed = report.slots.iter().filter(|s| s.status == SlotStatus::Malformed).count(),
            "store hydrated"
        );
        report
    }

    async fn load_slot<F: StoredKind>(&self, report: &mut HydrateReport) -> Collection<F> {
        let (collection, status) = match self.substrate.read(F::SLOT).await {
            Ok(Some(text)) => match Collection::<F>::from_json(&text) {
                Ok(collection) => (collection, SlotStatus::Loaded),
                Err(e) => {
                    warn!(slot = F::SLOT, error = %e, "stored slot is malformed; starting empty");
                    (Collection::default(), SlotStatus::Malformed)
                }
            },
            Ok(None) => (Collection::default(), SlotStatus::Absent),
            Err(e) => {
                warn!(slot = F::SLOT, error = %e, "stored slot unreadable; starting empty");
                (Collection::default(), SlotStatus::Unreadable)
            }
        };
        report.slots.push(SlotReport { slot: F::SLOT, status, records: collection.len() });
        collection
    }

    fn ensure_ready(&self) -> Result<(), ServiceError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ServiceError::NotReady)
        }
    }

    async fn persist<F: StoredKind>(&self, collection: &Collection<F>) -> Result<(), ServiceError> {
        let payload = collection
            .to_json()
            .map_err(|e| ServiceError::Encode { slot: F::SLOT, reason: e.to_string() })?;
        if let Err(source) = self.substrate.write(F::SLOT, &payload).await {
            warn!(slot = F::SLOT, error = %source, "persist failed; keeping in-memory state");
            return Err(ServiceError::Persist { slot: F::SLOT, source });
        }
        Ok(())
    }

    /// Snapshot of one record set in insertion order.
    pub async fn list<F: StoredKind>(&self) -> Result<Vec<Record<F>>, ServiceError> {
        self.ensure_ready()?;
        let all = self.inner.read().await;
        Ok(F::collection(&all).records().to_vec())
    }

    pub async fn get<F: StoredKind>(&self, id: &RecordId) -> Result<Option<Record<F>>, ServiceError> {
        self.ensure_ready()?;
        let all = self.inner.read().await;
        Ok(F::collection(&all).get(id).cloned())
    }

    /// Append a record with a fresh id.
    ///
    /// On `ServiceError::Persist` the record is already part of the set.
    pub async fn add<F: StoredKind>(&self, fields: F) -> Result<Record<F>, ServiceError> {
        self.ensure_ready()?;
        let mut all = self.inner.write().await;
        let record = Record::new(self.ids.next_id(), fields);
        let collection = F::collection_mut(&mut all);
        collection.push(record.clone());
        debug!(kind = F::LABEL, id = %record.id, "record added");
        self.persist(&*collection).await?;
        Ok(record)
    }

    /// Replace the fields of `id` in place.
    ///
    /// Unknown ids are a silent no-op: `Ok(false)`, nothing added and
    /// nothing written. Callers that need a "not found" outcome map it.
    pub async fn update<F: StoredKind>(&self, id: &RecordId, fields: F) -> Result<bool, ServiceError> {
        self.ensure_ready()?;
        let mut all = self.inner.write().await;
        let collection = F::collection_mut(&mut all);
        if !collection.replace(id, fields) {
            debug!(kind = F::LABEL, %id, "update ignored; unknown id");
            return Ok(false);
        }
        debug!(kind = F::LABEL, %id, "record updated");
        self.persist(&*collection).await?;
        Ok(true)
    }

    /// Remove `id`. Unknown ids are a silent no-op returning `Ok(false)`.
    pub async fn delete<F: StoredKind>(&self, id: &RecordId) -> Result<bool, ServiceError> {
        self.ensure_ready()?;
        let mut all = self.inner.write().await;
        let collection = F::collection_mut(&mut all);
        if !collection.remove(id) {
            debug!(kind = F::LABEL, %id, "delete ignored; unknown id");
            return Ok(false);
        }
        debug!(kind = F::LABEL, %id, "record deleted");
        self.persist(&*collection).await?;
        Ok(true)
    }

    /// Counts and expired renewals as of `now`.
    pub async fn summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, ServiceError> {
        self.ensure_ready()?;
        let all = self.inner.read().await;
        Ok(DashboardSummary::from_collections(&all, now))
    }
}
