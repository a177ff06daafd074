//! Dashboard overview figures derived from the current record sets.

use chrono::{DateTime, Utc};
use models::Renewal;
use serde::Serialize;

use crate::collection::Collections;

/// Number of expired renewals the overview lists before summarising the rest.
pub const EXPIRED_PREVIEW: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub schedules: usize,
    pub renewals: usize,
    pub rmas: usize,
    pub installations: usize,
    pub products: usize,
    pub devices: usize,
    pub products_in_stock: usize,
    /// Renewals with a `renewedDate` set.
    pub renewed: usize,
    pub expired_count: usize,
    /// First [`EXPIRED_PREVIEW`] expired renewals in insertion order.
    pub expired_renewals: Vec<Renewal>,
    /// Expired renewals left out of the preview.
    pub more_expired: usize,
}

impl DashboardSummary {
    pub fn from_collections(all: &Collections, now: DateTime<Utc>) -> Self {
        let renewals = all.renewals.records();
        let mut expired = renewals.iter().filter(|r| r.fields.is_expired(now));
        let expired_renewals: Vec<Renewal> = expired.by_ref().take(EXPIRED_PREVIEW).cloned().collect();
        let more_expired = expired.count();
        Self {
            schedules: all.schedules.len(),
            renewals: all.renewals.len(),
            rmas: all.rmas.len(),
            installations: all.installations.len(),
            products: all.products.len(),
            devices: all.devices.len(),
            products_in_stock: all.products.records().iter().filter(|p| p.fields.in_stock()).count(),
            renewed: renewals.iter().filter(|r| r.fields.is_renewed()).count(),
            expired_count: expired_renewals.len() + more_expired,
            expired_renewals,
            more_expired,
        }
    }
}
