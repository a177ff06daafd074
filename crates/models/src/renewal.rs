use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require, Record, RecordFields};

/// A client subscription/contract renewal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenewalFields {
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_or_number: Option<String>,
    pub office: String,
    pub expiry_date: String,
    /// Empty until renewed.
    pub renewed_date: String,
}

pub type Renewal = Record<RenewalFields>;

impl RenewalFields {
    /// Parsed expiry instant. Date-only values mean midnight UTC; local
    /// date-times without offset are read as UTC.
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        parse_instant(self.expiry_date.trim())
    }

    /// Expired when the expiry instant lies strictly before `now`.
    /// Unparseable or empty dates never count as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry().is_some_and(|expiry| expiry < now)
    }

    /// Renewed once `renewedDate` holds anything.
    pub fn is_renewed(&self) -> bool {
        !self.renewed_date.is_empty()
    }
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl RecordFields for RenewalFields {
    const SLOT: &'static str = "renewals";
    const LABEL: &'static str = "Renewal";

    fn validate(&self) -> Result<(), ModelError> {
        require(Self::LABEL, "clientName", &self.client_name)?;
        require(Self::LABEL, "expiryDate", &self.expiry_date)
    }
}
