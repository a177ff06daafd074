use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require, Record, RecordFields};

/// Labels accepted for `clientType`.
pub mod client_type {
    pub const UNDER_WARRANTY: &str = "underwarranty";
    pub const NEW_CLIENT: &str = "newclient";
    pub const ALL: [&str; 2] = [UNDER_WARRANTY, NEW_CLIENT];

    pub fn is_known(label: &str) -> bool {
        ALL.contains(&label)
    }
}

/// A calendar entry for a client visit or call.
///
/// `client_type` stays a plain string so slots written with other labels
/// still hydrate; only `validate` checks it against [`client_type::ALL`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleFields {
    pub title: String,
    pub description: String,
    /// Combined date and time, as entered.
    pub datetime: String,
    pub location: String,
    pub client_type: String,
    pub company: String,
    pub contact: String,
    pub email_or_number: String,
}

pub type Schedule = Record<ScheduleFields>;

impl RecordFields for ScheduleFields {
    const SLOT: &'static str = "schedules";
    const LABEL: &'static str = "Schedule";

    fn validate(&self) -> Result<(), ModelError> {
        require(Self::LABEL, "title", &self.title)?;
        require(Self::LABEL, "datetime", &self.datetime)?;
        if !self.client_type.is_empty() && !client_type::is_known(&self.client_type) {
            return Err(ModelError::Validation(format!(
                "clientType must be one of {:?}",
                client_type::ALL
            )));
        }
        Ok(())
    }
}
