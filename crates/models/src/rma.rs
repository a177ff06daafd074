use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require, Record, RecordFields};

/// Return merchandise authorization (warranty/repair) entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RmaFields {
    pub item_returned: String,
    pub purchased_date: String,
    /// Under warranty: free repair or replacement. Otherwise repair with fee.
    pub warranty: bool,
    pub repair_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_or_number: Option<String>,
}

pub type Rma = Record<RmaFields>;

impl RecordFields for RmaFields {
    const SLOT: &'static str = "rmas";
    const LABEL: &'static str = "RMA";

    fn validate(&self) -> Result<(), ModelError> {
        require(Self::LABEL, "itemReturned", &self.item_returned)?;
        require(Self::LABEL, "purchasedDate", &self.purchased_date)?;
        require(Self::LABEL, "repairType", &self.repair_type)
    }
}
