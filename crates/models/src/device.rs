use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require, Record, RecordFields};

/// Minimal device catalog entry, independent of products.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceFields {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub type Device = Record<DeviceFields>;

impl RecordFields for DeviceFields {
    const SLOT: &'static str = "devices";
    const LABEL: &'static str = "Device";

    fn validate(&self) -> Result<(), ModelError> {
        require(Self::LABEL, "name", &self.name)?;
        require(Self::LABEL, "type", &self.kind)
    }
}
