use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require, Record, RecordFields};

/// An on-site installation project.
///
/// `devices` holds display names, usually copied from a product name.
/// They are plain strings: removing or renaming the product leaves them
/// untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstallationFields {
    pub project: String,
    pub company: String,
    pub date_time: String,
    pub location: String,
    pub devices: Vec<String>,
}

pub type Installation = Record<InstallationFields>;

impl RecordFields for InstallationFields {
    const SLOT: &'static str = "installations";
    const LABEL: &'static str = "Installation";

    fn validate(&self) -> Result<(), ModelError> {
        require(Self::LABEL, "project", &self.project)?;
        require(Self::LABEL, "company", &self.company)?;
        require(Self::LABEL, "dateTime", &self.date_time)?;
        require(Self::LABEL, "location", &self.location)
    }
}

