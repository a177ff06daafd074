use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require, Record, RecordFields};

/// A catalog product with informational stock count.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: u32,
    /// URL or base64 data URI, stored uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub type Product = Record<ProductFields>;

impl ProductFields {
    /// Only stocked products are offered when picking installation devices.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

impl RecordFields for ProductFields {
    const SLOT: &'static str = "products";
    const LABEL: &'static str = "Product";

    fn validate(&self) -> Result<(), ModelError> {
        require(Self::LABEL, "name", &self.name)?;
        require(Self::LABEL, "category", &self.category)
    }
}
