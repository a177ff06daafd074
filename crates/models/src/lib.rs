//! Record kinds of the operations dashboard.
//! - One module per kind; each exposes a `*Fields` value type.
//! - `record::Record<F>` pairs fields with their identifier and is the
//!   flat JSON shape kept in the durable slots.

pub mod errors;
pub mod record;
pub mod schedule;
pub mod renewal;
pub mod rma;
pub mod installation;
pub mod product;
pub mod device;

pub use record::{Record, RecordFields, RecordId};
pub use schedule::{Schedule, ScheduleFields};
pub use renewal::{Renewal, RenewalFields};
pub use rma::{Rma, RmaFields};
pub use installation::{Installation, InstallationFields};
pub use product::{Product, ProductFields};
pub use device::{Device, DeviceFields};

#[cfg(test)]
mod tests;
