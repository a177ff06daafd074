//! Record store and its persistence bridge.
//! - `store::DataStore` is the only mutation surface for the six record sets.
//! - `storage` holds the durable substrates the store mirrors itself into.
//! - Consumers wait for `Phase::Ready` before reading or writing.

pub mod errors;
pub mod ids;
pub mod runtime;
pub mod storage;
pub mod collection;
pub mod store;
pub mod dashboard;

pub use errors::ServiceError;
pub use store::{DataStore, Phase};
