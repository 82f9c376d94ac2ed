//! Daily log core
//!
//! Aggregation, input validation and the date-keyed record store.

pub mod aggregate;
pub mod input;
pub mod store;

pub use store::DailyRecordStore;
