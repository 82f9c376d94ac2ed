//! Data models
//!
//! Daily log entities and their persisted forms.

mod daily_record;
mod document;
mod entry;
mod totals;

pub use daily_record::{DailyRecord, Store};
pub use document::StoredDocument;
pub use entry::{ActivityEntry, Entry, FoodEntry};
pub use totals::CalorieTotals;
