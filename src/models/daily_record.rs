//! Daily record model
//!
//! Everything logged for one calendar date, and the date-indexed store of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ActivityEntry, FoodEntry};

/// Full date-indexed collection of daily records, the unit of persistence and export.
///
/// Keys are `YYYY-MM-DD` strings, so natural map order is chronological.
pub type Store = BTreeMap<String, DailyRecord>;

/// All logged data for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: String, // ISO date: "2024-01-15"
    #[serde(default)]
    pub foods: Vec<FoodEntry>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    #[serde(default)]
    pub summary: String,
}

impl DailyRecord {
    /// Fresh record for a date with nothing logged yet
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            foods: Vec::new(),
            activities: Vec::new(),
            summary: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: DailyRecord = serde_json::from_str(r#"{"date":"2024-01-15"}"#).unwrap();
        assert_eq!(record, DailyRecord::empty("2024-01-15"));
    }

    #[test]
    fn test_store_iterates_by_date() {
        let mut store = Store::new();
        for date in ["2024-02-01", "2023-12-31", "2024-01-15"] {
            store.insert(date.to_string(), DailyRecord::empty(date));
        }
        let keys: Vec<&str> = store.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-01-15", "2024-02-01"]);
    }
}
