//! Entry models
//!
//! Food and activity log lines. Both share one lifecycle: created with a fresh
//! id and timestamp, edited in place, deleted by id.

use serde::{Deserialize, Serialize};

/// Common shape of a log line, so list helpers work for foods and activities alike
pub trait Entry: Clone {
    /// Build a new entry
    fn create(id: String, description: String, amount: u32, timestamp: String) -> Self;

    fn id(&self) -> &str;

    fn description(&self) -> &str;

    /// Calorie value: consumed for food, burned for activity
    fn amount(&self) -> u32;

    /// Replace the mutable fields, keeping id and timestamp
    fn update(&mut self, description: String, amount: u32);
}

/// A food item eaten on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub description: String,
    pub calories: u32,
    pub timestamp: String, // ISO-8601 instant: "2024-01-15T08:30:00.000Z"
}

/// A physical activity performed on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub description: String,
    pub calories_burned: u32,
    pub timestamp: String,
}

impl Entry for FoodEntry {
    fn create(id: String, description: String, amount: u32, timestamp: String) -> Self {
        Self {
            id,
            description,
            calories: amount,
            timestamp,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> u32 {
        self.calories
    }

    fn update(&mut self, description: String, amount: u32) {
        self.description = description;
        self.calories = amount;
    }
}

impl Entry for ActivityEntry {
    fn create(id: String, description: String, amount: u32, timestamp: String) -> Self {
        Self {
            id,
            description,
            calories_burned: amount,
            timestamp,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> u32 {
        self.calories_burned
    }

    fn update(&mut self, description: String, amount: u32) {
        self.description = description;
        self.calories_burned = amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_uses_camel_case_field() {
        let activity = ActivityEntry::create(
            "a1".to_string(),
            "Walk".to_string(),
            80,
            "2024-01-15T08:00:00.000Z".to_string(),
        );
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["caloriesBurned"], 80);
        assert!(json.get("calories_burned").is_none());
    }

    #[test]
    fn test_update_keeps_id_and_timestamp() {
        let mut food = FoodEntry::create(
            "f1".to_string(),
            "Toast".to_string(),
            120,
            "2024-01-15T08:00:00.000Z".to_string(),
        );
        food.update("Bagel".to_string(), 250);
        assert_eq!(food.id(), "f1");
        assert_eq!(food.timestamp, "2024-01-15T08:00:00.000Z");
        assert_eq!(food.description(), "Bagel");
        assert_eq!(food.amount(), 250);
    }

    #[test]
    fn test_negative_calories_rejected_on_read() {
        let raw = r#"{"id":"f1","description":"Toast","calories":-5,"timestamp":"2024-01-15T08:00:00.000Z"}"#;
        assert!(serde_json::from_str::<FoodEntry>(raw).is_err());
    }
}
