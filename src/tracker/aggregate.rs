//! Daily record aggregation
//!
//! Pure functions: calorie sums over a record, and copy-on-write edits of an
//! entry list that keep untouched entries in insertion order.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::models::{CalorieTotals, DailyRecord, Entry};

/// Sum of calories over all foods
pub fn total_consumed(record: &DailyRecord) -> u64 {
    record.foods.iter().map(|f| u64::from(f.calories)).sum()
}

/// Sum of calories burned over all activities
pub fn total_burned(record: &DailyRecord) -> u64 {
    record.activities.iter().map(|a| u64::from(a.calories_burned)).sum()
}

/// Consumed minus burned; negative when more was burned
pub fn net(record: &DailyRecord) -> i64 {
    total_consumed(record) as i64 - total_burned(record) as i64
}

/// All three figures for one record
pub fn totals(record: &DailyRecord) -> CalorieTotals {
    CalorieTotals::new(total_consumed(record), total_burned(record))
}

/// Totals across several records, e.g. a week
pub fn totals_across<'a, I>(records: I) -> CalorieTotals
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    records.into_iter().map(totals).sum()
}

/// Append a new entry with a fresh id and creation timestamp
pub fn add_entry<E: Entry>(list: &[E], description: &str, amount: u32) -> Vec<E> {
    let entry = E::create(
        generate_id(list),
        description.to_string(),
        amount,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    let mut next = list.to_vec();
    next.push(entry);
    next
}

/// Replace description and amount of the entry with `id`; unknown ids change nothing
pub fn edit_entry<E: Entry>(list: &[E], id: &str, description: &str, amount: u32) -> Vec<E> {
    list.iter()
        .map(|entry| {
            if entry.id() == id {
                let mut edited = entry.clone();
                edited.update(description.to_string(), amount);
                edited
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Remove the entry with `id`; unknown ids change nothing
pub fn delete_entry<E: Entry>(list: &[E], id: &str) -> Vec<E> {
    list.iter().filter(|entry| entry.id() != id).cloned().collect()
}

/// Millisecond timestamp plus a random suffix, retried until unique within `list`
fn generate_id<E: Entry>(list: &[E]) -> String {
    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("{}{}", Utc::now().timestamp_millis(), &suffix[..9]);
        if !list.iter().any(|entry| entry.id() == id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityEntry, FoodEntry};

    fn food(id: &str, description: &str, calories: u32) -> FoodEntry {
        FoodEntry::create(
            id.to_string(),
            description.to_string(),
            calories,
            "2024-01-15T08:00:00.000Z".to_string(),
        )
    }

    #[test]
    fn test_empty_record_totals() {
        let record = DailyRecord::empty("2024-01-15");
        assert_eq!(total_consumed(&record), 0);
        assert_eq!(total_burned(&record), 0);
        assert_eq!(net(&record), 0);
    }

    #[test]
    fn test_net_after_food_and_activity() {
        for (a, b) in [(0u32, 0u32), (120, 80), (80, 120), (2500, 0), (0, 600)] {
            let mut record = DailyRecord::empty("2024-01-15");
            record.foods = add_entry(&record.foods, "Toast", a);
            record.activities = add_entry::<ActivityEntry>(&record.activities, "Walk", b);

            assert_eq!(net(&record), a as i64 - b as i64);
            assert_eq!(net(&record), total_consumed(&record) as i64 - total_burned(&record) as i64);
            assert_eq!(totals(&record).net, net(&record));
        }
    }

    #[test]
    fn test_totals_across_records() {
        let mut monday = DailyRecord::empty("2024-01-15");
        monday.foods = vec![food("f1", "Toast", 120), food("f2", "Soup", 300)];
        let mut tuesday = DailyRecord::empty("2024-01-16");
        tuesday.activities = add_entry(&tuesday.activities, "Run", 500);

        let total = totals_across([&monday, &tuesday]);
        assert_eq!(total, CalorieTotals::new(420, 500));
        assert_eq!(total.net, -80);
    }

    #[test]
    fn test_add_appends_with_metadata() {
        let list = vec![food("f1", "Toast", 120)];
        let next = add_entry(&list, "Apple", 95);

        assert_eq!(next.len(), 2);
        assert_eq!(next[0], list[0]);
        assert_eq!(next[1].description, "Apple");
        assert_eq!(next[1].calories, 95);
        assert_ne!(next[1].id, "f1");
        assert!(chrono::DateTime::parse_from_rfc3339(&next[1].timestamp).is_ok());
    }

    #[test]
    fn test_generated_ids_unique() {
        let mut list: Vec<FoodEntry> = Vec::new();
        for _ in 0..200 {
            list = add_entry(&list, "Snack", 10);
        }
        let mut ids: Vec<&str> = list.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let list = vec![food("f1", "Toast", 120), food("f2", "Coffee", 5)];
        let added = add_entry(&list, "Apple", 95);
        let new_id = added.last().unwrap().id.clone();

        assert_eq!(delete_entry(&added, &new_id), list);
    }

    #[test]
    fn test_edit_keeps_position() {
        let list = vec![food("f1", "Toast", 120), food("f2", "Coffee", 5), food("f3", "Soup", 300)];
        let edited = edit_entry(&list, "f2", "Latte", 150);

        assert_eq!(edited.len(), 3);
        assert_eq!(edited[0], list[0]);
        assert_eq!(edited[1].id, "f2");
        assert_eq!(edited[1].description, "Latte");
        assert_eq!(edited[1].calories, 150);
        assert_eq!(edited[1].timestamp, list[1].timestamp);
        assert_eq!(edited[2], list[2]);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let list = vec![food("f1", "Toast", 120)];
        assert_eq!(edit_entry(&list, "missing", "Bagel", 250), list);
        assert_eq!(delete_entry(&list, "missing"), list);
    }
}
