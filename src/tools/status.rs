//! Tracker status tool
//!
//! Runtime status information and usage instructions for MCP clients.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::storage::{BackendInfo, BackendKind};

/// Usage instructions for AI assistants driving the tracker
pub const TRACKER_INSTRUCTIONS: &str = r#"
# Nutrition & Activity Tracker Instructions

Each calendar date (YYYY-MM-DD) has one daily record: a list of foods, a list
of activities, and a free-text summary.

## Getting the Current Date

Use `navigate_date(date, offset: 0)` on a known date, or omit `date` in
`get_daily_data` to get today's record. Use `offset: -1` / `offset: 1` to move
to the previous or next day.

## Logging

| Task | Tool |
|------|------|
| View a day with totals | `get_daily_data` |
| Log food | `add_food(date, description, calories)` |
| Fix a food line | `edit_food(date, id, description, calories)` |
| Remove a food line | `delete_food(date, id)` |
| Log exercise | `add_activity(date, description, calories_burned)` |
| Fix / remove exercise | `edit_activity`, `delete_activity` |
| Write the day's notes | `summary_change(date, summary)` |
| Replace a whole day | `save_daily_data(date, record)` |
| Export everything | `export_data(format)`, format is "json", "csv" or omitted for both |

## Input Rules

- Descriptions must not be blank (surrounding whitespace is trimmed)
- Calories are whole numbers, 0 or more
- Invalid input is ignored: the response has `changed: false` and nothing is logged
- Editing or deleting an unknown id also returns `changed: false`

## Totals

- `consumed` = sum of food calories
- `burned` = sum of activity calories
- `net` = consumed - burned (shown as `+250` or `-80`)

## Exports

- JSON: the full store keyed by date, re-loadable as a data file
- CSV: `Date,Type,Description,Calories,Summary`; activities appear with negative calories
- Files are named `nutrition-tracker-<today>.json` / `.csv`
"#;

/// Runtime status of the tracker service
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Storage information
    pub backend: BackendKind,
    pub data_path: String,
    pub data_size_bytes: Option<u64>,
    pub dates_logged: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    backend: BackendInfo,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(backend: BackendInfo) -> Self {
        Self {
            start_time: Instant::now(),
            backend,
        }
    }

    /// Get the current status
    pub fn get_status(&self, dates_logged: usize) -> TrackerStatus {
        let build_info = BuildInfo::current();

        let data_size_bytes = std::fs::metadata(&self.backend.path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TrackerStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            backend: self.backend.kind,
            data_path: self.backend.path.display().to_string(),
            data_size_bytes,
            dates_logged,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_status_for_missing_data_file() {
        let tracker = StatusTracker::new(BackendInfo {
            kind: BackendKind::Json,
            path: PathBuf::from("/nonexistent/nutrition-tracker.json"),
        });
        let status = tracker.get_status(3);

        assert_eq!(status.backend, BackendKind::Json);
        assert_eq!(status.data_size_bytes, None);
        assert_eq!(status.dates_logged, 3);
        assert_eq!(status.process_id, std::process::id());
    }
}
