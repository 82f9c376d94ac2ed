//! Nutrition & Activity Tracker Library
//!
//! Daily food and activity calorie log: date-keyed records, derived totals,
//! persistence and export.

pub mod build_info;
pub mod config;
pub mod dates;
pub mod db;
pub mod export;
pub mod mcp;
pub mod models;
pub mod storage;
pub mod tools;
pub mod tracker;
