//! Tracker tools module
//!
//! Presentation-facing operations wrapped by the MCP server.

pub mod days;
pub mod entries;
pub mod export;
pub mod status;
