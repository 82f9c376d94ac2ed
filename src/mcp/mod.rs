//! MCP server module
//!
//! Exposes the tracker tools over the Model Context Protocol.

mod server;

pub use server::TrackerService;
