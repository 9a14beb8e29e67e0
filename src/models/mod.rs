//! Data models shared by the CLI, the services and the HTTP API.

/// Scan history entries
pub mod history;
/// Classification labels
pub mod label;
/// Scan request and result
pub mod scan;
