//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, shared state)
//! 2. Calls into the services
//! 3. Returns HTTP response (JSON, status code)

/// Service status endpoint
pub mod health;
/// Scan history endpoint
pub mod history;
/// Message classification endpoint
pub mod scan;
