//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers and the CLI.

pub mod classification_service;
pub mod history_service;
pub mod training_service;
