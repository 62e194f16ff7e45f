//! Configuration management for the waitlist engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for every engine component.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
