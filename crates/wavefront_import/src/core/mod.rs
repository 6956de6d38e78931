//! # Core Module
//!
//! Shared configuration used by the import pipeline.
//!
//! ## Organization
//!
//! - **Config**: Import behaviour switches, loadable from TOML or RON

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::assets;

pub use config::{ImportConfig, Config, ConfigError};
