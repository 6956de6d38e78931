//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the importer:
//! - Math types for vertex attributes
//! - Logging utilities

pub mod math;
pub mod logging;
