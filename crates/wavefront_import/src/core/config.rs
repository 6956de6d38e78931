//! # Import Configuration
//!
//! Switches that trade exact legacy behaviour against more complete decoding.
//! A default configuration behaves as follows:
//!
//! - `p//n` face references are decoded (position + normal)
//! - faces with more than three references keep only the first three
//! - the material library is located and read but not interpreted

use serde::{Serialize, Deserialize};

// Re-export from the generic config module for compatibility
pub use crate::config::{Config, ConfigError};

/// # Import Configuration
///
/// Controls how the model file orchestrator treats the parts of the format
/// that the classic importer handled loosely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Leave `p//n` references undecoded (all indices zero), as the classic importer did
    pub legacy_slash_normal: bool,
    /// Fan-triangulate faces with more than three vertex references instead of dropping the extras
    pub triangulate_polygons: bool,
    /// Parse the material library and attach its attributes to material records
    pub interpret_material_library: bool,
}

impl Config for ImportConfig {}

impl ImportConfig {
    /// Enable every decoding extension
    pub fn full() -> Self {
        Self {
            legacy_slash_normal: false,
            triangulate_polygons: true,
            interpret_material_library: true,
        }
    }

    /// Reproduce the classic importer exactly, including undecoded `p//n` faces
    pub fn legacy() -> Self {
        Self {
            legacy_slash_normal: true,
            ..Self::default()
        }
    }
}
