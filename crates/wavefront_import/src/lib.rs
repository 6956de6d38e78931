//! # Wavefront Import
//!
//! Imports Wavefront object files (`.obj`) and their material libraries
//! (`.mtl`) into an in-memory model of named sub-meshes with per-face
//! material assignment.
//!
//! ## Features
//!
//! - **Permissive Parsing**: Malformed lines are patched and reported, never fatal
//! - **Material Splitting**: Meshes split at material boundaries for draw batching
//! - **All Face Encodings**: `p`, `p/t`, `p/t/n` and `p//n` vertex references
//! - **Configurable**: Legacy compatibility, triangulation and MTL interpretation switches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wavefront_import::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = WavefrontModel::load("resources/models/teapot.obj")?;
//!
//!     for mesh in model.meshes() {
//!         println!("{}: {} faces", mesh.name(), mesh.faces().len());
//!     }
//!     for diagnostic in model.diagnostics() {
//!         eprintln!("{diagnostic}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;

/// Common imports for importer users
pub mod prelude {
    pub use crate::{
        assets::{
            obj::{
                WavefrontModel, LoadError,
                Mesh, Material, Face, VertexRef,
                Diagnostic, DiagnosticKind,
                AttributeKind, PoolError, ROOT_NAME,
            },
            materials::MaterialProperties,
        },
        core::config::{ImportConfig, Config},
        foundation::math::{Vec2, Vec3},
    };
}
