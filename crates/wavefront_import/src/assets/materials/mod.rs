//! Material library subsystem
//!
//! Resolves the library an object file points at and, when asked, interprets
//! its material definitions.

pub mod mtl_parser;
pub mod material_library;

pub use mtl_parser::{MtlParser, MaterialProperties};
pub use material_library::{MaterialLibraryLoader, MaterialLibraryError, LoadOutcome};
