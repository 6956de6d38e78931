//! Asset import system

pub mod obj;
pub mod materials;

pub use obj::{WavefrontModel, LoadError};
pub use materials::{
    MtlParser, MaterialProperties,
    MaterialLibraryLoader, MaterialLibraryError, LoadOutcome,
};
