//! Wavefront OBJ import
//!
//! Single-pass pipeline: each line is normalized and classified, attribute
//! directives feed the [`VertexAttributePool`], face directives are decoded by
//! the [`FaceParser`] and filed by the [`MeshMaterialRegistry`]. The
//! orchestrator in [`model`] owns the loop and hands back a finished
//! [`WavefrontModel`].

pub mod attribute_pool;
pub mod line_classifier;
pub mod face_parser;
pub mod registry;
pub mod diagnostics;
pub mod model;

pub use attribute_pool::{Attribute, AttributeKind, PoolError, VertexAttributePool};
pub use line_classifier::{classify, normalize_whitespace, ClassifiedLine, Directive};
pub use face_parser::{Face, FaceEncoding, FaceParser, ParsedFace, VertexRef};
pub use registry::{Material, Mesh, MeshKey, MeshMaterialRegistry, ROOT_NAME};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use model::{LoadError, WavefrontModel};

#[cfg(test)]
mod tests;
