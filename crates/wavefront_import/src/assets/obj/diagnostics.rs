//! Non-fatal import diagnostics
//!
//! The importer is deliberately permissive: anything short of failing to open
//! the object file is absorbed and parsing continues. Each absorbed anomaly is
//! recorded here so callers can inspect what was patched over.

use std::fmt;

use thiserror::Error;

use super::attribute_pool::PoolError;
use crate::assets::materials::MaterialLibraryError;

/// What went wrong on a line
#[derive(Error, Debug, Clone)]
pub enum DiagnosticKind {
    /// A numeric payload failed to parse; zero was stored instead
    #[error("malformed numeric field '{field}' in '{directive}' directive, stored as zero")]
    MalformedNumericField {
        /// Directive keyword
        directive: &'static str,
        /// Offending text (empty when the field was missing)
        field: String,
    },

    /// A face used an encoding the importer does not decode; indices left at zero
    #[error("unsupported face encoding: {reason}")]
    UnsupportedFaceEncoding {
        /// Human-readable explanation
        reason: String,
    },

    /// A face directive carried fewer than three vertex references and was dropped
    #[error("face has {found} vertex reference(s), at least 3 required; face dropped")]
    TooFewVertices {
        /// Number of references found
        found: usize,
    },

    /// Vertex references beyond the third were ignored
    #[error("{count} extra vertex reference(s) ignored (polygon not triangulated)")]
    ExtraVerticesDropped {
        /// Number of ignored references
        count: usize,
    },

    /// A face referenced an attribute that does not exist (yet)
    #[error("face references missing attribute: {0}")]
    IndexOutOfRange(#[from] PoolError),

    /// A naming directive had no argument and was ignored
    #[error("'{directive}' directive without a name ignored")]
    MissingName {
        /// Directive keyword
        directive: &'static str,
    },

    /// The material library could not be used
    #[error("material library: {0}")]
    MaterialLibrary(#[from] MaterialLibraryError),

    /// Reading the object file failed part-way; the model holds what was read so far
    #[error("reading stopped early: {message}")]
    ReadInterrupted {
        /// Underlying I/O error text
        message: String,
    },
}

/// A diagnostic tied to its source line
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// 1-based line number in the object file
    pub line: usize,
    /// What happened
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic for a line
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}
