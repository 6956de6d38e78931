//! Vertex attribute pool
//!
//! Flat, append-only storage for positions, normals and texture coordinates
//! in the order they appear in the object file. Indices handed out and
//! accepted here are 1-based, matching the file format; index 0 is never valid.

use std::fmt;

use thiserror::Error;

use crate::foundation::math::{Vec2, Vec3};

/// Which attribute sequence an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `v` positions
    Position,
    /// `vn` normals
    Normal,
    /// `vt` texture coordinates
    Texcoord,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Texcoord => "texcoord",
        };
        f.write_str(name)
    }
}

/// A resolved attribute value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute {
    /// Position or normal
    Vec3(Vec3),
    /// Texture coordinate
    Vec2(Vec2),
}

/// Attribute lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Index is zero or past the end of the sequence
    #[error("{kind} index {index} out of range (pool holds {len})")]
    IndexOutOfRange {
        /// Sequence that was queried
        kind: AttributeKind,
        /// 1-based index that was requested
        index: u32,
        /// Current length of the sequence
        len: usize,
    },
}

/// Append-only attribute storage for a single parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttributePool {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
}

impl VertexAttributePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position, returning its 1-based index
    pub fn append_position(&mut self, position: Vec3) -> u32 {
        self.positions.push(position);
        to_index(self.positions.len())
    }

    /// Append a normal, returning its 1-based index
    pub fn append_normal(&mut self, normal: Vec3) -> u32 {
        self.normals.push(normal);
        to_index(self.normals.len())
    }

    /// Append a texture coordinate, returning its 1-based index
    pub fn append_texcoord(&mut self, texcoord: Vec2) -> u32 {
        self.texcoords.push(texcoord);
        to_index(self.texcoords.len())
    }

    /// Resolve a 1-based index in the given sequence
    pub fn resolve(&self, kind: AttributeKind, index: u32) -> Result<Attribute, PoolError> {
        match kind {
            AttributeKind::Position => self.position(index).map(Attribute::Vec3),
            AttributeKind::Normal => self.normal(index).map(Attribute::Vec3),
            AttributeKind::Texcoord => self.texcoord(index).map(Attribute::Vec2),
        }
    }

    /// Resolve a 1-based position index
    pub fn position(&self, index: u32) -> Result<Vec3, PoolError> {
        lookup(&self.positions, AttributeKind::Position, index)
    }

    /// Resolve a 1-based normal index
    pub fn normal(&self, index: u32) -> Result<Vec3, PoolError> {
        lookup(&self.normals, AttributeKind::Normal, index)
    }

    /// Resolve a 1-based texture coordinate index
    pub fn texcoord(&self, index: u32) -> Result<Vec2, PoolError> {
        lookup(&self.texcoords, AttributeKind::Texcoord, index)
    }

    /// Current length of the given sequence
    pub fn len(&self, kind: AttributeKind) -> usize {
        match kind {
            AttributeKind::Position => self.positions.len(),
            AttributeKind::Normal => self.normals.len(),
            AttributeKind::Texcoord => self.texcoords.len(),
        }
    }

    /// True when no attribute of any kind has been appended
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.normals.is_empty() && self.texcoords.is_empty()
    }

    /// Check that a 1-based index is currently resolvable without fetching it
    pub fn check(&self, kind: AttributeKind, index: u32) -> Result<(), PoolError> {
        let len = self.len(kind);
        if index == 0 || index as usize > len {
            return Err(PoolError::IndexOutOfRange { kind, index, len });
        }
        Ok(())
    }

    /// All positions in file order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// All normals in file order
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// All texture coordinates in file order
    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }
}

fn lookup<T: Copy>(values: &[T], kind: AttributeKind, index: u32) -> Result<T, PoolError> {
    (index as usize)
        .checked_sub(1)
        .and_then(|slot| values.get(slot))
        .copied()
        .ok_or(PoolError::IndexOutOfRange { kind, index, len: values.len() })
}

// Files with more than u32::MAX attributes are not addressable by the format anyway.
#[allow(clippy::cast_possible_truncation)]
const fn to_index(len: usize) -> u32 {
    len as u32
}
