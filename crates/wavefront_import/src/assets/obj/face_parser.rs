//! Face directive decoding
//!
//! A face line lists vertex references, each naming a position and optionally
//! a texture coordinate and/or normal by 1-based index:
//!
//! | Form    | Encoding                                  |
//! |---------|-------------------------------------------|
//! | `p`     | [`FaceEncoding::Position`]                |
//! | `p/t`   | [`FaceEncoding::PositionTexcoord`]        |
//! | `p/t/n` | [`FaceEncoding::PositionTexcoordNormal`]  |
//! | `p//n`  | [`FaceEncoding::PositionNormal`]          |
//!
//! Each reference is classified from its separator layout before any number
//! is parsed. The first three references must share an encoding; a face that
//! mixes them is kept with zero indices and reported instead of being guessed at.
//! When polygons are triangulated, later references extend the fan only while
//! they keep that encoding.
//! Indices are stored exactly as written: no conversion to 0-based, and
//! negative (relative) indices are not supported.

use std::fmt;

use super::diagnostics::DiagnosticKind;
use crate::core::config::ImportConfig;

/// Separator between the fields of one vertex reference
const SEPARATOR: char = '/';

/// One polygon corner. A zero index means "absent".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VertexRef {
    /// 1-based position index
    pub position: u32,
    /// 1-based texture coordinate index, 0 when absent
    pub texcoord: u32,
    /// 1-based normal index, 0 when absent
    pub normal: u32,
}

impl VertexRef {
    /// Create a reference from raw indices
    pub const fn new(position: u32, texcoord: u32, normal: u32) -> Self {
        Self { position, texcoord, normal }
    }

    /// True when a texture coordinate index is present
    pub const fn has_texcoord(&self) -> bool {
        self.texcoord != 0
    }

    /// True when a normal index is present
    pub const fn has_normal(&self) -> bool {
        self.normal != 0
    }
}

/// A triangle with the material that was active when it was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Material name, copied by value at parse time
    pub material: String,
    /// The three corners
    pub vertices: [VertexRef; 3],
}

impl Face {
    /// A face with every index zero
    pub fn empty(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            vertices: [VertexRef::default(); 3],
        }
    }
}

/// Structural form of a vertex reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceEncoding {
    /// `p`
    Position,
    /// `p/t`
    PositionTexcoord,
    /// `p/t/n`
    PositionTexcoordNormal,
    /// `p//n`
    PositionNormal,
}

impl FaceEncoding {
    /// Classify one reference by its separators alone
    pub fn classify(reference: &str) -> Option<Self> {
        match reference.matches(SEPARATOR).count() {
            0 => Some(Self::Position),
            1 => Some(Self::PositionTexcoord),
            2 if reference.contains("//") => Some(Self::PositionNormal),
            2 => Some(Self::PositionTexcoordNormal),
            _ => None,
        }
    }
}

impl fmt::Display for FaceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = match self {
            Self::Position => "p",
            Self::PositionTexcoord => "p/t",
            Self::PositionTexcoordNormal => "p/t/n",
            Self::PositionNormal => "p//n",
        };
        f.write_str(form)
    }
}

/// Result of decoding one face directive
#[derive(Debug, Clone)]
pub struct ParsedFace {
    /// Decoded triangles; the first always comes from the first three references
    pub faces: Vec<Face>,
    /// Shared encoding of the references, `None` when it could not be decided
    pub encoding: Option<FaceEncoding>,
    /// Anomalies absorbed while decoding
    pub issues: Vec<DiagnosticKind>,
}

/// Decodes face directives into triangles
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceParser {
    legacy_slash_normal: bool,
    triangulate: bool,
}

impl FaceParser {
    /// Create a parser honoring the import configuration
    pub const fn new(config: &ImportConfig) -> Self {
        Self {
            legacy_slash_normal: config.legacy_slash_normal,
            triangulate: config.triangulate_polygons,
        }
    }

    /// Decode the text after the `f` keyword.
    ///
    /// Every produced face carries `current_material`. Fails only when fewer
    /// than three vertex references are present, in which case no face exists.
    pub fn parse(&self, remainder: &str, current_material: &str) -> Result<ParsedFace, DiagnosticKind> {
        let references: Vec<&str> = remainder.split_whitespace().collect();
        if references.len() < 3 {
            return Err(DiagnosticKind::TooFewVertices { found: references.len() });
        }

        let mut issues = Vec::new();
        let (corner_refs, extra_refs) = references.split_at(3);
        if !self.triangulate && !extra_refs.is_empty() {
            issues.push(DiagnosticKind::ExtraVerticesDropped { count: extra_refs.len() });
        }

        let encoding = match shared_encoding(corner_refs) {
            Ok(encoding) => encoding,
            Err(reason) => {
                issues.push(DiagnosticKind::UnsupportedFaceEncoding { reason });
                return Ok(ParsedFace {
                    faces: vec![Face::empty(current_material)],
                    encoding: None,
                    issues,
                });
            }
        };

        if self.legacy_slash_normal && encoding == FaceEncoding::PositionNormal {
            issues.push(DiagnosticKind::UnsupportedFaceEncoding {
                reason: "p//n references left undecoded (legacy mode)".to_string(),
            });
            return Ok(ParsedFace {
                faces: vec![Face::empty(current_material)],
                encoding: Some(encoding),
                issues,
            });
        }

        let mut corners: Vec<VertexRef> = corner_refs
            .iter()
            .map(|reference| decode_reference(reference, encoding, &mut issues))
            .collect();

        if self.triangulate {
            for (offset, reference) in extra_refs.iter().enumerate() {
                if FaceEncoding::classify(reference) != Some(encoding) {
                    issues.push(DiagnosticKind::UnsupportedFaceEncoding {
                        reason: format!(
                            "vertex reference '{reference}' does not match face encoding {encoding}; \
                             {} trailing reference(s) dropped",
                            extra_refs.len() - offset
                        ),
                    });
                    break;
                }
                corners.push(decode_reference(reference, encoding, &mut issues));
            }
        }

        let faces = (1..corners.len() - 1)
            .map(|i| Face {
                material: current_material.to_string(),
                vertices: [corners[0], corners[i], corners[i + 1]],
            })
            .collect();

        Ok(ParsedFace { faces, encoding: Some(encoding), issues })
    }
}

/// Determine the one encoding every reference uses
fn shared_encoding(references: &[&str]) -> Result<FaceEncoding, String> {
    let mut shared: Option<FaceEncoding> = None;
    for reference in references {
        let encoding = FaceEncoding::classify(reference)
            .ok_or_else(|| format!("unrecognized vertex reference '{reference}'"))?;
        match shared {
            None => shared = Some(encoding),
            Some(first) if first != encoding => {
                return Err(format!("mixed vertex reference encodings ({first} and {encoding})"));
            }
            Some(_) => {}
        }
    }
    shared.ok_or_else(|| "no vertex references".to_string())
}

fn decode_reference(reference: &str, encoding: FaceEncoding, issues: &mut Vec<DiagnosticKind>) -> VertexRef {
    let fields: Vec<&str> = reference.split(SEPARATOR).collect();
    let mut index = |slot: usize| parse_index(fields.get(slot).copied().unwrap_or(""), issues);

    match encoding {
        FaceEncoding::Position => VertexRef::new(index(0), 0, 0),
        FaceEncoding::PositionTexcoord => VertexRef::new(index(0), index(1), 0),
        FaceEncoding::PositionTexcoordNormal => VertexRef::new(index(0), index(1), index(2)),
        FaceEncoding::PositionNormal => VertexRef::new(index(0), 0, index(2)),
    }
}

fn parse_index(field: &str, issues: &mut Vec<DiagnosticKind>) -> u32 {
    field.parse::<u32>().unwrap_or_else(|_| {
        issues.push(DiagnosticKind::MalformedNumericField {
            directive: "f",
            field: field.to_string(),
        });
        0
    })
}
