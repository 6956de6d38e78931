//! Line classifier
//!
//! Turns one raw line of an object file into a directive tag plus the text
//! that follows the keyword. Classification is total: anything that is not a
//! recognized directive (comments, blank lines, unsupported keywords such as
//! `s` or `l`) comes back as [`Directive::Unrecognized`].

/// Directive keywords the importer acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `mtllib <path>`
    MaterialLibraryRef,
    /// `v x y z`
    Position,
    /// `vn x y z`
    Normal,
    /// `vt u v`
    Texcoord,
    /// `o <name>` or `g <name>`
    ObjectOrGroup,
    /// `usemtl <name>`
    UseMaterial,
    /// `f <ref> <ref> <ref> ...`
    Face,
    /// Comments, blank lines and every other keyword
    Unrecognized,
}

impl Directive {
    /// Map a leading keyword to its directive
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "mtllib" => Self::MaterialLibraryRef,
            "v" => Self::Position,
            "vn" => Self::Normal,
            "vt" => Self::Texcoord,
            "o" | "g" => Self::ObjectOrGroup,
            "usemtl" => Self::UseMaterial,
            "f" => Self::Face,
            _ => Self::Unrecognized,
        }
    }

    /// Keyword used in diagnostics
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::MaterialLibraryRef => "mtllib",
            Self::Position => "v",
            Self::Normal => "vn",
            Self::Texcoord => "vt",
            Self::ObjectOrGroup => "o/g",
            Self::UseMaterial => "usemtl",
            Self::Face => "f",
            Self::Unrecognized => "?",
        }
    }
}

/// A classified line: the directive and everything after its keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// Directive named by the first token
    pub directive: Directive,
    /// Remaining text, single-space separated, without the keyword
    pub remainder: &'a str,
}

/// Collapse leading, trailing and repeated interior whitespace into single
/// spaces. A byte order mark at the start of the line is dropped as well.
pub fn normalize_whitespace(line: &str) -> String {
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let mut normalized = String::with_capacity(line.len());
    for token in line.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(token);
    }
    normalized
}

/// Classify an already normalized line
pub fn classify(normalized: &str) -> ClassifiedLine<'_> {
    let (keyword, remainder) = normalized
        .split_once(' ')
        .unwrap_or((normalized, ""));

    ClassifiedLine {
        directive: Directive::from_keyword(keyword),
        remainder,
    }
}
