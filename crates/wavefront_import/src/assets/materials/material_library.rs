//! Material library loader
//!
//! Locates the `.mtl` file named by an object file's `mtllib` directive and
//! reads it. By default the contents are only recorded; when interpretation is
//! enabled they are parsed into [`MaterialProperties`] with texture paths
//! rebased onto the library's directory.
//!
//! The loader never touches the mesh/material registry. Whatever it produces
//! is handed back to the caller, which decides how to merge it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::mtl_parser::{MaterialProperties, MtlParser};
use crate::core::config::ImportConfig;

/// Material library failures. None of these abort a model load.
#[derive(Error, Debug, Clone)]
pub enum MaterialLibraryError {
    /// The declared path could not be turned into a file path
    #[error("cannot resolve material library path '{declared}'")]
    Unresolved {
        /// Path as written after `mtllib`
        declared: String,
    },

    /// The resolved file could not be read
    #[error("cannot read material library {}: {source}", .path.display())]
    Unreadable {
        /// Resolved path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The file was read but its attributes could not be parsed
    #[error("malformed material library {}: {message}", .path.display())]
    Malformed {
        /// Resolved path
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

/// What a successful load produced
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Contents read and kept as text, not interpreted
    Recorded {
        /// Raw library text
        contents: String,
    },
    /// Contents parsed into material definitions, sorted by name
    Interpreted {
        /// Raw library text
        contents: String,
        /// One entry per `newmtl`
        materials: Vec<MaterialProperties>,
    },
}

impl LoadOutcome {
    /// Raw library text
    pub fn contents(&self) -> &str {
        match self {
            Self::Recorded { contents } | Self::Interpreted { contents, .. } => contents,
        }
    }

    /// Parsed definitions, empty when the library was not interpreted
    pub fn materials(&self) -> &[MaterialProperties] {
        match self {
            Self::Recorded { .. } => &[],
            Self::Interpreted { materials, .. } => materials,
        }
    }
}

/// Resolves and reads material libraries
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialLibraryLoader {
    interpret: bool,
}

impl MaterialLibraryLoader {
    /// Create a loader honoring the import configuration
    pub const fn new(config: &ImportConfig) -> Self {
        Self { interpret: config.interpret_material_library }
    }

    /// Resolve a declared library path against the object file's directory.
    /// Absolute declared paths are returned unchanged.
    pub fn resolve(declared: &str, object_file: &Path) -> Result<PathBuf, MaterialLibraryError> {
        if declared.is_empty() {
            return Err(MaterialLibraryError::Unresolved { declared: declared.to_string() });
        }

        let declared_path = Path::new(declared);
        if declared_path.is_absolute() {
            return Ok(declared_path.to_path_buf());
        }

        let base_dir = object_file.parent().unwrap_or_else(|| Path::new(""));
        Ok(base_dir.join(declared_path))
    }

    /// Read a resolved library
    pub fn load(&self, resolved: &Path) -> Result<LoadOutcome, MaterialLibraryError> {
        let contents = fs::read_to_string(resolved).map_err(|e| MaterialLibraryError::Unreadable {
            path: resolved.to_path_buf(),
            source: Arc::new(e),
        })?;

        if !self.interpret {
            log::debug!("Recorded material library {} ({} bytes, not interpreted)", resolved.display(), contents.len());
            return Ok(LoadOutcome::Recorded { contents });
        }

        let parsed = MtlParser::parse(&contents).map_err(|message| MaterialLibraryError::Malformed {
            path: resolved.to_path_buf(),
            message,
        })?;

        let base_dir = resolved.parent().unwrap_or_else(|| Path::new(""));
        let mut materials: Vec<MaterialProperties> = parsed
            .into_values()
            .map(|mut material| {
                material.resolve_texture_paths(base_dir);
                material
            })
            .collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));

        log::debug!("Interpreted material library {}: {} material(s)", resolved.display(), materials.len());
        Ok(LoadOutcome::Interpreted { contents, materials })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_resolve_relative_to_object_file() {
        let resolved = MaterialLibraryLoader::resolve("scene.mtl", Path::new("resources/models/scene.obj")).unwrap();
        assert_eq!(resolved, PathBuf::from("resources/models/scene.mtl"));

        let resolved = MaterialLibraryLoader::resolve("mats/scene.mtl", Path::new("scene.obj")).unwrap();
        assert_eq!(resolved, PathBuf::from("mats/scene.mtl"));
    }

    #[test]
    fn test_resolve_absolute_path_unchanged() {
        let dir = tempdir().unwrap();
        let absolute = dir.path().join("scene.mtl");
        let declared = absolute.to_str().unwrap();

        let resolved = MaterialLibraryLoader::resolve(declared, Path::new("models/scene.obj")).unwrap();
        assert_eq!(resolved, absolute);
    }

    #[test]
    fn test_resolve_empty_declaration_fails() {
        let result = MaterialLibraryLoader::resolve("", Path::new("scene.obj"));
        assert!(matches!(result, Err(MaterialLibraryError::Unresolved { .. })));
    }

    #[test]
    fn test_load_records_without_interpreting() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "newmtl red\nKd 1.0 0.0 0.0\n").unwrap();

        let loader = MaterialLibraryLoader::new(&ImportConfig::default());
        let outcome = loader.load(temp_file.path()).unwrap();

        assert!(matches!(outcome, LoadOutcome::Recorded { .. }));
        assert!(outcome.contents().contains("newmtl red"));
        assert!(outcome.materials().is_empty());
    }

    #[test]
    fn test_load_interprets_when_enabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.mtl");
        std::fs::write(&path, "newmtl red\nKd 1.0 0.0 0.0\nmap_Kd red.png\n\nnewmtl blue\nKd 0.0 0.0 1.0\n").unwrap();

        let loader = MaterialLibraryLoader::new(&ImportConfig::full());
        let outcome = loader.load(&path).unwrap();

        let names: Vec<&str> = outcome.materials().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["blue", "red"]);
        let red = &outcome.materials()[1];
        assert_eq!(red.diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(red.diffuse_map, Some(dir.path().join("red.png")));
    }

    #[test]
    fn test_load_missing_file_is_unreadable() {
        let dir = tempdir().unwrap();
        let loader = MaterialLibraryLoader::default();

        let err = loader.load(&dir.path().join("missing.mtl")).unwrap_err();
        assert!(matches!(err, MaterialLibraryError::Unreadable { .. }));
        assert!(err.to_string().contains("missing.mtl"));
    }

    #[test]
    fn test_load_malformed_when_interpreting() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "newmtl\n").unwrap();

        let loader = MaterialLibraryLoader::new(&ImportConfig::full());
        let err = loader.load(temp_file.path()).unwrap_err();
        assert!(matches!(err, MaterialLibraryError::Malformed { .. }));
    }
}
