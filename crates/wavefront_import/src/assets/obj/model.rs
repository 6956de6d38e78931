//! Model file orchestrator
//!
//! Reads an object file line by line and assembles a [`WavefrontModel`].
//! Only failing to open the file is fatal; every other anomaly is recorded as
//! a [`Diagnostic`] and the load carries on, since a partly correct model is
//! more useful to an asset pipeline than none at all.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::attribute_pool::{AttributeKind, PoolError, VertexAttributePool};
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::face_parser::{Face, FaceParser};
use super::line_classifier::{classify, normalize_whitespace, Directive};
use super::registry::{Material, Mesh, MeshMaterialRegistry};
use crate::assets::materials::{LoadOutcome, MaterialLibraryLoader};
use crate::core::config::ImportConfig;
use crate::foundation::math::{Vec2, Vec3};

/// Fatal load errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// The object file could not be opened for reading
    #[error("cannot open object file {}: {source}", .path.display())]
    FileNotOpened {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// An imported model: attribute pool, meshes, materials and what was patched over
#[derive(Debug, Clone)]
pub struct WavefrontModel {
    object_path: PathBuf,
    material_library_path: Option<PathBuf>,
    material_library_source: Option<String>,
    attributes: VertexAttributePool,
    registry: MeshMaterialRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl WavefrontModel {
    /// Load an object file with the default configuration
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with_config(path, &ImportConfig::default())
    }

    /// Load an object file
    ///
    /// # Errors
    /// [`LoadError::FileNotOpened`] when the path cannot be opened or is not a
    /// regular file. Nothing else aborts the load.
    pub fn load_with_config(path: impl AsRef<Path>, config: &ImportConfig) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let not_opened = |source: io::Error| LoadError::FileNotOpened {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(not_opened)?;
        if !file.metadata().map_err(not_opened)?.is_file() {
            return Err(not_opened(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file")));
        }

        log::info!("Loading Wavefront model {}", path.display());
        Ok(Self::from_reader(BufReader::new(file), path, config))
    }

    /// Parse object-file text from any reader. `object_path` is recorded on
    /// the model and used to resolve the material library.
    pub fn from_reader(reader: impl BufRead, object_path: impl Into<PathBuf>, config: &ImportConfig) -> Self {
        let mut builder = ModelBuilder::new(object_path.into(), config);
        builder.read_all(reader);
        builder.finish()
    }

    /// Path of the object file this model was read from
    pub fn object_path(&self) -> &Path {
        &self.object_path
    }

    /// Resolved material library path, if one was declared
    pub fn material_library_path(&self) -> Option<&Path> {
        self.material_library_path.as_deref()
    }

    /// Raw material library text, if it could be read
    pub fn material_library_source(&self) -> Option<&str> {
        self.material_library_source.as_deref()
    }

    /// Vertex attributes in file order
    pub fn attributes(&self) -> &VertexAttributePool {
        &self.attributes
    }

    /// Mesh and material registry
    pub fn registry(&self) -> &MeshMaterialRegistry {
        &self.registry
    }

    /// Meshes in creation order, sentinel root first
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        self.registry.meshes()
    }

    /// Look up a mesh by name
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.registry.mesh(name)
    }

    /// Materials in creation order, sentinel root first
    pub fn materials(&self) -> &[Material] {
        self.registry.materials()
    }

    /// Look up a material by name
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.registry.material(name)
    }

    /// Resolve a 1-based position index
    pub fn resolve_position(&self, index: u32) -> Result<Vec3, PoolError> {
        self.attributes.position(index)
    }

    /// Resolve a 1-based normal index
    pub fn resolve_normal(&self, index: u32) -> Result<Vec3, PoolError> {
        self.attributes.normal(index)
    }

    /// Resolve a 1-based texture coordinate index
    pub fn resolve_texcoord(&self, index: u32) -> Result<Vec2, PoolError> {
        self.attributes.texcoord(index)
    }

    /// Total number of faces across all meshes
    pub fn face_count(&self) -> usize {
        self.meshes().map(|mesh| mesh.faces().len()).sum()
    }

    /// Anomalies absorbed during the load, in line order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Orchestrator state for one parse
struct ModelBuilder {
    object_path: PathBuf,
    face_parser: FaceParser,
    library_loader: MaterialLibraryLoader,
    material_library_path: Option<PathBuf>,
    material_library_source: Option<String>,
    attributes: VertexAttributePool,
    registry: MeshMaterialRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl ModelBuilder {
    fn new(object_path: PathBuf, config: &ImportConfig) -> Self {
        Self {
            object_path,
            face_parser: FaceParser::new(config),
            library_loader: MaterialLibraryLoader::new(config),
            material_library_path: None,
            material_library_source: None,
            attributes: VertexAttributePool::new(),
            registry: MeshMaterialRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    fn read_all(&mut self, mut reader: impl BufRead) {
        let mut buffer = Vec::new();
        let mut line_no = 0;

        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {
                    line_no += 1;
                    let line = String::from_utf8_lossy(&buffer);
                    self.process_line(line_no, &line);
                }
                Err(e) => {
                    self.report(line_no + 1, DiagnosticKind::ReadInterrupted { message: e.to_string() });
                    break;
                }
            }
        }
    }

    fn process_line(&mut self, line_no: usize, raw: &str) {
        let normalized = normalize_whitespace(raw);
        let classified = classify(&normalized);
        let remainder = classified.remainder;

        match classified.directive {
            Directive::MaterialLibraryRef => self.on_material_library(line_no, remainder),
            Directive::Position => {
                let [x, y, z] = self.parse_floats(line_no, Directive::Position, remainder);
                self.attributes.append_position(Vec3::new(x, y, z));
            }
            Directive::Normal => {
                let [x, y, z] = self.parse_floats(line_no, Directive::Normal, remainder);
                self.attributes.append_normal(Vec3::new(x, y, z));
            }
            Directive::Texcoord => {
                let [u, v] = self.parse_floats(line_no, Directive::Texcoord, remainder);
                self.attributes.append_texcoord(Vec2::new(u, v));
            }
            Directive::ObjectOrGroup => match first_token(remainder) {
                Some(name) => self.registry.on_object_or_group(name),
                None => self.report(line_no, DiagnosticKind::MissingName { directive: "o/g" }),
            },
            Directive::UseMaterial => match first_token(remainder) {
                Some(name) => {
                    let previous = self.registry.current_mesh_name().to_string();
                    if let Some(split) = self.registry.on_use_material(name) {
                        log::debug!("line {line_no}: material '{name}' splits mesh '{previous}' into '{split}'");
                    }
                }
                None => self.report(line_no, DiagnosticKind::MissingName { directive: "usemtl" }),
            },
            Directive::Face => self.on_face(line_no, remainder),
            Directive::Unrecognized => {}
        }
    }

    /// Parse the first `N` fields as floats. Any missing or malformed field
    /// turns the whole element into zeros.
    fn parse_floats<const N: usize>(&mut self, line_no: usize, directive: Directive, remainder: &str) -> [f32; N] {
        let mut values = [0.0; N];
        let mut fields = remainder.split_whitespace();

        for value in &mut values {
            let field = fields.next().unwrap_or("");
            match field.parse::<f32>() {
                Ok(parsed) => *value = parsed,
                Err(_) => {
                    self.report(line_no, DiagnosticKind::MalformedNumericField {
                        directive: directive.keyword(),
                        field: field.to_string(),
                    });
                    return [0.0; N];
                }
            }
        }
        values
    }

    fn on_face(&mut self, line_no: usize, remainder: &str) {
        let parsed = match self.face_parser.parse(remainder, self.registry.current_material_name()) {
            Ok(parsed) => parsed,
            Err(kind) => {
                self.report(line_no, kind);
                return;
            }
        };

        for issue in parsed.issues {
            self.report(line_no, issue);
        }
        for face in parsed.faces {
            self.check_indices(line_no, &face);
            self.registry.on_face(face);
        }
    }

    /// Report present indices that do not resolve against the pool as it stands
    /// now. Each missing (kind, index) pair is reported once per face.
    fn check_indices(&mut self, line_no: usize, face: &Face) {
        let mut reported: Vec<(AttributeKind, u32)> = Vec::new();
        for vertex in face.vertices {
            for (kind, index) in [
                (AttributeKind::Position, vertex.position),
                (AttributeKind::Texcoord, vertex.texcoord),
                (AttributeKind::Normal, vertex.normal),
            ] {
                if index == 0 || reported.contains(&(kind, index)) {
                    continue;
                }
                if let Err(e) = self.attributes.check(kind, index) {
                    reported.push((kind, index));
                    self.report(line_no, DiagnosticKind::IndexOutOfRange(e));
                }
            }
        }
    }

    fn on_material_library(&mut self, line_no: usize, remainder: &str) {
        let Some(declared) = first_token(remainder) else {
            self.report(line_no, DiagnosticKind::MissingName { directive: "mtllib" });
            return;
        };

        let resolved = match MaterialLibraryLoader::resolve(declared, &self.object_path) {
            Ok(resolved) => resolved,
            Err(e) => {
                self.report(line_no, e.into());
                return;
            }
        };
        self.material_library_path = Some(resolved.clone());

        match self.library_loader.load(&resolved) {
            Ok(outcome) => self.merge_material_library(outcome),
            Err(e) => self.report(line_no, e.into()),
        }
    }

    fn merge_material_library(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Recorded { contents } => self.material_library_source = Some(contents),
            LoadOutcome::Interpreted { contents, materials } => {
                for material in materials {
                    let name = material.name.clone();
                    self.registry.define_material(&name, material);
                }
                self.material_library_source = Some(contents);
            }
        }
    }

    fn report(&mut self, line_no: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(line_no, kind);
        log::warn!("{}: {diagnostic}", self.object_path.display());
        self.diagnostics.push(diagnostic);
    }

    fn finish(self) -> WavefrontModel {
        let model = WavefrontModel {
            object_path: self.object_path,
            material_library_path: self.material_library_path,
            material_library_source: self.material_library_source,
            attributes: self.attributes,
            registry: self.registry,
            diagnostics: self.diagnostics,
        };

        log::info!(
            "Loaded {}: {} positions, {} normals, {} texcoords, {} faces in {} mesh(es), {} material(s), {} diagnostic(s)",
            model.object_path.display(),
            model.attributes.len(AttributeKind::Position),
            model.attributes.len(AttributeKind::Normal),
            model.attributes.len(AttributeKind::Texcoord),
            model.face_count(),
            model.registry.mesh_count(),
            model.registry.materials().len(),
            model.diagnostics.len(),
        );
        model
    }
}

fn first_token(remainder: &str) -> Option<&str> {
    remainder.split_whitespace().next()
}
