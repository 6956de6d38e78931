//! Mesh and material registry
//!
//! Tracks which mesh faces are appended to and which material they carry.
//! Both start out as the sentinel [`ROOT_NAME`] so faces that appear before
//! any `o`/`g`/`usemtl` directive still have a home.
//!
//! Switching material while the current mesh already holds faces splits the
//! mesh: faces that follow go into a new mesh named `<mesh><material>`. This
//! keeps every mesh's faces on one material region for draw batching without
//! creating empty meshes for back-to-back `usemtl` lines.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use super::face_parser::Face;
use crate::assets::materials::MaterialProperties;

/// Name of the implicit mesh and material
pub const ROOT_NAME: &str = "root";

new_key_type! {
    /// Stable handle to a mesh in the registry
    pub struct MeshKey;
}

/// A named, ordered list of faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    name: String,
    faces: Vec<Face>,
}

impl Mesh {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), faces: Vec::new() }
    }

    /// Mesh name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Faces in file order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// True when no face has been appended
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A named material, with attributes when its library was interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Attributes from the material library, `None` when known only by name
    pub properties: Option<MaterialProperties>,
}

impl Material {
    fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), properties: None }
    }
}

/// Registry of meshes and materials built up during one parse
#[derive(Debug, Clone)]
pub struct MeshMaterialRegistry {
    meshes: SlotMap<MeshKey, Mesh>,
    mesh_order: Vec<MeshKey>,
    mesh_names: HashMap<String, MeshKey>,
    materials: Vec<Material>,
    material_names: HashMap<String, usize>,
    current_mesh: MeshKey,
    current_material: String,
}

impl Default for MeshMaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshMaterialRegistry {
    /// Create a registry holding only the sentinel root mesh and material
    pub fn new() -> Self {
        let mut registry = Self {
            meshes: SlotMap::with_key(),
            mesh_order: Vec::new(),
            mesh_names: HashMap::new(),
            materials: Vec::new(),
            material_names: HashMap::new(),
            current_mesh: MeshKey::default(),
            current_material: ROOT_NAME.to_string(),
        };
        registry.current_mesh = registry.ensure_mesh(ROOT_NAME);
        registry.ensure_material(ROOT_NAME);
        registry
    }

    /// `o`/`g`: make `name` the current mesh, creating it when unknown.
    /// The current material is unaffected.
    pub fn on_object_or_group(&mut self, name: &str) {
        self.current_mesh = self.ensure_mesh(name);
    }

    /// `usemtl`: switch the current material.
    ///
    /// When the current mesh already has faces, later faces go to a mesh named
    /// by appending the material name to the current mesh name; that name is
    /// returned. An empty current mesh is reused and `None` is returned.
    pub fn on_use_material(&mut self, name: &str) -> Option<String> {
        let split = if self.meshes[self.current_mesh].is_empty() {
            None
        } else {
            let synthesized = format!("{}{}", self.current_mesh_name(), name);
            self.current_mesh = self.ensure_mesh(&synthesized);
            Some(synthesized)
        };

        self.current_material = name.to_string();
        self.ensure_material(name);
        split
    }

    /// `f`: append a face to the current mesh
    pub fn on_face(&mut self, face: Face) {
        self.meshes[self.current_mesh].faces.push(face);
    }

    /// Record attributes for a material, creating it when unknown
    pub fn define_material(&mut self, name: &str, properties: MaterialProperties) {
        let slot = self.ensure_material(name);
        self.materials[slot].properties = Some(properties);
    }

    /// Name of the mesh faces are currently appended to
    pub fn current_mesh_name(&self) -> &str {
        self.meshes[self.current_mesh].name()
    }

    /// Name of the material new faces receive
    pub fn current_material_name(&self) -> &str {
        &self.current_material
    }

    /// Look up a mesh by name
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.mesh_names.get(name).map(|&key| &self.meshes[key])
    }

    /// Handle of the mesh faces are currently appended to
    pub fn current_mesh_key(&self) -> MeshKey {
        self.current_mesh
    }

    /// Handle of a mesh by name
    pub fn mesh_key(&self, name: &str) -> Option<MeshKey> {
        self.mesh_names.get(name).copied()
    }

    /// Look up a mesh by handle
    pub fn mesh_by_key(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    /// Meshes in creation order, sentinel root first
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        self.mesh_order.iter().map(|&key| &self.meshes[key])
    }

    /// Number of meshes, including the sentinel root
    pub fn mesh_count(&self) -> usize {
        self.mesh_order.len()
    }

    /// Look up a material by name
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.material_names.get(name).map(|&slot| &self.materials[slot])
    }

    /// Materials in creation order, sentinel root first
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    fn ensure_mesh(&mut self, name: &str) -> MeshKey {
        if let Some(&key) = self.mesh_names.get(name) {
            return key;
        }
        let key = self.meshes.insert(Mesh::new(name));
        self.mesh_order.push(key);
        self.mesh_names.insert(name.to_string(), key);
        key
    }

    fn ensure_material(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.material_names.get(name) {
            return slot;
        }
        self.materials.push(Material::named(name));
        let slot = self.materials.len() - 1;
        self.material_names.insert(name.to_string(), slot);
        slot
    }
}
