//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into per-material attribute records.
//! Supports the Phong lighting properties and the common texture maps.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::math::Vec3;

/// Parsed MTL material attributes (Wavefront Phong model)
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProperties {
    /// Material name
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Emission color (Ke)
    pub emission: Vec3,
    /// Specular exponent (Ns) - 0 to 1000
    pub specular_exponent: f32,
    /// Optical density / index of refraction (Ni)
    pub optical_density: f32,
    /// Dissolve/opacity (d) - 0.0 = transparent, 1.0 = opaque
    pub dissolve: f32,
    /// Illumination model (illum) - 0-10
    pub illumination_model: u32,
    /// Diffuse texture map (map_Kd)
    pub diffuse_map: Option<PathBuf>,
    /// Specular texture map (map_Ks)
    pub specular_map: Option<PathBuf>,
    /// Bump/normal map (map_Bump or bump)
    pub normal_map: Option<PathBuf>,
    /// Emission texture map (map_Ke)
    pub emission_map: Option<PathBuf>,
    /// Ambient occlusion map (map_Ka)
    pub ambient_occlusion_map: Option<PathBuf>,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::new(1.0, 1.0, 1.0),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.5, 0.5, 0.5),
            emission: Vec3::new(0.0, 0.0, 0.0),
            specular_exponent: 250.0,
            optical_density: 1.0,
            dissolve: 1.0,
            illumination_model: 2,
            diffuse_map: None,
            specular_map: None,
            normal_map: None,
            emission_map: None,
            ambient_occlusion_map: None,
        }
    }
}

impl MaterialProperties {
    /// Rebase every relative texture path onto `base_dir`; absolute paths are kept
    pub fn resolve_texture_paths(&mut self, base_dir: &Path) {
        for map in [
            &mut self.diffuse_map,
            &mut self.specular_map,
            &mut self.normal_map,
            &mut self.emission_map,
            &mut self.ambient_occlusion_map,
        ] {
            if let Some(path) = map.as_mut() {
                if path.is_relative() {
                    *path = base_dir.join(&*path);
                }
            }
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into a map of material name -> attributes
    ///
    /// # Arguments
    /// * `contents` - The text contents of the MTL file
    ///
    /// # Returns
    /// A HashMap mapping material names to their parsed attributes
    pub fn parse(contents: &str) -> Result<HashMap<String, MaterialProperties>, String> {
        let mut materials = HashMap::new();
        let mut current_material: Option<MaterialProperties> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };

            if command == "newmtl" {
                if let Some(mat) = current_material.take() {
                    materials.insert(mat.name.clone(), mat);
                }

                let name = tokens.next()
                    .ok_or_else(|| format!("Line {}: newmtl missing material name", line_num + 1))?
                    .to_string();
                current_material = Some(MaterialProperties {
                    name,
                    ..Default::default()
                });
                continue;
            }

            // Attributes before the first newmtl have no owner
            let Some(mat) = current_material.as_mut() else {
                continue;
            };

            match command {
                "Ka" => mat.ambient = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Kd" => mat.diffuse = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ks" => mat.specular = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ke" => mat.emission = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ns" => mat.specular_exponent = Self::parse_f32(&mut tokens, line_num, command)?,
                "Ni" => mat.optical_density = Self::parse_f32(&mut tokens, line_num, command)?,
                "d" => mat.dissolve = Self::parse_f32(&mut tokens, line_num, command)?,
                "Tr" => {
                    // Transparency (inverted dissolve): Tr = 1.0 - d
                    let transparency = Self::parse_f32(&mut tokens, line_num, command)?;
                    mat.dissolve = 1.0 - transparency;
                }
                "illum" => mat.illumination_model = Self::parse_u32(&mut tokens, line_num, command)?,
                "map_Kd" => mat.diffuse_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Ks" => mat.specular_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Bump" | "bump" => mat.normal_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Ke" => mat.emission_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Ka" => mat.ambient_occlusion_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                // Ignore unknown commands silently
                _ => {}
            }
        }

        // Save final material
        if let Some(mat) = current_material {
            materials.insert(mat.name.clone(), mat);
        }

        Ok(materials)
    }

    /// Parse a Vec3 color from RGB tokens
    fn parse_vec3<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Vec3, String>
    where
        I: Iterator<Item = &'a str>
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let g = Self::parse_f32(tokens, line_num, command)?;
        let b = Self::parse_f32(tokens, line_num, command)?;
        Ok(Vec3::new(r, g, b))
    }

    /// Parse a single f32 value
    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, String>
    where
        I: Iterator<Item = &'a str>
    {
        let token = tokens.next()
            .ok_or_else(|| format!("Line {}: {} missing value", line_num + 1, command))?;
        token.parse::<f32>()
            .map_err(|_| format!("Line {}: {} invalid float value '{}'", line_num + 1, command, token))
    }

    /// Parse a single u32 value
    fn parse_u32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<u32, String>
    where
        I: Iterator<Item = &'a str>
    {
        let token = tokens.next()
            .ok_or_else(|| format!("Line {}: {} missing value", line_num + 1, command))?;
        token.parse::<u32>()
            .map_err(|_| format!("Line {}: {} invalid integer value '{}'", line_num + 1, command, token))
    }

    /// Parse texture file path (may contain spaces, take rest of line)
    fn parse_texture_path<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<PathBuf, String>
    where
        I: Iterator<Item = &'a str>
    {
        let path: Vec<&str> = tokens.collect();
        if path.is_empty() {
            return Err(format!("Line {}: {} missing texture path", line_num + 1, command));
        }
        Ok(PathBuf::from(path.join(" ")))
    }
}
