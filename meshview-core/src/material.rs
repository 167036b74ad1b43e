//! Material descriptors parsed from MTL libraries

use crate::point::{Rgb, BLACK, WHITE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shading parameters of one `newmtl` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// `Kd`
    pub diffuse: Rgb,
    /// `Ka`
    pub ambient: Rgb,
    /// `Ks`
    pub specular: Rgb,
    /// `Ke`
    pub emissive: Rgb,
    /// `Ns`
    pub shininess: f32,
    /// `d`, or `1 - Tr` when only `Tr` is given
    pub opacity: f32,
    /// `Ni`
    pub optical_density: f32,
    /// `illum`
    pub illumination: Option<u32>,
    /// `map_Kd`
    pub diffuse_map: Option<String>,
    /// `map_Ns`
    pub specular_map: Option<String>,
    /// `map_Bump` / `bump`
    pub normal_map: Option<String>,
}

/// Descriptor used for any material name missing from the library
pub static DEFAULT_MATERIAL: Material = Material::DEFAULT;

impl Material {
    /// Diffuse white, ambient black, specular white, shininess 400, opaque
    pub const DEFAULT: Material = Material {
        diffuse: WHITE,
        ambient: BLACK,
        specular: WHITE,
        emissive: BLACK,
        shininess: 400.0,
        opacity: 1.0,
        optical_density: 1.0,
        illumination: None,
        diffuse_map: None,
        specular_map: None,
        normal_map: None,
    };

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::DEFAULT
    }
}

/// Materials keyed by their `newmtl` name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material, replacing any earlier one with the same name
    pub fn insert(&mut self, name: impl Into<String>, material: Material) -> Option<Material> {
        self.materials.insert(name.into(), material)
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Look up a material, falling back to [`DEFAULT_MATERIAL`] on a miss
    pub fn resolve(&self, name: &str) -> &Material {
        self.materials.get(name).unwrap_or(&DEFAULT_MATERIAL)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.materials.iter().map(|(name, material)| (name.as_str(), material))
    }

    /// Material names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge another library in; its entries win on name clashes
    pub fn extend(&mut self, other: MaterialLibrary) {
        self.materials.extend(other.materials);
    }
}
