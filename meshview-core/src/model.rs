//! A parsed model: geometries joined with their material library

use crate::{geometry::Geometry, material::*, traits::*};
use serde::{Deserialize, Serialize};

/// Geometries plus the materials they reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub geometries: Vec<Geometry>,
    pub materials: MaterialLibrary,
    /// Library filenames as listed by `mtllib`, in source order
    pub material_libs: Vec<String>,
}

impl Model {
    pub fn new(
        geometries: Vec<Geometry>,
        materials: MaterialLibrary,
        material_libs: Vec<String>,
    ) -> Self {
        Self {
            geometries,
            materials,
            material_libs,
        }
    }

    /// Each geometry with its material, substituting the default on a miss
    pub fn parts(&self) -> impl Iterator<Item = (&Geometry, &Material)> {
        self.geometries
            .iter()
            .map(|geometry| (geometry, self.materials.resolve(&geometry.material)))
    }

    /// Material names referenced by geometries but absent from the library
    pub fn missing_materials(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .geometries
            .iter()
            .map(|geometry| geometry.material.as_str())
            .filter(|name| !self.materials.contains(name))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    pub fn vertex_count(&self) -> usize {
        self.geometries.iter().map(Geometry::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.geometries.iter().map(Geometry::triangle_count).sum()
    }
}

impl Drawable for Model {
    fn extents(&self) -> Option<Extents> {
        self.geometries.as_slice().extents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::VertexData;

    fn geometry(material: &str) -> Geometry {
        Geometry {
            name: "cube".to_string(),
            object: "cube".to_string(),
            groups: vec!["default".to_string()],
            material: material.to_string(),
            data: VertexData {
                position: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                texcoord: vec![0.0; 6],
                normal: vec![0.0; 9],
                color: None,
                texcoord_components: 2,
            },
        }
    }

    #[test]
    fn test_parts_substitute_default_material() {
        let mut materials = MaterialLibrary::new();
        materials.insert(
            "blue",
            Material {
                diffuse: [0.0, 0.0, 1.0],
                ..Material::default()
            },
        );

        let model = Model::new(
            vec![geometry("blue"), geometry("unknown")],
            materials,
            vec!["cube.mtl".to_string()],
        );

        let parts: Vec<_> = model.parts().collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].1.diffuse, [0.0, 0.0, 1.0]);
        assert_eq!(parts[1].1, &DEFAULT_MATERIAL);
        assert_eq!(model.missing_materials(), vec!["unknown"]);
        assert_eq!(model.vertex_count(), 6);
        assert_eq!(model.triangle_count(), 2);
        assert!(model.extents().is_some());
    }
}
