//! End-to-end scenarios over realistic OBJ/MTL pairs

use crate::{parse_mtl, parse_obj, ObjData};
use meshview_core::{
    ColorAttribute, Drawable, Material, MaterialLibrary, Model, Point3f, CONSTANT_WHITE,
    DEFAULT_MATERIAL,
};

/// A unit cube with two materials, shared texcoords and per-face normals
const CUBE_OBJ: &str = "\
# cube exported with quads
mtllib cube.mtl
o Cube
v -0.5 -0.5  0.5
v  0.5 -0.5  0.5
v  0.5  0.5  0.5
v -0.5  0.5  0.5
v -0.5 -0.5 -0.5
v  0.5 -0.5 -0.5
v  0.5  0.5 -0.5
v -0.5  0.5 -0.5
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
vn 0 0 -1
vn 1 0 0
vn -1 0 0
vn 0 1 0
vn 0 -1 0
usemtl Wood
s 1
f 1/1/1 2/2/1 3/3/1 4/4/1
f 6/1/2 5/2/2 8/3/2 7/4/2
f 2/1/3 6/2/3 7/3/3 3/4/3
f 5/1/4 1/2/4 4/3/4 8/4/4
usemtl Metal
s off
f 4/1/5 3/2/5 7/3/5 8/4/5
f 5/1/6 6/2/6 2/3/6 1/4/6
";

const CUBE_MTL: &str = "\
# two materials
newmtl Wood
Ka 0.0 0.0 0.0
Kd 0.6 0.4 0.2
Ks 0.1 0.1 0.1
Ns 10
map_Kd wood.png

newmtl Metal
Kd 0.8 0.8 0.8
Ks 1 1 1
Ns 250
d 0.9
illum 2
";

/// Join geometries with materials the way the renderer does
fn build_model(obj: ObjData, materials: MaterialLibrary) -> Model {
    Model::new(obj.geometries, materials, obj.material_libs)
}

#[cfg(test)]
mod cube_tests {
    use super::*;

    #[test]
    fn test_cube_splits_by_material() {
        let obj = parse_obj(CUBE_OBJ).unwrap();
        assert_eq!(obj.material_libs, vec!["cube.mtl"]);
        assert_eq!(obj.geometries.len(), 2);

        let wood = &obj.geometries[0];
        assert_eq!(wood.material, "Wood");
        assert_eq!(wood.object, "Cube");
        // four quads, two triangles each
        assert_eq!(wood.triangle_count(), 8);

        let metal = &obj.geometries[1];
        assert_eq!(metal.material, "Metal");
        assert_eq!(metal.triangle_count(), 4);

        for geometry in &obj.geometries {
            assert!(geometry.data.is_consistent());
            assert!(!geometry.data.has_color());
        }
    }

    #[test]
    fn test_cube_streams_line_up() {
        let obj = parse_obj(CUBE_OBJ).unwrap();
        let wood = &obj.geometries[0].data;

        // first triangle of the front face: 1/1/1 2/2/1 3/3/1
        assert_eq!(wood.position_at(0), Some([-0.5, -0.5, 0.5]));
        assert_eq!(wood.position_at(1), Some([0.5, -0.5, 0.5]));
        assert_eq!(wood.position_at(2), Some([0.5, 0.5, 0.5]));
        assert_eq!(&wood.texcoord[..6], &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        assert_eq!(&wood.normal[..3], &[0.0, 0.0, 1.0]);

        // second triangle shares the first corner
        assert_eq!(wood.position_at(3), wood.position_at(0));
        assert_eq!(wood.position_at(5), Some([-0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_cube_materials_join() {
        let obj = parse_obj(CUBE_OBJ).unwrap();
        let materials = parse_mtl(CUBE_MTL).unwrap();
        let model = build_model(obj, materials);

        assert!(model.missing_materials().is_empty());
        let parts: Vec<(&str, &Material)> = model
            .parts()
            .map(|(geometry, material)| (geometry.material.as_str(), material))
            .collect();

        assert_eq!(parts[0].0, "Wood");
        assert_eq!(parts[0].1.diffuse_map.as_deref(), Some("wood.png"));
        assert_eq!(parts[0].1.shininess, 10.0);
        assert_eq!(parts[1].0, "Metal");
        assert_eq!(parts[1].1.opacity, 0.9);
        assert_eq!(parts[1].1.illumination, Some(2));
    }

    #[test]
    fn test_cube_extents_frame_the_camera() {
        let model = build_model(parse_obj(CUBE_OBJ).unwrap(), MaterialLibrary::new());
        let extents = model.extents().unwrap();

        assert_eq!(extents.min, Point3f::new(-0.5, -0.5, -0.5));
        assert_eq!(extents.max, Point3f::new(0.5, 0.5, 0.5));
        assert_eq!(model.center(), Point3f::origin());
        assert!((extents.diagonal_length() - 3.0f32.sqrt()).abs() < 1e-6);
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[test]
    fn test_missing_library_uses_default_material() {
        let model = build_model(parse_obj(CUBE_OBJ).unwrap(), MaterialLibrary::new());

        assert_eq!(model.missing_materials(), vec!["Metal", "Wood"]);
        for (_, material) in model.parts() {
            assert_eq!(material, &DEFAULT_MATERIAL);
        }
    }

    #[test]
    fn test_uncolored_model_binds_constant_white() {
        let obj = parse_obj(CUBE_OBJ).unwrap();
        for geometry in &obj.geometries {
            assert_eq!(
                geometry.data.color_attribute(),
                ColorAttribute::Constant(CONSTANT_WHITE)
            );
        }
    }

    #[test]
    fn test_colored_model_binds_per_vertex() {
        let source = "\
v 0 0 0 1 0 0
v 1 0 0 0 1 0
v 0 1 0 0 0 1
usemtl A
f 1 2 3
";
        let obj = parse_obj(source).unwrap();
        match obj.geometries[0].data.color_attribute() {
            ColorAttribute::PerVertex(color) => {
                assert_eq!(color, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
            }
            other => panic!("expected per-vertex color, got {:?}", other),
        }
    }
}
