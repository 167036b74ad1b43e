//! Integration tests for reading models from disk
//!
//! These tests verify that the OBJ file front end resolves material
//! libraries relative to the model and joins them in order.

use meshview_core::{Error, DEFAULT_MATERIAL};
use meshview_io::{read_material_libraries, read_model, LoadOptions, ModelReader, ObjReader};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TRIANGLE_OBJ: &str = "\
mtllib first.mtl second.mtl
mtllib first.mtl
v 0 0 0
v 1 0 0
v 0 1 0
usemtl red
f 1 2 3
usemtl blue
f 1 2 3
usemtl unknown
f 3 2 1
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write fixture");
}

#[test]
fn test_read_model_with_libraries() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "triangle.obj", TRIANGLE_OBJ);
    write(dir.path(), "first.mtl", "newmtl red\nKd 1 0 0\n");
    write(dir.path(), "second.mtl", "newmtl blue\nKd 0 0 1\n");

    let model = ObjReader::read_model(dir.path().join("triangle.obj")).unwrap();

    assert_eq!(model.geometries.len(), 3);
    assert_eq!(model.material_libs, vec!["first.mtl", "second.mtl", "first.mtl"]);
    assert_eq!(model.materials.len(), 2);

    let diffuse: Vec<[f32; 3]> = model.parts().map(|(_, material)| material.diffuse).collect();
    assert_eq!(diffuse, vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 1.0]]);
    assert_eq!(model.missing_materials(), vec!["unknown"]);
}

#[test]
fn test_missing_library_is_skipped_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "triangle.obj", TRIANGLE_OBJ);
    write(dir.path(), "second.mtl", "newmtl blue\nKd 0 0 1\n");

    let model = read_model(dir.path().join("triangle.obj")).unwrap();
    assert_eq!(model.materials.len(), 1);
    assert_eq!(model.materials.resolve("red"), &DEFAULT_MATERIAL);
}

#[test]
fn test_missing_library_can_be_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "triangle.obj", TRIANGLE_OBJ);

    let options = LoadOptions::default().with_skip_missing_libraries(false);
    let result = ObjReader::read_model_with_options(dir.path().join("triangle.obj"), &options);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_libraries_joined_in_order() {
    let dir = TempDir::new().unwrap();
    // no trailing newline: joining must still separate the blocks
    write(dir.path(), "a.mtl", "newmtl shared\nNs 1");
    write(dir.path(), "b.mtl", "newmtl shared\nNs 2");

    let library = read_material_libraries(dir.path(), &["a.mtl", "b.mtl"], true).unwrap();
    assert_eq!(library.resolve("shared").shininess, 2.0);

    let library = read_material_libraries(dir.path(), &["b.mtl", "a.mtl"], true).unwrap();
    assert_eq!(library.resolve("shared").shininess, 1.0);
}

#[test]
fn test_parse_errors_surface_from_reader() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.obj", "v 0 0 0\nf 1 2 3\n");

    match read_model(dir.path().join("broken.obj")) {
        Err(Error::DanglingIndexReference { line, index, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(index, 2);
        }
        other => panic!("expected DanglingIndexReference, got {:?}", other),
    }
}

#[test]
fn test_unsupported_format() {
    assert!(matches!(
        read_model("model.stl"),
        Err(Error::UnsupportedFormat(_))
    ));
    assert!(matches!(read_model("no_such_file.obj"), Err(Error::Io(_))));
}
