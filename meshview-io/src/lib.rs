//! Wavefront OBJ/MTL parsing for meshview
//!
//! The parsers are pure functions of their input text: [`parse_obj`] yields
//! GPU-ready geometries and the material libraries they need, [`parse_mtl`]
//! yields the material library. Joining the two, and fetching the library
//! files, is left to the caller; [`ObjReader`] does it for files on disk.

pub mod tokenizer;
pub mod assembler;
pub mod obj;
pub mod mtl;

#[cfg(test)]
mod tests;

pub use meshview_core::{Error, Result};
pub use assembler::FaceVertex;
pub use obj::{parse_obj, parse_obj_with_options, LoadOptions, ObjData, ObjParseOptions, ObjReader};
pub use mtl::{parse_mtl, read_material_libraries};

use meshview_core::Model;
use std::path::Path;

/// Trait for reading models from files
pub trait ModelReader {
    fn read_model<P: AsRef<Path>>(path: P) -> Result<Model>;
}

/// Auto-detect format and read a model
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => obj::ObjReader::read_model(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported model format: {:?}",
            path.extension()
        ))),
    }
}
