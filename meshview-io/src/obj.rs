//! Wavefront OBJ support
//!
//! [`parse_obj`] turns OBJ source text into flattened geometries, one per
//! object/group/material run, plus the list of material libraries the file
//! names. Supported directives:
//! - `v x y z [w]`, `v x y z r g b` (vertex color extension)
//! - `vt u [v [w]]`, `vn x y z`
//! - `f` with `i`, `i/j`, `i//k` or `i/j/k` vertices, 1-based or negative
//! - `o`, `g`, `usemtl`, `mtllib`
//! - `s` (accepted and ignored, normals are taken from `vn`)
//!
//! Any other keyword is skipped.

use crate::assembler::{AttributePools, FaceVertex, GeometryBuilder};
use crate::mtl::read_material_libraries;
use crate::tokenizer::{logical_lines, Directive};
use crate::ModelReader;
use meshview_core::{Geometry, Model, Point3f, Result, Rgb, Vector3f, WHITE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for OBJ parsing
#[derive(Debug, Clone, PartialEq)]
pub struct ObjParseOptions {
    /// Start a new geometry on every `g` directive
    pub split_on_groups: bool,
    /// Color given to uncolored vertices when other vertices carry color
    pub default_vertex_color: Rgb,
    /// Output stride of the texcoord stream, 2 or 3
    pub texcoord_components: usize,
    /// Object, group and geometry name used before any `o`/`g`
    pub default_name: String,
}

impl Default for ObjParseOptions {
    fn default() -> Self {
        Self {
            split_on_groups: true,
            default_vertex_color: WHITE,
            texcoord_components: 2,
            default_name: "default".to_string(),
        }
    }
}

impl ObjParseOptions {
    pub fn with_split_on_groups(mut self, split: bool) -> Self {
        self.split_on_groups = split;
        self
    }

    pub fn with_default_vertex_color(mut self, color: Rgb) -> Self {
        self.default_vertex_color = color;
        self
    }

    /// Set the texcoord stride, clamped to 2..=3
    pub fn with_texcoord_components(mut self, components: usize) -> Self {
        self.texcoord_components = components.clamp(2, 3);
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }
}

/// Result of parsing one OBJ file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjData {
    pub geometries: Vec<Geometry>,
    /// `mtllib` filenames in source order, duplicates kept
    pub material_libs: Vec<String>,
}

impl ObjData {
    /// Whether any geometry carries per-vertex color
    pub fn has_color(&self) -> bool {
        self.geometries.iter().any(|geometry| geometry.data.has_color())
    }
}

type Handler = fn(&mut ObjParser, &Directive<'_>) -> Result<()>;

const HANDLERS: &[(&str, Handler)] = &[
    ("v", ObjParser::position),
    ("vt", ObjParser::texcoord),
    ("vn", ObjParser::normal),
    ("f", ObjParser::face),
    ("o", ObjParser::object),
    ("g", ObjParser::group),
    ("usemtl", ObjParser::use_material),
    ("mtllib", ObjParser::material_lib),
    ("s", ObjParser::smoothing_group),
];

fn handler(keyword: &str) -> Option<Handler> {
    HANDLERS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, handler)| *handler)
}

/// Keywords [`parse_obj`] acts on
pub fn supported_directives() -> impl Iterator<Item = &'static str> {
    HANDLERS.iter().map(|(name, _)| *name)
}

/// Running state of one OBJ parse
struct ObjParser {
    options: ObjParseOptions,
    pools: AttributePools,
    name: String,
    object: String,
    groups: Vec<String>,
    material: String,
    current: Option<GeometryBuilder>,
    geometries: Vec<Geometry>,
    material_libs: Vec<String>,
    ignored: usize,
}

impl ObjParser {
    fn new(options: &ObjParseOptions) -> Self {
        let mut options = options.clone();
        options.texcoord_components = options.texcoord_components.clamp(2, 3);
        let default_name = options.default_name.clone();

        Self {
            pools: AttributePools::default(),
            name: default_name.clone(),
            object: default_name.clone(),
            groups: vec![default_name],
            material: "default".to_string(),
            current: None,
            geometries: Vec::new(),
            material_libs: Vec::new(),
            ignored: 0,
            options,
        }
    }

    fn dispatch(&mut self, directive: &Directive<'_>) -> Result<()> {
        match handler(directive.keyword) {
            Some(handler) => handler(self, directive),
            None => {
                tracing::trace!(
                    line = directive.line,
                    keyword = directive.keyword,
                    "ignoring unsupported OBJ directive"
                );
                self.ignored += 1;
                Ok(())
            }
        }
    }

    fn position(&mut self, directive: &Directive<'_>) -> Result<()> {
        let values = directive.floats()?;
        let color = match values.len() {
            3 | 4 => None,
            6 => Some([values[3], values[4], values[5]]),
            _ => return Err(directive.malformed()),
        };

        self.pools.positions.push(Point3f::new(values[0], values[1], values[2]));
        self.pools.has_color |= color.is_some();
        self.pools
            .colors
            .push(color.unwrap_or(self.options.default_vertex_color));
        Ok(())
    }

    fn texcoord(&mut self, directive: &Directive<'_>) -> Result<()> {
        directive.expect_args(1..=3)?;
        let mut texcoord = [0.0; 3];
        for (slot, value) in texcoord.iter_mut().zip(directive.floats()?) {
            *slot = value;
        }
        self.pools.texcoords.push(texcoord);
        Ok(())
    }

    fn normal(&mut self, directive: &Directive<'_>) -> Result<()> {
        directive.expect_args(3..=3)?;
        let values = directive.floats()?;
        self.pools.normals.push(Vector3f::new(values[0], values[1], values[2]));
        Ok(())
    }

    fn face(&mut self, directive: &Directive<'_>) -> Result<()> {
        if directive.args.len() < 3 {
            return Err(directive.malformed());
        }

        let polygon = directive
            .args
            .iter()
            .map(|token| {
                let vertex = FaceVertex::parse(token).ok_or_else(|| directive.malformed())?;
                self.pools.resolve(vertex, directive.line)
            })
            .collect::<Result<Vec<_>>>()?;

        let builder = self.current.get_or_insert_with(|| {
            GeometryBuilder::new(
                self.name.clone(),
                self.object.clone(),
                self.groups.clone(),
                self.material.clone(),
                self.options.texcoord_components,
            )
        });
        builder.push_polygon(&self.pools, &polygon);
        Ok(())
    }

    fn object(&mut self, directive: &Directive<'_>) -> Result<()> {
        self.flush();
        self.object = directive
            .rest()
            .unwrap_or_else(|| self.options.default_name.clone());
        self.name = self.object.clone();
        Ok(())
    }

    fn group(&mut self, directive: &Directive<'_>) -> Result<()> {
        if self.options.split_on_groups {
            self.flush();
        }
        self.groups = if directive.args.is_empty() {
            vec![self.options.default_name.clone()]
        } else {
            directive.args.iter().map(|name| name.to_string()).collect()
        };
        self.name = self.groups.join(" ");
        Ok(())
    }

    fn use_material(&mut self, directive: &Directive<'_>) -> Result<()> {
        let material = directive.rest().ok_or_else(|| directive.malformed())?;
        self.flush();
        self.material = material;
        Ok(())
    }

    fn material_lib(&mut self, directive: &Directive<'_>) -> Result<()> {
        directive.expect_args(1..=usize::MAX)?;
        self.material_libs
            .extend(directive.args.iter().map(|name| name.to_string()));
        Ok(())
    }

    fn smoothing_group(&mut self, _directive: &Directive<'_>) -> Result<()> {
        Ok(())
    }

    /// Close the current geometry; empty ones are dropped
    fn flush(&mut self) {
        if let Some(builder) = self.current.take() {
            if let Some(geometry) = builder.build(true) {
                self.geometries.push(geometry);
            }
        }
    }

    fn finish(mut self) -> ObjData {
        self.flush();

        if !self.pools.has_color {
            for geometry in &mut self.geometries {
                geometry.data.color = None;
            }
        }

        tracing::debug!(
            geometries = self.geometries.len(),
            positions = self.pools.positions.len(),
            texcoords = self.pools.texcoords.len(),
            normals = self.pools.normals.len(),
            has_color = self.pools.has_color,
            ignored = self.ignored,
            "parsed OBJ"
        );

        ObjData {
            geometries: self.geometries,
            material_libs: self.material_libs,
        }
    }
}

/// Parse OBJ source text with default options
pub fn parse_obj(text: &str) -> Result<ObjData> {
    parse_obj_with_options(text, &ObjParseOptions::default())
}

/// Parse OBJ source text
///
/// Fails on the first malformed directive or dangling face index; no
/// partial result is returned.
pub fn parse_obj_with_options(text: &str, options: &ObjParseOptions) -> Result<ObjData> {
    let mut parser = ObjParser::new(options);

    for (line, logical) in logical_lines(text) {
        if let Some(directive) = Directive::parse(line, &logical) {
            parser.dispatch(&directive)?;
        }
    }

    Ok(parser.finish())
}

/// Configuration for loading a model from disk
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub parse: ObjParseOptions,
    /// Log and skip `mtllib` files that do not exist instead of failing
    pub skip_missing_libraries: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parse: ObjParseOptions::default(),
            skip_missing_libraries: true,
        }
    }
}

impl LoadOptions {
    pub fn with_parse_options(mut self, parse: ObjParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_skip_missing_libraries(mut self, skip: bool) -> Self {
        self.skip_missing_libraries = skip;
        self
    }
}

pub struct ObjReader;

impl ObjReader {
    /// Read an OBJ file and the material libraries it names
    ///
    /// Libraries are resolved relative to the OBJ file's directory.
    pub fn read_model_with_options<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Model> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let obj = parse_obj_with_options(&text, &options.parse)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let materials = read_material_libraries(
            base_dir,
            &obj.material_libs,
            options.skip_missing_libraries,
        )?;

        Ok(Model::new(obj.geometries, materials, obj.material_libs))
    }
}

impl ModelReader for ObjReader {
    fn read_model<P: AsRef<Path>>(path: P) -> Result<Model> {
        Self::read_model_with_options(path, &LoadOptions::default())
    }
}
