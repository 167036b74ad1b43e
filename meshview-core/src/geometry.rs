//! Flattened, GPU-ready geometry produced by the OBJ parser
//!
//! A [`Geometry`] holds non-indexed vertex streams: every three consecutive
//! vertices form one triangle and all streams advance in lock-step, one
//! entry per vertex.

use crate::point::Rgba;
use serde::{Deserialize, Serialize};

/// Components per vertex in the position stream
pub const POSITION_COMPONENTS: usize = 3;

/// Components per vertex in the normal stream
pub const NORMAL_COMPONENTS: usize = 3;

/// Components per vertex in the color stream
pub const COLOR_COMPONENTS: usize = 3;

/// Color handed to the renderer when the source carried no vertex colors
pub const CONSTANT_WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Per-vertex attribute arrays for one geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexData {
    pub position: Vec<f32>,
    pub texcoord: Vec<f32>,
    pub normal: Vec<f32>,
    /// `None` when no `v` line in the source carried color
    pub color: Option<Vec<f32>>,
    /// Stride of the texcoord stream (2 or 3)
    pub texcoord_components: usize,
}

/// How the color attribute should be bound by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorAttribute<'a> {
    PerVertex(&'a [f32]),
    Constant(Rgba),
}

impl VertexData {
    /// Create empty streams with the given texcoord stride
    pub fn new(texcoord_components: usize) -> Self {
        Self {
            position: Vec::new(),
            texcoord: Vec::new(),
            normal: Vec::new(),
            color: None,
            texcoord_components,
        }
    }

    /// Number of vertices emitted
    pub fn vertex_count(&self) -> usize {
        self.position.len() / POSITION_COMPONENTS
    }

    /// Number of triangles emitted
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }

    /// The color stream, or constant white when the source had none
    pub fn color_attribute(&self) -> ColorAttribute<'_> {
        match &self.color {
            Some(color) => ColorAttribute::PerVertex(color),
            None => ColorAttribute::Constant(CONSTANT_WHITE),
        }
    }

    /// Check that every stream describes the same number of vertices
    pub fn is_consistent(&self) -> bool {
        let count = self.vertex_count();
        let stride = self.texcoord_components.max(1);

        self.position.len() % POSITION_COMPONENTS == 0
            && count % 3 == 0
            && self.texcoord.len() == count * stride
            && self.normal.len() == count * NORMAL_COMPONENTS
            && self
                .color
                .as_ref()
                .map_or(true, |color| color.len() == count * COLOR_COMPONENTS)
    }

    /// Position of vertex `index`
    pub fn position_at(&self, index: usize) -> Option<[f32; 3]> {
        let start = index * POSITION_COMPONENTS;
        self.position
            .get(start..start + POSITION_COMPONENTS)
            .map(|p| [p[0], p[1], p[2]])
    }
}

/// One draw call's worth of triangles sharing an object and a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Most recent `o` or `g` name when the geometry started
    pub name: String,
    /// Most recent `o` name
    pub object: String,
    /// Names given on the most recent `g` line
    pub groups: Vec<String>,
    /// Most recent `usemtl` name, or `"default"`
    pub material: String,
    pub data: VertexData,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.data.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.data.triangle_count()
    }
}
