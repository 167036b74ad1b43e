//! Geometry assembly: resolving face indices and flattening vertex streams
//!
//! OBJ faces index into independent position/texcoord/normal pools. The
//! assembler resolves each face vertex against the pools as they stand when
//! the face is read, fans polygons into triangles, and appends one entry per
//! triangle corner to every output stream. No vertices are shared, so the
//! output suits a non-indexed draw.

use crate::tokenizer::parse_index;
use meshview_core::{
    Error, Geometry, IndexStream, Point3f, Result, Rgb, Vector3f, VertexData, COLOR_COMPONENTS,
    NORMAL_COMPONENTS, POSITION_COMPONENTS,
};

/// One slash-separated group of a face directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceVertex {
    /// `i`
    Position(i64),
    /// `i/j`
    PositionTexcoord(i64, i64),
    /// `i//k`
    PositionNormal(i64, i64),
    /// `i/j/k`
    PositionTexcoordNormal(i64, i64, i64),
}

impl FaceVertex {
    /// Parse `i`, `i/j`, `i//k` or `i/j/k`; `None` when the token is not one of those
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split('/');
        let position = parse_index(parts.next()?)?;
        let texcoord = parts.next().unwrap_or("");
        let normal = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return None;
        }

        let optional = |part: &str| -> Option<Option<i64>> {
            if part.is_empty() {
                Some(None)
            } else {
                parse_index(part).map(Some)
            }
        };

        Some(match (optional(texcoord)?, optional(normal)?) {
            (None, None) => FaceVertex::Position(position),
            (Some(t), None) => FaceVertex::PositionTexcoord(position, t),
            (None, Some(n)) => FaceVertex::PositionNormal(position, n),
            (Some(t), Some(n)) => FaceVertex::PositionTexcoordNormal(position, t, n),
        })
    }

    pub fn position(&self) -> i64 {
        match *self {
            FaceVertex::Position(p)
            | FaceVertex::PositionTexcoord(p, _)
            | FaceVertex::PositionNormal(p, _)
            | FaceVertex::PositionTexcoordNormal(p, _, _) => p,
        }
    }

    pub fn texcoord(&self) -> Option<i64> {
        match *self {
            FaceVertex::PositionTexcoord(_, t) | FaceVertex::PositionTexcoordNormal(_, t, _) => {
                Some(t)
            }
            _ => None,
        }
    }

    pub fn normal(&self) -> Option<i64> {
        match *self {
            FaceVertex::PositionNormal(_, n) | FaceVertex::PositionTexcoordNormal(_, _, n) => {
                Some(n)
            }
            _ => None,
        }
    }
}

/// Map a 1-based or negative relative index onto `0..len`
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index > 0 {
        let resolved = usize::try_from(index - 1).ok()?;
        (resolved < len).then_some(resolved)
    } else if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    } else {
        None
    }
}

/// Corner indices of the fan triangulation of an `n`-gon
///
/// Yields `(0, i, i + 1)` for `i` in `1..n - 1`; nothing when `n < 3`.
pub fn fan_triangles(n: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..n.saturating_sub(1)).map(|i| [0, i, i + 1])
}

/// A face vertex resolved to pool positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// Vertex attribute pools accumulated over one OBJ parse
#[derive(Debug, Default)]
pub struct AttributePools {
    pub positions: Vec<Point3f>,
    /// `u v w`; `v` and `w` are 0 when absent
    pub texcoords: Vec<[f32; 3]>,
    pub normals: Vec<Vector3f>,
    /// Always as long as `positions`, backfilled for uncolored vertices
    pub colors: Vec<Rgb>,
    /// Whether any `v` line carried a color
    pub has_color: bool,
}

impl AttributePools {
    /// Resolve a face vertex against the pools' current lengths
    pub fn resolve(&self, vertex: FaceVertex, line: usize) -> Result<VertexRef> {
        let stream_index = |index: i64, len: usize, stream: IndexStream| {
            resolve_index(index, len).ok_or(Error::DanglingIndexReference {
                line,
                index,
                stream,
            })
        };

        Ok(VertexRef {
            position: stream_index(vertex.position(), self.positions.len(), IndexStream::Position)?,
            texcoord: vertex
                .texcoord()
                .map(|t| stream_index(t, self.texcoords.len(), IndexStream::Texcoord))
                .transpose()?,
            normal: vertex
                .normal()
                .map(|n| stream_index(n, self.normals.len(), IndexStream::Normal))
                .transpose()?,
        })
    }
}

/// Accumulates the flattened streams of one geometry
#[derive(Debug)]
pub struct GeometryBuilder {
    name: String,
    object: String,
    groups: Vec<String>,
    material: String,
    data: VertexData,
    color: Vec<f32>,
}

impl GeometryBuilder {
    pub fn new(
        name: String,
        object: String,
        groups: Vec<String>,
        material: String,
        texcoord_components: usize,
    ) -> Self {
        Self {
            name,
            object,
            groups,
            material,
            data: VertexData::new(texcoord_components),
            color: Vec::new(),
        }
    }

    /// Append one vertex to every stream
    ///
    /// `vertex` must have been produced by `pools.resolve`.
    pub fn push_vertex(&mut self, pools: &AttributePools, vertex: VertexRef) {
        let position = pools.positions[vertex.position];
        self.data.position.extend_from_slice(&[position.x, position.y, position.z]);

        let stride = self.data.texcoord_components;
        match vertex.texcoord {
            Some(index) => {
                let texcoord = &pools.texcoords[index];
                self.data.texcoord.extend_from_slice(&texcoord[..stride]);
            }
            None => self.data.texcoord.extend(std::iter::repeat(0.0).take(stride)),
        }

        match vertex.normal {
            Some(index) => {
                let normal = pools.normals[index];
                self.data.normal.extend_from_slice(&[normal.x, normal.y, normal.z]);
            }
            None => self.data.normal.extend_from_slice(&[0.0; NORMAL_COMPONENTS]),
        }

        self.color.extend_from_slice(&pools.colors[vertex.position]);
    }

    /// Fan a resolved polygon into triangles and append them
    pub fn push_polygon(&mut self, pools: &AttributePools, polygon: &[VertexRef]) {
        for triangle in fan_triangles(polygon.len()) {
            for corner in triangle {
                self.push_vertex(pools, polygon[corner]);
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.data.position.len() / POSITION_COMPONENTS
    }

    pub fn is_empty(&self) -> bool {
        self.data.position.is_empty()
    }

    /// Finish the geometry; `None` when no triangle was emitted
    ///
    /// The color stream is kept only when `keep_color` is set.
    pub fn build(self, keep_color: bool) -> Option<Geometry> {
        if self.is_empty() {
            return None;
        }

        let mut data = self.data;
        if keep_color {
            debug_assert_eq!(self.color.len(), data.vertex_count() * COLOR_COMPONENTS);
            data.color = Some(self.color);
        }

        Some(Geometry {
            name: self.name,
            object: self.object,
            groups: self.groups,
            material: self.material,
            data,
        })
    }
}
