//! Core traits for meshview

use crate::{geometry::*, point::*};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a set of positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub min: Point3f,
    pub max: Point3f,
}

impl Extents {
    /// Bounds of a single point
    pub fn from_point(point: Point3f) -> Self {
        Self { min: point, max: point }
    }

    /// Grow the bounds to contain `point`
    pub fn include(&mut self, point: Point3f) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Union of two bounds
    pub fn merge(&self, other: &Extents) -> Extents {
        let mut merged = *self;
        merged.include(other.min);
        merged.include(other.max);
        merged
    }

    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Edge lengths of the box
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// Translation that moves the center to the origin
    pub fn offset_to_origin(&self) -> Vector3f {
        -self.center().coords
    }

    /// Length of the box diagonal
    pub fn diagonal_length(&self) -> f32 {
        self.size().norm()
    }
}

/// Trait for anything that can be framed by a camera
pub trait Drawable {
    /// Bounds of every position, `None` when there are no vertices
    fn extents(&self) -> Option<Extents>;

    /// Center of the bounds, the origin when empty
    fn center(&self) -> Point3f {
        self.extents()
            .map(|extents| extents.center())
            .unwrap_or_else(Point3f::origin)
    }
}

impl Drawable for VertexData {
    fn extents(&self) -> Option<Extents> {
        let mut points = self
            .position
            .chunks_exact(POSITION_COMPONENTS)
            .map(|p| Point3f::new(p[0], p[1], p[2]));

        let mut extents = Extents::from_point(points.next()?);
        for point in points {
            extents.include(point);
        }

        Some(extents)
    }
}

impl Drawable for Geometry {
    fn extents(&self) -> Option<Extents> {
        self.data.extents()
    }
}

impl Drawable for [Geometry] {
    fn extents(&self) -> Option<Extents> {
        self.iter()
            .filter_map(Drawable::extents)
            .reduce(|acc, extents| acc.merge(&extents))
    }
}
