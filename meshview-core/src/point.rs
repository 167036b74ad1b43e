//! Point and color types shared by the parsers and the geometry model

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Linear RGB color, each channel nominally in `0.0..=1.0`
pub type Rgb = [f32; 3];

/// Linear RGBA color
pub type Rgba = [f32; 4];

pub const WHITE: Rgb = [1.0, 1.0, 1.0];
pub const BLACK: Rgb = [0.0, 0.0, 0.0];
