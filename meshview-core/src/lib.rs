//! Core data structures and traits for meshview
//!
//! This crate provides the types the OBJ/MTL parsers produce and the
//! renderer consumes: flattened per-vertex geometry streams, material
//! descriptors, the joined model, and the shared error type.

pub mod point;
pub mod geometry;
pub mod material;
pub mod model;
pub mod traits;
pub mod error;

pub use point::*;
pub use geometry::*;
pub use material::*;
pub use model::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
