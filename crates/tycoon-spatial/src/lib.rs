//! Spatial indexing for building placement.
//!
//! A quadtree over the XZ ground plane answers "which buildings lie within
//! radius r of this point" without scanning every building.

pub use tycoon_core as core;

pub mod quadtree;
pub mod rect;

pub use quadtree::{QPoint, Quadtree, SpatialError};
pub use rect::Rect;
