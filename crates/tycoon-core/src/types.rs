//! Fundamental geometric and identity types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 3D position in world space (map units).
/// x = East, z = South, y = Up. Buildings stand on the XZ ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the ground plane.
    pub const fn ground(x: f64, z: f64) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Projection onto the XZ ground plane.
    pub fn xz(&self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }

    /// Distance to another position measured on the ground plane.
    pub fn ground_distance_to(&self, other: &Position) -> f64 {
        self.xz().distance(other.xz())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Identifier of a placed building. Never reused within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub u32);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "building_{}", self.0)
    }
}

/// Identifier of a hired employee. Never reused within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "emp_{}", self.0)
    }
}

/// Identifier of a conquerable mine site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MineId(pub u8);

impl fmt::Display for MineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mine_{}", self.0)
    }
}
