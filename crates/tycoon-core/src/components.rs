//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{BuildingId, EmployeeId};

/// A placed building. Spawned together with a [`crate::types::Position`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: BuildingId,
    pub kind: BuildingKind,
    /// Starts at 1. Output scales linearly with level.
    pub level: u32,
    /// Regional production bonus fixed at placement time.
    pub production_multiplier: f64,
}

/// A member of the player's company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: EmployeeRole,
    /// Gold drained per second.
    pub salary: f64,
    /// Output factor in `[0.8, 1.2)`.
    pub productivity: f64,
}
