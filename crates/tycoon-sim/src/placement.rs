//! Placement validation against the spatial index.
//!
//! The quadtree is rebuilt from the ECS world whenever the building set
//! changes. If a query fails, spacing is checked by scanning every building.

use hecs::World;
use tracing::warn;

use tycoon_core::components::Structure;
use tycoon_core::error::CommandError;
use tycoon_core::types::{BuildingId, Position};
use tycoon_spatial::{QPoint, Quadtree, Rect};

use crate::config::SimConfig;

/// An empty index covering the whole map.
pub fn new_index(config: &SimConfig) -> Quadtree<BuildingId> {
    Quadtree::new(
        Rect::centered(config.map_size),
        config.quadtree_capacity,
        config.quadtree_max_depth,
    )
}

/// Re-insert every building.
pub fn rebuild(index: &mut Quadtree<BuildingId>, world: &World) {
    index.clear();
    for (_entity, (structure, pos)) in world.query::<(&Structure, &Position)>().iter() {
        if !index.insert(QPoint::at(structure.id, pos)) {
            warn!(
                target: "sim.spatial",
                building = %structure.id,
                x = pos.x,
                z = pos.z,
                "building lies outside the spatial index"
            );
        }
    }
}

/// Reject positions outside the buildable square.
pub fn check_bounds(pos: &Position, bounds: f64) -> Result<(), CommandError> {
    if pos.is_finite() && pos.x.abs() <= bounds && pos.z.abs() <= bounds {
        Ok(())
    } else {
        Err(CommandError::OutOfBounds { x: pos.x, z: pos.z })
    }
}

/// Reject positions strictly closer than `min_spacing` to an existing building.
pub fn check_spacing(
    index: &Quadtree<BuildingId>,
    world: &World,
    pos: &Position,
    min_spacing: f64,
) -> Result<(), CommandError> {
    let conflict = match index.query_radius(pos.xz(), min_spacing) {
        Ok(hits) => hits
            .into_iter()
            .filter(|p| p.pos.distance_squared(pos.xz()) < min_spacing * min_spacing)
            .map(|p| p.id)
            .min(),
        Err(err) => {
            warn!(target: "sim.spatial", error = %err, "spatial query failed, scanning all buildings");
            linear_conflict(world, pos, min_spacing)
        }
    };

    match conflict {
        Some(neighbor) => Err(CommandError::SpacingViolation {
            neighbor,
            min_spacing,
        }),
        None => Ok(()),
    }
}

/// O(n) spacing check over the ECS world.
pub fn linear_conflict(world: &World, pos: &Position, min_spacing: f64) -> Option<BuildingId> {
    world
        .query::<(&Structure, &Position)>()
        .iter()
        .filter(|(_, (_, other))| {
            other.xz().distance_squared(pos.xz()) < min_spacing * min_spacing
        })
        .map(|(_, (structure, _))| structure.id)
        .min()
}
