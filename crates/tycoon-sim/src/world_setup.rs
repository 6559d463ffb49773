//! Entity spawn factories for buildings and employees.

use std::collections::HashSet;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tycoon_core::catalog::regions::region_modifiers;
use tycoon_core::catalog::EMPLOYEE_NAMES;
use tycoon_core::components::{Employee, Structure};
use tycoon_core::constants::{PRODUCTIVITY_MIN, PRODUCTIVITY_SPREAD};
use tycoon_core::enums::{BuildingKind, EmployeeRole};
use tycoon_core::state::BuildingRecord;
use tycoon_core::types::{BuildingId, EmployeeId, Position};

/// Spawn a freshly placed building. The regional production bonus is fixed here.
pub fn spawn_building(
    world: &mut World,
    id: BuildingId,
    kind: BuildingKind,
    position: Position,
) -> hecs::Entity {
    let production_multiplier = region_modifiers(&position).production;
    world.spawn((
        Structure {
            id,
            kind,
            level: 1,
            production_multiplier,
        },
        position,
    ))
}

/// Roll a new hire: random name from the pool, productivity in `[0.8, 1.2)`.
pub fn roll_employee(rng: &mut ChaCha8Rng, id: EmployeeId, role: EmployeeRole) -> Employee {
    let name = EMPLOYEE_NAMES[rng.gen_range(0..EMPLOYEE_NAMES.len())];
    Employee {
        id,
        name: name.to_string(),
        role,
        salary: role.salary(),
        productivity: PRODUCTIVITY_MIN + rng.gen::<f64>() * PRODUCTIVITY_SPREAD,
    }
}

/// Repopulate an empty world from persisted records.
///
/// Records with a repeated id, or with the largest id (which leaves no id to
/// hand out next), are skipped. Returns the next free building and employee
/// ids.
pub fn populate(
    world: &mut World,
    buildings: &[BuildingRecord],
    employees: &[Employee],
) -> (u32, u32) {
    let mut seen = HashSet::new();
    let mut next_building = 1;
    for record in buildings {
        if record.id.0 == u32::MAX || !seen.insert(record.id) {
            continue;
        }
        let production_multiplier = if record.production_multiplier > 0.0 {
            record.production_multiplier
        } else {
            1.0
        };
        world.spawn((
            Structure {
                id: record.id,
                kind: record.kind,
                level: record.level.max(1),
                production_multiplier,
            },
            record.position,
        ));
        next_building = next_building.max(record.id.0 + 1);
    }

    let mut seen = HashSet::new();
    let mut next_employee = 1;
    for employee in employees {
        if employee.id.0 == u32::MAX || !seen.insert(employee.id) {
            continue;
        }
        world.spawn((employee.clone(),));
        next_employee = next_employee.max(employee.id.0 + 1);
    }

    (next_building, next_employee)
}
