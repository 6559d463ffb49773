//! Static game data: buildings, technologies, random events, achievements,
//! mines, regions, and the market.
//!
//! Everything here is immutable and shared by every game instance.

pub mod achievements;
pub mod buildings;
pub mod market;
pub mod mines;
pub mod random_events;
pub mod regions;
pub mod techs;

use crate::enums::EmployeeRole;

/// Name pool for newly hired employees.
pub const EMPLOYEE_NAMES: [&str; 16] = [
    "Alex", "Jordan", "Sam", "Taylor", "Morgan", "Casey", "Riley", "Quinn", "Avery", "Parker",
    "Drew", "Jamie", "Reese", "Skyler", "Rowan", "Emerson",
];

/// Gold spent up front to hire into a role.
pub fn hire_cost(role: EmployeeRole) -> f64 {
    role.salary() * crate::constants::HIRE_COST_SALARY_MULTIPLE
}

/// Cost to raise the company from `level` to `level + 1`, or `None` at the
/// top level.
pub fn company_upgrade_cost(level: u32) -> Option<f64> {
    let next = level.checked_add(1)?;
    Some(f64::from(next) * crate::constants::COMPANY_UPGRADE_COST_STEP)
}
