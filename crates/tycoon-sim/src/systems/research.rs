//! Research progression for the single active research slot.

use serde::{Deserialize, Serialize};

use tycoon_core::catalog::techs::{tech_node, TechId};

/// The tech being researched and its normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResearchSlot {
    pub tech: TechId,
    pub progress: f64,
}

impl ResearchSlot {
    pub fn new(tech: TechId) -> Self {
        Self {
            tech,
            progress: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResearchStep {
    Progress(f64),
    Complete(TechId),
}

/// Advance by `dt` seconds. Each research lab adds one unit of speed; with
/// no labs research still runs at unit speed.
pub fn advance(slot: &ResearchSlot, dt: f64, lab_count: usize) -> ResearchStep {
    let node = tech_node(slot.tech);
    let speed = lab_count.max(1) as f64;
    let progress = slot.progress + dt * speed / node.research_secs;
    if progress >= 1.0 {
        ResearchStep::Complete(slot.tech)
    } else {
        ResearchStep::Progress(progress)
    }
}
