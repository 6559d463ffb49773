//! Achievement evaluation against post-tick state.

use tracing::info;

use tycoon_core::catalog::achievements::{newly_satisfied, AchievementId, Progress};

/// Append every newly satisfied achievement to `unlocked` and return them.
pub fn run(progress: &Progress, unlocked: &mut Vec<AchievementId>) -> Vec<AchievementId> {
    let fresh = newly_satisfied(progress, unlocked);
    for id in &fresh {
        info!(target: "sim.achievements", achievement = %id, "achievement unlocked");
    }
    unlocked.extend(fresh.iter().copied());
    fresh
}
