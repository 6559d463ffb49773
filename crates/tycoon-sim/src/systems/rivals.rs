//! Rival system: one decision cycle for every rival.

use tracing::warn;

use tycoon_core::rival::Rival;
use tycoon_rival_ai::{tick_rival, MarketSignal};

/// Advance each rival. A rival whose evaluation fails keeps its previous
/// state. Returns the number of rivals left unchanged.
pub fn run(rivals: &mut [Rival], signal: &MarketSignal) -> usize {
    let mut discarded = 0;
    for rival in rivals.iter_mut() {
        match tick_rival(rival, signal) {
            Ok(next) => *rival = next,
            Err(err) => {
                warn!(target: "sim.rival", rival = %rival.id, error = %err, "rival tick discarded");
                discarded += 1;
            }
        }
    }
    discarded
}
