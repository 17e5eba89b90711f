//! Hazard animation system.

use crate::core::level::Level;

/// Advance every hazard's animation by one tick. Runs whether a trap
/// is lit or not; blocks are untouched.
///
/// Call this once per simulation tick, after the player has moved.
pub fn advance_hazards(level: &mut Level) {
    for (_, obstacle) in level.iter_mut() {
        obstacle.advance_animation();
    }
}
