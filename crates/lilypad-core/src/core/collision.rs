//! Pixel-mask collision between the player and the course.
//!
//! Horizontal movement is gated ahead of time: the player is displaced
//! by a probe distance, tested, and restored before any intent is set.
//! Vertical movement is committed first and then settled by snapping,
//! which is what gives landings and head bumps their exact positions.

use crate::api::types::ObstacleId;
use crate::components::obstacle::Obstacle;
use crate::components::player::Player;
use crate::core::level::Level;

/// Everything the player touched during one tick's resolution.
#[derive(Debug, Clone, Default)]
pub struct Contacts {
    /// First obstacle the leftward probe reached.
    pub left: Option<ObstacleId>,
    /// First obstacle the rightward probe reached.
    pub right: Option<ObstacleId>,
    /// All overlaps found by the vertical pass, resting contact
    /// included.
    pub vertical: Vec<ObstacleId>,
}

impl Contacts {
    pub fn iter(&self) -> impl Iterator<Item = ObstacleId> + '_ {
        self.left
            .into_iter()
            .chain(self.right)
            .chain(self.vertical.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.vertical.is_empty()
    }
}

/// Mask test with a box rejection in front of it. Offsets are the
/// floored integer placements the renderer would also use.
fn touching(player: &Player, obstacle: &Obstacle) -> bool {
    if !player.bounds().overlaps(&obstacle.bounds()) {
        return false;
    }
    let dx = obstacle.pos.x.floor() as i32 - player.pos.x.floor() as i32;
    let dy = obstacle.pos.y.floor() as i32 - player.pos.y.floor() as i32;
    player.frame().mask.overlaps(&obstacle.frame.mask, dx, dy)
}

/// Displace the player by `dx`, report the first obstacle whose mask
/// it would touch, then restore the saved position. The restore puts
/// back the original bits, so a probe can never move the player.
pub fn probe_horizontal(player: &mut Player, level: &Level, dx: f32) -> Option<ObstacleId> {
    let origin = player.pos;
    player.pos.x += dx;

    let mut found = None;
    for (id, obstacle) in level.iter() {
        if touching(player, obstacle) {
            found = Some(id);
            break;
        }
    }

    player.pos = origin;
    found
}

/// Settle the vertical axis after this tick's movement was committed.
///
/// `dy` is the vertical velocity that produced the current position,
/// captured before any snapping changes it. Falling contact seats the
/// player's bottom on the obstacle's top and lands; rising contact
/// seats the head against the underside and reflects. A zero-`dy`
/// overlap is collected without snapping so resting contact still
/// counts as touch.
///
/// Later obstacles are tested against the already-snapped position.
pub fn resolve_vertical(player: &mut Player, level: &Level, dy: f32) -> Vec<ObstacleId> {
    let mut touched = Vec::new();
    for (id, obstacle) in level.iter() {
        if !touching(player, obstacle) {
            continue;
        }
        if dy > 0.0 {
            player.pos.y = obstacle.bounds().top() - player.size().y;
            player.land();
        } else if dy < 0.0 {
            player.pos.y = obstacle.bounds().bottom();
            player.bump_head();
        }
        touched.push(id);
    }
    touched
}
