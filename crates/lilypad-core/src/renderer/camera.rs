use crate::components::player::Player;

/// Horizontal scroll state for the viewport.
///
/// The camera sits still until the player pushes into the margin band
/// at either edge, then follows at exactly the player's speed. There
/// is no smoothing and no vertical travel.
#[derive(Debug, Clone)]
pub struct ScrollCamera {
    offset_x: f32,
    viewport_width: f32,
    margin: f32,
}

impl ScrollCamera {
    pub fn new(viewport_width: f32, margin: f32) -> Self {
        Self {
            offset_x: 0.0,
            viewport_width,
            margin,
        }
    }

    /// Horizontal camera displacement. Subtracted from world x when a
    /// frame is built; grows without bound as the course scrolls.
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// Evaluate the follow rule once per tick, after movement resolves.
    /// Scrolls only when the player is inside the band on the side it
    /// is moving toward, so backing away from an edge never scrolls.
    pub fn track(&mut self, player: &Player) {
        let bounds = player.bounds();
        let left = bounds.left() - self.offset_x;
        let right = bounds.right() - self.offset_x;

        let pushing_right = right >= self.viewport_width - self.margin && player.vel.x > 0.0;
        let pushing_left = left <= self.margin && player.vel.x < 0.0;
        if pushing_right || pushing_left {
            self.offset_x += player.vel.x;
        }
    }

    /// World x to screen x.
    pub fn apply_x(&self, world_x: f32) -> f32 {
        world_x - self.offset_x
    }
}
