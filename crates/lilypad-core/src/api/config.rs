use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tuning for the simulation. The frontend may override any field
/// through the manifest; defaults are the shipped game's values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Viewport width in world pixels.
    pub viewport_width: f32,
    /// Viewport height in world pixels.
    pub viewport_height: f32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Horizontal run speed in pixels per tick.
    pub player_speed: f32,
    /// Gravity scale. Feeds the fall ramp and the jump impulse.
    pub gravity: f32,
    /// Ticks each animation frame stays on screen.
    pub animation_delay: u32,
    /// Terrain block edge length in world pixels.
    pub block_size: f32,
    /// Width of the scroll band at each viewport edge.
    pub scroll_margin: f32,
    /// Player spawn position.
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Maximum number of draw instances per frame (default: 512).
    pub max_instances: usize,
}

impl SimConfig {
    /// Fixed timestep in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// How far ahead of the player each horizontal probe reaches.
    /// Twice the per-tick speed, so grazing contact is caught early.
    pub fn probe_distance(&self) -> f32 {
        self.player_speed * 2.0
    }

    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.spawn_y)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1000.0,
            viewport_height: 800.0,
            tick_rate: 60,
            player_speed: 5.0,
            gravity: 1.0,
            animation_delay: 3,
            block_size: 96.0,
            scroll_margin: 200.0,
            spawn_x: 100.0,
            spawn_y: 100.0,
            max_instances: 512,
        }
    }
}
