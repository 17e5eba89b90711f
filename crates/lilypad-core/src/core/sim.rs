use log::info;

use crate::api::config::SimConfig;
use crate::components::player::Player;
use crate::core::collision::{probe_horizontal, resolve_vertical, Contacts};
use crate::core::level::Level;
use crate::input::queue::TickInput;
use crate::renderer::camera::ScrollCamera;
use crate::systems::animation::advance_hazards;

/// The whole game state plus the fixed-tick driver.
///
/// One `step` is one tick. The stage order is load-bearing: gravity
/// commits the velocity the previous tick resolved, probes run on the
/// committed position before new intent is set, the vertical pass reads
/// the velocity it is about to settle, and the camera reads the
/// freshly set horizontal velocity.
pub struct Simulation {
    config: SimConfig,
    level: Level,
    player: Player,
    camera: ScrollCamera,
    running: bool,
    tick: u64,
}

impl Simulation {
    pub fn new(config: SimConfig, level: Level, player: Player) -> Self {
        let camera = ScrollCamera::new(config.viewport_width, config.scroll_margin);
        info!(
            "simulation ready: {} obstacles, spawn at ({}, {})",
            level.len(),
            player.pos.x,
            player.pos.y
        );
        Self {
            config,
            level,
            player,
            camera,
            running: true,
            tick: 0,
        }
    }

    /// Run one fixed tick.
    ///
    /// A quit only lowers the running flag; the tick it arrived in
    /// still completes, and the caller stops scheduling afterwards.
    pub fn step(&mut self, input: &TickInput) {
        if input.quit {
            self.running = false;
        }
        if input.jump_pressed {
            self.player.jump();
        }

        self.player.advance(self.config.tick_rate);
        advance_hazards(&mut self.level);

        // Horizontal intent: probe first, move only where clear.
        self.player.vel.x = 0.0;
        let reach = self.config.probe_distance();
        let blocked_left = probe_horizontal(&mut self.player, &self.level, -reach);
        let blocked_right = probe_horizontal(&mut self.player, &self.level, reach);

        if input.left_held && blocked_left.is_none() {
            self.player.move_left(self.config.player_speed);
        }
        if input.right_held && blocked_right.is_none() {
            self.player.move_right(self.config.player_speed);
        }

        let dy = self.player.vel.y;
        let vertical = resolve_vertical(&mut self.player, &self.level, dy);
        let contacts = Contacts {
            left: blocked_left,
            right: blocked_right,
            vertical,
        };

        // One flinch per tick, no matter how many traps are touching.
        let burned = contacts
            .iter()
            .any(|id| self.level.get(id).map_or(false, |o| o.is_lit_hazard()));
        if burned {
            self.player.register_hit();
        }

        self.camera.track(&self.player);
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Runtime access to the course, e.g. for lighting traps on cue.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn camera(&self) -> &ScrollCamera {
        &self.camera
    }

    pub fn scroll_x(&self) -> f32 {
        self.camera.offset_x()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
