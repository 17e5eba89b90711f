use glam::Vec2;

use crate::api::types::Aabb;
use crate::components::animation::FrameCycle;
use crate::components::sprite::{AnimationSet, Facing, SpriteFrame};

/// Upward speed granted by a jump, as a multiple of gravity.
const JUMP_BOOST: f32 = 8.0;
/// Jumps allowed before touching ground again (ground jump + one
/// mid-air jump).
const MAX_JUMPS: u32 = 2;
/// Seconds the hit flinch lasts after the most recent hazard contact.
const HIT_SECONDS: u32 = 2;

/// Animation states, listed highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Hit,
    Jump,
    DoubleJump,
    Fall,
    Run,
    Idle,
}

impl PlayerState {
    /// Sprite set key for this state and facing.
    pub fn key(self, facing: Facing) -> &'static str {
        match (self, facing) {
            (PlayerState::Hit, Facing::Left) => "hit_left",
            (PlayerState::Hit, Facing::Right) => "hit_right",
            (PlayerState::Jump, Facing::Left) => "jump_left",
            (PlayerState::Jump, Facing::Right) => "jump_right",
            (PlayerState::DoubleJump, Facing::Left) => "double_jump_left",
            (PlayerState::DoubleJump, Facing::Right) => "double_jump_right",
            (PlayerState::Fall, Facing::Left) => "fall_left",
            (PlayerState::Fall, Facing::Right) => "fall_right",
            (PlayerState::Run, Facing::Left) => "run_left",
            (PlayerState::Run, Facing::Right) => "run_right",
            (PlayerState::Idle, Facing::Left) => "idle_left",
            (PlayerState::Idle, Facing::Right) => "idle_right",
        }
    }
}

/// The controllable character.
///
/// Owns position, velocity, the jump and damage bookkeeping, and the
/// sprite frame the renderer should draw. Movement intent comes from
/// the driver; this struct only integrates what it is told.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub jump_count: u32,
    gravity: f32,
    /// Ticks since the player last stood on something. Drives the
    /// gravity ramp.
    fall_ticks: u32,
    hit: bool,
    hit_ticks: u32,
    cycle: FrameCycle,
    frames: AnimationSet,
    frame: SpriteFrame,
    size: Vec2,
}

impl Player {
    /// Build a player at `pos` from its sprite sets. Returns None when
    /// the resting set ("idle_right") is missing or empty, since there
    /// would be nothing to draw or collide on the first tick.
    pub fn new(pos: Vec2, frames: AnimationSet, gravity: f32, animation_delay: u32) -> Option<Self> {
        let frame = frames
            .get(PlayerState::Idle.key(Facing::Right))
            .and_then(|set| set.first())
            .cloned()?;
        let size = frame.size;
        Some(Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            jump_count: 0,
            gravity,
            fall_ticks: 0,
            hit: false,
            hit_ticks: 0,
            cycle: FrameCycle::new(animation_delay),
            frames,
            frame,
            size,
        })
    }

    /// Launch upward. The second press mid-air is the double jump;
    /// past that the request is ignored until landing.
    pub fn jump(&mut self) {
        if self.jump_count >= MAX_JUMPS {
            return;
        }
        self.vel.y = -JUMP_BOOST * self.gravity;
        self.cycle.reset();
        self.jump_count += 1;
        if self.jump_count == 1 {
            // Restart the gravity ramp so the first jump gets full height.
            self.fall_ticks = 0;
        }
    }

    pub fn move_left(&mut self, speed: f32) {
        self.vel.x = -speed;
        if self.facing != Facing::Left {
            self.facing = Facing::Left;
            self.cycle.reset();
        }
    }

    pub fn move_right(&mut self, speed: f32) {
        self.vel.x = speed;
        if self.facing != Facing::Right {
            self.facing = Facing::Right;
            self.cycle.reset();
        }
    }

    /// One tick of self-driven motion: gravity ramp, position commit,
    /// damage timer, sprite refresh.
    ///
    /// The velocity applied here is whatever the previous tick's
    /// resolution left in place; this tick's movement intent is set
    /// afterwards by the driver. Positions commit to whole pixels;
    /// velocity keeps its fraction, so slow ramps move the player
    /// only on the ticks where a full pixel accumulates.
    pub fn advance(&mut self, ticks_per_second: u32) {
        let ramp = (self.fall_ticks as f32 / ticks_per_second as f32) * self.gravity;
        self.vel.y += ramp.min(1.0);
        self.pos = (self.pos + self.vel).floor();

        if self.hit {
            self.hit_ticks += 1;
        }
        if self.hit_ticks > ticks_per_second * HIT_SECONDS {
            self.hit = false;
            self.hit_ticks = 0;
        }

        self.fall_ticks += 1;
        self.refresh_sprite();
    }

    /// Landed on top of something. Kills vertical motion and restores
    /// both jumps. Harmless to call when already grounded.
    pub fn land(&mut self) {
        self.fall_ticks = 0;
        self.vel.y = 0.0;
        self.jump_count = 0;
    }

    /// Clipped a ceiling: reflect vertical velocity so the rise turns
    /// into a fall. The fall counter keeps its value.
    pub fn bump_head(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Touched a live hazard. Restarts the flinch timer, so continued
    /// contact keeps the player flashing until two seconds after the
    /// last touch.
    pub fn register_hit(&mut self) {
        self.hit = true;
        self.hit_ticks = 0;
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Pick the animation state from physics, highest priority first.
    /// The fall pose waits until downward speed clears twice gravity so
    /// the run cycle survives small downhill steps.
    pub fn state(&self) -> PlayerState {
        if self.hit {
            PlayerState::Hit
        } else if self.vel.y < 0.0 && self.jump_count == 1 {
            PlayerState::Jump
        } else if self.vel.y < 0.0 && self.jump_count == 2 {
            PlayerState::DoubleJump
        } else if self.vel.y > self.gravity * 2.0 {
            PlayerState::Fall
        } else if self.vel.x != 0.0 {
            PlayerState::Run
        } else {
            PlayerState::Idle
        }
    }

    pub fn frame(&self) -> &SpriteFrame {
        &self.frame
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    fn refresh_sprite(&mut self) {
        let key = self.state().key(self.facing);
        if let Some(set) = self.frames.get(key) {
            if !set.is_empty() {
                self.frame = set[self.cycle.frame_index(set.len())].clone();
                self.size = self.frame.size;
            }
        }
        self.cycle.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mask::PixelMask;
    use crate::components::sprite::{FrameSet, SheetId};
    use std::collections::HashMap;

    const TPS: u32 = 60;

    fn frame_set(sheet: u32, count: u32) -> FrameSet {
        (0..count)
            .map(|i| SpriteFrame::new(SheetId(sheet), i, PixelMask::filled(64, 64)))
            .collect()
    }

    fn test_frames() -> AnimationSet {
        let states = [
            "idle", "run", "jump", "double_jump", "fall", "hit",
        ];
        let mut frames = HashMap::new();
        for (n, state) in states.iter().enumerate() {
            for side in ["right", "left"] {
                frames.insert(format!("{state}_{side}"), frame_set(n as u32, 4));
            }
        }
        frames
    }

    fn player() -> Player {
        Player::new(Vec2::new(100.0, 100.0), test_frames(), 1.0, 3).unwrap()
    }

    #[test]
    fn new_requires_an_idle_set() {
        assert!(Player::new(Vec2::ZERO, HashMap::new(), 1.0, 3).is_none());
        assert_eq!(player().frame().sheet, SheetId(0));
    }

    #[test]
    fn jump_is_capped_at_two() {
        let mut p = player();
        p.jump();
        assert_eq!(p.jump_count, 1);
        assert_eq!(p.vel.y, -8.0);

        p.jump();
        assert_eq!(p.jump_count, 2);

        let vel = p.vel.y;
        p.jump();
        assert_eq!(p.jump_count, 2);
        assert_eq!(p.vel.y, vel);
    }

    #[test]
    fn first_jump_restarts_the_gravity_ramp() {
        let mut p = player();
        for _ in 0..30 {
            p.advance(TPS);
        }
        assert!(p.fall_ticks > 0);

        p.jump();
        assert_eq!(p.fall_ticks, 0);

        // The double jump does not reset the ramp again.
        p.advance(TPS);
        let ticks = p.fall_ticks;
        p.jump();
        assert_eq!(p.fall_ticks, ticks);
    }

    #[test]
    fn gravity_ramp_is_clamped() {
        let mut p = player();
        // Way past the one-second mark the increment should be exactly 1.
        for _ in 0..(TPS * 3) {
            p.advance(TPS);
        }
        let before = p.vel.y;
        p.advance(TPS);
        assert_eq!(p.vel.y, before + 1.0);
    }

    #[test]
    fn advance_commits_velocity_into_position() {
        let mut p = player();
        p.vel = Vec2::new(5.0, 0.0);
        p.advance(TPS);
        // fall_ticks was 0, so the very first step adds no gravity.
        assert_eq!(p.pos, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn positions_commit_to_whole_pixels() {
        let mut p = player();
        p.vel = Vec2::new(2.5, 0.0);
        p.advance(TPS);
        assert_eq!(p.pos, Vec2::new(102.0, 100.0));

        // The dropped fraction does not bank up across ticks.
        p.vel = Vec2::new(2.5, 0.0);
        p.advance(TPS);
        assert_eq!(p.pos, Vec2::new(104.0, 100.0));
    }

    #[test]
    fn land_restores_jumps_and_zeroes_fall() {
        let mut p = player();
        p.jump();
        p.jump();
        for _ in 0..10 {
            p.advance(TPS);
        }

        p.land();
        assert_eq!(p.jump_count, 0);
        assert_eq!(p.vel.y, 0.0);
        assert_eq!(p.fall_ticks, 0);

        // Redundant landing changes nothing.
        p.land();
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn bump_head_reflects_vertical_velocity() {
        let mut p = player();
        p.jump();
        let rising = p.vel.y;
        p.bump_head();
        assert_eq!(p.vel.y, -rising);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn hit_clears_after_two_seconds() {
        let mut p = player();
        p.register_hit();
        assert!(p.is_hit());

        for _ in 0..(TPS * 2) {
            p.advance(TPS);
        }
        assert!(p.is_hit());

        // One more tick pushes the timer past the threshold.
        p.advance(TPS);
        assert!(!p.is_hit());
        assert_eq!(p.hit_ticks, 0);
    }

    #[test]
    fn repeated_hits_restart_the_timer() {
        let mut p = player();
        p.register_hit();
        for _ in 0..TPS {
            p.advance(TPS);
        }
        p.register_hit();
        assert_eq!(p.hit_ticks, 0);

        for _ in 0..(TPS * 2) {
            p.advance(TPS);
        }
        assert!(p.is_hit());
    }

    #[test]
    fn state_priority_hit_beats_everything() {
        let mut p = player();
        p.jump();
        p.register_hit();
        assert_eq!(p.state(), PlayerState::Hit);
    }

    #[test]
    fn state_tracks_jump_count_while_rising() {
        let mut p = player();
        p.jump();
        assert_eq!(p.state(), PlayerState::Jump);
        p.jump();
        assert_eq!(p.state(), PlayerState::DoubleJump);
    }

    #[test]
    fn fall_state_needs_real_downward_speed() {
        let mut p = player();
        p.vel.y = 1.5;
        p.vel.x = 5.0;
        assert_eq!(p.state(), PlayerState::Run);

        p.vel.y = 2.5;
        assert_eq!(p.state(), PlayerState::Fall);

        p.vel = Vec2::ZERO;
        assert_eq!(p.state(), PlayerState::Idle);
    }

    #[test]
    fn direction_change_restarts_the_animation() {
        let mut p = player();
        p.move_right(5.0);
        for _ in 0..7 {
            p.advance(TPS);
        }
        let mid_cycle = p.cycle.frame_index(4);
        assert_ne!(mid_cycle, 0);

        p.move_left(5.0);
        assert_eq!(p.facing, Facing::Left);
        assert_eq!(p.cycle.frame_index(4), 0);

        // Holding the same direction does not reset.
        for _ in 0..4 {
            p.advance(TPS);
        }
        let idx = p.cycle.frame_index(4);
        p.move_left(5.0);
        assert_eq!(p.cycle.frame_index(4), idx);
    }

    #[test]
    fn sprite_set_follows_state_and_facing() {
        let mut p = player();
        p.move_left(5.0);
        p.advance(TPS);
        assert_eq!(p.state(), PlayerState::Run);
        assert_eq!(p.frame().sheet, SheetId(1));
    }
}
