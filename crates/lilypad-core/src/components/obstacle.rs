use glam::Vec2;

use crate::api::types::Aabb;
use crate::components::animation::FrameCycle;
use crate::components::sprite::{FrameSet, SpriteFrame};

/// What an obstacle is, plus any state that comes with it.
#[derive(Debug, Clone)]
pub enum ObstacleKind {
    /// Solid terrain. Collides, never animates.
    Block,
    /// Animated trap. Cycles frames every tick and damages the player
    /// while lit.
    Hazard(HazardAnim),
}

/// On/off animation state for a hazard.
///
/// Both sprite sets share one tick counter, so toggling the lit state
/// swaps the imagery without restarting the cycle.
#[derive(Debug, Clone)]
pub struct HazardAnim {
    lit: bool,
    cycle: FrameCycle,
    off_frames: FrameSet,
    on_frames: FrameSet,
}

impl HazardAnim {
    pub fn new(off_frames: FrameSet, on_frames: FrameSet, delay: u32) -> Self {
        Self {
            lit: false,
            cycle: FrameCycle::new(delay),
            off_frames,
            on_frames,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
    }

    fn frames(&self) -> &FrameSet {
        if self.lit {
            &self.on_frames
        } else {
            &self.off_frames
        }
    }

    /// Frame to show before any ticking has happened.
    pub fn initial_frame(&self) -> Option<SpriteFrame> {
        self.frames().first().cloned()
    }

    /// Select the current frame, then count the tick.
    pub fn advance(&mut self) -> Option<SpriteFrame> {
        let frames = self.frames();
        if frames.is_empty() {
            return None;
        }
        let frame = frames[self.cycle.frame_index(frames.len())].clone();
        self.cycle.advance();
        Some(frame)
    }
}

/// A fixed piece of the course: position, current drawable, tag.
///
/// Obstacles never move after setup. Hazards swap frames in place;
/// everything else is immutable for the whole run.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub frame: SpriteFrame,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn block(pos: Vec2, frame: SpriteFrame) -> Self {
        Self {
            pos,
            frame,
            kind: ObstacleKind::Block,
        }
    }

    /// A hazard starts unlit; the level setup decides which ones burn.
    /// Returns None when the off set has no frames to show.
    pub fn hazard(pos: Vec2, off_frames: FrameSet, on_frames: FrameSet, delay: u32) -> Option<Self> {
        let anim = HazardAnim::new(off_frames, on_frames, delay);
        let frame = anim.initial_frame()?;
        Some(Self {
            pos,
            frame,
            kind: ObstacleKind::Hazard(anim),
        })
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.frame.size)
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self.kind, ObstacleKind::Hazard(_))
    }

    /// Hazard contact only hurts while the trap is lit.
    pub fn is_lit_hazard(&self) -> bool {
        match &self.kind {
            ObstacleKind::Hazard(anim) => anim.is_lit(),
            ObstacleKind::Block => false,
        }
    }

    pub fn hazard_mut(&mut self) -> Option<&mut HazardAnim> {
        match &mut self.kind {
            ObstacleKind::Hazard(anim) => Some(anim),
            ObstacleKind::Block => None,
        }
    }

    /// One tick of animation. Blocks are untouched.
    pub fn advance_animation(&mut self) {
        if let ObstacleKind::Hazard(anim) = &mut self.kind {
            if let Some(frame) = anim.advance() {
                self.frame = frame;
            }
        }
    }
}
