use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;

use crate::components::mask::PixelMask;

/// Identifies which sprite sheet a frame belongs to.
/// Index into the manifest's sheet list; the frontend resolves ids to
/// decoded images on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SheetId(pub u32);

/// Which way a sprite is drawn and collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn suffix(self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// One drawable cell of a sheet strip plus its collision mask.
///
/// `size` is in world pixels (source cell size times the manifest
/// scale) and always matches the mask's dimensions.
#[derive(Debug, Clone)]
pub struct SpriteFrame {
    pub sheet: SheetId,
    /// Cell index within the sheet's horizontal strip.
    pub index: u32,
    /// Draw mirrored left-to-right.
    pub flipped: bool,
    pub size: Vec2,
    pub mask: Arc<PixelMask>,
}

impl SpriteFrame {
    pub fn new(sheet: SheetId, index: u32, mask: PixelMask) -> Self {
        let size = Vec2::new(mask.width() as f32, mask.height() as f32);
        Self {
            sheet,
            index,
            flipped: false,
            size,
            mask: Arc::new(mask),
        }
    }

    /// The left-facing variant: same cell, drawn and collided mirrored.
    pub fn mirrored(&self) -> Self {
        Self {
            sheet: self.sheet,
            index: self.index,
            flipped: !self.flipped,
            size: self.size,
            mask: Arc::new(self.mask.flipped_horizontal()),
        }
    }
}

/// Frames of one animation state, in strip order.
pub type FrameSet = Vec<SpriteFrame>;

/// Animation states by name ("idle_right", "on", ...).
pub type AnimationSet = HashMap<String, FrameSet>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_tracks_mask() {
        let frame = SpriteFrame::new(SheetId(2), 3, PixelMask::filled(8, 16));
        assert_eq!(frame.size, Vec2::new(8.0, 16.0));
        assert!(!frame.flipped);
    }

    #[test]
    fn mirrored_flips_mask_and_flag() {
        let mut mask = PixelMask::empty(4, 1);
        mask.set(0, 0);
        let frame = SpriteFrame::new(SheetId(0), 0, mask);

        let left = frame.mirrored();
        assert!(left.flipped);
        assert_eq!(left.sheet, frame.sheet);
        assert_eq!(left.index, frame.index);
        assert!(left.mask.get(3, 0));
        assert!(!left.mask.get(0, 0));
    }
}
