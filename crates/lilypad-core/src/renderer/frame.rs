use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::components::sprite::SheetId;

/// Per-instance draw data written to SharedArrayBuffer for the
/// TypeScript renderer. Must match the TS protocol: 8 floats = 32
/// bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DrawInstance {
    /// X position in screen space (scroll already applied).
    pub x: f32,
    /// Y position in screen space.
    pub y: f32,
    /// Rendered width in world pixels.
    pub width: f32,
    /// Rendered height in world pixels.
    pub height: f32,
    /// Sheet id, following the manifest's load order.
    pub sheet: f32,
    /// Cell index within the sheet's horizontal strip.
    pub frame: f32,
    /// 1.0 when the sprite draws mirrored left-to-right.
    pub flip: f32,
    /// Draw order: background, then obstacles, then the player.
    pub layer: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const LAYER_BACKGROUND: f32 = 0.0;
    pub const LAYER_OBSTACLE: f32 = 1.0;
    pub const LAYER_PLAYER: f32 = 2.0;
}

/// All draw instances for one presented frame.
pub struct FrameBuffer {
    pub instances: Vec<DrawInstance>,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::with_capacity(512)
    }
}

/// Static tiling that papers the viewport with the background image.
///
/// Tile positions never scroll; the course slides over them. The grid
/// runs one tile past what fits so uneven divisions still cover the
/// right and bottom edges.
#[derive(Debug, Clone)]
pub struct BackgroundGrid {
    pub sheet: SheetId,
    pub tile_size: Vec2,
    pub positions: Vec<Vec2>,
}

impl BackgroundGrid {
    pub fn cover(viewport: Vec2, tile_size: Vec2, sheet: SheetId) -> Self {
        let cols = (viewport.x / tile_size.x).floor() as i32 + 1;
        let rows = (viewport.y / tile_size.y).floor() as i32 + 1;
        let mut positions = Vec::with_capacity((cols.max(0) * rows.max(0)) as usize);
        for col in 0..cols {
            for row in 0..rows {
                positions.push(Vec2::new(
                    col as f32 * tile_size.x,
                    row as f32 * tile_size.y,
                ));
            }
        }
        Self {
            sheet,
            tile_size,
            positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), 32);
        assert_eq!(DrawInstance::FLOATS, 8);
    }

    #[test]
    fn frame_buffer_push_and_count() {
        let mut buf = FrameBuffer::with_capacity(8);
        buf.push(DrawInstance::default());
        buf.push(DrawInstance::default());
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }

    #[test]
    fn background_covers_the_viewport_with_spill() {
        let grid = BackgroundGrid::cover(
            Vec2::new(1000.0, 800.0),
            Vec2::new(64.0, 64.0),
            SheetId(3),
        );
        // 16 columns x 13 rows: one extra on each axis.
        assert_eq!(grid.positions.len(), 16 * 13);
        assert_eq!(grid.positions[0], Vec2::ZERO);
        let last = grid.positions.last().unwrap();
        assert_eq!(*last, Vec2::new(15.0 * 64.0, 12.0 * 64.0));
        assert!(last.x + 64.0 >= 1000.0);
        assert!(last.y + 64.0 >= 800.0);
    }

    #[test]
    fn exact_division_still_spills_one_tile() {
        let grid = BackgroundGrid::cover(
            Vec2::new(128.0, 128.0),
            Vec2::new(64.0, 64.0),
            SheetId(0),
        );
        assert_eq!(grid.positions.len(), 3 * 3);
    }
}
