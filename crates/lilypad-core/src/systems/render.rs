use crate::components::player::Player;
use crate::core::level::Level;
use crate::renderer::camera::ScrollCamera;
use crate::renderer::frame::{BackgroundGrid, DrawInstance, FrameBuffer};

/// Build the frame the frontend presents: background tiles, then the
/// course with the scroll offset applied, then the player on top.
/// Everything is rebuilt from scratch each frame.
pub fn build_frame(
    level: &Level,
    player: &Player,
    camera: &ScrollCamera,
    background: &BackgroundGrid,
    buffer: &mut FrameBuffer,
) {
    buffer.clear();

    for tile in &background.positions {
        buffer.push(DrawInstance {
            x: tile.x,
            y: tile.y,
            width: background.tile_size.x,
            height: background.tile_size.y,
            sheet: background.sheet.0 as f32,
            frame: 0.0,
            flip: 0.0,
            layer: DrawInstance::LAYER_BACKGROUND,
        });
    }

    for (_, obstacle) in level.iter() {
        let sprite = &obstacle.frame;
        buffer.push(DrawInstance {
            x: camera.apply_x(obstacle.pos.x),
            y: obstacle.pos.y,
            width: sprite.size.x,
            height: sprite.size.y,
            sheet: sprite.sheet.0 as f32,
            frame: sprite.index as f32,
            flip: sprite.flipped as u32 as f32,
            layer: DrawInstance::LAYER_OBSTACLE,
        });
    }

    let sprite = player.frame();
    buffer.push(DrawInstance {
        x: camera.apply_x(player.pos.x),
        y: player.pos.y,
        width: sprite.size.x,
        height: sprite.size.y,
        sheet: sprite.sheet.0 as f32,
        frame: sprite.index as f32,
        flip: sprite.flipped as u32 as f32,
        layer: DrawInstance::LAYER_PLAYER,
    });
}
