use std::collections::HashMap;

use glam::Vec2;
use log::{info, warn};

use crate::api::config::SimConfig;
use crate::assets::manifest::{LayoutEntry, LevelLayout, SheetDescriptor, SpriteManifest};
use crate::components::mask::PixelMask;
use crate::components::obstacle::Obstacle;
use crate::components::player::Player;
use crate::components::sprite::{AnimationSet, FrameSet, SheetId, SpriteFrame};
use crate::core::level::Level;

/// Errors raised while assembling sprites and courses from raw assets.
#[derive(Debug)]
pub enum AssetError {
    /// Manifest or layout JSON failed to parse.
    Parse(String),
    /// A sheet named in the manifest was never supplied.
    MissingImage(String),
    /// Supplied pixel data does not match its declared dimensions.
    BadDimensions {
        path: String,
        expected: usize,
        actual: usize,
    },
    /// A sheet is too small to cut even one cell.
    EmptySheet(String),
    /// A character/state pair the course needs is not in the library.
    MissingSprite { character: String, state: String },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AssetError::MissingImage(path) => write!(f, "No pixels supplied for sheet '{}'", path),
            AssetError::BadDimensions {
                path,
                expected,
                actual,
            } => write!(
                f,
                "Sheet '{}' should hold {} bytes of RGBA, got {}",
                path, expected, actual
            ),
            AssetError::EmptySheet(path) => {
                write!(f, "Sheet '{}' is smaller than one cell", path)
            }
            AssetError::MissingSprite { character, state } => {
                write!(f, "No sprite set for {} / {}", character, state)
            }
        }
    }
}

impl std::error::Error for AssetError {}

impl From<serde_json::Error> for AssetError {
    fn from(e: serde_json::Error) -> Self {
        AssetError::Parse(e.to_string())
    }
}

/// Decoded RGBA pixels for one image, keyed by its manifest path.
/// The frontend decodes the PNGs; the core only sees raw bytes.
#[derive(Debug, Clone)]
pub struct SheetPixels {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Sprite sets built from a manifest, ready for course assembly.
///
/// Sheet ids follow manifest order, with the background taking the id
/// after the last sheet; the frontend uploads textures in the same
/// order, so an id resolves to the same image on both sides.
pub struct SpriteLibrary {
    characters: HashMap<String, AnimationSet>,
    background: SheetId,
    background_tile: Vec2,
}

impl SpriteLibrary {
    /// Cut every manifest sheet into frames and build their masks.
    pub fn build(manifest: &SpriteManifest, images: &[SheetPixels]) -> Result<Self, AssetError> {
        let by_path: HashMap<&str, &SheetPixels> =
            images.iter().map(|p| (p.path.as_str(), p)).collect();

        let mut characters: HashMap<String, AnimationSet> = HashMap::new();
        for (index, sheet) in manifest.sheets.iter().enumerate() {
            let pixels = by_path
                .get(sheet.path.as_str())
                .copied()
                .ok_or_else(|| AssetError::MissingImage(sheet.path.clone()))?;
            let frames = cut_strip(pixels, sheet, SheetId(index as u32), manifest.scale)?;

            let set = characters.entry(sheet.character.clone()).or_default();
            if sheet.directional {
                let left = frames.iter().map(SpriteFrame::mirrored).collect();
                set.insert(format!("{}_right", sheet.state), frames);
                set.insert(format!("{}_left", sheet.state), left);
            } else {
                set.insert(sheet.state.clone(), frames);
            }
        }

        info!(
            "sprite library built: {} sheets, {} characters",
            manifest.sheets.len(),
            characters.len()
        );
        Ok(Self {
            characters,
            background: SheetId(manifest.sheets.len() as u32),
            background_tile: Vec2::new(
                manifest.background.tile_width as f32,
                manifest.background.tile_height as f32,
            ),
        })
    }

    /// All animation states for one character.
    pub fn animation_set(&self, character: &str) -> Option<&AnimationSet> {
        self.characters.get(character)
    }

    /// One state's frames, as course assembly needs them.
    pub fn frames(&self, character: &str, state: &str) -> Result<&FrameSet, AssetError> {
        self.characters
            .get(character)
            .and_then(|set| set.get(state))
            .ok_or_else(|| AssetError::MissingSprite {
                character: character.to_string(),
                state: state.to_string(),
            })
    }

    pub fn background_sheet(&self) -> SheetId {
        self.background
    }

    pub fn background_tile(&self) -> Vec2 {
        self.background_tile
    }
}

/// Cut a horizontal strip into cells, building a scaled mask per cell.
/// The cell count is however many whole cells fit across the image.
fn cut_strip(
    pixels: &SheetPixels,
    sheet: &SheetDescriptor,
    id: SheetId,
    scale: u32,
) -> Result<FrameSet, AssetError> {
    let expected = (pixels.width as usize) * (pixels.height as usize) * 4;
    if pixels.rgba.len() != expected {
        return Err(AssetError::BadDimensions {
            path: sheet.path.clone(),
            expected,
            actual: pixels.rgba.len(),
        });
    }
    if sheet.frame_width == 0
        || sheet.frame_height == 0
        || pixels.width < sheet.frame_width
        || pixels.height < sheet.frame_height
    {
        return Err(AssetError::EmptySheet(sheet.path.clone()));
    }

    let count = pixels.width / sheet.frame_width;
    if count * sheet.frame_width != pixels.width {
        warn!(
            "sheet '{}' leaves {} pixel columns uncut",
            sheet.path,
            pixels.width % sheet.frame_width
        );
    }
    Ok((0..count)
        .map(|i| {
            let mask = PixelMask::from_rgba_region(
                &pixels.rgba,
                pixels.width,
                i * sheet.frame_width,
                0,
                sheet.frame_width,
                sheet.frame_height,
                scale,
            );
            SpriteFrame::new(id, i, mask)
        })
        .collect())
}

/// Assemble a playable course: obstacles from the layout plus the
/// player at the configured spawn.
pub fn build_course(
    layout: &LevelLayout,
    library: &SpriteLibrary,
    config: &SimConfig,
) -> Result<(Level, Player), AssetError> {
    let block_frame = library
        .frames("terrain", "block")?
        .first()
        .cloned()
        .ok_or_else(|| AssetError::EmptySheet("terrain".to_string()))?;

    let mut level = Level::new();
    for entry in &layout.entries {
        match entry {
            LayoutEntry::Block { x, y } => {
                level.push(Obstacle::block(Vec2::new(*x, *y), block_frame.clone()));
            }
            LayoutEntry::Hazard { x, y, lit } => {
                let off = library.frames("fire", "off")?.clone();
                let on = library.frames("fire", "on")?.clone();
                let mut obstacle = Obstacle::hazard(
                    Vec2::new(*x, *y),
                    off,
                    on,
                    config.animation_delay,
                )
                .ok_or_else(|| AssetError::MissingSprite {
                    character: "fire".to_string(),
                    state: "off".to_string(),
                })?;
                if let Some(anim) = obstacle.hazard_mut() {
                    anim.set_lit(*lit);
                }
                level.push(obstacle);
            }
        }
    }

    let frames = library
        .animation_set("player")
        .cloned()
        .ok_or_else(|| AssetError::MissingSprite {
            character: "player".to_string(),
            state: "idle_right".to_string(),
        })?;
    let player = Player::new(config.spawn(), frames, config.gravity, config.animation_delay)
        .ok_or_else(|| AssetError::MissingSprite {
            character: "player".to_string(),
            state: "idle_right".to_string(),
        })?;

    info!("course built: {} obstacles", level.len());
    Ok((level, player))
}
