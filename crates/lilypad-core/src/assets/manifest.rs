use serde::{Deserialize, Serialize};

use crate::api::config::SimConfig;

/// Asset manifest describing all sprite sheets and the background tile
/// for a game. Loaded from a JSON file at runtime; the frontend decodes
/// the listed images and hands their pixels to the sprite library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteManifest {
    /// Sheet strips in upload order. A sheet's position in this list is
    /// its [`SheetId`](crate::components::sprite::SheetId); the
    /// background tile takes the next id after the last entry.
    pub sheets: Vec<SheetDescriptor>,
    /// The tile repeated behind the course.
    pub background: BackgroundDescriptor,
    /// Integer magnification applied to every cell and mask.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Simulation tuning. Missing fields fall back to the defaults.
    #[serde(default)]
    pub config: SimConfig,
}

/// Describes one horizontal strip of animation cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Which figure the strip belongs to ("player", "fire", "terrain").
    pub character: String,
    /// Animation state the strip holds ("idle", "run", "on", ...).
    pub state: String,
    /// Relative path to the PNG file.
    pub path: String,
    /// Source cell width; the cell count is the image width over this.
    pub frame_width: u32,
    /// Source cell height.
    pub frame_height: u32,
    /// Also emit a mirrored set, keyed "<state>_left"/"<state>_right".
    #[serde(default)]
    pub directional: bool,
}

/// Describes the background tile image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundDescriptor {
    /// Relative path to the PNG file.
    pub path: String,
    /// Tile width in world pixels. Backgrounds are not scaled.
    pub tile_width: u32,
    /// Tile height in world pixels.
    pub tile_height: u32,
}

fn default_scale() -> u32 {
    2
}

impl SpriteManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Placement list for one course. Sizes come from the sprite sheets,
/// so entries carry only positions and the hazard switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub entries: Vec<LayoutEntry>,
}

/// One placed piece of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutEntry {
    Block { x: f32, y: f32 },
    Hazard {
        x: f32,
        y: f32,
        #[serde(default = "default_lit")]
        lit: bool,
    },
}

fn default_lit() -> bool {
    true
}

/// World height of the shipped fire sprite. The default course places
/// traps flush on the floor, so it needs their height up front.
const FIRE_HEIGHT: f32 = 64.0;

impl LevelLayout {
    /// Parse a layout from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The shipped course: a floor running one viewport left and ten
    /// viewports right of the origin, a staircase of ledges, and two
    /// groups of burning traps along the floor.
    pub fn default_course(config: &SimConfig) -> Self {
        let block = config.block_size;
        let (w, h) = (config.viewport_width, config.viewport_height);
        let mut entries = Vec::new();

        let floor_y = h - block;
        let first_col = (-w / block).floor() as i32;
        let last_col = (w * 10.0 / block).floor() as i32;
        for col in first_col..last_col {
            entries.push(LayoutEntry::Block {
                x: col as f32 * block,
                y: floor_y,
            });
        }

        // Ledges as (column, blocks above the bottom edge).
        let steps = [
            (0, 2),
            (2, 4),
            (3, 4),
            (4, 6),
            (5, 6),
            (6, 5),
            (7, 4),
            (8, 3),
            (9, 3),
            (11, 4),
            (12, 4),
            (15, 6),
            (16, 6),
            (18, 5),
            (19, 4),
            (20, 3),
            (22, 2),
        ];
        for (col, rise) in steps {
            entries.push(LayoutEntry::Block {
                x: col as f32 * block,
                y: h - block * rise as f32,
            });
        }

        let trap_y = floor_y - FIRE_HEIGHT;
        for x in (2..=5).chain(13..=19) {
            entries.push(LayoutEntry::Hazard {
                x: x as f32 * 100.0,
                y: trap_y,
                lit: true,
            });
        }

        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "sheets": [
                {
                    "character": "player",
                    "state": "idle",
                    "path": "MainCharacters/NinjaFrog/idle.png",
                    "frame_width": 32,
                    "frame_height": 32,
                    "directional": true
                },
                {
                    "character": "fire",
                    "state": "on",
                    "path": "Traps/Fire/on.png",
                    "frame_width": 16,
                    "frame_height": 32
                }
            ],
            "background": { "path": "Background/Purple.png", "tile_width": 64, "tile_height": 64 }
        }"#;
        let manifest = SpriteManifest::from_json(json).unwrap();

        assert_eq!(manifest.sheets.len(), 2);
        assert!(manifest.sheets[0].directional);
        assert!(!manifest.sheets[1].directional);
        assert_eq!(manifest.scale, 2);
        assert_eq!(manifest.config.tick_rate, 60);
        assert_eq!(manifest.background.tile_width, 64);
    }

    #[test]
    fn manifest_config_overrides_merge_with_defaults() {
        let json = r#"{
            "sheets": [],
            "background": { "path": "bg.png", "tile_width": 32, "tile_height": 32 },
            "scale": 1,
            "config": { "gravity": 2.0 }
        }"#;
        let manifest = SpriteManifest::from_json(json).unwrap();
        assert_eq!(manifest.scale, 1);
        assert_eq!(manifest.config.gravity, 2.0);
        assert_eq!(manifest.config.player_speed, 5.0);
    }

    #[test]
    fn parse_layout_entries() {
        let json = r#"{
            "entries": [
                { "kind": "block", "x": 0.0, "y": 704.0 },
                { "kind": "hazard", "x": 200.0, "y": 640.0 },
                { "kind": "hazard", "x": 300.0, "y": 640.0, "lit": false }
            ]
        }"#;
        let layout = LevelLayout::from_json(json).unwrap();

        assert_eq!(layout.entries.len(), 3);
        assert!(matches!(
            layout.entries[1],
            LayoutEntry::Hazard { lit: true, .. }
        ));
        assert!(matches!(
            layout.entries[2],
            LayoutEntry::Hazard { lit: false, .. }
        ));
    }

    #[test]
    fn default_course_matches_the_shipped_game() {
        let layout = LevelLayout::default_course(&SimConfig::default());

        let blocks = layout
            .entries
            .iter()
            .filter(|e| matches!(e, LayoutEntry::Block { .. }))
            .count();
        let hazards: Vec<_> = layout
            .entries
            .iter()
            .filter_map(|e| match e {
                LayoutEntry::Hazard { x, y, lit } => Some((*x, *y, *lit)),
                _ => None,
            })
            .collect();

        // 115 floor columns plus 17 ledges.
        assert_eq!(blocks, 132);
        assert_eq!(hazards.len(), 11);
        assert!(hazards.iter().all(|&(_, y, lit)| y == 640.0 && lit));
        assert_eq!(hazards[0].0, 200.0);
        assert_eq!(hazards[10].0, 1900.0);

        // The floor spans one viewport left of the origin.
        let leftmost = layout
            .entries
            .iter()
            .filter_map(|e| match e {
                LayoutEntry::Block { x, .. } => Some(*x),
                _ => None,
            })
            .fold(f32::INFINITY, f32::min);
        assert_eq!(leftmost, -1056.0);
    }
}
