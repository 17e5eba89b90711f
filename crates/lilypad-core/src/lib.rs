pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::types::{Aabb, ObstacleId};
pub use components::animation::FrameCycle;
pub use components::mask::PixelMask;
pub use components::obstacle::{HazardAnim, Obstacle, ObstacleKind};
pub use components::player::{Player, PlayerState};
pub use components::sprite::{AnimationSet, Facing, FrameSet, SheetId, SpriteFrame};
pub use core::collision::{probe_horizontal, resolve_vertical, Contacts};
pub use core::level::Level;
pub use core::sim::Simulation;
pub use core::time::FixedTimestep;
pub use renderer::camera::ScrollCamera;
pub use renderer::frame::{BackgroundGrid, DrawInstance, FrameBuffer};
pub use input::queue::{InputEvent, InputQueue, InputState, Key, TickInput};
pub use assets::library::{build_course, AssetError, SheetPixels, SpriteLibrary};
pub use assets::manifest::{LevelLayout, SpriteManifest};
pub use bridge::protocol::FrameProtocol;
pub use systems::animation::advance_hazards;
pub use systems::render::build_frame;
