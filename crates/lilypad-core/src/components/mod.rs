pub mod animation;
pub mod mask;
pub mod obstacle;
pub mod player;
pub mod sprite;
