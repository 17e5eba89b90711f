pub mod collision;
pub mod level;
pub mod sim;
pub mod time;
