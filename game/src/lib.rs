pub mod assets;
pub mod avatar;
pub mod geometry;
pub mod headful;
pub mod high_score;
pub mod hud;
pub mod obstacle;
pub mod obstacle_stream;
pub mod phase;
pub mod session;
pub mod settings;
pub mod sfx;
