//! Host side of the tether text overlay: font loading, configuration,
//! logging, and the editor context that drives `tether_core`.

pub mod config;
pub mod context;
pub mod dump;
pub mod font;
pub mod logging;

pub use config::Config;
pub use context::{EditorContext, spawn_atlas_build};
pub use font::SwashRasterizer;
