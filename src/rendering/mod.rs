//! Rendering module - sprite catalog, draw layers and camera.

mod catalog;
mod plugin;
mod sprites;

pub use catalog::{SpriteCatalog, SpriteEntry};
pub use plugin::{clamp_view, MainCamera, RenderingPlugin};
pub use sprites::{to_screen, DrawLayer, SpriteKey};
