//! UI module - HUD, inventory panel and defeat banner.

mod hud;
mod plugin;

pub use hud::{slot_caption, HealthBar, HudRoot, WalletText};
pub use plugin::UiPlugin;
