//! Player module - player entity, control, defeat and respawn.

mod components;
mod movement;
mod plugin;
mod respawn;

pub use components::*;
pub use movement::{player_control, spawn_player, PLAYER_FRAMES};
pub use plugin::PlayerPlugin;
pub use respawn::{check_defeat, fall_damage, respawn_on_key};
