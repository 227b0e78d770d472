//! Enemies module - enemy entities, AI, and spawning.

mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry, LootEntry};
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_boss, spawn_enemy, EnemySpawn};
