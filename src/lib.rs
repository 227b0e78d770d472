//! Ruins Platformer - a 2D side-scrolling action platformer in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, clock, RNG, config, input snapshot
//! - **Physics**: Bodies, tile terrain, moving platforms
//! - **Animation**: Frame sequencing
//! - **Combat**: Health, weapons, projectiles, status effects, death
//! - **Inventory**: Slots, stacks, world items, hotbar
//! - **Enemies**: Patrolling enemies and the boss
//! - **Player**: Control, defeat and respawn
//! - **World**: Maps, level building, interactables
//! - **Rendering**: Sprites and camera
//! - **Audio**: Sound cues
//! - **UI**: HUD, inventory panel, defeat banner
//!
//! Everything up to and including the world is simulation and runs without a
//! window; see [`create_headless_app`].

pub mod animation;
pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod inventory;
pub mod physics;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::core::{gather_input, GameConfig, SimSet};
use crate::world::{CurrentMap, MapDefinition};

/// Length of one simulated frame in headless runs.
pub const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// The simulation without any device input or presentation.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins((
                physics::PhysicsPlugin,
                animation::AnimationPlugin,
                combat::CombatPlugin,
                inventory::InventoryPlugin,
                enemies::EnemyPlugin,
                player::PlayerPlugin,
                world::WorldPlugin,
            ));
    }
}

/// Main game plugin: the simulation plus input, sprites, HUD and sound.
pub struct PlatformerPlugin;

impl Plugin for PlatformerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SimulationPlugin)
            .add_systems(Update, gather_input.in_set(SimSet::Input))
            .add_plugins((
                rendering::RenderingPlugin,
                ui::UiPlugin,
                audio::GameAudioPlugin,
            ));
    }
}

/// Minimal app running the simulation on `map` with a fixed 60 Hz step.
///
/// Input is driven by writing [`core::InputSnapshot`] directly.
pub fn create_headless_app(config: GameConfig, map: MapDefinition) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(config)
        .insert_resource(CurrentMap(map))
        .add_plugins(SimulationPlugin);
    app
}
