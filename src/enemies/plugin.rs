//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::core::SimSet;

/// Enemy plugin - handles enemy data, patrol and boss AI.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            // Definitions must be in place before the map spawns anything
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(
                Update,
                (ai::enemy_intent, ai::boss_behavior).in_set(SimSet::Intent),
            )
            .add_systems(Update, ai::announce_boss_defeat.in_set(SimSet::Cleanup));
    }
}
