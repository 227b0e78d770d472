//! Combat plugin - weapons, projectiles, damage, effects and death.

use bevy::prelude::*;

use super::projectiles::{update_arrows, update_bullets, update_fireballs};
use super::systems::{apply_damage, begin_dying, finish_dying, tick_effects};
use super::wielding::{enemy_weapons, player_weapon};
use crate::core::SimSet;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(
                Update,
                (
                    player_weapon,
                    enemy_weapons,
                    update_arrows,
                    update_fireballs,
                    update_bullets,
                )
                    .chain()
                    .in_set(SimSet::Combat),
            )
            .add_systems(
                Update,
                (apply_damage, begin_dying, finish_dying)
                    .chain()
                    .in_set(SimSet::Damage),
            )
            .add_systems(Update, tick_effects.in_set(SimSet::Effects));
    }
}
