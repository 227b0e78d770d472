//! Player plugin - control, falling, defeat and respawn.

use bevy::prelude::*;

use super::movement::player_control;
use super::respawn::{check_defeat, fall_damage, respawn_on_key};
use crate::core::{GameState, SimSet};

/// Player plugin - handles the player-controlled character.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, player_control.in_set(SimSet::Intent))
            .add_systems(Update, fall_damage.in_set(SimSet::Combat))
            .add_systems(Update, check_defeat.in_set(SimSet::Cleanup))
            .add_systems(
                Update,
                respawn_on_key
                    .after(SimSet::Input)
                    .before(SimSet::Intent)
                    .run_if(in_state(GameState::Defeat)),
            );
    }
}
