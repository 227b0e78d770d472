//! Falling out of the map, defeat and respawn.

use std::time::Duration;

use bevy::prelude::*;

use super::components::{Player, SpawnPoint};
use crate::combat::{ActiveEffects, Combatant, Health, Hit, Mobility};
use crate::core::{DamageEvent, GameConfig, GameState, InputSnapshot};
use crate::physics::{Obstacles, PhysicsBody};

/// Hurt the player every frame it spends below the bottom of the map.
pub fn fall_damage(
    config: Res<GameConfig>,
    obstacles: Obstacles,
    players: Query<(Entity, &PhysicsBody), With<Player>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let floor = obstacles.map_size().y;
    for (entity, body) in players.iter() {
        if floor > 0.0 && body.position.y > floor {
            damage_events.send(DamageEvent {
                target: entity,
                source: None,
                hit: Hit::new(config.player.fall_damage)
                    .with_interval(Duration::from_millis(config.player.fall_damage_interval_ms)),
            });
        }
    }
}

pub fn check_defeat(
    players: Query<&Health, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if players.iter().any(|health| !health.is_alive()) {
        info!("Player defeated");
        next_state.set(GameState::Defeat);
    }
}

/// Any key brings the player back at its spawn point with a fraction of its hp.
pub fn respawn_on_key(
    input: Res<InputSnapshot>,
    config: Res<GameConfig>,
    mut players: Query<
        (
            &SpawnPoint,
            &mut Health,
            &mut PhysicsBody,
            Option<&mut Mobility>,
            &mut ActiveEffects,
        ),
        With<Player>,
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.any_key_pressed {
        return;
    }
    let Ok((spawn, mut health, mut body, mut mobility, mut effects)) = players.get_single_mut()
    else {
        return;
    };

    body.set_center(spawn.0);
    body.velocity = Vec2::ZERO;
    body.knockback = 0.0;
    let respawn_hp = (health.max_hp() / config.player.respawn_hp_divisor.max(1)).max(1);
    health.set_hp(respawn_hp);
    let mut target = Combatant::new(&mut health, &mut body, mobility.as_deref_mut());
    effects.clear(&mut target);

    info!("Player respawned at {:?} with {} hp", spawn.0, respawn_hp);
    next_state.set(GameState::InGame);
}
