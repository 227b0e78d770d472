//! Physics plugin - platform motion, integration and terrain collision.

use std::time::Duration;

use bevy::prelude::*;

use super::body::PhysicsBody;
use super::obstacles::{ObstacleKind, Obstacles};
use super::platforms::move_platforms;
use super::tiles::TileMap;
use crate::combat::Hit;
use crate::core::{DamageEvent, GameConfig, SimSet};

/// Bodies that collide like characters: side-gated correction, landing,
/// platform riding and spike contact.
#[derive(Component, Debug, Default)]
pub struct Actor;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileMap>()
            .add_systems(Update, move_platforms.in_set(SimSet::Intent))
            .add_systems(Update, actor_physics.in_set(SimSet::Physics));
    }
}

/// Integrate every actor and resolve it against the terrain.
pub fn actor_physics(
    config: Res<GameConfig>,
    obstacles: Obstacles,
    mut actors: Query<(Entity, &mut PhysicsBody), With<Actor>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let gate = config.physics.sign_gate;
    let spike_hit = Hit::new(config.combat.spike_damage)
        .with_interval(Duration::from_millis(config.combat.spike_interval_ms))
        .with_knockback(Vec2::from(config.combat.spike_knockback));

    for (entity, mut body) in actors.iter_mut() {
        body.integrate();

        let mut on_spikes = false;
        for obstacle in obstacles.overlapping(&body.aabb()) {
            match obstacle.kind {
                ObstacleKind::Solid { carry } => {
                    let hits = body.resolve_against(&obstacle.rect, gate);
                    if hits.bottom {
                        body.is_jumping = false;
                        body.position += carry;
                    }
                }
                ObstacleKind::Spike => on_spikes = true,
            }
        }

        if on_spikes {
            damage_events.send(DamageEvent {
                target: entity,
                source: None,
                hit: spike_hit,
            });
        }
    }
}
