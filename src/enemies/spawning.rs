//! Enemy spawning from map placements.

use std::time::Duration;

use bevy::prelude::*;

use super::components::{Boss, Enemy, EnemyType, Patrol, WeaponClass};
use super::data::EnemyRegistry;
use crate::animation::{AnimKind, AnimationController};
use crate::combat::{
    ActiveEffects, Allegiance, Bow, Health, Loot, Mobility, Sword, Usable, WeaponIntent, Wielded,
};
use crate::core::{GameConfig, SimRng};
use crate::physics::{Actor, PhysicsBody, Side};
use crate::rendering::{DrawLayer, SpriteKey};
use crate::world::LevelEntity;

/// Knockback of swords carried by enemies.
const ENEMY_SWORD_KNOCKBACK: Vec2 = Vec2::new(2.0, -10.0);

/// Where and how a patrolling enemy is placed.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub kind: String,
    pub bottom_left: Vec2,
    /// x coordinate the patrol walks to before turning around
    pub patrol_to: f32,
    pub weapon: WeaponClass,
    pub damage: i32,
    pub hp: Option<i32>,
}

fn actor_body(config: &GameConfig, bottom_left: Vec2, size: Vec2) -> PhysicsBody {
    let mut body = PhysicsBody::new(Vec2::ZERO, size)
        .with_gravity(config.physics.gravity, config.physics.terminal_velocity);
    body.set_bottom_left(bottom_left);
    body
}

pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    config: &GameConfig,
    rng: &mut SimRng,
    spawn: &EnemySpawn,
) -> Option<Entity> {
    let Some(definition) = registry.get(&spawn.kind) else {
        warn!("Unknown enemy type: {}", spawn.kind);
        return None;
    };

    let (patrol, side) = Patrol::new(spawn.bottom_left.x, spawn.patrol_to);
    let weapon = match spawn.weapon {
        WeaponClass::Sword => Usable::Sword(Sword::new(spawn.damage, ENEMY_SWORD_KNOCKBACK)),
        WeaponClass::Bow => Usable::Bow(Bow::default()),
    };
    let mut health = Health::new(
        definition.max_hp,
        config.damage_interval(),
        config.heal_interval(),
    );
    if let Some(hp) = spawn.hp {
        health.set_hp(hp);
    }

    let entity = commands
        .spawn((
            Enemy,
            EnemyType(spawn.kind.clone()),
            actor_body(config, spawn.bottom_left, definition.size()),
            Actor,
            side,
            patrol,
            health,
            Mobility {
                walk_speed: definition.walk_speed,
            },
            ActiveEffects::default(),
            Allegiance::Hostile,
            Wielded(weapon),
            WeaponIntent::default(),
            AnimationController::new(definition.frames.sequence(AnimKind::Run, side)),
            definition.frames,
        ))
        .insert((
            Loot(definition.roll_loot(rng)),
            SpriteKey::new(definition.sprite.clone(), DrawLayer::Midground),
            LevelEntity,
        ))
        .id();
    Some(entity)
}

pub fn spawn_boss(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    config: &GameConfig,
    rng: &mut SimRng,
    kind: &str,
    bottom_left: Vec2,
    now: Duration,
) -> Option<Entity> {
    let Some(definition) = registry.get(kind) else {
        warn!("Unknown boss type: {}", kind);
        return None;
    };
    let body = actor_body(config, bottom_left, definition.size());
    let side = Side::Left;

    let entity = commands
        .spawn((
            Enemy,
            EnemyType(kind.to_string()),
            Boss::new(body.center(), now),
            body,
            Actor,
            side,
            Health::new(
                definition.max_hp,
                config.damage_interval(),
                config.heal_interval(),
            ),
            Mobility {
                walk_speed: definition.walk_speed,
            },
            ActiveEffects::default(),
            Allegiance::Hostile,
            AnimationController::new(definition.frames.sequence(AnimKind::Idle, side)),
            definition.frames,
            Loot(definition.roll_loot(rng)),
        ))
        .insert((
            SpriteKey::new(definition.sprite.clone(), DrawLayer::Midground),
            LevelEntity,
        ))
        .id();
    Some(entity)
}
