//! Side-view player control and spawning.

use bevy::prelude::*;

use super::components::*;
use crate::animation::{AnimKind, AnimationController, FrameCounts};
use crate::combat::{ActiveEffects, Allegiance, Health, Mobility};
use crate::core::{GameConfig, InputSnapshot};
use crate::inventory::{Hotbar, Inventory};
use crate::physics::{Actor, PhysicsBody, Side};
use crate::rendering::{DrawLayer, SpriteKey};

pub const PLAYER_FRAMES: FrameCounts = FrameCounts {
    idle: 4,
    run: 10,
    jump: 10,
    death: 1,
};

/// Spawn the player centred on `spawn_point`.
pub fn spawn_player(commands: &mut Commands, config: &GameConfig, spawn_point: Vec2) -> Entity {
    let settings = &config.player;
    let body = PhysicsBody::centered(spawn_point, Vec2::from(settings.size))
        .with_gravity(config.physics.gravity, config.physics.terminal_velocity);
    let inventory = Inventory::new(
        config.inventory.storage_slots,
        config.inventory.hotbar_slots,
    );

    let entity = commands
        .spawn((
            Player,
            Wallet::default(),
            SpawnPoint(spawn_point),
            body,
            Actor,
            Side::Right,
            Health::new(
                settings.max_hp,
                config.damage_interval(),
                config.heal_interval(),
            ),
            Mobility {
                walk_speed: settings.walk_speed,
            },
            ActiveEffects::default(),
            Allegiance::Player,
            AnimationController::new(PLAYER_FRAMES.sequence(AnimKind::Idle, Side::Right)),
            PLAYER_FRAMES,
            inventory,
            Hotbar::new(config.inventory.hotbar_slots),
        ))
        .insert(SpriteKey::new("player", DrawLayer::Midground))
        .id();

    info!("Spawned player at {:?}", spawn_point);
    entity
}

/// Walk, face and jump from the input snapshot.
pub fn player_control(
    input: Res<InputSnapshot>,
    config: Res<GameConfig>,
    mut players: Query<
        (
            &mut PhysicsBody,
            &mut Side,
            &Mobility,
            &mut AnimationController,
            &FrameCounts,
        ),
        With<Player>,
    >,
) {
    let Ok((mut body, mut side, mobility, mut animation, counts)) = players.get_single_mut()
    else {
        return;
    };

    let direction = input.horizontal();
    body.velocity.x = direction * mobility.walk_speed;
    *side = Side::from_sign(direction, *side);

    if input.jump && !body.is_jumping {
        body.velocity.y = config.player.jump_velocity;
        body.is_jumping = true;
    }

    let kind = if body.is_jumping {
        AnimKind::Jump
    } else if direction != 0.0 {
        AnimKind::Run
    } else {
        AnimKind::Idle
    };
    animation.play(counts, kind, *side);
}
