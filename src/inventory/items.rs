//! Stacks lying in the world.

use std::time::Duration;

use bevy::prelude::*;

use super::stack::ItemStack;
use crate::core::Cooldown;
use crate::physics::{Obstacles, PhysicsBody};
use crate::rendering::{DrawLayer, SpriteKey};
use crate::world::LevelEntity;

pub const ITEM_SIZE: Vec2 = Vec2::new(42.0, 42.0);
const ITEM_GRAVITY: f32 = 1.0;
const ITEM_TERMINAL: f32 = 20.0;

/// A dropped stack waiting to be picked up.
#[derive(Component, Debug, Clone)]
pub struct WorldItem {
    pub stack: ItemStack,
    pickup: Cooldown,
}

impl WorldItem {
    pub fn new(stack: ItemStack, now: Duration, delay: Duration) -> Self {
        Self {
            stack,
            pickup: Cooldown::started(now, delay),
        }
    }

    /// Freshly dropped items cannot be collected straight away.
    pub fn can_pick_up(&self, now: Duration) -> bool {
        self.pickup.is_ready(now)
    }
}

pub fn spawn_world_item(
    commands: &mut Commands,
    stack: ItemStack,
    center: Vec2,
    velocity: Vec2,
    now: Duration,
    delay: Duration,
) -> Entity {
    let key = format!("item/{}", stack.kind().name());
    commands
        .spawn((
            WorldItem::new(stack, now, delay),
            PhysicsBody::centered(center, ITEM_SIZE)
                .with_velocity(velocity)
                .with_gravity(ITEM_GRAVITY, ITEM_TERMINAL),
            SpriteKey::new(key, DrawLayer::Interactable),
            LevelEntity,
        ))
        .id()
}

/// Items stop dead against whatever they touch, then fall.
pub fn item_physics(obstacles: Obstacles, mut items: Query<&mut PhysicsBody, With<WorldItem>>) {
    for mut body in items.iter_mut() {
        for solid in obstacles.solids(&body.aabb()) {
            body.settle_against(&solid);
        }
        body.integrate();
    }
}
