//! Things the player touches: checkpoints, coins, chests, dispensers and effect plates.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;

use super::spawning::LevelEntity;
use crate::animation::{AnimKind, AnimationController, Sequence};
use crate::combat::{spawn_fireball, Allegiance, EffectTemplate, Projectile};
use crate::core::{ApplyEffectEvent, Cooldown, GameConfig, SimClock, SimRng};
use crate::inventory::{spawn_world_item, ItemStack};
use crate::physics::{Aabb, Heading, PhysicsBody, Side, SolidBlock};
use crate::player::{Player, SpawnPoint, Wallet};
use crate::rendering::{DrawLayer, SpriteKey};

const COIN_FRAMES: usize = 5;
const COIN_RISE: Duration = Duration::from_millis(250);
const COIN_RISE_STEP: f32 = 4.0;
pub const CHEST_SIZE: Vec2 = Vec2::new(48.0, 48.0);
const CHEST_INTERVAL: Duration = Duration::from_millis(1000);
const CHEST_SCATTER_X: f32 = 5.0;
const CHEST_TOSS_Y: f32 = -10.0;
const DISPENSER_INTERVAL: Duration = Duration::from_millis(2000);
const DISPENSER_RANGE: Vec2 = Vec2::new(2000.0, 2000.0);
const PLATE_FRAMES: usize = 4;

/// Fixed box of a prop that has no physics body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Placed(pub Aabb);

#[derive(Component)]
pub struct Checkpoint;

#[derive(Component, Debug, Default)]
pub struct Coin {
    /// Running while the collected coin floats up
    collected: Option<Cooldown>,
}

/// Hands out its contents one stack at a time once opened.
#[derive(Component, Debug)]
pub struct Chest {
    contents: VecDeque<ItemStack>,
    opened: bool,
    timer: Cooldown,
}

impl Chest {
    pub fn new(contents: impl IntoIterator<Item = ItemStack>) -> Self {
        Self {
            contents: contents.into_iter().collect(),
            opened: false,
            timer: Cooldown::new(CHEST_INTERVAL),
        }
    }

    pub fn open(&mut self) {
        self.opened = true;
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn remaining(&self) -> usize {
        self.contents.len()
    }

    /// Next stack to throw out, at most one per interval.
    pub fn dispense(&mut self, now: Duration) -> Option<ItemStack> {
        if !self.opened || self.contents.is_empty() || !self.timer.check(now) {
            return None;
        }
        self.contents.pop_front()
    }
}

/// Solid block shooting fireballs while the player is near.
#[derive(Component, Debug)]
pub struct Dispenser {
    pub heading: Heading,
    timer: Cooldown,
}

#[derive(Component, Debug)]
pub struct EffectPlate {
    pub effect: EffectTemplate,
    cooldown: Cooldown,
}

pub fn spawn_checkpoint(commands: &mut Commands, rect: Aabb) -> Entity {
    commands
        .spawn((
            Checkpoint,
            Placed(rect),
            SpriteKey::new("checkpoint", DrawLayer::Interactable),
            LevelEntity,
        ))
        .id()
}

pub fn spawn_coin(commands: &mut Commands, rect: Aabb) -> Entity {
    commands
        .spawn((
            Coin::default(),
            Placed(rect),
            AnimationController::new(Sequence::looping(AnimKind::Spin, Side::Right, COIN_FRAMES)),
            SpriteKey::new("coin", DrawLayer::Interactable),
            LevelEntity,
        ))
        .id()
}

pub fn spawn_chest(commands: &mut Commands, top_left: Vec2, contents: Vec<ItemStack>) -> Entity {
    commands
        .spawn((
            Chest::new(contents),
            Placed(Aabb::new(top_left, CHEST_SIZE)),
            SpriteKey::new("chest", DrawLayer::Interactable),
            LevelEntity,
        ))
        .id()
}

pub fn spawn_dispenser(commands: &mut Commands, rect: Aabb, heading: Heading) -> Entity {
    commands
        .spawn((
            Dispenser {
                heading,
                timer: Cooldown::new(DISPENSER_INTERVAL),
            },
            SolidBlock::fixed(rect),
            SpriteKey::new("dispenser", DrawLayer::Midground),
            LevelEntity,
        ))
        .id()
}

pub fn spawn_effect_plate(
    commands: &mut Commands,
    rect: Aabb,
    effect: EffectTemplate,
    cooldown: Duration,
) -> Entity {
    commands
        .spawn((
            EffectPlate {
                effect,
                cooldown: Cooldown::new(cooldown),
            },
            Placed(rect),
            AnimationController::new(Sequence::looping(AnimKind::Spin, Side::Right, PLATE_FRAMES)),
            SpriteKey::new("effect_plate", DrawLayer::Interactable),
            LevelEntity,
        ))
        .id()
}

pub fn touch_checkpoints(
    mut commands: Commands,
    mut players: Query<(&PhysicsBody, &mut SpawnPoint), With<Player>>,
    checkpoints: Query<(Entity, &Placed), With<Checkpoint>>,
) {
    let Ok((body, mut spawn)) = players.get_single_mut() else {
        return;
    };
    let player = body.aabb();
    for (entity, placed) in checkpoints.iter() {
        if placed.0.overlaps(&player) {
            spawn.0 = placed.0.center();
            info!("Checkpoint reached at {:?}", spawn.0);
            commands.entity(entity).despawn();
        }
    }
}

pub fn collect_coins(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut players: Query<(&PhysicsBody, &mut Wallet), With<Player>>,
    mut coins: Query<(Entity, &mut Coin, &mut Placed)>,
) {
    let Ok((body, mut wallet)) = players.get_single_mut() else {
        return;
    };
    let player = body.aabb();
    for (entity, mut coin, mut placed) in coins.iter_mut() {
        match coin.collected.as_ref() {
            None => {
                if placed.0.overlaps(&player) {
                    coin.collected = Some(Cooldown::started(clock.now, COIN_RISE));
                }
            }
            Some(rise) => {
                if rise.is_ready(clock.now) {
                    wallet.0 += 1;
                    commands.entity(entity).despawn();
                } else {
                    placed.0 = placed.0.translated(Vec2::new(0.0, -COIN_RISE_STEP));
                }
            }
        }
    }
}

pub fn open_chests(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    mut rng: ResMut<SimRng>,
    players: Query<&PhysicsBody, With<Player>>,
    mut chests: Query<(&mut Chest, &Placed)>,
) {
    let player = players.get_single().ok().map(PhysicsBody::aabb);
    for (mut chest, placed) in chests.iter_mut() {
        if !chest.is_open() && player.is_some_and(|player| placed.0.overlaps(&player)) {
            chest.open();
        }
        if let Some(stack) = chest.dispense(clock.now) {
            let velocity = Vec2::new(rng.range_f32(-CHEST_SCATTER_X, CHEST_SCATTER_X), CHEST_TOSS_Y);
            spawn_world_item(
                &mut commands,
                stack,
                placed.0.center(),
                velocity,
                clock.now,
                config.pickup_delay(),
            );
        }
    }
}

pub fn fire_dispensers(
    mut commands: Commands,
    clock: Res<SimClock>,
    players: Query<&PhysicsBody, With<Player>>,
    mut dispensers: Query<(Entity, &mut Dispenser, &SolidBlock)>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    for (entity, mut dispenser, block) in dispensers.iter_mut() {
        let range = Aabb::from_center(block.rect.center(), DISPENSER_RANGE);
        if !range.contains_point(player.center()) || !dispenser.timer.check(clock.now) {
            continue;
        }
        spawn_fireball(
            &mut commands,
            block.rect.center(),
            dispenser.heading,
            Projectile {
                targets: Allegiance::Player,
                source: Some(entity),
            },
            clock.now,
        );
    }
}

pub fn apply_plates(
    clock: Res<SimClock>,
    players: Query<(Entity, &PhysicsBody), With<Player>>,
    mut plates: Query<(&mut EffectPlate, &Placed)>,
    mut effect_events: EventWriter<ApplyEffectEvent>,
) {
    let Ok((player, body)) = players.get_single() else {
        return;
    };
    let area = body.aabb();
    for (mut plate, placed) in plates.iter_mut() {
        if placed.0.overlaps(&area) && plate.cooldown.check(clock.now) {
            effect_events.send(ApplyEffectEvent {
                target: player,
                effect: plate.effect,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemSpec;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn closed_chest_keeps_its_contents() {
        let mut chest = Chest::new([ItemSpec::Arrows.instantiate(3)]);
        assert_eq!(chest.dispense(ms(5000)), None);
        assert_eq!(chest.remaining(), 1);
    }

    #[test]
    fn open_chest_empties_one_stack_per_second_in_order() {
        let mut chest = Chest::new([
            ItemSpec::Bow.instantiate(1),
            ItemSpec::Arrows.instantiate(8),
        ]);
        chest.open();

        let first = chest.dispense(ms(0)).map(|stack| stack.kind());
        assert_eq!(first, Some(crate::combat::ItemKind::Bow));
        assert!(chest.dispense(ms(500)).is_none());
        let second = chest.dispense(ms(1000)).expect("second stack after the interval");
        assert_eq!(second.amount, 8);
        assert!(chest.dispense(ms(5000)).is_none());
        assert_eq!(chest.remaining(), 0);
    }
}
