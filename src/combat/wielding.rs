//! Systems that drive held weapons and carry out what they ask for.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{Allegiance, Dying};
use super::projectiles::{spawn_arrow, spawn_bullet, Projectile, Targets};
use super::weapons::{Grip, ItemKind, Usable, WeaponAction, WeaponIntent};
use crate::core::{
    ApplyEffectEvent, DamageEvent, InputSnapshot, SimClock, SimRng, SoundCue,
};
use crate::inventory::{Hotbar, Inventory};
use crate::physics::{PhysicsBody, Side};
use crate::player::Player;

/// The weapon an enemy carries. Its [`WeaponIntent`] is written by the AI.
#[derive(Component, Debug, Clone)]
pub struct Wielded(pub Usable);

/// Everything needed to turn a [`WeaponAction`] into world changes.
#[derive(SystemParam)]
pub struct Armory<'w, 's> {
    commands: Commands<'w, 's>,
    clock: Res<'w, SimClock>,
    rng: ResMut<'w, SimRng>,
    targets: Targets<'w, 's>,
    damage_events: EventWriter<'w, DamageEvent>,
    effect_events: EventWriter<'w, ApplyEffectEvent>,
    sound_events: EventWriter<'w, SoundCue>,
}

impl Armory<'_, '_> {
    pub fn now(&self) -> std::time::Duration {
        self.clock.now
    }

    /// Carry out `action` for `wielder`. Returns true when an arrow left the bow.
    pub fn perform(
        &mut self,
        wielder: Entity,
        allegiance: Allegiance,
        side: Side,
        action: WeaponAction,
    ) -> bool {
        let projectile = Projectile {
            targets: allegiance.opponent(),
            source: Some(wielder),
        };
        match action {
            WeaponAction::None => false,
            WeaponAction::Strike { area, hit } => {
                for (target, body, team) in self.targets.iter() {
                    if *team == projectile.targets && body.aabb().overlaps(&area) {
                        self.damage_events.send(DamageEvent {
                            target,
                            source: Some(wielder),
                            hit,
                        });
                    }
                }
                false
            }
            WeaponAction::FireArrow { origin, power } => {
                spawn_arrow(&mut self.commands, origin, side, power, projectile).is_some()
            }
            WeaponAction::FireBullet { origin } => {
                let now = self.clock.now;
                spawn_bullet(&mut self.commands, origin, side, projectile, &mut self.rng, now);
                self.sound_events.send(SoundCue::GunFire);
                false
            }
            WeaponAction::Consume { effect } => {
                self.effect_events.send(ApplyEffectEvent {
                    target: wielder,
                    effect,
                });
                false
            }
        }
    }
}

/// Use the active hotbar item from mouse input.
pub fn player_weapon(
    input: Res<InputSnapshot>,
    mut players: Query<
        (Entity, &PhysicsBody, &Side, &Allegiance, &mut Inventory, &Hotbar),
        With<Player>,
    >,
    mut armory: Armory,
) {
    let Ok((entity, body, side, allegiance, mut inventory, hotbar)) = players.get_single_mut()
    else {
        return;
    };
    if inventory.is_open {
        return;
    }
    let Some(index) = inventory.hotbar_slot(hotbar.active()) else {
        return;
    };

    let intent = WeaponIntent {
        trigger_held: input.primary_held,
        trigger_pressed: input.primary_pressed,
        has_ammo: inventory.find_kind(ItemKind::Arrows).is_some(),
    };
    let grip = Grip {
        owner: body.aabb(),
        side: *side,
    };
    let now = armory.now();
    let Some(stack) = inventory.get_mut(index) else {
        return;
    };
    let action = stack.item.update(&intent, &grip, now);

    if armory.perform(entity, *allegiance, *side, action) {
        inventory.consume_one(ItemKind::Arrows);
    }
}

/// Enemy weapons never run out of ammunition.
pub fn enemy_weapons(
    mut wielders: Query<
        (Entity, &PhysicsBody, &Side, &Allegiance, &WeaponIntent, &mut Wielded),
        Without<Dying>,
    >,
    mut armory: Armory,
) {
    let now = armory.now();
    for (entity, body, side, allegiance, intent, mut wielded) in wielders.iter_mut() {
        let grip = Grip {
            owner: body.aabb(),
            side: *side,
        };
        let intent = WeaponIntent {
            has_ammo: true,
            ..*intent
        };
        let action = wielded.0.update(&intent, &grip, now);
        armory.perform(entity, *allegiance, *side, action);
    }
}
