//! Damage, status effects and death sequencing.

use std::time::Duration;

use bevy::prelude::*;

use super::components::*;
use super::effects::ActiveEffects;
use crate::animation::{AnimKind, AnimationController, FrameCounts};
use crate::core::{
    ApplyEffectEvent, Cooldown, DamageEvent, DeathEvent, GameConfig, SimClock, SimRng, SoundCue,
};
use crate::inventory::spawn_world_item;
use crate::physics::{PhysicsBody, Side};
use crate::player::Player;

/// Loot scatter: horizontal speed range and upward toss.
const LOOT_SCATTER_X: f32 = 5.0;
const LOOT_TOSS_Y: f32 = -10.0;

type Victims<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Health,
        &'static mut PhysicsBody,
        Option<&'static mut Mobility>,
        Option<&'static mut ActiveEffects>,
    ),
>;

/// Resolve queued hits against each victim's own damage window, then start
/// requested status effects.
pub fn apply_damage(
    clock: Res<SimClock>,
    mut damage_events: EventReader<DamageEvent>,
    mut effect_events: EventReader<ApplyEffectEvent>,
    mut victims: Victims,
    mut sound_events: EventWriter<SoundCue>,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut body, mut mobility, _)) = victims.get_mut(event.target) else {
            continue;
        };
        let mut target = Combatant::new(&mut health, &mut body, mobility.as_deref_mut());
        if target.get_damage(&event.hit, clock.now) {
            debug!(
                "{:?} took {} damage ({} hp left)",
                event.target,
                event.hit.amount,
                health.hp()
            );
            sound_events.send(SoundCue::Damage);
        }
    }

    for event in effect_events.read() {
        let Ok((mut health, mut body, mut mobility, effects)) = victims.get_mut(event.target)
        else {
            continue;
        };
        let Some(mut effects) = effects else {
            continue;
        };
        let mut target = Combatant::new(&mut health, &mut body, mobility.as_deref_mut());
        effects.add(event.effect.instantiate(clock.now), &mut target);
    }
}

pub fn tick_effects(
    clock: Res<SimClock>,
    mut victims: Query<(
        &mut Health,
        &mut PhysicsBody,
        Option<&mut Mobility>,
        &mut ActiveEffects,
    )>,
    mut sound_events: EventWriter<SoundCue>,
) {
    for (mut health, mut body, mut mobility, mut effects) in victims.iter_mut() {
        if effects.is_empty() {
            continue;
        }
        let mut target = Combatant::new(&mut health, &mut body, mobility.as_deref_mut());
        effects.tick(&mut target, clock.now);
        if target.damaged {
            sound_events.send(SoundCue::Damage);
        }
    }
}

/// Enter the dying state the first frame hp is zero. The player is handled
/// by the defeat state instead.
pub fn begin_dying(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut query: Query<
        (
            Entity,
            &mut Health,
            &mut PhysicsBody,
            &mut AnimationController,
            &FrameCounts,
            &Side,
        ),
        (Without<Dying>, Without<Player>),
    >,
    mut death_events: EventWriter<DeathEvent>,
) {
    for (entity, mut health, mut body, mut animation, counts, side) in query.iter_mut() {
        if health.is_alive() {
            continue;
        }
        health.damage_interval = Duration::from_millis(config.combat.dying_damage_interval_ms);
        body.velocity.x = 0.0;
        animation.play(counts, AnimKind::Death, *side);
        commands.entity(entity).insert(Dying::default());
        death_events.send(DeathEvent { entity });
    }
}

/// Hold the last death frame briefly, then drop loot and remove the entity.
pub fn finish_dying(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    mut rng: ResMut<SimRng>,
    mut query: Query<(
        Entity,
        &mut Dying,
        &AnimationController,
        &PhysicsBody,
        Option<&Loot>,
    )>,
) {
    let hold = Duration::from_millis(config.combat.death_hold_ms);
    for (entity, mut dying, animation, body, loot) in query.iter_mut() {
        if !animation.is_finished() {
            continue;
        }
        let Some(timer) = dying.hold.as_mut() else {
            dying.hold = Some(Cooldown::started(clock.now, hold));
            continue;
        };
        if !timer.check(clock.now) {
            continue;
        }

        let stacks = loot.map(|loot| loot.0.as_slice()).unwrap_or_default();
        for stack in stacks {
            let velocity = Vec2::new(rng.range_f32(-LOOT_SCATTER_X, LOOT_SCATTER_X), LOOT_TOSS_Y);
            spawn_world_item(
                &mut commands,
                stack.clone(),
                body.center(),
                velocity,
                clock.now,
                config.pickup_delay(),
            );
        }
        debug!("{:?} removed, dropped {} loot stacks", entity, stacks.len());
        commands.entity(entity).despawn_recursive();
    }
}
