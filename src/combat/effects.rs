//! Timed status effects.
//!
//! Each effect runs until its duration elapses. Per-tick kinds act every
//! frame, instant kinds act once and finish, and toggle kinds change a stat
//! on their first tick and undo it at expiry.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::Cooldown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EffectKind {
    /// 1 hp every `power` ms
    Heal,
    /// 1 damage every `power` ms
    Damage,
    InstantHeal,
    InstantDamage,
    /// Walk speed reduced by `power` for the duration
    Slowness,
    /// Walk speed raised by `power` for the duration
    Speed,
    /// Upward velocity added every frame
    Levitation,
    /// Horizontal velocity added every frame
    Acceleration,
}

fn default_duration_ms() -> u64 {
    1000
}

/// Data form of an effect, as stored in maps, potions and plates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub power: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl EffectTemplate {
    pub fn new(kind: EffectKind, power: f32, duration_ms: u64) -> Self {
        Self {
            kind,
            power,
            duration_ms,
        }
    }

    /// Regeneration carried by the healing potion.
    pub fn heal_potion() -> Self {
        Self::new(EffectKind::Heal, 2000.0, 6001)
    }

    /// A live effect whose duration starts at `now`.
    pub fn instantiate(&self, now: Duration) -> Effect {
        Effect {
            kind: self.kind,
            power: self.power,
            timer: Cooldown::started(now, Duration::from_millis(self.duration_ms)),
            done: false,
            applied: false,
        }
    }
}

/// What an effect needs from its owner.
pub trait EffectTarget {
    fn take_damage(&mut self, amount: i32, interval: Option<Duration>, now: Duration) -> bool;
    fn restore(&mut self, amount: i32, interval: Option<Duration>, now: Duration) -> bool;
    fn add_walk_speed(&mut self, delta: f32);
    fn push(&mut self, velocity: Vec2);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub power: f32,
    timer: Cooldown,
    done: bool,
    applied: bool,
}

impl Effect {
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fraction of the duration that has passed.
    pub fn progress(&self, now: Duration) -> f32 {
        self.timer.progress(now)
    }

    fn period(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.power.max(0.0) as u64))
    }

    /// Run one frame of the effect against its owner.
    pub fn update(&mut self, target: &mut impl EffectTarget, now: Duration) {
        if self.done {
            return;
        }
        if self.timer.check(now) {
            self.revert(target);
            self.done = true;
            return;
        }

        match self.kind {
            EffectKind::InstantHeal => {
                target.restore(self.power.round() as i32, Some(Duration::ZERO), now);
                self.done = true;
            }
            EffectKind::InstantDamage => {
                target.take_damage(self.power.round() as i32, Some(Duration::ZERO), now);
                self.done = true;
            }
            EffectKind::Levitation => target.push(Vec2::new(0.0, -self.power)),
            EffectKind::Acceleration => target.push(Vec2::new(self.power, 0.0)),
            EffectKind::Damage => {
                target.take_damage(1, self.period(), now);
            }
            EffectKind::Heal => {
                target.restore(1, self.period(), now);
            }
            EffectKind::Slowness if !self.applied => {
                target.add_walk_speed(-self.power);
                self.applied = true;
            }
            EffectKind::Speed if !self.applied => {
                target.add_walk_speed(self.power);
                self.applied = true;
            }
            EffectKind::Slowness | EffectKind::Speed => {}
        }
    }

    /// Undo a stat toggle if it was applied.
    pub fn revert(&mut self, target: &mut impl EffectTarget) {
        if !self.applied {
            return;
        }
        match self.kind {
            EffectKind::Slowness => target.add_walk_speed(self.power),
            EffectKind::Speed => target.add_walk_speed(-self.power),
            _ => {}
        }
        self.applied = false;
    }
}

/// Live effects on an entity, at most one per kind.
#[derive(Component, Debug, Clone, Default)]
pub struct ActiveEffects(Vec<Effect>);

impl ActiveEffects {
    /// Add `effect`, replacing (and reverting) any live effect of the same kind.
    pub fn add(&mut self, effect: Effect, target: &mut impl EffectTarget) {
        if let Some(index) = self.0.iter().position(|e| e.kind == effect.kind) {
            let mut old = self.0.remove(index);
            old.revert(target);
        }
        self.0.push(effect);
    }

    /// Update every effect and drop the finished ones.
    pub fn tick(&mut self, target: &mut impl EffectTarget, now: Duration) {
        for effect in self.0.iter_mut() {
            effect.update(target, now);
        }
        self.0.retain(|effect| !effect.is_done());
    }

    /// Remove everything, undoing stat toggles.
    pub fn clear(&mut self, target: &mut impl EffectTarget) {
        for effect in self.0.iter_mut() {
            effect.revert(target);
        }
        self.0.clear();
    }

    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.0.iter().find(|effect| effect.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        hp: i32,
        walk_speed: f32,
        velocity: Vec2,
        damage_calls: Vec<Option<Duration>>,
    }

    impl EffectTarget for Dummy {
        fn take_damage(&mut self, amount: i32, interval: Option<Duration>, _now: Duration) -> bool {
            self.hp -= amount;
            self.damage_calls.push(interval);
            true
        }

        fn restore(&mut self, amount: i32, _interval: Option<Duration>, _now: Duration) -> bool {
            self.hp += amount;
            true
        }

        fn add_walk_speed(&mut self, delta: f32) {
            self.walk_speed += delta;
        }

        fn push(&mut self, velocity: Vec2) {
            self.velocity += velocity;
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn slowness_applies_once_and_reverts_at_expiry() {
        let mut dummy = Dummy {
            walk_speed: 6.0,
            ..default()
        };
        let mut effect = EffectTemplate::new(EffectKind::Slowness, 2.0, 1000).instantiate(ms(0));
        for t in [0, 16, 32, 500] {
            effect.update(&mut dummy, ms(t));
        }
        assert_eq!(dummy.walk_speed, 4.0);
        effect.update(&mut dummy, ms(1000));
        assert!(effect.is_done());
        assert_eq!(dummy.walk_speed, 6.0);
    }

    #[test]
    fn instant_damage_fires_once() {
        let mut dummy = Dummy {
            hp: 16,
            ..default()
        };
        let mut effect = EffectTemplate::new(EffectKind::InstantDamage, 10.0, 1000).instantiate(ms(0));
        effect.update(&mut dummy, ms(16));
        effect.update(&mut dummy, ms(32));
        assert_eq!(dummy.hp, 6);
        assert_eq!(dummy.damage_calls, vec![Some(Duration::ZERO)]);
    }

    #[test]
    fn periodic_damage_uses_power_as_window() {
        let mut dummy = Dummy::default();
        let mut effect = EffectTemplate::new(EffectKind::Damage, 1000.0, 4001).instantiate(ms(0));
        effect.update(&mut dummy, ms(16));
        assert_eq!(dummy.damage_calls, vec![Some(ms(1000))]);
    }

    #[test]
    fn same_kind_replaces_instead_of_stacking() {
        let mut dummy = Dummy {
            walk_speed: 6.0,
            ..default()
        };
        let mut effects = ActiveEffects::default();
        effects.add(
            EffectTemplate::new(EffectKind::Speed, 3.0, 1000).instantiate(ms(0)),
            &mut dummy,
        );
        effects.tick(&mut dummy, ms(16));
        assert_eq!(dummy.walk_speed, 9.0);

        effects.add(
            EffectTemplate::new(EffectKind::Speed, 3.0, 1000).instantiate(ms(500)),
            &mut dummy,
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(dummy.walk_speed, 6.0);

        effects.tick(&mut dummy, ms(520));
        assert_eq!(dummy.walk_speed, 9.0);

        // Re-armed at 500, so still live at 1200
        effects.tick(&mut dummy, ms(1200));
        assert_eq!(effects.len(), 1);
        effects.tick(&mut dummy, ms(1500));
        assert!(effects.is_empty());
        assert_eq!(dummy.walk_speed, 6.0);
    }

    #[test]
    fn levitation_pushes_every_frame() {
        let mut dummy = Dummy::default();
        let mut effect = EffectTemplate::new(EffectKind::Levitation, 2.5, 1000).instantiate(ms(0));
        for t in [16, 32, 48] {
            effect.update(&mut dummy, ms(t));
        }
        assert_eq!(dummy.velocity, Vec2::new(0.0, -7.5));
    }
}
