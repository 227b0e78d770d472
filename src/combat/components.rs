//! Combat-related components.

use std::time::Duration;

use bevy::prelude::*;

use super::effects::EffectTarget;
use crate::core::Cooldown;
use crate::inventory::ItemStack;
use crate::physics::PhysicsBody;

/// One attempt to hurt something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub amount: i32,
    /// Damage window to use instead of the victim's default
    pub interval: Option<Duration>,
    /// x replaces the victim's horizontal knockback, y is added to its vertical velocity
    pub knockback: Vec2,
}

impl Hit {
    pub fn new(amount: i32) -> Self {
        Self {
            amount,
            interval: None,
            knockback: Vec2::ZERO,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_knockback(mut self, knockback: Vec2) -> Self {
        self.knockback = knockback;
        self
    }
}

/// Hit points with per-entity damage and heal gating.
///
/// Damage immunity lives on the victim: a hit only lands when the victim's
/// own damage cooldown has elapsed, no matter how often a weapon connects.
#[derive(Component, Debug, Clone)]
pub struct Health {
    hp: i32,
    max_hp: i32,
    pub damage_interval: Duration,
    pub heal_interval: Duration,
    damage_timer: Cooldown,
    heal_timer: Cooldown,
}

impl Health {
    pub fn new(max_hp: i32, damage_interval: Duration, heal_interval: Duration) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            damage_interval,
            heal_interval,
            damage_timer: Cooldown::new(damage_interval),
            heal_timer: Cooldown::new(heal_interval),
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.set_hp(hp);
        self
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn fraction(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }

    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Lose `amount` hp if alive and the damage window has elapsed.
    pub fn get_damage(&mut self, amount: i32, interval: Option<Duration>, now: Duration) -> bool {
        if self.hp <= 0 {
            return false;
        }
        if !self
            .damage_timer
            .check_with(now, interval.unwrap_or(self.damage_interval))
        {
            return false;
        }
        self.set_hp(self.hp - amount);
        true
    }

    /// Regain `amount` hp if alive and the heal window has elapsed.
    pub fn heal(&mut self, amount: i32, interval: Option<Duration>, now: Duration) -> bool {
        if self.hp <= 0 {
            return false;
        }
        if !self
            .heal_timer
            .check_with(now, interval.unwrap_or(self.heal_interval))
        {
            return false;
        }
        self.set_hp(self.hp + amount);
        true
    }
}

/// Walking speed, the stat Slowness and Speed modify.
#[derive(Component, Debug, Clone, Copy)]
pub struct Mobility {
    pub walk_speed: f32,
}

/// Which team an entity fights for. Weapons and projectiles hurt the other one.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allegiance {
    Player,
    Hostile,
}

impl Allegiance {
    pub fn opponent(self) -> Self {
        match self {
            Allegiance::Player => Allegiance::Hostile,
            Allegiance::Hostile => Allegiance::Player,
        }
    }
}

/// Present while the death sequence plays.
#[derive(Component, Debug, Clone, Default)]
pub struct Dying {
    /// Started once the last death frame is showing
    pub hold: Option<Cooldown>,
}

/// Stacks dropped into the world when the entity is removed.
#[derive(Component, Debug, Clone, Default)]
pub struct Loot(pub Vec<ItemStack>);

/// Mutable view over the parts of an entity that damage and effects touch.
pub struct Combatant<'a> {
    pub health: &'a mut Health,
    pub body: &'a mut PhysicsBody,
    pub mobility: Option<&'a mut Mobility>,
    /// Set when any damage landed through this view
    pub damaged: bool,
}

impl<'a> Combatant<'a> {
    pub fn new(
        health: &'a mut Health,
        body: &'a mut PhysicsBody,
        mobility: Option<&'a mut Mobility>,
    ) -> Self {
        Self {
            health,
            body,
            mobility,
            damaged: false,
        }
    }

    /// Apply a hit with its knockback. Returns whether it landed.
    pub fn get_damage(&mut self, hit: &Hit, now: Duration) -> bool {
        if !self.health.get_damage(hit.amount, hit.interval, now) {
            return false;
        }
        self.body.knockback = hit.knockback.x;
        self.body.velocity.y += hit.knockback.y;
        self.damaged = true;
        true
    }
}

impl EffectTarget for Combatant<'_> {
    fn take_damage(&mut self, amount: i32, interval: Option<Duration>, now: Duration) -> bool {
        self.get_damage(
            &Hit {
                amount,
                interval,
                knockback: Vec2::ZERO,
            },
            now,
        )
    }

    fn restore(&mut self, amount: i32, interval: Option<Duration>, now: Duration) -> bool {
        self.health.heal(amount, interval, now)
    }

    fn add_walk_speed(&mut self, delta: f32) {
        if let Some(mobility) = self.mobility.as_deref_mut() {
            mobility.walk_speed += delta;
        }
    }

    fn push(&mut self, velocity: Vec2) {
        self.body.velocity += velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn player_health() -> Health {
        Health::new(16, ms(500), ms(500))
    }

    #[test]
    fn second_hit_inside_window_is_ignored() {
        let mut health = player_health();
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::splat(76.0));
        let hit = Hit::new(4)
            .with_interval(ms(500))
            .with_knockback(Vec2::new(0.0, -10.0));

        let mut target = Combatant::new(&mut health, &mut body, None);
        assert!(target.get_damage(&hit, ms(1000)));
        assert!(!target.get_damage(&hit, ms(1200)));
        assert_eq!(health.hp(), 12);
        assert_eq!(body.velocity.y, -10.0);
    }

    #[test]
    fn hp_never_leaves_bounds() {
        let mut health = player_health();
        assert!(health.get_damage(40, Some(Duration::ZERO), ms(0)));
        assert_eq!(health.hp(), 0);
        assert!(!health.get_damage(1, Some(Duration::ZERO), ms(1)));

        let mut health = player_health().with_hp(15);
        assert!(health.heal(10, None, ms(0)));
        assert_eq!(health.hp(), 16);
    }

    #[test]
    fn failed_damage_does_not_consume_window() {
        let mut health = player_health().with_hp(0);
        assert!(!health.get_damage(1, None, ms(0)));
        health.set_hp(5);
        assert!(health.get_damage(1, None, ms(0)));
    }

    #[test]
    fn heal_respects_its_own_window() {
        let mut health = player_health().with_hp(4);
        assert!(health.heal(1, None, ms(0)));
        assert!(!health.heal(1, None, ms(300)));
        assert!(health.heal(1, None, ms(500)));
        assert_eq!(health.hp(), 6);
    }
}
