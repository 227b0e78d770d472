//! Usable items: what happens when something holds them.
//!
//! Weapons never look at who holds them. Each frame the wielder's system
//! fills a [`WeaponIntent`] (from input for the player, from AI for enemies)
//! and a [`Grip`], and the weapon answers with a [`WeaponAction`] for the
//! system to carry out.

use std::time::Duration;

use bevy::prelude::*;

use super::components::Hit;
use super::effects::EffectTemplate;
use crate::core::Cooldown;
use crate::physics::{Aabb, Side};

/// Sword swing advances this many degrees per frame.
pub const SWING_STEP: f32 = 5.0;
/// A swing ends once the blade reaches this angle.
pub const SWING_LIMIT: f32 = 75.0;

pub const BOW_BASE_POWER: f32 = 10.0;
pub const BOW_POWER_STEP: f32 = 10.0;
pub const BOW_MAX_STAGE: u8 = 3;
const BOW_PULL_INTERVAL: Duration = Duration::from_millis(750);
const BOW_SHOOT_COOLDOWN: Duration = Duration::from_millis(750);

const GUN_COOLDOWN: Duration = Duration::from_millis(250);

/// Offset of the hand from the owner's leading edge and vertical centre.
const HAND_INSET: f32 = 12.0;
const HAND_DROP: f32 = 25.0;

/// What the wielder asks of its weapon this frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponIntent {
    pub trigger_held: bool,
    /// Trigger went down this frame
    pub trigger_pressed: bool,
    /// Ammunition is available for weapons that need it
    pub has_ammo: bool,
}

/// Where the weapon is held.
#[derive(Debug, Clone, Copy)]
pub struct Grip {
    pub owner: Aabb,
    pub side: Side,
}

impl Grip {
    /// Box of a held item of `size`, hanging from the owner's leading hand.
    pub fn hand_box(&self, size: Vec2) -> Aabb {
        let bottom = self.owner.center().y + HAND_DROP;
        let left = match self.side {
            Side::Right => self.owner.max.x - HAND_INSET,
            Side::Left => self.owner.min.x + HAND_INSET - size.x,
        };
        Aabb::new(Vec2::new(left, bottom - size.y), size)
    }
}

/// Result of one weapon update.
#[derive(Debug, Clone, PartialEq)]
pub enum WeaponAction {
    None,
    /// Everything of the opposing side inside `area` receives `hit`
    Strike { area: Aabb, hit: Hit },
    FireArrow { origin: Vec2, power: f32 },
    FireBullet { origin: Vec2 },
    /// Single-use item spent on its holder
    Consume { effect: EffectTemplate },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sword {
    pub damage: i32,
    pub knockback: Vec2,
    pub rotation: f32,
    pub is_attacking: bool,
}

impl Sword {
    pub const SIZE: Vec2 = Vec2::new(45.0, 45.0);

    pub fn new(damage: i32, knockback: Vec2) -> Self {
        Self {
            damage,
            knockback,
            rotation: 0.0,
            is_attacking: false,
        }
    }

    /// Start a swing unless one is in progress.
    pub fn attack(&mut self) {
        if !self.is_attacking {
            self.rotation = 0.0;
            self.is_attacking = true;
        }
    }

    fn update(&mut self, intent: &WeaponIntent, grip: &Grip) -> WeaponAction {
        if intent.trigger_pressed {
            self.attack();
        }
        if !self.is_attacking {
            return WeaponAction::None;
        }

        self.rotation += SWING_STEP;
        if self.rotation >= SWING_LIMIT {
            self.rotation = 0.0;
            self.is_attacking = false;
        }
        WeaponAction::Strike {
            area: grip.hand_box(Self::SIZE),
            hit: Hit::new(self.damage).with_knockback(Vec2::new(
                self.knockback.x * grip.side.sign(),
                self.knockback.y,
            )),
        }
    }

    fn reset(&mut self) {
        self.rotation = 0.0;
        self.is_attacking = false;
    }
}

/// Charged shot: Idle, then Pulling through up to three stages, then fire on release.
#[derive(Debug, Clone, PartialEq)]
pub struct Bow {
    pulling: bool,
    stage: u8,
    power: f32,
    pull_timer: Cooldown,
    shoot_timer: Cooldown,
}

impl Default for Bow {
    fn default() -> Self {
        Self {
            pulling: false,
            stage: 0,
            power: BOW_BASE_POWER,
            pull_timer: Cooldown::new(BOW_PULL_INTERVAL),
            shoot_timer: Cooldown::new(BOW_SHOOT_COOLDOWN),
        }
    }
}

impl Bow {
    pub const SIZE: Vec2 = Vec2::new(45.0, 45.0);

    pub fn is_pulling(&self) -> bool {
        self.pulling
    }

    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Advance the pull while `draw` holds; on release return the stored power.
    ///
    /// A pull can only start once the shoot cooldown has elapsed, so letting
    /// go before then fires nothing.
    pub fn pull(&mut self, draw: bool, now: Duration) -> Option<f32> {
        if draw {
            if !self.pulling {
                if !self.shoot_timer.is_ready(now) {
                    return None;
                }
                self.pulling = true;
                self.stage = 0;
                self.power = BOW_BASE_POWER;
                self.pull_timer.reset(now);
            } else if self.stage < BOW_MAX_STAGE && self.pull_timer.check(now) {
                self.stage += 1;
                self.power += BOW_POWER_STEP;
            }
            None
        } else if self.pulling {
            let power = self.power;
            self.pulling = false;
            self.stage = 0;
            self.power = BOW_BASE_POWER;
            self.shoot_timer.reset(now);
            Some(power)
        } else {
            None
        }
    }

    fn update(&mut self, intent: &WeaponIntent, grip: &Grip, now: Duration) -> WeaponAction {
        match self.pull(intent.trigger_held && intent.has_ammo, now) {
            Some(power) => WeaponAction::FireArrow {
                origin: grip.hand_box(Self::SIZE).center(),
                power,
            },
            None => WeaponAction::None,
        }
    }

    fn reset(&mut self, now: Duration) {
        self.pulling = false;
        self.stage = 0;
        self.power = BOW_BASE_POWER;
        self.shoot_timer.reset(now);
        self.pull_timer.reset(now);
    }
}

/// Rate-limited continuous fire.
#[derive(Debug, Clone, PartialEq)]
pub struct Gun {
    shoot_timer: Cooldown,
}

impl Default for Gun {
    fn default() -> Self {
        Self {
            shoot_timer: Cooldown::new(GUN_COOLDOWN),
        }
    }
}

impl Gun {
    pub const SIZE: Vec2 = Vec2::new(48.0, 48.0);

    fn update(&mut self, intent: &WeaponIntent, grip: &Grip, now: Duration) -> WeaponAction {
        if intent.trigger_held && self.shoot_timer.check(now) {
            WeaponAction::FireBullet {
                origin: grip.hand_box(Self::SIZE).center(),
            }
        } else {
            WeaponAction::None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Potion {
    pub effect: EffectTemplate,
    consumed: bool,
}

impl Potion {
    pub const SIZE: Vec2 = Vec2::new(36.0, 36.0);

    pub fn new(effect: EffectTemplate) -> Self {
        Self {
            effect,
            consumed: false,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn update(&mut self, intent: &WeaponIntent) -> WeaponAction {
        if intent.trigger_pressed && !self.consumed {
            self.consumed = true;
            WeaponAction::Consume {
                effect: self.effect,
            }
        } else {
            WeaponAction::None
        }
    }
}

/// Coarse item type, the identity used for stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Sword,
    Bow,
    Gun,
    Potion,
    Arrows,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Sword => "sword",
            ItemKind::Bow => "bow",
            ItemKind::Gun => "gun",
            ItemKind::Potion => "potion",
            ItemKind::Arrows => "arrows",
        }
    }

    pub fn stack_size(self) -> u32 {
        match self {
            ItemKind::Arrows => 16,
            _ => 1,
        }
    }
}

/// Anything that can sit in an inventory slot and be held.
#[derive(Debug, Clone, PartialEq)]
pub enum Usable {
    Sword(Sword),
    Bow(Bow),
    Gun(Gun),
    Potion(Potion),
    /// Ammunition for the bow; does nothing when held
    Arrows,
}

impl Usable {
    pub fn kind(&self) -> ItemKind {
        match self {
            Usable::Sword(_) => ItemKind::Sword,
            Usable::Bow(_) => ItemKind::Bow,
            Usable::Gun(_) => ItemKind::Gun,
            Usable::Potion(_) => ItemKind::Potion,
            Usable::Arrows => ItemKind::Arrows,
        }
    }

    /// Size of the item while held.
    pub fn hand_size(&self) -> Vec2 {
        match self {
            Usable::Sword(_) => Sword::SIZE,
            Usable::Bow(_) => Bow::SIZE,
            Usable::Gun(_) => Gun::SIZE,
            Usable::Potion(_) => Potion::SIZE,
            Usable::Arrows => Vec2::new(56.0, 16.0),
        }
    }

    /// Whether the item asked to be removed from its slot.
    pub fn is_spent(&self) -> bool {
        matches!(self, Usable::Potion(potion) if potion.is_consumed())
    }

    pub fn update(&mut self, intent: &WeaponIntent, grip: &Grip, now: Duration) -> WeaponAction {
        match self {
            Usable::Sword(sword) => sword.update(intent, grip),
            Usable::Bow(bow) => bow.update(intent, grip, now),
            Usable::Gun(gun) => gun.update(intent, grip, now),
            Usable::Potion(potion) => potion.update(intent),
            Usable::Arrows => WeaponAction::None,
        }
    }

    /// Drop all transient swing and charge state. Called whenever the item
    /// stops being the one in use.
    pub fn default(&mut self, now: Duration) {
        match self {
            Usable::Sword(sword) => sword.reset(),
            Usable::Bow(bow) => bow.reset(now),
            Usable::Gun(_) | Usable::Potion(_) | Usable::Arrows => {}
        }
    }
}
