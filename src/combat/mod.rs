//! Combat module - health, weapons, projectiles, status effects and damage.

mod components;
mod effects;
mod plugin;
mod projectiles;
mod systems;
mod weapons;
mod wielding;

pub use components::*;
pub use effects::{ActiveEffects, Effect, EffectKind, EffectTarget, EffectTemplate};
pub use plugin::CombatPlugin;
pub use projectiles::{
    spawn_arrow, spawn_bullet, spawn_fireball, Arrow, Bullet, Fireball, Projectile,
    MIN_ARROW_POWER,
};
pub use systems::{apply_damage, begin_dying, finish_dying, tick_effects};
pub use weapons::{
    Bow, Grip, Gun, ItemKind, Potion, Sword, Usable, WeaponAction, WeaponIntent,
    BOW_BASE_POWER, BOW_MAX_STAGE, BOW_POWER_STEP, SWING_LIMIT, SWING_STEP,
};
pub use wielding::{enemy_weapons, player_weapon, Armory, Wielded};
