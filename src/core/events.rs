//! Global events used for cross-system communication.
//!
//! Weapons, projectiles and hazards never touch their victims directly: they
//! send a [`DamageEvent`] and the damage system applies it later in the same
//! frame. Sound cues are fire-and-forget; nothing in the simulation waits on
//! them.

use bevy::prelude::*;

use crate::combat::{EffectTemplate, Hit};

/// Sent when something wants to hurt an entity.
///
/// Whether the hit lands is decided by the victim's own damage cooldown.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if any
    pub source: Option<Entity>,
    pub hit: Hit,
}

/// Sent once when an entity's hp first reaches zero.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    pub entity: Entity,
}

/// Sent when a world item is absorbed into the player's inventory.
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    /// The item entity being picked up
    pub item: Entity,
    /// Whether the whole stack was taken (the entity is gone)
    pub complete: bool,
}

/// Audio cue the simulation emits for a collaborator to play or ignore.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Damage,
    ArrowImpact,
    GunFire,
}

/// Request to tear down and rebuild the current map.
#[derive(Event, Debug, Clone, Default)]
pub struct ReloadMapEvent;

/// Request to start a status effect on an entity, replacing any live effect of the same kind.
#[derive(Event, Debug, Clone)]
pub struct ApplyEffectEvent {
    pub target: Entity,
    pub effect: EffectTemplate,
}
