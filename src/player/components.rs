//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Coins collected so far.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Wallet(pub u32);

/// Where the player comes back after defeat. Checkpoints move it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec2);
