//! Game configuration loaded from `assets/data/config.ron`.
//!
//! Every tunable constant of the simulation lives here so it can be tweaked
//! without recompilation. Missing fields fall back to their defaults.

use std::fs;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

pub const CONFIG_PATH: &str = "assets/data/config.ron";

/// How strictly a collision correction requires the velocity sign to match
/// the side that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SignGate {
    /// Correct when the velocity points into the obstacle or is zero.
    #[default]
    Inclusive,
    /// Correct only when the velocity points into the obstacle.
    Strict,
}

impl SignGate {
    /// Whether a velocity component moving toward the hit side allows a correction.
    /// `toward` is the velocity projected onto the direction of the hit side.
    pub fn allows(self, toward: f32) -> bool {
        match self {
            SignGate::Inclusive => toward >= 0.0,
            SignGate::Strict => toward > 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per frame for actors.
    pub gravity: f32,
    /// Vertical speed is clamped to this before integration.
    pub terminal_velocity: f32,
    /// Largest displacement per sub-step for fast projectiles.
    pub sweep_step: f32,
    pub sign_gate: SignGate,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.75,
            terminal_velocity: 50.0,
            sweep_step: 16.0,
            sign_gate: SignGate::Inclusive,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub max_hp: i32,
    pub walk_speed: f32,
    pub jump_velocity: f32,
    pub size: (f32, f32),
    /// Respawn hp is `max_hp / respawn_hp_divisor`.
    pub respawn_hp_divisor: i32,
    pub fall_damage: i32,
    pub fall_damage_interval_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_hp: 16,
            walk_speed: 6.0,
            jump_velocity: -25.0,
            size: (76.0, 76.0),
            respawn_hp_divisor: 3,
            fall_damage: 4,
            fall_damage_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    pub hotbar_slots: usize,
    pub storage_slots: usize,
    pub pickup_delay_ms: u64,
    /// Velocity given to a stack dropped by the player, mirrored by facing.
    pub drop_knockback: (f32, f32),
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            hotbar_slots: 9,
            storage_slots: 18,
            pickup_delay_ms: 750,
            drop_knockback: (10.0, -10.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    pub damage_interval_ms: u64,
    pub heal_interval_ms: u64,
    /// Damage interval forced on entities while they play their death sequence.
    pub dying_damage_interval_ms: u64,
    /// How long the last death frame is held before removal.
    pub death_hold_ms: u64,
    pub spike_damage: i32,
    pub spike_interval_ms: u64,
    pub spike_knockback: (f32, f32),
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            damage_interval_ms: 500,
            heal_interval_ms: 500,
            dying_damage_interval_ms: 10_000,
            death_hold_ms: 100,
            spike_damage: 1,
            spike_interval_ms: 750,
            spike_knockback: (0.0, -15.0),
        }
    }
}

/// Top-level configuration resource.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerSettings,
    pub inventory: InventorySettings,
    pub combat: CombatSettings,
    pub rng_seed: u64,
    /// Map loaded at startup, resolved under `assets/data/maps/`.
    pub start_map: String,
    pub screen_size: (f32, f32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerSettings::default(),
            inventory: InventorySettings::default(),
            combat: CombatSettings::default(),
            rng_seed: 42,
            start_map: "ruins".to_string(),
            screen_size: (900.0, 600.0),
        }
    }
}

impl GameConfig {
    /// Load the config from RON, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded game config from {}", CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    pub fn damage_interval(&self) -> Duration {
        Duration::from_millis(self.combat.damage_interval_ms)
    }

    pub fn heal_interval(&self) -> Duration {
        Duration::from_millis(self.combat.heal_interval_ms)
    }

    pub fn pickup_delay(&self) -> Duration {
        Duration::from_millis(self.inventory.pickup_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: GameConfig =
            ron::from_str("(rng_seed: 7, physics: (gravity: 2.0))").expect("valid config");
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.physics.gravity, 2.0);
        assert_eq!(config.physics.terminal_velocity, 50.0);
        assert_eq!(config.player.max_hp, 16);
    }

    #[test]
    fn sign_gate_boundary() {
        assert!(SignGate::Inclusive.allows(0.0));
        assert!(!SignGate::Strict.allows(0.0));
        assert!(SignGate::Strict.allows(0.5));
        assert!(!SignGate::Inclusive.allows(-0.5));
    }
}
