//! Enemy-related components.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::Cooldown;
use crate::physics::{Aabb, Side};

/// Marker component for all enemies, the boss included.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches the registry key).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Weapon an enemy is placed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponClass {
    Sword,
    Bow,
}

impl std::str::FromStr for WeaponClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sword" => Ok(WeaponClass::Sword),
            "bow" => Ok(WeaponClass::Bow),
            _ => Err(()),
        }
    }
}

/// Back-and-forth walk between two x coordinates.
#[derive(Component, Debug, Clone)]
pub struct Patrol {
    /// x where the last reversal happened
    pub last_reversal: f32,
    /// Distance walked before turning around
    pub span: f32,
    /// Cleared while a bow wielder stands to shoot
    pub can_move: bool,
}

impl Patrol {
    /// Patrol starting at `start` toward `end`; returns the initial facing too.
    pub fn new(start: f32, end: f32) -> (Self, Side) {
        let side = if start < end { Side::Right } else { Side::Left };
        (
            Self {
                last_reversal: start,
                span: (start - end).abs(),
                can_move: true,
            },
            side,
        )
    }

    /// Whether the walker at `x` has covered the full span since its last turn.
    /// Turning records `x` as the new reversal point.
    pub fn should_turn(&mut self, x: f32) -> bool {
        if (x - self.last_reversal).abs() >= self.span {
            self.last_reversal = x;
            true
        } else {
            false
        }
    }
}

pub const BOSS_ARENA: Vec2 = Vec2::new(1000.0, 500.0);
pub const BOSS_ATTACK_BOX: Vec2 = Vec2::new(500.0, 250.0);
const BOSS_FIRST_SPELL: Duration = Duration::from_millis(2500);
const KICK_DURATION: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spell {
    Fireballs,
    Arrows,
    Kick,
}

impl Spell {
    pub const ALL: [Spell; 3] = [Spell::Fireballs, Spell::Arrows, Spell::Kick];
    /// Delays the next cast is picked from, in ms.
    pub const DELAYS_MS: [u64; 3] = [3000, 2500, 3000];
}

/// Boss state: a fixed arena and a spell cycle.
#[derive(Component, Debug, Clone)]
pub struct Boss {
    /// Area the boss defends, centred on where it was placed
    pub arena: Aabb,
    pub spell_delay: Cooldown,
    pub spell: Option<Spell>,
    pub kick: Cooldown,
}

impl Boss {
    pub fn new(spawn_center: Vec2, now: Duration) -> Self {
        Self {
            arena: Aabb::from_center(spawn_center, BOSS_ARENA),
            spell_delay: Cooldown::started(now, BOSS_FIRST_SPELL),
            spell: None,
            kick: Cooldown::new(KICK_DURATION),
        }
    }

    /// Box that has to contain the player before the boss stops to cast.
    pub fn attack_box(center: Vec2) -> Aabb {
        Aabb::from_center(center, BOSS_ATTACK_BOX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patrol_turns_after_covering_span() {
        let (mut patrol, side) = Patrol::new(100.0, 250.0);
        assert_eq!(side, Side::Right);

        let mut x = 100.0;
        let mut turned_at = None;
        for _ in 0..100 {
            x += 3.0;
            if patrol.should_turn(x) {
                turned_at = Some(x);
                break;
            }
        }
        assert_eq!(turned_at, Some(250.0));
        assert!(!patrol.should_turn(247.0));
        assert!(patrol.should_turn(100.0));
    }

    #[test]
    fn patrol_toward_lower_x_starts_left() {
        let (patrol, side) = Patrol::new(400.0, 100.0);
        assert_eq!(side, Side::Left);
        assert_eq!(patrol.span, 300.0);
    }
}
