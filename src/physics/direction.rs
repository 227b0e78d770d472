//! Facing and heading directions.

use bevy::prelude::*;
use serde::Deserialize;

/// Horizontal facing of an actor or projectile.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    /// -1 for left, 1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Side from the sign of a horizontal value; zero keeps `current`.
    pub fn from_sign(value: f32, current: Side) -> Side {
        if value < 0.0 {
            Side::Left
        } else if value > 0.0 {
            Side::Right
        } else {
            current
        }
    }
}

/// Four-way direction used by dispensers and their fireballs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    /// Unit vector in y-down world space.
    pub fn unit(self) -> Vec2 {
        match self {
            Heading::Left => Vec2::new(-1.0, 0.0),
            Heading::Right => Vec2::new(1.0, 0.0),
            Heading::Up => Vec2::new(0.0, -1.0),
            Heading::Down => Vec2::new(0.0, 1.0),
        }
    }

    /// Horizontal component as a signed unit, zero for vertical headings.
    pub fn horizontal_sign(self) -> f32 {
        self.unit().x
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Heading::Up | Heading::Down)
    }
}

impl From<Side> for Heading {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Heading::Left,
            Side::Right => Heading::Right,
        }
    }
}

impl std::str::FromStr for Heading {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Heading::Left),
            "right" => Ok(Heading::Right),
            "up" => Ok(Heading::Up),
            "down" => Ok(Heading::Down),
            _ => Err(()),
        }
    }
}
