//! Platforms that shuttle back and forth along one axis.

use bevy::prelude::*;
use serde::Deserialize;

use super::obstacles::SolidBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::str::FromStr for Axis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Axis::Horizontal),
            "vertical" => Ok(Axis::Vertical),
            _ => Err(()),
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct MovingPlatform {
    pub axis: Axis,
    /// Coordinate of the top-left corner along `axis` where travel starts
    pub start: f32,
    pub end: f32,
    /// Signed speed along `axis`
    pub velocity: f32,
}

impl MovingPlatform {
    /// Platform heading from `start` toward `end` at `speed` units per frame.
    pub fn new(axis: Axis, start: f32, end: f32, speed: f32) -> Self {
        let speed = speed.abs();
        Self {
            axis,
            start,
            end,
            velocity: if end < start { -speed } else { speed },
        }
    }

    fn axis_vec(&self) -> Vec2 {
        match self.axis {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }

    /// Move one frame, reversing once either end is reached or passed.
    /// Returns the displacement applied this frame.
    pub fn step(&mut self, position: &mut Vec2) -> Vec2 {
        let delta = self.axis_vec() * self.velocity;
        *position += delta;

        let coordinate = match self.axis {
            Axis::Horizontal => position.x,
            Axis::Vertical => position.y,
        };
        let (low, high) = (self.start.min(self.end), self.start.max(self.end));
        if (self.velocity < 0.0 && coordinate <= low) || (self.velocity > 0.0 && coordinate >= high) {
            self.velocity = -self.velocity;
        }
        delta
    }
}

/// Advance every moving platform and publish its per-frame carry for riders.
pub fn move_platforms(mut query: Query<(&mut MovingPlatform, &mut SolidBlock)>) {
    for (mut platform, mut block) in query.iter_mut() {
        let mut position = block.rect.min;
        let delta = platform.step(&mut position);
        let size = block.rect.size();
        block.rect.min = position;
        block.rect.max = position + size;
        block.carry = delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_reverses_at_both_ends() {
        let mut platform = MovingPlatform::new(Axis::Horizontal, 0.0, 10.0, 5.0);
        let mut position = Vec2::ZERO;
        platform.step(&mut position);
        assert_eq!(position.x, 5.0);
        platform.step(&mut position);
        assert_eq!(position.x, 10.0);
        assert!(platform.velocity < 0.0);
        platform.step(&mut position);
        platform.step(&mut position);
        assert_eq!(position.x, 0.0);
        assert!(platform.velocity > 0.0);
    }

    #[test]
    fn platform_heading_toward_lower_end_starts_negative() {
        let mut platform = MovingPlatform::new(Axis::Vertical, 100.0, 40.0, 2.0);
        let mut position = Vec2::new(0.0, 100.0);
        let delta = platform.step(&mut position);
        assert_eq!(delta, Vec2::new(0.0, -2.0));
        assert_eq!(position.y, 98.0);
    }
}
