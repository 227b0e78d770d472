//! Axis-aligned bodies and the collision rules every moving thing shares.
//!
//! World space is y-down: `min` is the top-left corner of a box and positive
//! vertical velocity points toward the ground. Boxes overlap only when their
//! interiors intersect, and a point on a box's right or bottom edge is outside
//! of it, so two boxes that merely touch never collide.

use bevy::prelude::*;

use crate::core::SignGate;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Half-open containment: left and top edges are inside, right and bottom are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.center().x, self.max.y)
    }

    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.center().x, self.min.y)
    }

    pub fn mid_left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.center().y)
    }

    pub fn mid_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.center().y)
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Which edges of a mover ended up inside an obstacle.
///
/// Each flag names the mover's edge: `bottom` means the mover's bottom edge
/// midpoint sits inside the obstacle, i.e. it landed on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideHits {
    pub bottom: bool,
    pub top: bool,
    pub left: bool,
    pub right: bool,
}

impl SideHits {
    /// Classify an overlap by testing each edge midpoint of `mover`.
    pub fn between(mover: &Aabb, obstacle: &Aabb) -> Self {
        if !mover.overlaps(obstacle) {
            return Self::default();
        }
        Self {
            bottom: obstacle.contains_point(mover.mid_bottom()),
            top: obstacle.contains_point(mover.mid_top()),
            left: obstacle.contains_point(mover.mid_left()),
            right: obstacle.contains_point(mover.mid_right()),
        }
    }

    pub fn any(&self) -> bool {
        self.bottom || self.top || self.left || self.right
    }
}

/// Position and motion state of anything that moves.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    /// Top-left corner in world space
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Extra horizontal displacement per frame, set when hit
    pub knockback: f32,
    pub is_jumping: bool,
}

impl PhysicsBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            gravity: 0.0,
            terminal_velocity: f32::INFINITY,
            knockback: 0.0,
            is_jumping: false,
        }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn with_gravity(mut self, gravity: f32, terminal_velocity: f32) -> Self {
        self.gravity = gravity;
        self.terminal_velocity = terminal_velocity;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.position = center - self.size / 2.0;
    }

    /// Set the bottom-left corner, which is how actors are placed on the map.
    pub fn set_bottom_left(&mut self, point: Vec2) {
        self.position = Vec2::new(point.x, point.y - self.size.y);
    }

    /// Accumulate a knockback impulse: x into the horizontal drift, y into velocity.
    pub fn add_knockback(&mut self, knockback: Vec2) {
        self.knockback += knockback.x;
        self.velocity.y += knockback.y;
    }

    /// Apply gravity and move one frame.
    ///
    /// Vertical velocity is clamped to the terminal bound before moving.
    /// Knockback is dropped once vertical velocity equals one frame of
    /// gravity, which only happens when the body started the frame at rest.
    pub fn integrate(&mut self) {
        self.velocity.y = (self.velocity.y + self.gravity).min(self.terminal_velocity);
        self.position.y += self.velocity.y;
        self.position.x += self.velocity.x + self.knockback;
        if (self.velocity.y - self.gravity).abs() <= f32::EPSILON {
            self.knockback = 0.0;
        }
    }

    /// Push the body out of `obstacle` on every hit side whose velocity points
    /// into the obstacle, zeroing that velocity component.
    pub fn resolve_against(&mut self, obstacle: &Aabb, gate: SignGate) -> SideHits {
        let hits = SideHits::between(&self.aabb(), obstacle);
        if hits.bottom && gate.allows(self.velocity.y) {
            self.position.y = obstacle.min.y - self.size.y;
            self.velocity.y = 0.0;
        }
        if hits.top && gate.allows(-self.velocity.y) {
            self.position.y = obstacle.max.y;
            self.velocity.y = 0.0;
        }
        if hits.left && gate.allows(-self.velocity.x) {
            self.position.x = obstacle.max.x;
            self.velocity.x = 0.0;
        }
        if hits.right && gate.allows(self.velocity.x) {
            self.position.x = obstacle.min.x - self.size.x;
            self.velocity.x = 0.0;
        }
        hits
    }

    /// Loose-object response: snap flush to the first hit side and stop dead.
    pub fn settle_against(&mut self, obstacle: &Aabb) -> bool {
        let hits = SideHits::between(&self.aabb(), obstacle);
        if hits.top {
            self.position.y = obstacle.max.y;
        } else if hits.bottom {
            self.position.y = obstacle.min.y - self.size.y;
        } else if hits.left {
            self.position.x = obstacle.max.x;
        } else if hits.right {
            self.position.x = obstacle.min.x - self.size.x;
        } else {
            return false;
        }
        self.velocity = Vec2::ZERO;
        true
    }

    /// Move by the full velocity in sub-steps no longer than `max_step` on
    /// either axis, stopping at the first step where `blocked` reports a hit.
    ///
    /// Returns true if the body was stopped.
    pub fn sweep(&mut self, max_step: f32, blocked: impl Fn(&Aabb) -> bool) -> bool {
        if !self.velocity.is_finite() {
            return false;
        }
        let max_step = max_step.max(1.0);
        let mut step = self.velocity;
        let mut steps = 1u32;
        while step.x.abs() > max_step || step.y.abs() > max_step {
            step /= 2.0;
            steps *= 2;
        }
        for _ in 0..steps {
            self.position += step;
            if blocked(&self.aabb()) {
                self.velocity = Vec2::ZERO;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Aabb {
        Aabb::new(Vec2::new(0.0, 100.0), Vec2::new(200.0, 48.0))
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(!a.contains_point(Vec2::new(10.0, 5.0)));
        assert!(b.contains_point(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn falling_body_lands_on_top() {
        let mut body = PhysicsBody::new(Vec2::new(50.0, 30.0), Vec2::new(40.0, 76.0))
            .with_gravity(1.75, 50.0);
        body.velocity.y = 10.0;
        body.integrate();
        let hits = body.resolve_against(&floor(), SignGate::Inclusive);
        assert!(hits.bottom);
        assert_eq!(body.position.y, 100.0 - 76.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn resting_body_is_not_moved_by_resolution() {
        let mut body = PhysicsBody::new(Vec2::new(50.0, 24.0), Vec2::new(40.0, 76.0));
        let before = body.clone();
        for gate in [SignGate::Inclusive, SignGate::Strict] {
            let hits = body.resolve_against(&floor(), gate);
            assert!(!hits.any());
            assert_eq!(body, before);
        }
    }

    #[test]
    fn moving_away_is_not_corrected() {
        // Overlapping the floor from above while already moving up
        let mut body = PhysicsBody::new(Vec2::new(50.0, 30.0), Vec2::new(40.0, 76.0));
        body.velocity.y = -5.0;
        let hits = body.resolve_against(&floor(), SignGate::Inclusive);
        assert!(hits.bottom);
        assert_eq!(body.position.y, 30.0);
        assert_eq!(body.velocity.y, -5.0);
    }

    #[test]
    fn sign_gate_decides_zero_velocity_wall_contact() {
        let wall = Aabb::new(Vec2::new(100.0, 0.0), Vec2::new(48.0, 200.0));
        let start = PhysicsBody::new(Vec2::new(70.0, 50.0), Vec2::new(40.0, 40.0));

        let mut inclusive = start.clone();
        assert!(inclusive.resolve_against(&wall, SignGate::Inclusive).right);
        assert_eq!(inclusive.position.x, 60.0);

        let mut strict = start.clone();
        strict.resolve_against(&wall, SignGate::Strict);
        assert_eq!(strict.position.x, 70.0);
    }

    #[test]
    fn terminal_velocity_clamps_before_moving() {
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::splat(10.0)).with_gravity(1.75, 50.0);
        body.velocity.y = 49.5;
        body.integrate();
        assert_eq!(body.velocity.y, 50.0);
        assert_eq!(body.position.y, 50.0);
    }

    #[test]
    fn knockback_persists_in_air_and_decays_at_rest() {
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::splat(10.0)).with_gravity(1.75, 50.0);
        body.add_knockback(Vec2::new(5.0, -15.0));
        body.integrate();
        assert_eq!(body.knockback, 5.0);
        assert_eq!(body.position.x, 5.0);

        // Landed: collision zeroed vertical velocity
        body.velocity.y = 0.0;
        body.integrate();
        assert_eq!(body.knockback, 0.0);
    }

    #[test]
    fn sweep_stops_on_thin_wall() {
        let wall = Aabb::new(Vec2::new(200.0, 0.0), Vec2::new(4.0, 100.0));
        let mut body = PhysicsBody::new(Vec2::new(0.0, 40.0), Vec2::new(16.0, 8.0))
            .with_velocity(Vec2::new(500.0, 0.0));
        let stopped = body.sweep(16.0, |aabb| aabb.overlaps(&wall));
        assert!(stopped);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(body.position.x < 204.0);
    }

    #[test]
    fn sweep_without_obstacles_moves_full_distance() {
        let mut body =
            PhysicsBody::new(Vec2::ZERO, Vec2::splat(8.0)).with_velocity(Vec2::new(-500.0, 30.0));
        assert!(!body.sweep(16.0, |_| false));
        assert_eq!(body.position, Vec2::new(-500.0, 30.0));
    }

    #[test]
    fn settle_stops_on_first_side() {
        let mut body = PhysicsBody::new(Vec2::new(10.0, 90.0), Vec2::splat(42.0))
            .with_velocity(Vec2::new(3.0, 8.0));
        assert!(body.settle_against(&floor()));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.position.y, 100.0 - 42.0);
    }
}
