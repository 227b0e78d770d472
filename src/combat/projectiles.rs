//! Arrows, fireballs and bullets.

use std::time::Duration;

use bevy::prelude::*;

use super::components::{Allegiance, Health, Hit};
use super::effects::{EffectKind, EffectTemplate};
use crate::animation::{AnimKind, AnimationController, FrameCounts};
use crate::core::{
    ApplyEffectEvent, Cooldown, DamageEvent, GameConfig, SimClock, SimRng, SoundCue,
};
use crate::physics::{Aabb, Heading, Obstacles, PhysicsBody, Side, SideHits};
use crate::rendering::{DrawLayer, SpriteKey};

const ARROW_SIZE: Vec2 = Vec2::new(56.0, 14.0);
const ARROW_TERMINAL: f32 = 20.0;
const ARROW_EMBED: f32 = 10.0;
const ARROW_LINGER: Duration = Duration::from_secs(10);
const ARROW_KNOCKBACK: Vec2 = Vec2::new(5.0, -15.0);
/// Smallest draw power that still produces an arrow.
pub const MIN_ARROW_POWER: f32 = 0.5;

const FIREBALL_SIZE: Vec2 = Vec2::new(43.75, 22.5);
const FIREBALL_SPEED: f32 = 4.0;
const FIREBALL_GRACE: Duration = Duration::from_millis(1000);
const FIREBALL_FRAMES: usize = 5;

const BULLET_SIZE: Vec2 = Vec2::new(16.0, 8.0);
const BULLET_SPEED: f32 = 500.0;
const BULLET_SPREAD: f32 = 30.0;
const BULLET_LIFETIME: Duration = Duration::from_millis(250);

/// Shared by every projectile: who it can hurt and who fired it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub targets: Allegiance,
    pub source: Option<Entity>,
}

#[derive(Component, Debug, Clone)]
pub struct Arrow {
    pub power: f32,
    pub side: Side,
    /// Visual tilt in degrees following the flight path
    pub rotation: f32,
    /// Set once the arrow is stuck in terrain
    lodged: Option<Cooldown>,
}

impl Arrow {
    pub fn is_lodged(&self) -> bool {
        self.lodged.is_some()
    }

    pub fn hit(&self) -> Hit {
        Hit::new((self.power / 6.0).round() as i32)
            .with_interval(Duration::ZERO)
            .with_knockback(Vec2::new(ARROW_KNOCKBACK.x * self.side.sign(), ARROW_KNOCKBACK.y))
    }
}

#[derive(Component, Debug, Clone)]
pub struct Fireball {
    pub heading: Heading,
    /// Terrain is ignored until this elapses
    grace: Cooldown,
}

impl Fireball {
    pub fn hit(&self) -> Hit {
        Hit::new(5)
            .with_interval(Duration::from_millis(500))
            .with_knockback(Vec2::new(5.0 * self.heading.horizontal_sign(), -15.0))
    }

    pub fn burn() -> EffectTemplate {
        EffectTemplate::new(EffectKind::Damage, 1000.0, 4001)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    expiry: Cooldown,
}

impl Bullet {
    pub fn effect() -> EffectTemplate {
        EffectTemplate::new(EffectKind::InstantDamage, 10.0, 1000)
    }
}

/// Launch an arrow centred on `origin`. A release with no power fires nothing.
pub fn spawn_arrow(
    commands: &mut Commands,
    origin: Vec2,
    side: Side,
    power: f32,
    projectile: Projectile,
) -> Option<Entity> {
    if !power.is_finite() || power < MIN_ARROW_POWER {
        return None;
    }
    let body = PhysicsBody::centered(origin, ARROW_SIZE)
        .with_velocity(Vec2::new(power * side.sign(), -power / 20.0))
        .with_gravity(2.0 / power, ARROW_TERMINAL);
    let entity = commands
        .spawn((
            Arrow {
                power,
                side,
                rotation: 0.0,
                lodged: None,
            },
            projectile,
            body,
            side,
            SpriteKey::new("arrow", DrawLayer::Midground),
        ))
        .id();
    Some(entity)
}

pub fn spawn_fireball(
    commands: &mut Commands,
    center: Vec2,
    heading: Heading,
    projectile: Projectile,
    now: Duration,
) -> Entity {
    let size = if heading.is_vertical() {
        Vec2::new(FIREBALL_SIZE.y, FIREBALL_SIZE.x)
    } else {
        FIREBALL_SIZE
    };
    let counts = FrameCounts {
        idle: FIREBALL_FRAMES,
        ..default()
    };
    let side = Side::from_sign(heading.horizontal_sign(), Side::Right);
    commands
        .spawn((
            Fireball {
                heading,
                grace: Cooldown::started(now, FIREBALL_GRACE),
            },
            projectile,
            PhysicsBody::centered(center, size).with_velocity(heading.unit() * FIREBALL_SPEED),
            AnimationController::new(counts.sequence(AnimKind::Spin, side)),
            counts,
            side,
            SpriteKey::new("fireball", DrawLayer::Midground),
        ))
        .id()
}

pub fn spawn_bullet(
    commands: &mut Commands,
    origin: Vec2,
    side: Side,
    projectile: Projectile,
    rng: &mut SimRng,
    now: Duration,
) -> Entity {
    let velocity = Vec2::new(
        BULLET_SPEED * side.sign(),
        rng.range_f32(-BULLET_SPREAD, BULLET_SPREAD),
    );
    commands
        .spawn((
            Bullet {
                expiry: Cooldown::started(now, BULLET_LIFETIME),
            },
            projectile,
            PhysicsBody::centered(origin, BULLET_SIZE).with_velocity(velocity),
            side,
            SpriteKey::new("bullet", DrawLayer::Midground),
        ))
        .id()
}

/// Things a projectile can hit.
pub type Targets<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static PhysicsBody, &'static Allegiance),
    (With<Health>, Without<Projectile>),
>;

fn targets_in(targets: &Targets, projectile: &Projectile, area: &Aabb) -> Vec<Entity> {
    targets
        .iter()
        .filter(|(_, body, allegiance)| {
            **allegiance == projectile.targets && body.aabb().overlaps(area)
        })
        .map(|(entity, _, _)| entity)
        .collect()
}

/// Push an arrow flush into the first obstacle edge it crossed, leaving it
/// `ARROW_EMBED` units deep.
fn lodge(body: &mut PhysicsBody, obstacle: &Aabb) -> bool {
    let hits = SideHits::between(&body.aabb(), obstacle);
    if hits.top {
        body.position.y = obstacle.max.y - ARROW_EMBED;
    } else if hits.bottom {
        body.position.y = obstacle.min.y + ARROW_EMBED - body.size.y;
    } else if hits.left {
        body.position.x = obstacle.max.x - ARROW_EMBED;
    } else if hits.right {
        body.position.x = obstacle.min.x + ARROW_EMBED - body.size.x;
    } else {
        return false;
    }
    true
}

pub fn update_arrows(
    mut commands: Commands,
    clock: Res<SimClock>,
    obstacles: Obstacles,
    targets: Targets,
    mut arrows: Query<(Entity, &mut Arrow, &mut PhysicsBody, &Projectile)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut sound_events: EventWriter<SoundCue>,
) {
    for (entity, mut arrow, mut body, projectile) in arrows.iter_mut() {
        if let Some(linger) = arrow.lodged.as_mut() {
            if linger.check(clock.now) {
                commands.entity(entity).despawn_recursive();
            }
            continue;
        }

        let area = body.aabb();
        let blocking = obstacles.overlapping(&area);
        if !blocking.is_empty() {
            body.velocity = Vec2::ZERO;
            for obstacle in &blocking {
                if lodge(&mut body, &obstacle.rect) {
                    break;
                }
            }
            arrow.lodged = Some(Cooldown::started(clock.now, ARROW_LINGER));
            sound_events.send(SoundCue::ArrowImpact);
            continue;
        }

        let struck = targets_in(&targets, projectile, &area);
        if !struck.is_empty() {
            for target in struck {
                damage_events.send(DamageEvent {
                    target,
                    source: projectile.source,
                    hit: arrow.hit(),
                });
            }
            commands.entity(entity).despawn_recursive();
            continue;
        }

        body.integrate();
        arrow.rotation = body.velocity.y * 4.0 * arrow.side.sign();
    }
}

pub fn update_fireballs(
    mut commands: Commands,
    clock: Res<SimClock>,
    obstacles: Obstacles,
    targets: Targets,
    mut fireballs: Query<(Entity, &Fireball, &mut PhysicsBody, &Projectile)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut effect_events: EventWriter<ApplyEffectEvent>,
) {
    for (entity, fireball, mut body, projectile) in fireballs.iter_mut() {
        body.integrate();

        let area = body.aabb();
        if fireball.grace.is_ready(clock.now) && obstacles.any_terrain(&area) {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let struck = targets_in(&targets, projectile, &area);
        if struck.is_empty() {
            continue;
        }
        for target in struck {
            damage_events.send(DamageEvent {
                target,
                source: projectile.source,
                hit: fireball.hit(),
            });
            effect_events.send(ApplyEffectEvent {
                target,
                effect: Fireball::burn(),
            });
        }
        commands.entity(entity).despawn_recursive();
    }
}

pub fn update_bullets(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    obstacles: Obstacles,
    targets: Targets,
    mut bullets: Query<(Entity, &Bullet, &mut PhysicsBody, &Projectile)>,
    mut effect_events: EventWriter<ApplyEffectEvent>,
) {
    for (entity, bullet, mut body, projectile) in bullets.iter_mut() {
        if bullet.expiry.is_ready(clock.now) {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        body.sweep(config.physics.sweep_step, |area| {
            obstacles.any_terrain(area) || !targets_in(&targets, projectile, area).is_empty()
        });

        let struck = targets_in(&targets, projectile, &body.aabb());
        if struck.is_empty() {
            continue;
        }
        for target in struck {
            effect_events.send(ApplyEffectEvent {
                target,
                effect: Bullet::effect(),
            });
        }
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow(power: f32, side: Side) -> Arrow {
        Arrow {
            power,
            side,
            rotation: 0.0,
            lodged: None,
        }
    }

    #[test]
    fn arrow_damage_scales_with_power() {
        assert_eq!(arrow(40.0, Side::Right).hit().amount, 7);
        assert_eq!(arrow(10.0, Side::Right).hit().amount, 2);
        assert_eq!(arrow(10.0, Side::Left).hit().knockback, Vec2::new(-5.0, -15.0));
        assert_eq!(arrow(10.0, Side::Left).hit().interval, Some(Duration::ZERO));
    }

    #[test]
    fn arrow_lodges_ten_units_into_a_wall() {
        let wall = Aabb::new(Vec2::new(100.0, 0.0), Vec2::new(48.0, 200.0));
        // Right edge midpoint just crossed the wall's left edge
        let mut body = PhysicsBody::new(Vec2::new(50.0, 50.0), ARROW_SIZE);
        assert!(lodge(&mut body, &wall));
        assert_eq!(body.aabb().max.x, 110.0);
    }

    #[test]
    fn fireball_knockback_follows_heading() {
        let fireball = Fireball {
            heading: Heading::Left,
            grace: Cooldown::started(Duration::ZERO, FIREBALL_GRACE),
        };
        assert_eq!(fireball.hit().knockback, Vec2::new(-5.0, -15.0));
        let falling = Fireball {
            heading: Heading::Down,
            ..fireball
        };
        assert_eq!(falling.hit().knockback.x, 0.0);
    }
}
