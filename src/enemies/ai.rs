//! Enemy AI behavior systems.

use bevy::prelude::*;

use super::components::{Boss, Enemy, EnemyType, Patrol, Spell};
use crate::animation::{AnimKind, AnimationController, FrameCounts};
use crate::combat::{
    spawn_arrow, spawn_fireball, Allegiance, Dying, Grip, Health, Hit, Mobility, Projectile, Sword,
    Usable, WeaponIntent, Wielded, BOW_MAX_STAGE,
};
use crate::core::{DamageEvent, DeathEvent, SimClock, SimRng};
use crate::physics::{Aabb, Heading, PhysicsBody, Side};
use crate::player::Player;

/// How far ahead a bow wielder watches for the player.
const BOW_LANE: f32 = 500.0;
const BOSS_ARROW_POWER: f32 = 20.0;
const BOSS_RECOIL: Vec2 = Vec2::new(10.0, -10.0);
const KICK_STEP: f32 = 30.0;
const KICK_KNOCKBACK: Vec2 = Vec2::new(15.0, -15.0);
const KICK_DAMAGE: i32 = 4;

/// Strip ahead of an archer, as tall as its body.
fn bow_lane(body: &Aabb, side: Side) -> Aabb {
    let x = match side {
        Side::Right => body.center().x,
        Side::Left => body.center().x - BOW_LANE,
    };
    Aabb::new(Vec2::new(x, body.min.y), Vec2::new(BOW_LANE, body.size().y))
}

/// Walk the patrol route and decide what the weapon should do.
pub fn enemy_intent(
    players: Query<&PhysicsBody, With<Player>>,
    mut enemies: Query<
        (
            &mut PhysicsBody,
            &mut Side,
            &mut Patrol,
            &Mobility,
            &mut AnimationController,
            &FrameCounts,
            &Wielded,
            &mut WeaponIntent,
        ),
        (With<Enemy>, Without<Dying>, Without<Player>),
    >,
) {
    let player = players.get_single().ok().map(PhysicsBody::aabb);

    for (mut body, mut side, mut patrol, mobility, mut animation, counts, wielded, mut intent) in
        enemies.iter_mut()
    {
        if patrol.can_move {
            body.velocity.x = side.sign() * mobility.walk_speed;
            if patrol.should_turn(body.position.x) {
                *side = side.flipped();
            }
            animation.play(counts, AnimKind::Run, *side);
        }

        *intent = WeaponIntent::default();
        let Some(player) = player else {
            patrol.can_move = true;
            continue;
        };
        let owner = body.aabb();

        match &wielded.0 {
            Usable::Sword(_) => {
                let blade = Grip {
                    owner,
                    side: *side,
                }
                .hand_box(Sword::SIZE);
                intent.trigger_pressed = blade.overlaps(&player);
                patrol.can_move = true;
            }
            Usable::Bow(bow) => {
                if bow_lane(&owner, *side).overlaps(&player) && bow.stage() < BOW_MAX_STAGE {
                    body.velocity.x = 0.0;
                    patrol.can_move = false;
                    animation.play(counts, AnimKind::Idle, *side);
                    intent.trigger_held = true;
                } else {
                    patrol.can_move = true;
                }
            }
            _ => patrol.can_move = true,
        }
    }
}

/// Guard the arena, close in on the player and cast spells.
#[allow(clippy::too_many_arguments)]
pub fn boss_behavior(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut rng: ResMut<SimRng>,
    players: Query<(Entity, &PhysicsBody), With<Player>>,
    mut bosses: Query<
        (
            Entity,
            &mut Boss,
            &mut PhysicsBody,
            &mut Side,
            &mut Health,
            &Mobility,
            &mut AnimationController,
            &FrameCounts,
            &Allegiance,
        ),
        (Without<Dying>, Without<Player>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, player_body)) = players.get_single() else {
        return;
    };
    let player = player_body.aabb();
    let now = clock.now;

    for (entity, mut boss, mut body, mut side, mut health, mobility, mut animation, counts, team) in
        bosses.iter_mut()
    {
        if !boss.arena.overlaps(&player) {
            animation.play(counts, AnimKind::Idle, Side::Right);
            body.set_center(boss.arena.center());
            health.restore_full();
            continue;
        }

        if body.position.x >= player.min.x {
            *side = Side::Left;
        } else {
            *side = Side::Right;
        }

        if !Boss::attack_box(body.center()).overlaps(&player) {
            body.velocity.x = side.sign() * mobility.walk_speed;
            animation.play(counts, AnimKind::Run, *side);
            continue;
        }

        animation.play(counts, AnimKind::Idle, *side);
        body.velocity.x = 0.0;

        if boss.spell_delay.check(now) {
            boss.spell = rng.choose(&Spell::ALL).copied();
            let delay = rng.choose(&Spell::DELAYS_MS).copied().unwrap_or(3000);
            boss.spell_delay.new_delay(std::time::Duration::from_millis(delay));
            boss.kick.reset(now);
        }

        let projectile = Projectile {
            targets: team.opponent(),
            source: Some(entity),
        };
        match boss.spell {
            Some(Spell::Fireballs) => {
                spawn_fireball(&mut commands, body.center(), Heading::from(*side), projectile, now);
                body.add_knockback(Vec2::new(-side.sign() * BOSS_RECOIL.x, BOSS_RECOIL.y));
                boss.spell = None;
            }
            Some(Spell::Arrows) => {
                spawn_arrow(&mut commands, body.center(), *side, BOSS_ARROW_POWER, projectile);
                boss.spell = None;
            }
            Some(Spell::Kick) => {
                if boss.kick.is_ready(now) {
                    boss.spell = None;
                } else {
                    body.position.x += side.sign() * KICK_STEP;
                    if body.aabb().overlaps(&player) {
                        damage_events.send(DamageEvent {
                            target: player_entity,
                            source: Some(entity),
                            hit: Hit::new(KICK_DAMAGE).with_knockback(Vec2::new(
                                side.sign() * KICK_KNOCKBACK.x,
                                KICK_KNOCKBACK.y,
                            )),
                        });
                        boss.spell = None;
                    }
                }
            }
            None => {}
        }
    }
}

pub fn announce_boss_defeat(
    mut death_events: EventReader<DeathEvent>,
    bosses: Query<&EnemyType, With<Boss>>,
) {
    for event in death_events.read() {
        if let Ok(kind) = bosses.get(event.entity) {
            info!("Boss '{}' defeated", kind.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_extends_in_facing_direction() {
        let body = Aabb::new(Vec2::new(100.0, 0.0), Vec2::new(72.0, 96.0));
        let right = bow_lane(&body, Side::Right);
        assert_eq!(right.min.x, 136.0);
        assert_eq!(right.max.x, 636.0);
        let left = bow_lane(&body, Side::Left);
        assert_eq!(left.max.x, 136.0);
        assert_eq!(left.size().y, 96.0);
    }
}
