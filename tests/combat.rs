//! Combat integration tests
//!
//! Drives the headless simulation frame by frame and checks:
//! - damage gating lives on the victim
//! - enemies die through the dying sequence and drop their loot
//! - arrows and fireballs hurt whatever team they target

mod common;

use bevy::prelude::*;

use common::*;
use ruins_platformer::combat::{
    spawn_arrow, spawn_fireball, ActiveEffects, Allegiance, Dying, EffectKind, Hit, ItemKind,
    Projectile,
};
use ruins_platformer::core::{DamageEvent, DeathEvent};
use ruins_platformer::inventory::WorldItem;
use ruins_platformer::physics::{Heading, Side};

fn hit(app: &mut App, target: Entity, amount: i32) {
    app.world_mut().send_event(DamageEvent {
        target,
        source: None,
        hit: Hit::new(amount),
    });
}

#[test]
fn repeated_hits_land_once_per_damage_interval() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);
    let player = player(&mut app);
    assert_eq!(hp(&app, player), 16);

    hit(&mut app, player, 1);
    app.update();
    assert_eq!(hp(&app, player), 15);

    // 500 ms window at 60 fps: the next 29 frames are absorbed
    for _ in 0..29 {
        hit(&mut app, player, 1);
        app.update();
    }
    assert_eq!(hp(&app, player), 15);

    run_frames(&mut app, 2);
    hit(&mut app, player, 1);
    app.update();
    assert_eq!(hp(&app, player), 14);
}

#[test]
fn slain_orc_plays_death_then_drops_its_potion() {
    let mut map = ground_map(30);
    map.placements.push(orc_at(900.0, 1000.0));
    let mut app = start(map);
    run_frames(&mut app, 10);

    let orc = enemies(&mut app)[0];
    hit(&mut app, orc, 10);
    app.update();

    assert_eq!(hp(&app, orc), 0);
    assert!(app.world().get::<Dying>(orc).is_some());
    let deaths: Vec<Entity> = app
        .world_mut()
        .resource_mut::<Events<DeathEvent>>()
        .drain()
        .map(|event| event.entity)
        .collect();
    assert_eq!(deaths, vec![orc]);

    // Six death frames plus the short hold, well under two seconds
    run_frames(&mut app, 120);
    assert!(app.world().get_entity(orc).is_err());

    let drops: Vec<ItemKind> = app
        .world_mut()
        .query::<&WorldItem>()
        .iter(app.world())
        .map(|item| item.stack.kind())
        .collect();
    assert_eq!(drops, vec![ItemKind::Potion]);
}

#[test]
fn dying_enemy_ignores_further_hits() {
    let mut map = ground_map(30);
    map.placements.push(orc_at(900.0, 1000.0));
    let mut app = start(map);
    run_frames(&mut app, 10);

    let orc = enemies(&mut app)[0];
    hit(&mut app, orc, 10);
    app.update();

    // Long enough for the first DeathEvent to leave the event buffers
    run_frames(&mut app, 20);
    hit(&mut app, orc, 10);
    app.update();
    assert_eq!(hp(&app, orc), 0);
    assert!(app.world().resource::<Events<DeathEvent>>().is_empty());
}

#[test]
fn arrow_damage_scales_with_power() {
    let mut map = ground_map(30);
    map.placements.push(orc_at(600.0, 620.0));
    let mut app = start(map);
    run_frames(&mut app, 10);

    let orc = enemies(&mut app)[0];
    let target = body(&app, orc).center();
    let projectile = Projectile {
        targets: Allegiance::Hostile,
        source: None,
    };
    let arrow = spawn_arrow(
        &mut app.world_mut().commands(),
        Vec2::new(target.x - 100.0, target.y),
        Side::Right,
        30.0,
        projectile,
    )
    .expect("full power arrow");
    app.world_mut().flush();

    run_frames(&mut app, 10);
    assert_eq!(hp(&app, orc), 5);
    assert!(app.world().get_entity(arrow).is_err());
}

#[test]
fn zero_power_release_fires_nothing() {
    let mut app = start(ground_map(10));
    let arrow = spawn_arrow(
        &mut app.world_mut().commands(),
        Vec2::new(100.0, 100.0),
        Side::Right,
        0.0,
        Projectile {
            targets: Allegiance::Hostile,
            source: None,
        },
    );
    assert!(arrow.is_none());
}

#[test]
fn fireball_burns_the_player() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);
    let player = player(&mut app);
    let center = body(&app, player).center();

    let now = now(&app);
    spawn_fireball(
        &mut app.world_mut().commands(),
        center - Vec2::new(60.0, 0.0),
        Heading::Right,
        Projectile {
            targets: Allegiance::Player,
            source: None,
        },
        now,
    );
    app.world_mut().flush();

    run_frames(&mut app, 20);
    assert!(hp(&app, player) <= 11, "5 damage on contact");
    let burning = app
        .world()
        .get::<ActiveEffects>(player)
        .and_then(|effects| effects.get(EffectKind::Damage))
        .is_some();
    assert!(burning);
}
