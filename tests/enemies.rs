//! Patrol routes and enemy weapons in the headless simulation.

mod common;

use bevy::prelude::*;

use common::*;
use ruins_platformer::combat::{Arrow, Fireball, Health};
use ruins_platformer::enemies::{Boss, EnemySpawn, WeaponClass};
use ruins_platformer::physics::{PhysicsBody, Side};
use ruins_platformer::world::Placement;

fn shaman_at(x: f32) -> Placement {
    Placement::Boss {
        kind: "shaman".to_string(),
        bottom_left: Vec2::new(x, GROUND_Y),
    }
}

fn boss(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Boss>>()
        .single(app.world())
}

fn projectiles(app: &mut App) -> usize {
    let arrows = app.world_mut().query::<&Arrow>().iter(app.world()).count();
    let fireballs = app.world_mut().query::<&Fireball>().iter(app.world()).count();
    arrows + fireballs
}

#[test]
fn orc_turns_around_at_the_end_of_its_route() {
    let mut map = ground_map(30);
    map.placements.push(orc_at(600.0, 800.0));
    let mut app = start(map);

    let orc = enemies(&mut app)[0];
    let mut turned = false;
    for _ in 0..240 {
        app.update();
        let x = body(&app, orc).position.x;
        assert!((590.0..=810.0).contains(&x), "orc wandered off to {x}");
        if app.world().get::<Side>(orc) == Some(&Side::Left) {
            turned = true;
        }
    }
    assert!(turned);
}

#[test]
fn orc_sword_hurts_a_player_in_reach() {
    let mut map = ground_map(20);
    // Route runs straight through the player at x = 96
    map.placements.push(orc_at(200.0, 40.0));
    let mut app = start(map);
    run_frames(&mut app, 120);

    let player = player(&mut app);
    assert!(hp(&app, player) < 16);
}

#[test]
fn skeleton_stops_to_shoot_a_player_in_its_lane() {
    let mut map = ground_map(30);
    map.placements.push(Placement::Enemy(EnemySpawn {
        kind: "skeleton".to_string(),
        bottom_left: Vec2::new(400.0, GROUND_Y),
        patrol_to: 200.0,
        weapon: WeaponClass::Bow,
        damage: 1,
        hp: None,
    }));
    let mut app = start(map);
    run_frames(&mut app, 300);

    let player = player(&mut app);
    assert!(hp(&app, player) < 16, "arrows reached the player");
}

#[test]
fn boss_heals_and_returns_home_once_the_player_leaves_the_arena() {
    let mut map = ground_map(60);
    map.placements.push(shaman_at(2000.0));
    let mut app = start(map);
    run_frames(&mut app, 10);

    let boss = boss(&mut app);
    let home = app.world().get::<Boss>(boss).expect("boss state").arena.center();
    app.world_mut()
        .get_mut::<Health>(boss)
        .expect("boss health")
        .set_hp(12);
    app.world_mut()
        .get_mut::<PhysicsBody>(boss)
        .expect("boss body")
        .position
        .x += 300.0;

    run_frames(&mut app, 2);
    assert_eq!(hp(&app, boss), 50);
    let center = body(&app, boss).center();
    assert!(center.distance(home) < 0.01, "boss stayed at {center}");
}

#[test]
fn boss_casts_once_the_player_is_in_reach() {
    let mut map = ground_map(30);
    map.placements.push(shaman_at(250.0));
    let mut app = start(map);
    let player = player(&mut app);

    // First cast is 2500 ms after the level loads
    run_frames(&mut app, 140);
    assert_eq!(projectiles(&mut app), 0);
    assert_eq!(hp(&app, player), 16);

    let mut cast = false;
    for _ in 0..60 {
        app.update();
        if projectiles(&mut app) > 0 || hp(&app, player) < 16 {
            cast = true;
            break;
        }
    }
    assert!(cast, "no fireball, arrow or kick reached the player");
}
