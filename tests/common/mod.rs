//! Shared helpers for driving the headless simulation.

#![allow(dead_code)]

use bevy::prelude::*;

use ruins_platformer::combat::Health;
use ruins_platformer::core::{GameConfig, GameState, SimClock};
use ruins_platformer::create_headless_app;
use ruins_platformer::enemies::{Enemy, EnemySpawn, WeaponClass};
use ruins_platformer::physics::PhysicsBody;
use ruins_platformer::player::Player;
use ruins_platformer::world::{LayerDepth, MapDefinition, PlacedTile, Placement, TileKind};

pub const CELL: f32 = 48.0;
/// Top of the ground row in world units.
pub const GROUND_Y: f32 = 480.0;

/// A flat strip of ground `width` tiles long, player near the left edge.
pub fn ground_map(width: usize) -> MapDefinition {
    let mut map = MapDefinition::empty("test");
    map.width = width;
    map.height = 12;
    map.cell_size = CELL;
    map.player_start = Vec2::new(96.0, 400.0);
    for x in 0..width {
        map.tiles.push(PlacedTile {
            cell: IVec2::new(x as i32, 10),
            kind: TileKind::Block,
            depth: LayerDepth::Background,
        });
    }
    map
}

pub fn orc_at(x: f32, patrol_to: f32) -> Placement {
    Placement::Enemy(EnemySpawn {
        kind: "orc".to_string(),
        bottom_left: Vec2::new(x, GROUND_Y),
        patrol_to,
        weapon: WeaponClass::Sword,
        damage: 1,
        hp: None,
    })
}

/// Build the app and run the first frame, which loads the level.
pub fn start(map: MapDefinition) -> App {
    let mut app = create_headless_app(GameConfig::default(), map);
    app.update();
    app
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
}

pub fn enemies(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<Enemy>>()
        .iter(app.world())
        .collect()
}

pub fn hp(app: &App, entity: Entity) -> i32 {
    app.world().get::<Health>(entity).map(Health::hp).unwrap_or(0)
}

pub fn body(app: &App, entity: Entity) -> PhysicsBody {
    app.world()
        .get::<PhysicsBody>(entity)
        .cloned()
        .expect("entity has a body")
}

pub fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

pub fn now(app: &App) -> std::time::Duration {
    app.world().resource::<SimClock>().now
}
