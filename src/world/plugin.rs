//! World plugin - map loading, level building and interactables.

use bevy::prelude::*;

use super::data::{load_map, CurrentMap, MapDefinition};
use super::interactables::{
    apply_plates, collect_coins, fire_dispensers, open_chests, touch_checkpoints,
};
use super::spawning::{spawn_level, LevelContext, LevelEntity};
use crate::core::{GameConfig, GameState, ReloadMapEvent, SimClock, SimRng, SimSet};
use crate::enemies::EnemyRegistry;
use crate::player::{spawn_player, Player};

/// World plugin - handles map loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_current_map)
            .add_systems(OnExit(GameState::Loading), setup_level)
            .add_systems(
                Update,
                (
                    touch_checkpoints,
                    collect_coins,
                    open_chests,
                    fire_dispensers,
                    apply_plates,
                )
                    .in_set(SimSet::Combat),
            )
            .add_systems(Update, reload_level.in_set(SimSet::Cleanup));
    }
}

/// Read the start map unless one was provided up front.
pub fn load_current_map(
    mut commands: Commands,
    config: Res<GameConfig>,
    current: Option<Res<CurrentMap>>,
) {
    if current.is_some() {
        return;
    }
    let map = match load_map(&config.start_map) {
        Ok(map) => {
            info!("Loaded map: {}", map.name);
            map
        }
        Err(e) => {
            error!("{}. Starting with an empty map.", e);
            MapDefinition::empty(&config.start_map)
        }
    };
    commands.insert_resource(CurrentMap(map));
}

/// Build the level and put the player at the map start.
pub fn setup_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    clock: Res<SimClock>,
    registry: Res<EnemyRegistry>,
    mut rng: ResMut<SimRng>,
    current: Option<Res<CurrentMap>>,
    players: Query<(), With<Player>>,
) {
    let Some(current) = current else {
        error!("No map loaded, nothing to build");
        return;
    };
    let map = &current.0;
    let context = LevelContext {
        registry: &registry,
        config: &config,
        now: clock.now,
    };
    let tiles = spawn_level(&mut commands, map, &context, &mut rng);
    commands.insert_resource(tiles);

    if players.is_empty() {
        spawn_player(&mut commands, &config, map.player_start);
    }
}

/// Tear down level entities and rebuild them from a fresh read of the map file.
#[allow(clippy::too_many_arguments)]
pub fn reload_level(
    mut commands: Commands,
    mut events: EventReader<ReloadMapEvent>,
    config: Res<GameConfig>,
    clock: Res<SimClock>,
    registry: Res<EnemyRegistry>,
    mut rng: ResMut<SimRng>,
    mut current: ResMut<CurrentMap>,
    level: Query<Entity, With<LevelEntity>>,
) {
    if events.read().count() == 0 {
        return;
    }

    match load_map(&current.0.name) {
        Ok(map) => current.0 = map,
        Err(e) => warn!("{}. Rebuilding the map already in memory.", e),
    }

    let removed = level.iter().count();
    for entity in level.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let context = LevelContext {
        registry: &registry,
        config: &config,
        now: clock.now,
    };
    let tiles = spawn_level(&mut commands, &current.0, &context, &mut rng);
    commands.insert_resource(tiles);
    info!("Reloaded map '{}' ({} entities replaced)", current.0.name, removed);
}
