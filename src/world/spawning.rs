//! Map instantiation: terrain grid, props, enemies and the boss.

use std::time::Duration;

use bevy::prelude::*;

use super::data::{LayerDepth, MapDefinition, Placement, TileKind};
use super::interactables::{
    spawn_checkpoint, spawn_chest, spawn_coin, spawn_dispenser, spawn_effect_plate, Placed,
};
use crate::core::{GameConfig, SimRng};
use crate::enemies::{spawn_boss, spawn_enemy, EnemyRegistry};
use crate::inventory::StackSpec;
use crate::physics::{Axis, MovingPlatform, SolidBlock, Terrain, TileMap};
use crate::rendering::{DrawLayer, SpriteKey};

/// Marker for everything a map reload tears down. The player is not one.
#[derive(Component)]
pub struct LevelEntity;

/// Shared inputs for building a level.
pub struct LevelContext<'a> {
    pub registry: &'a EnemyRegistry,
    pub config: &'a GameConfig,
    pub now: Duration,
}

/// Collision grid for the map's blocks and spikes.
pub fn build_tile_map(map: &MapDefinition) -> TileMap {
    let mut tiles = TileMap::new(map.cell_size, map.width as i32, map.height as i32);
    for tile in &map.tiles {
        let terrain = match tile.kind {
            TileKind::Block => Terrain::Solid,
            TileKind::Spike => Terrain::Spike,
            _ => continue,
        };
        tiles.insert(tile.cell, terrain);
    }
    tiles
}

fn depth_layer(depth: LayerDepth) -> DrawLayer {
    match depth {
        LayerDepth::Background => DrawLayer::Background,
        LayerDepth::Foreground => DrawLayer::Foreground,
    }
}

/// Spawn every entity the map describes and return its collision grid.
pub fn spawn_level(
    commands: &mut Commands,
    map: &MapDefinition,
    context: &LevelContext,
    rng: &mut SimRng,
) -> TileMap {
    let tiles = build_tile_map(map);

    for tile in &map.tiles {
        let rect = tiles.cell_rect(tile.cell);
        let key = match tile.kind {
            TileKind::Checkpoint => {
                spawn_checkpoint(commands, rect);
                continue;
            }
            TileKind::Coin => {
                spawn_coin(commands, rect);
                continue;
            }
            TileKind::Block => "tile/block",
            TileKind::Spike => "tile/spike",
            TileKind::Decor => "tile/decor",
        };
        commands.spawn((
            Placed(rect),
            SpriteKey::new(key, depth_layer(tile.depth)),
            LevelEntity,
        ));
    }

    let mut enemies = 0;
    for placement in &map.placements {
        match placement {
            Placement::MovingPlatform {
                rect,
                axis,
                end,
                speed,
            } => {
                let start = match axis {
                    Axis::Horizontal => rect.min.x,
                    Axis::Vertical => rect.min.y,
                };
                commands.spawn((
                    MovingPlatform::new(*axis, start, *end, *speed),
                    SolidBlock::fixed(*rect),
                    SpriteKey::new("platform", DrawLayer::Midground),
                    LevelEntity,
                ));
            }
            Placement::Enemy(spawn) => {
                if spawn_enemy(commands, context.registry, context.config, rng, spawn).is_some() {
                    enemies += 1;
                }
            }
            Placement::Boss { kind, bottom_left } => {
                if spawn_boss(
                    commands,
                    context.registry,
                    context.config,
                    rng,
                    kind,
                    *bottom_left,
                    context.now,
                )
                .is_some()
                {
                    info!("Boss '{}' waits at {:?}", kind, bottom_left);
                }
            }
            Placement::Chest { top_left, contents } => {
                spawn_chest(
                    commands,
                    *top_left,
                    contents.iter().flat_map(StackSpec::instantiate).collect(),
                );
            }
            Placement::Dispenser { rect, heading } => {
                spawn_dispenser(commands, *rect, *heading);
            }
            Placement::EffectPlate {
                rect,
                effect,
                cooldown_ms,
            } => {
                spawn_effect_plate(commands, *rect, *effect, Duration::from_millis(*cooldown_ms));
            }
        }
    }

    info!(
        "Built map '{}': {} tiles, {} objects, {} enemies",
        map.name,
        map.tiles.len(),
        map.placements.len(),
        enemies
    );
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::data::PlacedTile;
    use crate::physics::Aabb;

    #[test]
    fn only_blocks_and_spikes_collide() {
        let mut map = MapDefinition::empty("grid");
        map.width = 4;
        map.height = 1;
        for (x, kind) in [
            TileKind::Block,
            TileKind::Spike,
            TileKind::Coin,
            TileKind::Decor,
        ]
        .into_iter()
        .enumerate()
        {
            map.tiles.push(PlacedTile {
                cell: IVec2::new(x as i32, 0),
                kind,
                depth: LayerDepth::Background,
            });
        }

        let tiles = build_tile_map(&map);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles.get(IVec2::new(0, 0)), Some(Terrain::Solid));
        assert_eq!(tiles.get(IVec2::new(1, 0)), Some(Terrain::Spike));
        assert_eq!(tiles.get(IVec2::new(2, 0)), None);
        assert_eq!(
            tiles.overlapping(&Aabb::new(Vec2::ZERO, Vec2::new(192.0, 48.0))).len(),
            2
        );
    }
}
