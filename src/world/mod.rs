//! World module - maps, level building and interactables.

mod data;
mod error;
mod interactables;
mod plugin;
mod spawning;

pub use data::{
    load_map, map_path, parse_map, CurrentMap, Layer, LayerDepth, MapDefinition,
    MapDefinitionRaw, MapObject, PlacedTile, Placement, PropertyValue, TileKind, MAPS_DIR,
};
pub use error::DataLoadError;
pub use interactables::{
    spawn_checkpoint, spawn_chest, spawn_coin, spawn_dispenser, spawn_effect_plate, Checkpoint,
    Chest, Coin, Dispenser, EffectPlate, Placed, CHEST_SIZE,
};
pub use plugin::{load_current_map, reload_level, setup_level, WorldPlugin};
pub use spawning::{build_tile_map, spawn_level, LevelContext, LevelEntity};
