//! Map data structures and RON loading.
//!
//! A map file is read into [`MapDefinitionRaw`] and then resolved into a
//! [`MapDefinition`]: tile rows are checked against the map width and
//! looked up in their layer palette, and each object's property bag is turned
//! into a typed [`Placement`]. Every problem surfaces as a [`DataLoadError`],
//! except unknown object kinds, which are logged and skipped.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;
use crate::combat::EffectTemplate;
use crate::enemies::{EnemySpawn, WeaponClass};
use crate::inventory::StackSpec;
use crate::physics::{Aabb, Axis, Heading};

pub const MAPS_DIR: &str = "assets/data/maps";

/// Characters that never need a palette entry.
const EMPTY_CELLS: [char; 2] = ['.', ' '];

const DEFAULT_PLATE_COOLDOWN_MS: i64 = 1000;

/// What a tile character stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TileKind {
    Block,
    Spike,
    Checkpoint,
    Coin,
    /// Background or foreground art, not collidable
    Decor,
}

/// Loosely typed value from an object's property bag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<PropertyValue>),
    Effect(EffectTemplate),
    Items(Vec<StackSpec>),
}

impl PropertyValue {
    fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Text(_) => "text",
            PropertyValue::List(_) => "list",
            PropertyValue::Effect(_) => "effect",
            PropertyValue::Items(_) => "items",
        }
    }
}

/// An object as written in an object layer. Position is in tiles.
#[derive(Debug, Clone, Deserialize)]
pub struct MapObject {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub enum Layer {
    Tiles {
        name: String,
        rows: Vec<String>,
        #[serde(default)]
        palette: HashMap<char, TileKind>,
    },
    Objects {
        name: String,
        objects: Vec<MapObject>,
    },
}

fn default_tile_size() -> f32 {
    48.0
}

fn default_tile_scale() -> f32 {
    1.0
}

/// Raw map definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDefinitionRaw {
    pub name: String,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_tile_scale")]
    pub tile_scale: f32,
    pub width: usize,
    pub height: usize,
    /// In tiles
    pub player_start: (f32, f32),
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Where a tile layer is drawn relative to the actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerDepth {
    Background,
    Foreground,
}

impl LayerDepth {
    fn from_layer_name(name: &str) -> Self {
        if name.to_ascii_lowercase().contains("foreground") {
            LayerDepth::Foreground
        } else {
            LayerDepth::Background
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTile {
    pub cell: IVec2,
    pub kind: TileKind,
    pub depth: LayerDepth,
}

/// A resolved map object in world units.
#[derive(Debug, Clone)]
pub enum Placement {
    MovingPlatform {
        rect: Aabb,
        axis: Axis,
        end: f32,
        speed: f32,
    },
    Enemy(EnemySpawn),
    Boss {
        kind: String,
        bottom_left: Vec2,
    },
    Chest {
        top_left: Vec2,
        contents: Vec<StackSpec>,
    },
    Dispenser {
        rect: Aabb,
        heading: Heading,
    },
    EffectPlate {
        rect: Aabb,
        effect: EffectTemplate,
        cooldown_ms: u64,
    },
}

/// Processed map with resolved tiles and placements.
#[derive(Debug, Clone)]
pub struct MapDefinition {
    pub name: String,
    /// `tile_size * tile_scale`
    pub cell_size: f32,
    pub width: usize,
    pub height: usize,
    pub player_start: Vec2,
    pub tiles: Vec<PlacedTile>,
    pub placements: Vec<Placement>,
}

impl MapDefinition {
    /// A map with nothing in it, used when the map file cannot be loaded.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cell_size: default_tile_size(),
            width: 0,
            height: 0,
            player_start: Vec2::ZERO,
            tiles: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Resolve palettes and property bags.
    pub fn from_raw(raw: MapDefinitionRaw) -> Result<Self, DataLoadError> {
        let cell_size = raw.tile_size * raw.tile_scale;
        let mut tiles = Vec::new();
        let mut placements = Vec::new();

        for layer in &raw.layers {
            match layer {
                Layer::Tiles {
                    name,
                    rows,
                    palette,
                } => resolve_tiles(name, rows, palette, raw.width, &mut tiles)?,
                Layer::Objects { objects, .. } => {
                    for object in objects {
                        match resolve_object(object, cell_size) {
                            Ok(placement) => placements.push(placement),
                            Err(DataLoadError::UnknownObject(kind)) => warn!(
                                "Skipping unknown map object '{}' at ({}, {})",
                                kind, object.x, object.y
                            ),
                            Err(err) => return Err(err),
                        }
                    }
                }
            }
        }

        Ok(Self {
            name: raw.name,
            cell_size,
            width: raw.width,
            height: raw.height,
            player_start: Vec2::from(raw.player_start) * cell_size,
            tiles,
            placements,
        })
    }

    pub fn tile_count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }
}

fn resolve_tiles(
    layer: &str,
    rows: &[String],
    palette: &HashMap<char, TileKind>,
    width: usize,
    out: &mut Vec<PlacedTile>,
) -> Result<(), DataLoadError> {
    let depth = LayerDepth::from_layer_name(layer);
    for (y, row) in rows.iter().enumerate() {
        let actual = row.chars().count();
        if actual != width {
            return Err(DataLoadError::GridMismatch {
                layer: layer.to_string(),
                row: y,
                expected: width,
                actual,
            });
        }
        for (x, character) in row.chars().enumerate() {
            if EMPTY_CELLS.contains(&character) {
                continue;
            }
            let Some(kind) = palette.get(&character) else {
                return Err(DataLoadError::UnknownPaletteEntry {
                    layer: layer.to_string(),
                    character,
                    x,
                    y,
                });
            };
            out.push(PlacedTile {
                cell: IVec2::new(x as i32, y as i32),
                kind: *kind,
                depth,
            });
        }
    }
    Ok(())
}

fn resolve_object(object: &MapObject, cell: f32) -> Result<Placement, DataLoadError> {
    let props = Properties(object);
    let origin = Vec2::new(object.x, object.y) * cell;

    let placement = match object.kind.as_str() {
        "moving_platform" => {
            let size = Vec2::new(
                props.number_or("width", 1.0)?,
                props.number_or("height", 1.0)?,
            ) * cell;
            let axis = props.parse::<Axis>("axis", "horizontal or vertical")?;
            Placement::MovingPlatform {
                rect: Aabb::new(origin, size),
                axis,
                end: props.number("end")? * cell,
                speed: props.number("speed")?,
            }
        }
        "enemy" => Placement::Enemy(EnemySpawn {
            kind: props.text("type")?.to_string(),
            bottom_left: origin,
            patrol_to: props.number("end")? * cell,
            weapon: props.parse::<WeaponClass>("weapon", "sword or bow")?,
            damage: props.int_or("damage", 1)? as i32,
            hp: props.optional_int("hp")?.map(|hp| hp as i32),
        }),
        "boss" => Placement::Boss {
            kind: props.text_or("type", "shaman")?.to_string(),
            bottom_left: origin,
        },
        "chest" => Placement::Chest {
            top_left: origin,
            contents: props.items("contents")?,
        },
        "dispenser" => Placement::Dispenser {
            rect: Aabb::new(origin, Vec2::splat(cell)),
            heading: props.parse::<Heading>("facing", "left, right, up or down")?,
        },
        "effect_plate" => {
            let cooldown = props.int_or("cooldown", DEFAULT_PLATE_COOLDOWN_MS)?;
            Placement::EffectPlate {
                rect: Aabb::new(origin, Vec2::splat(cell)),
                effect: props.effect("effect")?,
                cooldown_ms: u64::try_from(cooldown)
                    .map_err(|_| props.invalid("cooldown", "a non-negative int"))?,
            }
        }
        other => return Err(DataLoadError::UnknownObject(other.to_string())),
    };
    Ok(placement)
}

/// Typed accessors over an object's property bag.
struct Properties<'a>(&'a MapObject);

impl<'a> Properties<'a> {
    fn get(&self, key: &str) -> Result<&'a PropertyValue, DataLoadError> {
        self.0
            .properties
            .get(key)
            .ok_or_else(|| DataLoadError::MissingProperty {
                object: self.0.kind.clone(),
                property: key.to_string(),
            })
    }

    fn invalid(&self, key: &str, expected: &str) -> DataLoadError {
        DataLoadError::InvalidProperty {
            object: self.0.kind.clone(),
            property: key.to_string(),
            expected: expected.to_string(),
        }
    }

    fn number(&self, key: &str) -> Result<f32, DataLoadError> {
        match self.get(key)? {
            PropertyValue::Int(value) => Ok(*value as f32),
            PropertyValue::Float(value) => Ok(*value as f32),
            other => Err(self.invalid(key, &format!("a number, found {}", other.type_name()))),
        }
    }

    fn number_or(&self, key: &str, fallback: f32) -> Result<f32, DataLoadError> {
        if self.0.properties.contains_key(key) {
            self.number(key)
        } else {
            Ok(fallback)
        }
    }

    fn optional_int(&self, key: &str) -> Result<Option<i64>, DataLoadError> {
        match self.0.properties.get(key) {
            None => Ok(None),
            Some(PropertyValue::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(self.invalid(key, &format!("an int, found {}", other.type_name()))),
        }
    }

    fn int_or(&self, key: &str, fallback: i64) -> Result<i64, DataLoadError> {
        Ok(self.optional_int(key)?.unwrap_or(fallback))
    }

    fn text(&self, key: &str) -> Result<&'a str, DataLoadError> {
        match self.get(key)? {
            PropertyValue::Text(value) => Ok(value),
            other => Err(self.invalid(key, &format!("text, found {}", other.type_name()))),
        }
    }

    fn text_or(&self, key: &str, fallback: &'a str) -> Result<&'a str, DataLoadError> {
        if self.0.properties.contains_key(key) {
            self.text(key)
        } else {
            Ok(fallback)
        }
    }

    fn parse<T: std::str::FromStr>(&self, key: &str, expected: &str) -> Result<T, DataLoadError> {
        self.text(key)?
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| self.invalid(key, expected))
    }

    fn effect(&self, key: &str) -> Result<EffectTemplate, DataLoadError> {
        match self.get(key)? {
            PropertyValue::Effect(effect) => Ok(*effect),
            other => Err(self.invalid(key, &format!("an effect, found {}", other.type_name()))),
        }
    }

    /// Item list; a missing key means an empty list.
    fn items(&self, key: &str) -> Result<Vec<StackSpec>, DataLoadError> {
        match self.0.properties.get(key) {
            None => Ok(Vec::new()),
            Some(PropertyValue::Items(items)) => Ok(items.clone()),
            Some(other) => Err(self.invalid(key, &format!("items, found {}", other.type_name()))),
        }
    }
}

pub fn map_path(name: &str) -> PathBuf {
    Path::new(MAPS_DIR).join(format!("{name}.map.ron"))
}

/// Parse map RON text.
pub fn parse_map(contents: &str, path: &str) -> Result<MapDefinition, DataLoadError> {
    let raw: MapDefinitionRaw = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    MapDefinition::from_raw(raw)
}

/// Read and resolve `assets/data/maps/<name>.map.ron`.
pub fn load_map(name: &str) -> Result<MapDefinition, DataLoadError> {
    let path = map_path(name);
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = fs::read_to_string(&path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_map(&contents, &display)
}

/// The map the level is built from.
#[derive(Resource, Debug, Clone)]
pub struct CurrentMap(pub MapDefinition);
