//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::animation::FrameCounts;
use crate::core::SimRng;
use crate::inventory::{ItemSpec, ItemStack};
use crate::world::DataLoadError;

pub const ENEMIES_DIR: &str = "assets/data/enemies";

fn default_walk_speed() -> f32 {
    3.0
}

fn one() -> u32 {
    1
}

/// One loot table line; the amount is rolled in `[min, max]` at spawn.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LootEntry {
    pub item: ItemSpec,
    #[serde(default = "one")]
    pub min: u32,
    #[serde(default = "one")]
    pub max: u32,
}

impl LootEntry {
    pub fn new(item: ItemSpec, min: u32, max: u32) -> Self {
        Self { item, min, max }
    }

    pub fn roll(&self, rng: &mut SimRng) -> Vec<ItemStack> {
        self.item.stacks(rng.range_u32(self.min, self.max))
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_hp: i32,
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    pub size: (f32, f32),
    #[serde(default)]
    pub frames: FrameCounts,
    /// Sprite catalog key prefix
    pub sprite: String,
    #[serde(default)]
    pub loot: Vec<LootEntry>,
}

impl EnemyDefinition {
    pub fn size(&self) -> Vec2 {
        Vec2::from(self.size)
    }

    pub fn roll_loot(&self, rng: &mut SimRng) -> Vec<ItemStack> {
        self.loot.iter().flat_map(|entry| entry.roll(rng)).collect()
    }

    fn orc() -> Self {
        Self {
            name: "Orc".to_string(),
            max_hp: 10,
            walk_speed: 3.0,
            size: (72.0, 96.0),
            frames: FrameCounts::default(),
            sprite: "orc".to_string(),
            loot: vec![LootEntry::new(ItemSpec::heal_potion(), 1, 1)],
        }
    }

    fn skeleton() -> Self {
        Self {
            name: "Skeleton".to_string(),
            max_hp: 10,
            walk_speed: 3.0,
            size: (69.0, 96.0),
            frames: FrameCounts::default(),
            sprite: "skeleton".to_string(),
            loot: vec![
                LootEntry::new(ItemSpec::heal_potion(), 1, 1),
                LootEntry::new(ItemSpec::Arrows, 1, 2),
            ],
        }
    }

    fn shaman() -> Self {
        Self {
            name: "Orc Shaman".to_string(),
            max_hp: 50,
            walk_speed: 2.0,
            size: (125.0, 135.0),
            frames: FrameCounts::default(),
            sprite: "shaman".to_string(),
            loot: Vec::new(),
        }
    }
}

/// Resource holding all enemy definitions, keyed by type name.
#[derive(Resource)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EnemyRegistry {
    /// Definitions that exist even without any data files.
    pub fn builtin() -> Self {
        let definitions = [
            ("orc", EnemyDefinition::orc()),
            ("skeleton", EnemyDefinition::skeleton()),
            ("shaman", EnemyDefinition::shaman()),
        ]
        .into_iter()
        .map(|(key, definition)| (key.to_string(), definition))
        .collect();
        Self { definitions }
    }

    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Read and parse a single definition file.
pub fn read_definition(path: &Path) -> Result<EnemyDefinition, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Override built-in definitions with files from `assets/data/enemies/`.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMIES_DIR);

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(enemy_type) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
        else {
            continue;
        };

        match read_definition(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("{} enemy definitions available", registry.definitions.len());
}
