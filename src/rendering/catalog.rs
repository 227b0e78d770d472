//! Sprite catalog loaded from an external RON file.
//!
//! Maps a sprite key plus an animation frame to an image path, so art can be
//! rearranged without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use crate::animation::AnimKind;

pub const CATALOG_PATH: &str = "assets/data/rendering/sprites.ron";

/// Image path template. `{anim}` and `{frame}` are substituted when present.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteEntry {
    pub path: String,
}

/// Sprite catalog loaded from assets/data/rendering/sprites.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct SpriteCatalog {
    /// Placeholder drawn for keys the catalog does not know
    pub invalid_texture: String,
    #[serde(default)]
    pub sprites: HashMap<String, SpriteEntry>,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self {
            invalid_texture: "sprites/invalid_texture.png".to_string(),
            sprites: HashMap::new(),
        }
    }
}

impl SpriteCatalog {
    /// Load the catalog from RON, falling back to an empty one.
    pub fn load() -> Self {
        match fs::read_to_string(CATALOG_PATH) {
            Ok(contents) => match ron::from_str::<Self>(&contents) {
                Ok(catalog) => {
                    info!(
                        "Loaded sprite catalog from {} ({} keys)",
                        CATALOG_PATH,
                        catalog.sprites.len()
                    );
                    catalog
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using placeholders.", CATALOG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using placeholders.", CATALOG_PATH, e);
                Self::default()
            }
        }
    }

    /// Image path for `key` showing `frame` of `anim`.
    pub fn resolve(&self, key: &str, frame: Option<(AnimKind, usize)>) -> String {
        let Some(entry) = self.sprites.get(key) else {
            return self.invalid_texture.clone();
        };
        let (anim, index) = frame.unwrap_or((AnimKind::Idle, 0));
        entry
            .path
            .replace("{anim}", anim.name())
            .replace("{frame}", &index.to_string())
    }
}

pub fn load_sprite_catalog(mut commands: Commands) {
    commands.insert_resource(SpriteCatalog::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_falls_back_to_placeholder() {
        let catalog = SpriteCatalog::default();
        assert_eq!(catalog.resolve("dragon", None), "sprites/invalid_texture.png");
    }

    #[test]
    fn template_substitutes_animation_and_frame() {
        let catalog: SpriteCatalog = ron::from_str(
            r#"(
                invalid_texture: "missing.png",
                sprites: {
                    "orc": (path: "sprites/orc/{anim}/{frame}.png"),
                    "tile/block": (path: "sprites/tiles/block.png"),
                },
            )"#,
        )
        .expect("valid catalog");
        assert_eq!(
            catalog.resolve("orc", Some((AnimKind::Run, 3))),
            "sprites/orc/run/3.png"
        );
        assert_eq!(catalog.resolve("orc", None), "sprites/orc/idle/0.png");
        assert_eq!(catalog.resolve("tile/block", None), "sprites/tiles/block.png");
    }
}
