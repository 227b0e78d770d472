//! Ruins Platformer - Entry Point
//!
//! Controls:
//! - A / D: Walk
//! - Space: Jump
//! - Left mouse: Use the active item
//! - 1-9 / mouse wheel: Select hotbar slot
//! - E: Open or close the inventory
//! - Q: Drop the active stack
//! - M: Reload the map

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;

use ruins_platformer::core::GameConfig;

fn main() {
    let config = GameConfig::load();
    let (width, height) = config.screen_size;

    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Ruins".to_string(),
                        resolution: (width, height).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                // kira owns audio output
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .insert_resource(config)
        .add_plugins(ruins_platformer::PlatformerPlugin)

        .run();
}
