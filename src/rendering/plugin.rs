//! Rendering plugin - sprites, draw order and the follow camera.

use bevy::prelude::*;

use super::catalog::load_sprite_catalog;
use super::sprites::{attach_sprites, sync_sprites};
use crate::core::{GameConfig, SimSet};
use crate::physics::{PhysicsBody, TileMap};
use crate::player::Player;

/// Rendering plugin - draws the simulation, never feeds back into it.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.08, 0.07, 0.06)))
            .add_systems(Startup, (load_sprite_catalog, spawn_camera))
            .add_systems(
                Update,
                (attach_sprites, sync_sprites, follow_player)
                    .chain()
                    .in_set(SimSet::Presentation),
            );
    }
}

/// Marker for the game camera.
#[derive(Component)]
pub struct MainCamera;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Centre on `target` without showing anything past the map edges.
/// A map smaller than the view is centred instead.
pub fn clamp_view(target: Vec2, view: Vec2, map: Vec2) -> Vec2 {
    let half = view / 2.0;
    let clamp_axis = |value: f32, half: f32, extent: f32| {
        if extent <= half * 2.0 {
            extent / 2.0
        } else {
            value.clamp(half, extent - half)
        }
    };
    Vec2::new(
        clamp_axis(target.x, half.x, map.x),
        clamp_axis(target.y, half.y, map.y),
    )
}

fn follow_player(
    config: Res<GameConfig>,
    tiles: Res<TileMap>,
    player: Query<&PhysicsBody, With<Player>>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(body) = player.get_single() else {
        return;
    };
    let Ok(mut transform) = camera.get_single_mut() else {
        return;
    };
    let view = Vec2::from(config.screen_size);
    let center = clamp_view(body.center(), view, tiles.pixel_size());
    transform.translation.x = center.x;
    transform.translation.y = -center.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_stops_at_map_edges() {
        let view = Vec2::new(900.0, 600.0);
        let map = Vec2::new(4800.0, 1200.0);
        assert_eq!(clamp_view(Vec2::new(10.0, 10.0), view, map), Vec2::new(450.0, 300.0));
        assert_eq!(
            clamp_view(Vec2::new(4790.0, 1190.0), view, map),
            Vec2::new(4350.0, 900.0)
        );
        assert_eq!(
            clamp_view(Vec2::new(2000.0, 700.0), view, map),
            Vec2::new(2000.0, 700.0)
        );
    }

    #[test]
    fn small_map_is_centred() {
        let centre = clamp_view(Vec2::ZERO, Vec2::new(900.0, 600.0), Vec2::new(480.0, 240.0));
        assert_eq!(centre, Vec2::new(240.0, 120.0));
    }
}
