//! Mirrors simulation state onto Bevy sprites.
//!
//! The simulation is y-down; Bevy's 2D world is y-up, so every rect centre is
//! flipped on the way out.

use bevy::prelude::*;

use super::catalog::SpriteCatalog;
use crate::animation::AnimationController;
use crate::physics::{Aabb, PhysicsBody, Side, SolidBlock};
use crate::world::Placed;

/// Draw order, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrawLayer {
    Background,
    Interactable,
    Midground,
    Foreground,
}

impl DrawLayer {
    pub fn z(self) -> f32 {
        match self {
            DrawLayer::Background => 0.0,
            DrawLayer::Interactable => 1.0,
            DrawLayer::Midground => 2.0,
            DrawLayer::Foreground => 3.0,
        }
    }
}

/// Catalog key of the art an entity is drawn with.
#[derive(Component, Debug, Clone)]
pub struct SpriteKey {
    pub key: String,
    pub layer: DrawLayer,
}

impl SpriteKey {
    pub fn new(key: impl Into<String>, layer: DrawLayer) -> Self {
        Self {
            key: key.into(),
            layer,
        }
    }
}

/// Image path currently loaded into the entity's sprite.
#[derive(Component, Default)]
pub struct ShownImage(String);

/// Whichever box the entity occupies.
type Footprint = (
    Option<&'static PhysicsBody>,
    Option<&'static SolidBlock>,
    Option<&'static Placed>,
);

fn footprint(
    (body, block, placed): (Option<&PhysicsBody>, Option<&SolidBlock>, Option<&Placed>),
) -> Option<Aabb> {
    body.map(PhysicsBody::aabb)
        .or_else(|| block.map(|block| block.rect))
        .or_else(|| placed.map(|placed| placed.0))
}

/// Convert a y-down world point to a translation on `layer`.
pub fn to_screen(point: Vec2, layer: DrawLayer) -> Vec3 {
    Vec3::new(point.x, -point.y, layer.z())
}

pub fn attach_sprites(mut commands: Commands, added: Query<Entity, Added<SpriteKey>>) {
    for entity in added.iter() {
        commands
            .entity(entity)
            .insert((Sprite::default(), Transform::default(), ShownImage::default()));
    }
}

pub fn sync_sprites(
    catalog: Res<SpriteCatalog>,
    asset_server: Res<AssetServer>,
    mut query: Query<(
        &SpriteKey,
        &mut Sprite,
        &mut Transform,
        &mut ShownImage,
        Option<&AnimationController>,
        Option<&Side>,
        Footprint,
    )>,
) {
    for (key, mut sprite, mut transform, mut shown, animation, side, rect) in query.iter_mut() {
        let Some(rect) = footprint(rect) else {
            continue;
        };
        transform.translation = to_screen(rect.center(), key.layer);
        sprite.custom_size = Some(rect.size());

        let frame = animation.map(|animation| (animation.current().kind, animation.index()));
        let facing = animation
            .map(|animation| animation.current().side)
            .or(side.copied())
            .unwrap_or_default();
        sprite.flip_x = facing == Side::Left;

        let path = catalog.resolve(&key.key, frame);
        if shown.0 != path {
            sprite.image = asset_server.load(path.clone());
            shown.0 = path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_prefers_body_then_block_then_placed() {
        let body = PhysicsBody::new(Vec2::new(10.0, 10.0), Vec2::splat(4.0));
        let block = SolidBlock::fixed(Aabb::new(Vec2::ZERO, Vec2::splat(8.0)));
        let placed = Placed(Aabb::new(Vec2::splat(100.0), Vec2::splat(2.0)));

        assert_eq!(
            footprint((Some(&body), Some(&block), None)),
            Some(body.aabb())
        );
        assert_eq!(footprint((None, Some(&block), Some(&placed))), Some(block.rect));
        assert_eq!(footprint((None, None, Some(&placed))), Some(placed.0));
        assert_eq!(footprint((None, None, None)), None);
    }

    #[test]
    fn screen_space_is_y_up() {
        let translation = to_screen(Vec2::new(5.0, 20.0), DrawLayer::Foreground);
        assert_eq!(translation, Vec3::new(5.0, -20.0, 3.0));
    }
}
