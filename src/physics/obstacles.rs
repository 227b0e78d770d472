//! Unified view over everything a body can bump into.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::body::Aabb;
use super::tiles::{Terrain, TileMap};

/// A solid box that is not part of the tile grid: moving platforms and dispensers.
#[derive(Component, Debug, Clone, Copy)]
pub struct SolidBlock {
    pub rect: Aabb,
    /// Displacement applied to riders each frame they land on it
    pub carry: Vec2,
}

impl SolidBlock {
    pub fn fixed(rect: Aabb) -> Self {
        Self {
            rect,
            carry: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    Solid { carry: Vec2 },
    Spike,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub rect: Aabb,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, ObstacleKind::Solid { .. })
    }
}

/// Tiles plus solid blocks, queried together.
#[derive(SystemParam)]
pub struct Obstacles<'w, 's> {
    tiles: Res<'w, TileMap>,
    blocks: Query<'w, 's, &'static SolidBlock>,
}

impl Obstacles<'_, '_> {
    /// Everything overlapping `area`: tiles first, then blocks.
    pub fn overlapping(&self, area: &Aabb) -> Vec<Obstacle> {
        let mut found: Vec<Obstacle> = self
            .tiles
            .overlapping(area)
            .into_iter()
            .map(|(rect, terrain)| Obstacle {
                rect,
                kind: match terrain {
                    Terrain::Solid => ObstacleKind::Solid { carry: Vec2::ZERO },
                    Terrain::Spike => ObstacleKind::Spike,
                },
            })
            .collect();
        found.extend(
            self.blocks
                .iter()
                .filter(|block| block.rect.overlaps(area))
                .map(|block| Obstacle {
                    rect: block.rect,
                    kind: ObstacleKind::Solid { carry: block.carry },
                }),
        );
        found
    }

    /// Solid obstacles overlapping `area`, spikes excluded.
    pub fn solids(&self, area: &Aabb) -> Vec<Aabb> {
        self.overlapping(area)
            .into_iter()
            .filter(Obstacle::is_solid)
            .map(|obstacle| obstacle.rect)
            .collect()
    }

    pub fn any_solid(&self, area: &Aabb) -> bool {
        !self.solids(area).is_empty()
    }

    /// Terrain hits including spikes, which is what fireballs and arrows stop on.
    pub fn any_terrain(&self, area: &Aabb) -> bool {
        !self.overlapping(area).is_empty()
    }

    pub fn map_size(&self) -> Vec2 {
        self.tiles.pixel_size()
    }
}
