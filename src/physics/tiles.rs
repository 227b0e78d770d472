//! Static terrain grid.

use std::collections::HashMap;

use bevy::prelude::*;

use super::body::Aabb;

/// Collision behaviour of a static tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Solid,
    /// Hurts on contact instead of blocking
    Spike,
}

/// Sparse grid of collidable tiles, rebuilt on every map load.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    cell_size: f32,
    width: i32,
    height: i32,
    cells: HashMap<IVec2, Terrain>,
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(48.0, 0, 0)
    }
}

impl TileMap {
    pub fn new(cell_size: f32, width: i32, height: i32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            width,
            height,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Map extent in world units.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.cell_size
    }

    pub fn insert(&mut self, cell: IVec2, terrain: Terrain) {
        self.cells.insert(cell, terrain);
    }

    pub fn get(&self, cell: IVec2) -> Option<Terrain> {
        self.cells.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_rect(&self, cell: IVec2) -> Aabb {
        Aabb::new(cell.as_vec2() * self.cell_size, Vec2::splat(self.cell_size))
    }

    /// Every tile whose box overlaps `area`, in row-major order.
    pub fn overlapping(&self, area: &Aabb) -> Vec<(Aabb, Terrain)> {
        let first = (area.min / self.cell_size).floor().as_ivec2();
        let last = (area.max / self.cell_size).ceil().as_ivec2() - IVec2::ONE;

        let mut found = Vec::new();
        for y in first.y..=last.y {
            for x in first.x..=last.x {
                let cell = IVec2::new(x, y);
                if let Some(terrain) = self.get(cell) {
                    let rect = self.cell_rect(cell);
                    if rect.overlaps(area) {
                        found.push((rect, terrain));
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_skips_touching_cells() {
        let mut map = TileMap::new(48.0, 10, 10);
        map.insert(IVec2::new(1, 2), Terrain::Solid);
        map.insert(IVec2::new(2, 2), Terrain::Spike);

        // Exactly fills cell (1, 2) and touches (2, 2) on its right edge
        let area = Aabb::new(Vec2::new(48.0, 96.0), Vec2::splat(48.0));
        let found = map.overlapping(&area);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, Terrain::Solid);

        let wide = Aabb::new(Vec2::new(60.0, 100.0), Vec2::new(60.0, 10.0));
        assert_eq!(map.overlapping(&wide).len(), 2);
    }

    #[test]
    fn pixel_size_uses_cell_size() {
        let map = TileMap::new(48.0, 20, 5);
        assert_eq!(map.pixel_size(), Vec2::new(960.0, 240.0));
    }
}
