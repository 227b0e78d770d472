//! Screen placement of inventory slots, shared by click handling and the HUD.

use bevy::prelude::*;

use crate::core::GameConfig;
use crate::physics::Aabb;

pub const SLOT_SIZE: f32 = 56.0;
pub const SLOT_GAP: f32 = 6.0;
const BOTTOM_MARGIN: f32 = 16.0;
/// Space between the storage grid and the hotbar
const PANEL_GAP: f32 = 24.0;

/// Slot rectangles in screen space (origin top-left, y down).
#[derive(Resource, Debug, Clone)]
pub struct InventoryLayout {
    rects: Vec<Aabb>,
}

impl InventoryLayout {
    /// Hotbar centred along the bottom edge, storage rows stacked above it
    /// with the same column count.
    pub fn new(screen: Vec2, storage: usize, hotbar: usize) -> Self {
        let columns = hotbar.max(1);
        let pitch = SLOT_SIZE + SLOT_GAP;
        let row_width = columns as f32 * pitch - SLOT_GAP;
        let left = (screen.x - row_width) / 2.0;
        let hotbar_top = screen.y - BOTTOM_MARGIN - SLOT_SIZE;
        let storage_rows = storage.div_ceil(columns);
        let storage_top = hotbar_top - PANEL_GAP - storage_rows as f32 * pitch + SLOT_GAP;

        let storage_rects = (0..storage).map(|i| {
            let (row, column) = (i / columns, i % columns);
            Aabb::new(
                Vec2::new(left + column as f32 * pitch, storage_top + row as f32 * pitch),
                Vec2::splat(SLOT_SIZE),
            )
        });
        let hotbar_rects = (0..hotbar).map(|i| {
            Aabb::new(
                Vec2::new(left + i as f32 * pitch, hotbar_top),
                Vec2::splat(SLOT_SIZE),
            )
        });
        Self {
            rects: storage_rects.chain(hotbar_rects).collect(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            Vec2::from(config.screen_size),
            config.inventory.storage_slots,
            config.inventory.hotbar_slots,
        )
    }

    pub fn rect(&self, index: usize) -> Option<Aabb> {
        self.rects.get(index).copied()
    }

    pub fn slot_at(&self, point: Vec2) -> Option<usize> {
        self.rects.iter().position(|rect| rect.contains_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_do_not_overlap_and_are_hit_tested() {
        let layout = InventoryLayout::new(Vec2::new(900.0, 600.0), 18, 9);
        let first_hotbar = layout.rect(18).expect("hotbar slot");
        assert_eq!(layout.slot_at(first_hotbar.center()), Some(18));
        let storage = layout.rect(0).expect("storage slot");
        assert!(storage.max.y < first_hotbar.min.y);
        assert_eq!(layout.slot_at(Vec2::new(1.0, 1.0)), None);
        assert!(layout.rect(27).is_none());
    }
}
