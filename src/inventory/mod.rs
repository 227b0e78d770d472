//! Inventory module - slots, stacking, world items and the hotbar.

mod items;
mod layout;
mod slots;
mod stack;
mod systems;

pub use items::{item_physics, spawn_world_item, WorldItem, ITEM_SIZE};
pub use layout::{InventoryLayout, SLOT_GAP, SLOT_SIZE};
pub use slots::{Hotbar, Inventory, PickupOutcome, Slot, SlotKind};
pub use stack::{ItemSpec, ItemStack, StackSpec};

use bevy::prelude::*;

use crate::core::{GameConfig, SimSet};

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        let layout = InventoryLayout::from_config(app.world().resource::<GameConfig>());
        app.insert_resource(layout)
            .add_systems(
                Update,
                (
                    systems::select_hotbar,
                    systems::toggle_inventory,
                    systems::inventory_clicks,
                    systems::drop_active_item,
                )
                    .chain()
                    .in_set(SimSet::Intent),
            )
            .add_systems(Update, item_physics.in_set(SimSet::Physics))
            .add_systems(
                Update,
                (systems::pickup_items, systems::reconcile_inventory)
                    .chain()
                    .in_set(SimSet::Inventory),
            );
    }
}
