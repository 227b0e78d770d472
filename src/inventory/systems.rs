//! Player-facing inventory systems: selection, screen, drops and pickup.

use bevy::prelude::*;

use super::items::{spawn_world_item, WorldItem};
use super::layout::InventoryLayout;
use super::slots::{Hotbar, Inventory, PickupOutcome};
use crate::core::{GameConfig, InputSnapshot, ItemPickupEvent, SimClock};
use crate::physics::{PhysicsBody, Side};
use crate::player::Player;

pub fn select_hotbar(input: Res<InputSnapshot>, mut players: Query<&mut Hotbar, With<Player>>) {
    let Ok(mut hotbar) = players.get_single_mut() else {
        return;
    };
    if let Some(position) = input.hotbar_select {
        hotbar.select(position);
    }
    if input.scroll != 0 {
        hotbar.cycle(input.scroll);
    }
}

/// Open or close the inventory screen. Closing drops whatever the cursor holds.
pub fn toggle_inventory(
    mut commands: Commands,
    input: Res<InputSnapshot>,
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    mut players: Query<(&mut Inventory, &PhysicsBody, &Side), With<Player>>,
) {
    if !input.toggle_inventory {
        return;
    }
    let Ok((mut inventory, body, side)) = players.get_single_mut() else {
        return;
    };
    inventory.is_open = !inventory.is_open;
    if inventory.is_open {
        return;
    }
    if let Some(mut stack) = inventory.held.take() {
        stack.item.default(clock.now);
        spawn_world_item(
            &mut commands,
            stack,
            body.center(),
            drop_velocity(&config, *side),
            clock.now,
            config.pickup_delay(),
        );
    }
}

pub fn inventory_clicks(
    input: Res<InputSnapshot>,
    layout: Res<InventoryLayout>,
    mut players: Query<&mut Inventory, With<Player>>,
) {
    if !input.primary_pressed {
        return;
    }
    let Some(cursor) = input.cursor else {
        return;
    };
    let Ok(mut inventory) = players.get_single_mut() else {
        return;
    };
    if !inventory.is_open {
        return;
    }
    if let Some(index) = layout.slot_at(cursor) {
        inventory.choose_item(index);
    }
}

/// Throw the active hotbar stack in front of the player.
pub fn drop_active_item(
    mut commands: Commands,
    input: Res<InputSnapshot>,
    clock: Res<SimClock>,
    config: Res<GameConfig>,
    mut players: Query<(&mut Inventory, &Hotbar, &PhysicsBody, &Side), With<Player>>,
) {
    if !input.drop_item {
        return;
    }
    let Ok((mut inventory, hotbar, body, side)) = players.get_single_mut() else {
        return;
    };
    if inventory.is_open {
        return;
    }
    let Some(index) = inventory.hotbar_slot(hotbar.active()) else {
        return;
    };
    let Some(mut stack) = inventory.take(index) else {
        return;
    };
    stack.item.default(clock.now);
    debug!("Dropped {} x{}", stack.kind().name(), stack.amount);
    spawn_world_item(
        &mut commands,
        stack,
        body.center(),
        drop_velocity(&config, *side),
        clock.now,
        config.pickup_delay(),
    );
}

fn drop_velocity(config: &GameConfig, side: Side) -> Vec2 {
    let (x, y) = config.inventory.drop_knockback;
    Vec2::new(x * side.sign(), y)
}

/// Reset items that stopped being in use and purge spent slots.
pub fn reconcile_inventory(
    clock: Res<SimClock>,
    mut players: Query<(&mut Inventory, &mut Hotbar), With<Player>>,
) {
    for (mut inventory, mut hotbar) in players.iter_mut() {
        if let Some(previous) = hotbar.take_change() {
            if let Some(stack) = inventory
                .hotbar_slot(previous)
                .and_then(|index| inventory.get_mut(index))
            {
                stack.item.default(clock.now);
            }
        }
        if inventory.is_open {
            if let Some(stack) = inventory
                .hotbar_slot(hotbar.active())
                .and_then(|index| inventory.get_mut(index))
            {
                stack.item.default(clock.now);
            }
        }
        inventory.reconcile();
    }
}

pub fn pickup_items(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut players: Query<(&PhysicsBody, &mut Inventory), With<Player>>,
    mut items: Query<(Entity, &mut WorldItem, &PhysicsBody), Without<Player>>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
) {
    let Ok((player_body, mut inventory)) = players.get_single_mut() else {
        return;
    };
    let reach = player_body.aabb();

    for (entity, mut item, body) in items.iter_mut() {
        if !item.can_pick_up(clock.now) || !body.aabb().overlaps(&reach) {
            continue;
        }
        match inventory.pick_up(item.stack.clone()) {
            PickupOutcome::Absorbed => {
                debug!("Picked up {} x{}", item.stack.kind().name(), item.stack.amount);
                commands.entity(entity).despawn_recursive();
                pickup_events.send(ItemPickupEvent {
                    item: entity,
                    complete: true,
                });
            }
            PickupOutcome::Partial(remainder) => {
                item.stack = remainder;
                pickup_events.send(ItemPickupEvent {
                    item: entity,
                    complete: false,
                });
            }
            PickupOutcome::Refused(_) => {}
        }
    }
}
