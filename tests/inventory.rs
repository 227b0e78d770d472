//! Inventory integration tests: pickup through the ECS, stacking and chests.

mod common;

use std::time::Duration;

use bevy::prelude::*;

use common::*;
use ruins_platformer::combat::{Arrow, ItemKind, Usable};
use ruins_platformer::core::{InputSnapshot, ItemPickupEvent};
use ruins_platformer::inventory::{
    spawn_world_item, Inventory, ItemSpec, ItemStack, StackSpec, WorldItem,
};
use ruins_platformer::world::Placement;

fn world_items(app: &mut App) -> usize {
    app.world_mut()
        .query::<&WorldItem>()
        .iter(app.world())
        .count()
}

fn drop_at_player(app: &mut App, spec: ItemSpec, amount: u32, delay: Duration) {
    let player = player(app);
    let center = body(app, player).center();
    let now = now(app);
    spawn_world_item(
        &mut app.world_mut().commands(),
        spec.instantiate(amount),
        center,
        Vec2::ZERO,
        now,
        delay,
    );
    app.world_mut().flush();
}

/// Put `stack` straight into hotbar position `position`.
fn equip(app: &mut App, position: usize, stack: ItemStack) {
    let player = player(app);
    let mut inventory = app
        .world_mut()
        .get_mut::<Inventory>(player)
        .expect("player inventory");
    let index = inventory.hotbar_slot(position).expect("hotbar position");
    inventory.insert(index, stack);
}

fn hotbar_item(app: &mut App, position: usize) -> Option<ItemStack> {
    let player = player(app);
    let inventory = app.world().get::<Inventory>(player).expect("player inventory");
    inventory
        .hotbar_slot(position)
        .and_then(|index| inventory.get(index))
        .cloned()
}

fn select(app: &mut App, position: usize) {
    app.world_mut().resource_mut::<InputSnapshot>().hotbar_select = Some(position);
    app.update();
    app.world_mut().resource_mut::<InputSnapshot>().hotbar_select = None;
}

fn arrows_in_flight(app: &mut App) -> usize {
    app.world_mut().query::<&Arrow>().iter(app.world()).count()
}

#[test]
fn switching_away_from_a_drawn_bow_drops_the_charge() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);
    equip(&mut app, 0, ItemSpec::Bow.instantiate(1));
    equip(&mut app, 1, ItemSpec::Arrows.instantiate(5));

    app.world_mut().resource_mut::<InputSnapshot>().primary_held = true;
    run_frames(&mut app, 60);
    match hotbar_item(&mut app, 0).map(|stack| stack.item) {
        Some(Usable::Bow(bow)) => {
            assert!(bow.is_pulling());
            assert!(bow.stage() >= 1);
        }
        other => panic!("expected a bow, got {other:?}"),
    }

    // Still holding the button through both swaps
    select(&mut app, 1);
    select(&mut app, 0);
    match hotbar_item(&mut app, 0).map(|stack| stack.item) {
        Some(Usable::Bow(bow)) => {
            assert!(!bow.is_pulling());
            assert_eq!(bow.stage(), 0);
        }
        other => panic!("expected a bow, got {other:?}"),
    }

    app.world_mut().resource_mut::<InputSnapshot>().primary_held = false;
    run_frames(&mut app, 5);
    assert_eq!(arrows_in_flight(&mut app), 0);
    let player = player(&mut app);
    let inventory = app.world().get::<Inventory>(player).expect("player inventory");
    assert_eq!(inventory.count(ItemKind::Arrows), 5);
}

#[test]
fn drunk_potion_leaves_an_empty_slot() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);
    equip(&mut app, 0, ItemSpec::heal_potion().instantiate(1));

    app.world_mut().resource_mut::<InputSnapshot>().primary_pressed = true;
    app.update();
    app.world_mut().resource_mut::<InputSnapshot>().primary_pressed = false;

    assert_eq!(hotbar_item(&mut app, 0), None);
    let player = player(&mut app);
    let inventory = app.world().get::<Inventory>(player).expect("player inventory");
    assert_eq!(inventory.count(ItemKind::Potion), 0);
}

#[test]
fn arrows_merge_into_full_stacks_then_spill() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);

    drop_at_player(&mut app, ItemSpec::Arrows, 10, Duration::ZERO);
    drop_at_player(&mut app, ItemSpec::Arrows, 10, Duration::ZERO);
    run_frames(&mut app, 5);

    let player = player(&mut app);
    let inventory = app.world().get::<Inventory>(player).expect("player inventory");
    assert_eq!(inventory.count(ItemKind::Arrows), 20);
    let amounts: Vec<u32> = inventory
        .hotbar_range()
        .filter_map(|index| inventory.get(index))
        .map(|stack| stack.amount)
        .collect();
    assert_eq!(amounts, vec![16, 4]);
    assert_eq!(world_items(&mut app), 0);
}

#[test]
fn fresh_drops_wait_out_the_pickup_delay() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);

    drop_at_player(&mut app, ItemSpec::Bow, 1, Duration::from_millis(750));
    run_frames(&mut app, 30);
    assert_eq!(world_items(&mut app), 1);

    run_frames(&mut app, 20);
    assert_eq!(world_items(&mut app), 0);
    let player = player(&mut app);
    let inventory = app.world().get::<Inventory>(player).expect("player inventory");
    assert_eq!(inventory.count(ItemKind::Bow), 1);
}

#[test]
fn pickup_is_announced() {
    let mut app = start(ground_map(20));
    run_frames(&mut app, 20);

    drop_at_player(&mut app, ItemSpec::Gun, 1, Duration::ZERO);
    app.update();

    let events = app.world().resource::<Events<ItemPickupEvent>>();
    let mut reader = events.get_cursor();
    let complete: Vec<bool> = reader.read(events).map(|event| event.complete).collect();
    assert_eq!(complete, vec![true]);
}

#[test]
fn opened_chest_hands_out_every_stack() {
    let mut map = ground_map(20);
    map.placements.push(Placement::Chest {
        top_left: Vec2::new(72.0, GROUND_Y - 48.0),
        contents: vec![
            StackSpec::new(ItemSpec::Bow, 1),
            StackSpec::new(ItemSpec::Arrows, 6),
        ],
    });
    let mut app = start(map);

    // Two stacks one second apart, plus time to land
    run_frames(&mut app, 150);
    let mut kinds: Vec<ItemKind> = app
        .world_mut()
        .query::<&WorldItem>()
        .iter(app.world())
        .map(|item| item.stack.kind())
        .collect();
    let player = player(&mut app);
    let inventory = app.world().get::<Inventory>(player).expect("player inventory");
    for kind in [ItemKind::Bow, ItemKind::Arrows] {
        if inventory.count(kind) > 0 {
            kinds.push(kind);
        }
    }
    kinds.sort_by_key(|kind| kind.name());
    assert_eq!(kinds, vec![ItemKind::Arrows, ItemKind::Bow]);
}
