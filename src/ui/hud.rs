//! In-game HUD - health, coins, hotbar and the inventory panel.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::SimSet;
use crate::inventory::{Hotbar, Inventory, InventoryLayout, ItemStack};
use crate::player::{Player, Wallet};

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

#[derive(Component)]
pub struct WalletText;

/// Background of the slot with this index.
#[derive(Component)]
pub struct SlotFrame(pub usize);

#[derive(Component)]
pub struct SlotLabel(pub usize);

/// Stack carried by the cursor while the inventory is open.
#[derive(Component)]
pub struct HeldText;

const SLOT_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.8);
const ACTIVE_SLOT_COLOR: Color = Color::srgba(0.6, 0.5, 0.2, 0.9);

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(Startup, spawn_hud).add_systems(
        Update,
        (update_health_bar, update_wallet, update_slots, update_held)
            .in_set(SimSet::Presentation),
    );
}

/// Text shown in a slot: item name plus amount when it stacks.
pub fn slot_caption(stack: Option<&ItemStack>) -> String {
    match stack {
        None => String::new(),
        Some(stack) if stack.stack_size() > 1 => {
            format!("{}\n{}", stack.kind().name(), stack.amount)
        }
        Some(stack) => stack.kind().name().to_string(),
    }
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, layout: Res<InventoryLayout>) {
    // Health and coins, top-left corner
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(14.0),
                        margin: UiRect::bottom(Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                        HealthBar,
                    ));
                });

            parent.spawn((
                Text::new("Coins: 0"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.3)),
                WalletText,
            ));
        });

    // One absolutely positioned frame per inventory slot
    let mut index = 0;
    while let Some(rect) = layout.rect(index) {
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(rect.min.x),
                    top: Val::Px(rect.min.y),
                    width: Val::Px(rect.size().x),
                    height: Val::Px(rect.size().y),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(SLOT_COLOR),
                SlotFrame(index),
                HudRoot,
            ))
            .with_children(|slot| {
                slot.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 11.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.85, 0.85)),
                    SlotLabel(index),
                ));
            });
        index += 1;
    }

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.85, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
        HeldText,
        HudRoot,
    ));
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.fraction() * 100.0);
}

fn update_wallet(
    player_query: Query<&Wallet, (With<Player>, Changed<Wallet>)>,
    mut text_query: Query<&mut Text, With<WalletText>>,
) {
    let Ok(wallet) = player_query.get_single() else {
        return;
    };
    for mut text in text_query.iter_mut() {
        text.0 = format!("Coins: {}", wallet.0);
    }
}

/// Storage slots only show while the inventory is open; the active hotbar
/// slot is highlighted.
fn update_slots(
    player_query: Query<(&Inventory, &Hotbar), With<Player>>,
    mut frames: Query<(&SlotFrame, &mut BackgroundColor, &mut Visibility)>,
    mut labels: Query<(&SlotLabel, &mut Text)>,
) {
    let Ok((inventory, hotbar)) = player_query.get_single() else {
        return;
    };
    let active = inventory.hotbar_slot(hotbar.active());
    let storage = inventory.storage_range();

    for (frame, mut color, mut visibility) in frames.iter_mut() {
        *visibility = if storage.contains(&frame.0) && !inventory.is_open {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        *color = if Some(frame.0) == active {
            BackgroundColor(ACTIVE_SLOT_COLOR)
        } else {
            BackgroundColor(SLOT_COLOR)
        };
    }

    for (label, mut text) in labels.iter_mut() {
        let caption = slot_caption(inventory.get(label.0));
        if text.0 != caption {
            text.0 = caption;
        }
    }
}

fn update_held(
    player_query: Query<&Inventory, With<Player>>,
    mut text_query: Query<&mut Text, With<HeldText>>,
) {
    let Ok(inventory) = player_query.get_single() else {
        return;
    };
    let caption = match (&inventory.held, inventory.is_open) {
        (Some(stack), true) => format!("Holding: {}", slot_caption(Some(stack)).replace('\n', " x")),
        _ => String::new(),
    };
    for mut text in text_query.iter_mut() {
        if text.0 != caption {
            text.0 = caption.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemSpec;

    #[test]
    fn captions_show_amount_only_for_stackables() {
        assert_eq!(slot_caption(None), "");
        assert_eq!(slot_caption(Some(&ItemSpec::Bow.instantiate(1))), "bow");
        assert_eq!(slot_caption(Some(&ItemSpec::Arrows.instantiate(7))), "arrows\n7");
    }
}
