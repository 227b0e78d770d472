//! UI plugin - HUD and the defeat banner.

use bevy::prelude::*;

use crate::core::GameState;
use super::hud;

/// HUD overlay plus the banner shown while the player is down.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.add_systems(OnEnter(GameState::Defeat), setup_defeat_banner)
            .add_systems(OnExit(GameState::Defeat), cleanup_defeat_banner);
    }
}

/// Marker for defeat banner entities.
#[derive(Component)]
struct DefeatUi;

/// Set up the defeat overlay. Respawning itself is handled by the player plugin.
fn setup_defeat_banner(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.7)),
            DefeatUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("DEFEATED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press any key to return to your checkpoint"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
        });
}

fn cleanup_defeat_banner(mut commands: Commands, query: Query<Entity, With<DefeatUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
