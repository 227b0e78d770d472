//! Per-frame input snapshot.
//!
//! The simulation never polls devices. [`gather_input`] copies keyboard,
//! mouse and wheel state into [`InputSnapshot`] once at the frame boundary and
//! every gameplay system reads that copy. Headless runs and tests write the
//! snapshot directly.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Input state for the current frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Primary mouse button is held this frame
    pub primary_held: bool,
    /// Primary mouse button went down this frame
    pub primary_pressed: bool,
    /// Cursor position in screen space (origin top-left), if inside the window
    pub cursor: Option<Vec2>,
    /// Hotbar slot picked with a number key
    pub hotbar_select: Option<usize>,
    /// Wheel steps this frame, positive scrolls toward the next slot
    pub scroll: i32,
    pub toggle_inventory: bool,
    pub drop_item: bool,
    pub reload_map: bool,
    /// Any key went down this frame
    pub any_key_pressed: bool,
}

impl InputSnapshot {
    /// Horizontal intent: -1 left, 1 right, 0 none. Left wins ties.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

const HOTBAR_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Copy device state into the snapshot.
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += event.y;
    }

    *snapshot = InputSnapshot {
        left: keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::KeyD),
        jump: keyboard.pressed(KeyCode::Space),
        primary_held: mouse.pressed(MouseButton::Left),
        primary_pressed: mouse.just_pressed(MouseButton::Left),
        cursor: window_query
            .get_single()
            .ok()
            .and_then(|window| window.cursor_position()),
        hotbar_select: HOTBAR_KEYS
            .iter()
            .position(|key| keyboard.just_pressed(*key)),
        // Wheel down moves to the next slot
        scroll: if scroll < 0.0 {
            1
        } else if scroll > 0.0 {
            -1
        } else {
            0
        },
        toggle_inventory: keyboard.just_pressed(KeyCode::KeyE),
        drop_item: keyboard.just_pressed(KeyCode::KeyQ),
        reload_map: keyboard.just_pressed(KeyCode::KeyM),
        any_key_pressed: keyboard.get_just_pressed().next().is_some(),
    };
}
