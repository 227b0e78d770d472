//! Animation module - frame sequencing for actors and props.

mod controller;

pub use controller::*;

use bevy::prelude::*;

use crate::core::SimSet;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_animations.in_set(SimSet::Animation));
    }
}
