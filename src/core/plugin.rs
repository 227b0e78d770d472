//! Core plugin that sets up game states, events, time and system ordering.

use bevy::prelude::*;

use super::clock::{advance_clock, SimClock};
use super::config::GameConfig;
use super::events::*;
use super::input::InputSnapshot;
use super::rng::SimRng;
use super::states::*;

/// Per-frame simulation phases, run in this order.
///
/// Later phases only observe state that earlier phases finished writing in
/// the same frame. Gameplay phases only run in [`GameState::InGame`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Advance the simulation clock
    Clock,
    /// Copy device state into the input snapshot
    Input,
    /// Player control, AI decisions, platform motion
    Intent,
    /// Integration and tile collision
    Physics,
    /// Weapons, projectiles, hazards, interactables
    Combat,
    /// Apply queued damage and run death sequencing
    Damage,
    /// Status effect ticks
    Effects,
    /// Frame advance for every animation controller
    Animation,
    /// Pickup, slot purge, active-item bookkeeping
    Inventory,
    /// Deferred removals and defeat checks
    Cleanup,
    /// Sprites, camera, HUD, audio
    Presentation,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Defeat)
/// - Global events (DamageEvent, DeathEvent, SoundCue, ...)
/// - The simulation clock, RNG and configuration resources
/// - The ordering of [`SimSet`]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::load());
        }
        let seed = app.world().resource::<GameConfig>().rng_seed;

        app
            // Initialize game states
            .init_state::<GameState>()

            // Simulation resources
            .init_resource::<SimClock>()
            .init_resource::<InputSnapshot>()
            .insert_resource(SimRng::new(seed))

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<ApplyEffectEvent>()
            .add_event::<DeathEvent>()
            .add_event::<ItemPickupEvent>()
            .add_event::<SoundCue>()
            .add_event::<ReloadMapEvent>()

            // Phase ordering
            .configure_sets(
                Update,
                (
                    SimSet::Clock,
                    SimSet::Input,
                    SimSet::Intent,
                    SimSet::Physics,
                    SimSet::Combat,
                    SimSet::Damage,
                    SimSet::Effects,
                    SimSet::Animation,
                    SimSet::Inventory,
                    SimSet::Cleanup,
                    SimSet::Presentation,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (
                    SimSet::Intent,
                    SimSet::Physics,
                    SimSet::Combat,
                    SimSet::Damage,
                    SimSet::Effects,
                    SimSet::Animation,
                    SimSet::Inventory,
                    SimSet::Cleanup,
                )
                    .run_if(in_state(GameState::InGame)),
            )

            // Loading finishes as soon as startup data is in place
            .add_systems(OnEnter(GameState::Loading), finish_loading)
            .add_systems(Update, advance_clock.in_set(SimSet::Clock))
            .add_systems(
                Update,
                request_map_reload
                    .in_set(SimSet::Intent)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Startup systems have already read every data file by the time the
/// initial state is entered, so loading completes immediately.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

fn request_map_reload(input: Res<InputSnapshot>, mut reload: EventWriter<ReloadMapEvent>) {
    if input.reload_map {
        reload.send(ReloadMapEvent);
    }
}
