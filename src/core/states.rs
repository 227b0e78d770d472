//! Game state definitions that control the overall flow of the game.
//!
//! The simulation only advances in `InGame`. Reaching zero hp moves the
//! player into `Defeat`, where every input other than the respawn key press
//! is ignored.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while config, enemy data and the map are read
/// - `InGame` runs the frame simulation
/// - `Defeat` freezes the world until the player respawns
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Data files are being loaded
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Player hp reached zero
    Defeat,
}
