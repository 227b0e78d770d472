//! Core game module - states, events, time, configuration and input.
//!
//! This module provides the foundation that all other game systems build upon.

mod clock;
mod config;
mod events;
mod input;
mod plugin;
mod rng;
mod states;

pub use clock::{advance_clock, Cooldown, SimClock};
pub use config::*;
pub use events::*;
pub use input::{gather_input, InputSnapshot};
pub use plugin::{CorePlugin, SimSet};
pub use rng::SimRng;
pub use states::*;
