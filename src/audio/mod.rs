//! Audio module - plays the simulation's sound cues through kira.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};

use crate::core::{SimSet, SoundCue};

/// Every cue plays at the same quiet level.
pub const CUE_VOLUME: f64 = 0.1;

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Damage, SoundCue::ArrowImpact, SoundCue::GunFire];

    /// Asset path of the clip played for this cue.
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundCue::Damage => "sounds/damage.ogg",
            SoundCue::ArrowImpact => "sounds/arrow_impact.ogg",
            SoundCue::GunFire => "sounds/gun.ogg",
        }
    }
}

#[derive(Resource, Default)]
pub struct SoundLibrary {
    clips: HashMap<SoundCue, Handle<AudioSource>>,
}

/// Needs `bevy_kira_audio::AudioPlugin` in the app.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundLibrary>()
            .add_systems(Startup, load_sounds)
            .add_systems(Update, play_sound_cues.in_set(SimSet::Presentation));
    }
}

fn load_sounds(asset_server: Res<AssetServer>, mut library: ResMut<SoundLibrary>) {
    for cue in SoundCue::ALL {
        library.clips.insert(cue, asset_server.load(cue.asset_path()));
    }
    info!("Queued {} sound clips", library.clips.len());
}

fn play_sound_cues(
    audio: Res<Audio>,
    library: Res<SoundLibrary>,
    mut cues: EventReader<SoundCue>,
) {
    for cue in cues.read() {
        let Some(clip) = library.clips.get(cue) else {
            continue;
        };
        audio.play(clip.clone()).with_volume(CUE_VOLUME);
    }
}
