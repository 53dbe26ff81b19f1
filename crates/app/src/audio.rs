//! Macroquad audio backend. Missing files are logged once and then stay silent.

use std::collections::HashMap;

use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound, play_sound_once, stop_sound};
use tower_core::scene::{AudioSink, MusicCue, SoundCue};
use tracing::{debug, warn};

const SOUND_DIR: &str = "assets/sounds";
const MUSIC_DIR: &str = "assets/music";
const MUSIC_VOLUME: f32 = 0.5;

pub struct MacroquadAudio {
    sounds: HashMap<SoundCue, Sound>,
    tracks: HashMap<MusicCue, Sound>,
    current_track: Option<MusicCue>,
}

impl MacroquadAudio {
    pub async fn load() -> Self {
        let mut sounds = HashMap::new();
        for cue in SoundCue::ALL {
            let path = format!("{SOUND_DIR}/{}.wav", cue.file_stem());
            if let Some(sound) = load_or_warn(&path).await {
                sounds.insert(cue, sound);
            }
        }

        let mut tracks = HashMap::new();
        for cue in MusicCue::ALL {
            let path = format!("{MUSIC_DIR}/{}.ogg", cue.file_stem());
            if let Some(sound) = load_or_warn(&path).await {
                tracks.insert(cue, sound);
            }
        }

        debug!(sounds = sounds.len(), tracks = tracks.len(), "audio loaded");
        Self { sounds, tracks, current_track: None }
    }
}

impl AudioSink for MacroquadAudio {
    fn play(&mut self, cue: SoundCue) {
        if let Some(sound) = self.sounds.get(&cue) {
            play_sound_once(sound);
        }
    }

    /// Switches the background track. Asking for the track already playing is a no-op.
    fn play_music(&mut self, cue: MusicCue) {
        if self.current_track == Some(cue) {
            return;
        }
        if let Some(previous) = self.current_track.and_then(|track| self.tracks.get(&track)) {
            stop_sound(previous);
        }
        self.current_track = Some(cue);
        if let Some(sound) = self.tracks.get(&cue) {
            play_sound(sound, PlaySoundParams { looped: cue.looped(), volume: MUSIC_VOLUME });
        }
    }
}

async fn load_or_warn(path: &str) -> Option<Sound> {
    match load_sound(path).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            warn!(path, %err, "audio file unavailable; continuing without it");
            None
        }
    }
}
