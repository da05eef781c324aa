//! Player settings and preferences
//!
//! Persisted separately from scores under their own key.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::highscores::{BlankNamePolicy, DEFAULT_RANKING_CAPACITY};
use crate::persistence::KeyValueStore;
use crate::persistence::records::{self, SETTINGS_KEY};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,
    /// Delay between the hit cue and the death cue
    pub death_cue_delay_ms: u32,

    // === Leaderboard ===
    /// Number of ranking entries kept
    pub ranking_capacity: usize,
    /// How blank player names are handled
    pub blank_name_policy: BlankNamePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.95,
            sfx_volume: 1.0,
            muted: false,
            death_cue_delay_ms: 90,

            ranking_capacity: DEFAULT_RANKING_CAPACITY,
            blank_name_policy: BlankNamePolicy::Reject,
        }
    }
}

impl Settings {
    /// Effective cue volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from the store, defaults when absent or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        records::load_or_default(store, SETTINGS_KEY)
    }

    /// Save settings to the store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        records::save(store, SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
