//! Engine configuration and the preferences a host persists between
//! sessions.

use serde::{Deserialize, Serialize};

use pw_core::RunId;

/// Playback speed floor.  Faster requests are clamped, never rejected.
pub const MIN_SPEED_MS: u64 = 40;

pub const DEFAULT_SPEED_MS: u64 = 200;

/// Initial settings for a [`PlaybackEngine`][crate::PlaybackEngine].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerConfig {
    /// Milliseconds per step.
    pub speed_ms:             u64,
    /// Move on to the next playable pallet when one finishes.
    pub auto_continue:        bool,
    pub initial_pallet_index: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { speed_ms: DEFAULT_SPEED_MS, auto_continue: true, initial_pallet_index: 0 }
    }
}

/// Single-run player preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerPreferences {
    pub run_id:        Option<RunId>,
    pub pallet_index:  usize,
    pub speed_ms:      u64,
    pub auto_continue: bool,
    /// Whether the view should keep the picker centered.  Carried for the
    /// host; the engine does not read it.
    pub follow_camera: bool,
}

impl Default for PlayerPreferences {
    fn default() -> Self {
        Self {
            run_id:        None,
            pallet_index:  0,
            speed_ms:      DEFAULT_SPEED_MS,
            auto_continue: true,
            follow_camera: true,
        }
    }
}

impl PlayerPreferences {
    pub fn config(&self) -> PlayerConfig {
        PlayerConfig {
            speed_ms:             self.speed_ms,
            auto_continue:        self.auto_continue,
            initial_pallet_index: self.pallet_index,
        }
    }
}

/// Side-by-side player preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerComparePreferences {
    pub run_a_id:      Option<RunId>,
    pub run_b_id:      Option<RunId>,
    pub pallet_index:  usize,
    pub speed_ms:      u64,
    pub auto_continue: bool,
}

impl Default for PlayerComparePreferences {
    fn default() -> Self {
        Self {
            run_a_id:      None,
            run_b_id:      None,
            pallet_index:  0,
            speed_ms:      DEFAULT_SPEED_MS,
            auto_continue: true,
        }
    }
}

impl PlayerComparePreferences {
    pub fn config(&self) -> PlayerConfig {
        PlayerConfig {
            speed_ms:             self.speed_ms,
            auto_continue:        self.auto_continue,
            initial_pallet_index: self.pallet_index,
        }
    }
}
