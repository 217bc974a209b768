//! The playback state machine.
//!
//! # States
//!
//! | From                          | Call / event                        | To         |
//! |-------------------------------|-------------------------------------|------------|
//! | Stopped, Paused, Finished     | `play`                              | Playing    |
//! | Playing                       | `pause`                             | Paused     |
//! | any                           | `stop`, pallet change               | Stopped    |
//! | Playing                       | `tick` past the last step with no next playable pallet | Finished |
//!
//! # Timing
//!
//! `tick` reads the clock and adds the time since the previous tick to an
//! accumulator.  Each full `speed_ms` slice advances one step; the
//! remainder carries over, so irregular tick intervals do not change the
//! average speed.  The first tick after `play` contributes no time.

use serde::{Deserialize, Serialize};

use crate::{Clock, PlayerConfig, Timeline, MIN_SPEED_MS};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
    Finished,
}

/// The visible cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub pallet_index: usize,
    pub step_index:   usize,
    pub speed_ms:     u64,
    pub status:       PlayerStatus,
}

/// Counter bumped by control calls that change status or pallet.  A host
/// that schedules ticks from another thread captures it when scheduling and
/// drops the tick if it no longer matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

pub struct PlaybackEngine<T: Timeline, C: Clock> {
    timeline:      T,
    clock:         C,
    state:         PlayerState,
    auto_continue: bool,
    /// Clock reading at the previous playing tick.
    last_tick_ms:  Option<u64>,
    elapsed_ms:    u64,
    generation:    Generation,
}

impl<T: Timeline, C: Clock> PlaybackEngine<T, C> {
    pub fn new(timeline: T, clock: C, config: PlayerConfig) -> Self {
        let max_pallet = timeline.pallet_count().saturating_sub(1);
        Self {
            state: PlayerState {
                pallet_index: config.initial_pallet_index.min(max_pallet),
                step_index:   0,
                speed_ms:     config.speed_ms.max(MIN_SPEED_MS),
                status:       PlayerStatus::Stopped,
            },
            timeline,
            clock,
            auto_continue: config.auto_continue,
            last_tick_ms:  None,
            elapsed_ms:    0,
            generation:    Generation::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn status(&self) -> PlayerStatus {
        self.state.status
    }

    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn auto_continue(&self) -> bool {
        self.auto_continue
    }

    pub fn max_pallet(&self) -> usize {
        self.timeline.pallet_count().saturating_sub(1)
    }

    /// Last step of the current pallet.
    pub fn max_step(&self) -> usize {
        self.timeline.max_step(self.state.pallet_index)
    }

    // ── Status control ────────────────────────────────────────────────────

    /// Start or resume autoplay.
    ///
    /// On an unplayable pallet the cursor jumps to the next playable one;
    /// with none left the engine stays stopped.
    pub fn play(&mut self) {
        if self.state.status == PlayerStatus::Playing {
            return;
        }
        let pallet = self.state.pallet_index;
        if !self.timeline.is_playable(pallet) {
            match self.timeline.next_playable(pallet) {
                Some(next) => {
                    tracing::debug!(from = pallet, to = next, "skipping unplayable pallets");
                    self.state.pallet_index = next;
                    self.state.step_index = 0;
                }
                None => {
                    tracing::debug!(pallet, "nothing left to play");
                    self.state.step_index = 0;
                    self.set_status(PlayerStatus::Stopped);
                    self.bump();
                    return;
                }
            }
        }
        self.reset_timing();
        self.set_status(PlayerStatus::Playing);
        self.bump();
    }

    pub fn pause(&mut self) {
        if self.state.status == PlayerStatus::Playing {
            self.set_status(PlayerStatus::Paused);
            self.bump();
        }
    }

    pub fn stop(&mut self) {
        self.reset_timing();
        self.state.step_index = 0;
        self.set_status(PlayerStatus::Stopped);
        self.bump();
    }

    // ── Cursor control ────────────────────────────────────────────────────

    pub fn next_step(&mut self) {
        self.state.step_index = (self.state.step_index + 1).min(self.max_step());
    }

    pub fn prev_step(&mut self) {
        self.state.step_index = self.state.step_index.saturating_sub(1).min(self.max_step());
    }

    pub fn next_pallet(&mut self) {
        self.set_pallet_index(self.state.pallet_index.saturating_add(1));
    }

    pub fn prev_pallet(&mut self) {
        self.set_pallet_index(self.state.pallet_index.saturating_sub(1));
    }

    /// Jump to `index` (clamped).  Always interrupts autoplay.
    pub fn set_pallet_index(&mut self, index: usize) {
        self.reset_timing();
        self.state.pallet_index = index.min(self.max_pallet());
        self.state.step_index = 0;
        self.set_status(PlayerStatus::Stopped);
        self.bump();
    }

    pub fn set_speed_ms(&mut self, speed_ms: u64) {
        self.state.speed_ms = speed_ms.max(MIN_SPEED_MS);
    }

    pub fn set_auto_continue(&mut self, auto_continue: bool) {
        self.auto_continue = auto_continue;
    }

    /// Replace the timeline, clamping the cursor into the new ranges.
    pub fn set_timeline(&mut self, timeline: T) -> T {
        let old = std::mem::replace(&mut self.timeline, timeline);
        let pallet = self.state.pallet_index.min(self.max_pallet());
        if pallet != self.state.pallet_index {
            self.state.pallet_index = pallet;
            self.state.step_index = 0;
            self.bump();
        }
        self.state.step_index = self.state.step_index.min(self.max_step());
        old
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Advance autoplay by however much time passed since the previous
    /// tick.  Returns `true` if the state changed.
    pub fn tick(&mut self) -> bool {
        if self.state.status != PlayerStatus::Playing {
            return false;
        }
        let now = self.clock.now_ms();
        let delta = self.last_tick_ms.map_or(0, |last| now.saturating_sub(last));
        self.last_tick_ms = Some(now);
        self.elapsed_ms += delta;

        let before = self.state;
        while self.elapsed_ms >= self.state.speed_ms {
            self.elapsed_ms -= self.state.speed_ms;

            if self.state.step_index < self.max_step() {
                self.state.step_index += 1;
                continue;
            }

            let next = if self.auto_continue { self.timeline.next_playable(self.state.pallet_index) } else { None };
            match next {
                Some(pallet) => {
                    self.state.pallet_index = pallet;
                    self.state.step_index = 0;
                }
                None => {
                    self.reset_timing();
                    self.set_status(PlayerStatus::Finished);
                    break;
                }
            }
        }
        self.state != before
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn set_status(&mut self, status: PlayerStatus) {
        if self.state.status != status {
            tracing::trace!(from = ?self.state.status, to = ?status, "player status");
            self.state.status = status;
        }
    }

    fn reset_timing(&mut self) {
        self.last_tick_ms = None;
        self.elapsed_ms = 0;
    }

    fn bump(&mut self) {
        self.generation.0 += 1;
    }
}
