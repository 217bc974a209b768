//! `pw-player` — step-by-step replay of simulated runs.
//!
//! A [`PlaybackEngine`] owns a cursor `(pallet_index, step_index)` over a
//! [`Timeline`] and advances it when the host calls [`PlaybackEngine::tick`]
//! from whatever periodic callback it has (an animation frame, a timer
//! thread, a test loop).  Time comes from an injected [`Clock`], so tests
//! drive playback with a [`ManualClock`] instead of sleeping.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`clock`]    | `Clock`, `ManualClock`, `SystemClock`                    |
//! | [`timeline`] | `Timeline`, `SingleTimeline`, `DualTimeline`             |
//! | [`engine`]   | `PlaybackEngine`, `PlayerState`, `PlayerStatus`, `Generation` |
//! | [`shared`]   | `SharedPlayer` (mutex-serialized engine for threaded hosts) |
//! | [`config`]   | `PlayerConfig`, persisted preferences, `MIN_SPEED_MS`    |
//! | [`visits`]   | `visit_counts` for trail rendering                       |
//!
//! # Example
//!
//! ```rust,ignore
//! let timeline = SingleTimeline::new(PalletPaths::from_run(&layout, &run)?);
//! let clock = ManualClock::new(0);
//! let mut engine = PlaybackEngine::new(timeline, clock.clone(), PlayerConfig::default());
//! engine.play();
//! engine.tick();
//! clock.advance(200);
//! engine.tick(); // one step forward at 200 ms/step
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod shared;
pub mod timeline;
pub mod visits;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{PlayerComparePreferences, PlayerConfig, PlayerPreferences, DEFAULT_SPEED_MS, MIN_SPEED_MS};
pub use engine::{Generation, PlaybackEngine, PlayerState, PlayerStatus};
pub use shared::SharedPlayer;
pub use timeline::{DualTimeline, SingleTimeline, Timeline};
pub use visits::visit_counts;
