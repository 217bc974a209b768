//! A playback engine shared between a timer thread and control callers.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::{Clock, Generation, PlaybackEngine, PlayerState, Timeline};

/// Cloneable handle serializing every tick and control call through one
/// mutex.
///
/// A timer thread should read [`generation`](Self::generation) when it
/// schedules a tick and deliver it with
/// [`tick_if_current`](Self::tick_if_current): a `stop` or `pause` that
/// lands in between bumps the generation and the stale tick is dropped.
pub struct SharedPlayer<T: Timeline, C: Clock> {
    inner: Arc<Mutex<PlaybackEngine<T, C>>>,
}

impl<T: Timeline, C: Clock> Clone for SharedPlayer<T, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Timeline, C: Clock> SharedPlayer<T, C> {
    pub fn new(engine: PlaybackEngine<T, C>) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    /// Exclusive access for control calls.
    pub fn lock(&self) -> MutexGuard<'_, PlaybackEngine<T, C>> {
        self.inner.lock()
    }

    pub fn with<F, Out>(&self, f: F) -> Out
    where
        F: FnOnce(&mut PlaybackEngine<T, C>) -> Out,
    {
        let mut engine = self.inner.lock();
        f(&mut *engine)
    }

    pub fn state(&self) -> PlayerState {
        self.inner.lock().state()
    }

    pub fn generation(&self) -> Generation {
        self.inner.lock().generation()
    }

    /// Tick only if no control call changed status or pallet since
    /// `scheduled` was read.
    pub fn tick_if_current(&self, scheduled: Generation) -> bool {
        let mut engine = self.inner.lock();
        if engine.generation() != scheduled {
            tracing::trace!(?scheduled, current = ?engine.generation(), "dropping stale tick");
            return false;
        }
        engine.tick()
    }
}
