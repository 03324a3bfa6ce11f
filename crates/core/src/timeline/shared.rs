use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use super::{Clock, PlaybackEngine, PlaybackEvent, PlaybackStatus, SystemClock};
use crate::{GroupState, LightingError, LightingInstruction, Result};

/// Thread-safe handle over a single [`PlaybackEngine`].
///
/// Every transport call takes the same lock, so writers are serialised and a
/// snapshot taken by [`SharedEngine::tick`] always matches the `update()` that
/// produced it. The lock is never held across I/O.
pub struct SharedEngine<C: Clock = SystemClock> {
    shared: Arc<Mutex<PlaybackEngine<C>>>,
}

impl<C: Clock> SharedEngine<C> {
    pub fn new(engine: PlaybackEngine<C>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn load(&self, instructions: Vec<LightingInstruction>) -> Result<()> {
        self.lock()?.load(instructions)
    }

    pub fn play(&self) -> Result<PlaybackStatus> {
        let mut engine = self.lock()?;
        engine.play();
        Ok(engine.status())
    }

    pub fn pause(&self) -> Result<PlaybackStatus> {
        let mut engine = self.lock()?;
        engine.pause();
        Ok(engine.status())
    }

    pub fn stop(&self) -> Result<PlaybackStatus> {
        let mut engine = self.lock()?;
        engine.stop();
        Ok(engine.status())
    }

    pub fn seek(&self, time_seconds: f64) -> Result<PlaybackStatus> {
        Ok(self.lock()?.seek(time_seconds))
    }

    pub fn status(&self) -> Result<PlaybackStatus> {
        Ok(self.lock()?.status())
    }

    pub fn snapshot(&self) -> Result<Vec<GroupState>> {
        Ok(self.lock()?.snapshot())
    }

    /// Advances the engine and copies the scene under one lock acquisition.
    pub fn tick(&self) -> Result<(PlaybackStatus, Vec<GroupState>)> {
        let mut engine = self.lock()?;
        let status = engine.update();
        Ok((status, engine.snapshot()))
    }

    pub fn subscribe(&self) -> Result<broadcast::Receiver<PlaybackEvent>> {
        Ok(self.lock()?.subscribe())
    }

    fn lock(&self) -> Result<MutexGuard<'_, PlaybackEngine<C>>> {
        self.shared
            .lock()
            .map_err(|_| LightingError::Poisoned("playback engine"))
    }
}

impl<C: Clock> Clone for SharedEngine<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: Clock> std::fmt::Debug for SharedEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine").finish()
    }
}
