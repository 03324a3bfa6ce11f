//! Fixed-rate observation loop that pushes rendered frames to observers.
//!
//! The loop samples the engine on its own interval, independent of where
//! instructions start and end. Observers subscribe to a broadcast channel and
//! the loop has no idea how many there are; a slow receiver lags on its own
//! side and never holds up the engine.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{
    config::BroadcastConfig, Clock, LightingError, PlaybackStatus, PresentationAdapter,
    PresentationFrame, Result, SharedEngine,
};

/// What observers receive on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastFrame {
    pub sequence: u64,
    pub status: PlaybackStatus,
    pub visuals: PresentationFrame,
}

/// Handle to a running broadcast task.
#[derive(Debug)]
pub struct BroadcastLoop {
    frames: broadcast::Sender<BroadcastFrame>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl BroadcastLoop {
    /// Spawns the loop on the current tokio runtime.
    pub fn spawn<C: Clock>(
        engine: SharedEngine<C>,
        adapter: PresentationAdapter,
        config: &BroadcastConfig,
    ) -> Self {
        let (frames, _) = broadcast::channel(config.channel_capacity.max(1));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let interval = config.frame_interval();

        tracing::info!(frame_rate = config.frame_rate, "starting broadcast loop");
        let task = tokio::spawn(run(engine, adapter, frames.clone(), interval, shutdown_rx));

        Self {
            frames,
            shutdown,
            task,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastFrame> {
        self.frames.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.frames.receiver_count()
    }

    /// Stops the loop and waits for it to exit. Engine state is untouched.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown.send(true);
        self.task
            .await
            .map_err(|err| LightingError::msg(format!("broadcast task failed: {err}")))
    }
}

async fn run<C: Clock>(
    engine: SharedEngine<C>,
    adapter: PresentationAdapter,
    frames: broadcast::Sender<BroadcastFrame>,
    interval: std::time::Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut sequence = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        // The engine lock is released before anything is sent.
        let (status, snapshot) = match engine.tick() {
            Ok(sample) => sample,
            Err(err) => {
                tracing::error!(%err, "engine unavailable, stopping broadcast loop");
                break;
            }
        };

        let frame = BroadcastFrame {
            sequence,
            status,
            visuals: adapter.to_frame(&snapshot, status.elapsed_time),
        };
        sequence += 1;

        if frames.send(frame).is_err() {
            tracing::trace!(sequence, "no observers connected");
        }
    }

    tracing::info!(frames = sequence, "broadcast loop stopped");
}
