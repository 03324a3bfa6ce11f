use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, TransitionType};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub broadcast: BroadcastConfig,
    pub venue: VenueConfig,
}

impl AppConfig {
    pub fn live_defaults() -> Self {
        Self::default()
    }

    /// Reads a JSON config file. Missing sections take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(?path, "loaded configuration");
        Ok(config)
    }
}

/// Configuration specific to the playback engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Transition types that interpolate intensity instead of cutting.
    pub fade_transitions: Vec<TransitionType>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fade_transitions: vec![TransitionType::Fade, TransitionType::Crossfade],
        }
    }
}

/// Configuration for the observer broadcast loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    pub frame_rate: u32,
    pub channel_capacity: usize,
}

impl BroadcastConfig {
    /// Interval between frames. A zero frame rate is treated as one per second.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            channel_capacity: 64,
        }
    }
}

/// Venue specifics for the device adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub fixtures_path: Option<PathBuf>,
}
