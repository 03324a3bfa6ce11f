//! Core library for the Stage Lighting playback system.
//!
//! The crate turns a timed list of semantic lighting instructions into
//! rendered group state, and that state into device channel values or
//! positioned lights for a renderer. Each module owns one stage of that path:
//! value resolution, the scene store, the playback engine, the two adapters
//! and the broadcast loop that feeds observers.

pub mod broadcast;
pub mod color;
pub mod config;
pub mod cue;
pub mod error;
pub mod mapping;
pub mod render;
pub mod scene;
pub mod timeline;

pub use broadcast::{BroadcastFrame, BroadcastLoop};
pub use color::{focus_area_to_position, intensity_to_device, resolve_color, FocusArea, PanTilt, Rgb};
pub use config::{AppConfig, BroadcastConfig, PlaybackConfig, VenueConfig};
pub use cue::{
    load_instructions, parse_instructions, GroupInstruction, LightingInstruction,
    LightingParameters, TimeWindow, Transition, TransitionType,
};
pub use error::{LightingError, Result};
pub use mapping::{CueSheet, DeviceAdapter, Fixture, FixtureCue, FixtureInventory};
pub use render::{LightRecord, Position, PresentationAdapter, PresentationFrame};
pub use scene::{GroupState, SceneState};
pub use timeline::{
    Clock, ManualClock, PlaybackClock, PlaybackEngine, PlaybackEvent, PlaybackState,
    PlaybackStatus, SharedEngine, SystemClock, TransitionOrigin,
};
