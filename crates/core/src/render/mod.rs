//! Reshapes scene snapshots into positioned lights for external renderers.

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::GroupState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A single light as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRecord {
    pub id: String,
    pub position: Position,
    pub intensity: f32,
    /// `#rrggbb`.
    pub color: String,
    pub focus_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationFrame {
    pub timestamp: f64,
    pub lights: Vec<LightRecord>,
}

/// Illustrative stage layout; not tied to any real venue geometry.
const DEFAULT_LAYOUT: &[(&str, Position)] = &[
    ("front_wash", Position::new(0.0, 8.0, 8.0)),
    ("back_light", Position::new(0.0, 8.0, -5.0)),
    ("side_left", Position::new(-8.0, 4.0, 0.0)),
    ("side_right", Position::new(8.0, 4.0, 0.0)),
    ("side_fill", Position::new(-8.0, 5.0, 2.0)),
    ("center_spot", Position::new(0.0, 10.0, 0.0)),
    ("specials", Position::new(0.0, 10.0, 2.0)),
    ("ambient", Position::new(0.0, 14.0, 0.0)),
    ("house_lights", Position::new(0.0, 12.0, 10.0)),
];

/// Maps group ids to positions and builds [`PresentationFrame`]s.
#[derive(Debug, Clone)]
pub struct PresentationAdapter {
    layout: IndexMap<String, Position>,
}

impl Default for PresentationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationAdapter {
    pub fn new() -> Self {
        Self::with_layout(
            DEFAULT_LAYOUT
                .iter()
                .map(|(id, position)| (id.to_string(), *position)),
        )
    }

    pub fn with_layout(layout: impl IntoIterator<Item = (String, Position)>) -> Self {
        Self {
            layout: layout.into_iter().collect(),
        }
    }

    /// Layout position for known groups, otherwise a generated one.
    pub fn position_for(&self, group_id: &str) -> Position {
        self.layout
            .get(group_id)
            .copied()
            .unwrap_or_else(|| generated_position(group_id))
    }

    pub fn to_frame(&self, snapshot: &[GroupState], timestamp: f64) -> PresentationFrame {
        let lights = snapshot
            .iter()
            .map(|state| LightRecord {
                id: state.group_id.clone(),
                position: self.position_for(&state.group_id),
                intensity: state.intensity,
                color: state.color.to_hex(),
                focus_label: state.focus_area.clone(),
            })
            .collect();

        PresentationFrame { timestamp, lights }
    }
}

/// Stable pseudo-random position above the stage, seeded from the id alone.
///
/// The same id yields the same position in every process.
pub fn generated_position(group_id: &str) -> Position {
    let digest = Sha256::digest(group_id.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);

    let mut rng = ChaCha8Rng::from_seed(seed);
    Position {
        x: rng.random_range(-10.0..10.0),
        y: rng.random_range(5.0..12.0),
        z: rng.random_range(-5.0..5.0),
    }
}
