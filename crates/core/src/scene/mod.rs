use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Rendered state of a single lighting group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupState {
    pub group_id: String,
    /// Normalised intensity in `[0, 1]`.
    pub intensity: f32,
    pub color: Rgb,
    pub focus_area: Option<String>,
}

impl GroupState {
    /// The "off" baseline every group starts from.
    pub fn off(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            intensity: 0.0,
            color: Rgb::OFF,
            focus_area: None,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.intensity == 0.0 && self.color.is_off()
    }
}

/// Holds the current state of every group the engine has touched.
///
/// Entries are created lazily and never removed; iteration order is the order
/// in which groups were first referenced.
#[derive(Debug, Default, Clone)]
pub struct SceneState {
    groups: IndexMap<String, GroupState>,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an "off" entry for `group_id` if none exists yet.
    pub fn ensure_group(&mut self, group_id: &str) -> &mut GroupState {
        self.groups
            .entry(group_id.to_string())
            .or_insert_with(|| GroupState::off(group_id))
    }

    /// Overwrites only the supplied fields. Intensity is clamped into `[0, 1]`.
    pub fn update_group(
        &mut self,
        group_id: &str,
        intensity: Option<f32>,
        color: Option<Rgb>,
        focus_area: Option<&str>,
    ) {
        let state = self.ensure_group(group_id);

        if let Some(intensity) = intensity {
            state.intensity = clamp_unit(intensity);
        }

        if let Some(color) = color {
            state.color = color;
        }

        if let Some(focus_area) = focus_area {
            state.focus_area = Some(focus_area.to_string());
        }
    }

    pub fn get(&self, group_id: &str) -> Option<&GroupState> {
        self.groups.get(group_id)
    }

    /// Copies every entry in first-seen order.
    pub fn snapshot(&self) -> Vec<GroupState> {
        self.groups.values().cloned().collect()
    }

    /// Zeroes intensity and colour on every entry, keeping the entries.
    pub fn reset(&mut self) {
        for state in self.groups.values_mut() {
            state.intensity = 0.0;
            state.color = Rgb::OFF;
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
