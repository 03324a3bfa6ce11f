//! Instruction data model consumed by the playback engine and device adapter.
//!
//! Instructions arrive pre-validated from the decision layer. Decoding is
//! lenient about optional keys; the only shape checks performed here are the
//! ones that would otherwise corrupt timing (a missing or inverted window).

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{color::intensity_label, LightingError, Result};

/// Half-open window `[start, end)` in seconds from the top of the show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(alias = "start_time")]
    pub start: f64,
    #[serde(alias = "end_time")]
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `t` falls inside the window. The end is exclusive.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    #[default]
    Fade,
    Crossfade,
    Snap,
    Smooth,
    Pulse,
    Flicker,
    Strobe,
    Cut,
    #[serde(other)]
    Other,
}

impl TransitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::Fade => "fade",
            TransitionType::Crossfade => "crossfade",
            TransitionType::Snap => "snap",
            TransitionType::Smooth => "smooth",
            TransitionType::Pulse => "pulse",
            TransitionType::Flicker => "flicker",
            TransitionType::Strobe => "strobe",
            TransitionType::Cut => "cut",
            TransitionType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "type", default)]
    pub kind: TransitionType,
    #[serde(alias = "duration", default)]
    pub duration_seconds: f64,
}

impl Transition {
    pub fn new(kind: TransitionType, duration_seconds: f64) -> Self {
        Self {
            kind,
            duration_seconds,
        }
    }

    pub fn fade(duration_seconds: f64) -> Self {
        Self::new(TransitionType::Fade, duration_seconds)
    }

    pub fn cut() -> Self {
        Self::new(TransitionType::Cut, 0.0)
    }
}

/// Semantic parameters for one group. Intensity is a 0-100 percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightingParameters {
    #[serde(default)]
    pub intensity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInstruction {
    pub group_id: String,
    #[serde(default)]
    pub parameters: LightingParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl GroupInstruction {
    pub fn new(group_id: impl Into<String>, intensity: f32, color: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            parameters: LightingParameters {
                intensity,
                color: Some(color.into()),
                focus_area: None,
            },
            transition: None,
        }
    }

    pub fn with_focus(mut self, focus_area: impl Into<String>) -> Self {
        self.parameters.focus_area = Some(focus_area.into());
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Transition applied when entering this state. Absent means a cut.
    pub fn transition_or_cut(&self) -> Transition {
        self.transition.clone().unwrap_or_else(Transition::cut)
    }
}

impl fmt::Display for GroupInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = &self.parameters;
        write!(
            f,
            "{} {} {}",
            self.group_id,
            params.color.as_deref().unwrap_or("-"),
            intensity_label(params.intensity)
        )?;
        if let Some(focus) = &params.focus_area {
            write!(f, " on {focus}")?;
        }
        let transition = self.transition_or_cut();
        write!(f, " ({} {:.1}s)", transition.kind.as_str(), transition.duration_seconds)
    }
}

/// A time-bounded lighting directive for one or more groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingInstruction {
    #[serde(default = "unknown_scene")]
    pub scene_id: String,
    pub time_window: TimeWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn unknown_scene() -> String {
    "unknown".to_string()
}

impl LightingInstruction {
    pub fn new(scene_id: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            scene_id: scene_id.into(),
            time_window: TimeWindow::new(start, end),
            emotion: None,
            groups: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_group(mut self, group: GroupInstruction) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    pub fn is_active_at(&self, t: f64) -> bool {
        self.time_window.contains(t)
    }

    /// Rejects windows that would break timing: non-finite bounds, negative
    /// starts, or an end before the start.
    pub fn validate(&self) -> Result<()> {
        let TimeWindow { start, end } = self.time_window;

        if !start.is_finite() || !end.is_finite() {
            return Err(LightingError::invalid_instruction(
                &self.scene_id,
                "time window bounds must be finite",
            ));
        }

        if start < 0.0 {
            return Err(LightingError::invalid_instruction(
                &self.scene_id,
                format!("time window starts before zero ({start})"),
            ));
        }

        if start > end {
            return Err(LightingError::invalid_instruction(
                &self.scene_id,
                format!("time window ends before it starts ({start} > {end})"),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for LightingInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = &self.time_window;
        write!(
            f,
            "{} [{:.2}s, {:.2}s) {:.2}s",
            self.scene_id,
            window.start,
            window.end,
            window.duration()
        )?;
        if let Some(emotion) = &self.emotion {
            write!(f, " {emotion}")?;
        }
        Ok(())
    }
}

/// Decodes a JSON array of instructions.
pub fn parse_instructions(json: &str) -> Result<Vec<LightingInstruction>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and decodes a JSON instruction file.
pub fn load_instructions(path: impl AsRef<Path>) -> Result<Vec<LightingInstruction>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let instructions = parse_instructions(&raw)?;
    tracing::debug!(?path, count = instructions.len(), "decoded instructions");
    Ok(instructions)
}
