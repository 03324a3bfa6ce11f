//! Expansion of group-level intent into fixture-level channel values.
//!
//! The adapter runs once per instruction when a cue sheet is requested. It
//! never reads or writes the scene state.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    color::{focus_area_to_position, intensity_to_device, resolve_color},
    GroupInstruction, LightingInstruction, Result, Rgb, TransitionType,
};

/// Logical groups the decision layer addresses.
pub const CANONICAL_GROUPS: [&str; 5] = ["front_wash", "back_light", "side_fill", "specials", "ambient"];

/// Group that absorbs fixtures no other group claims.
pub const FALLBACK_GROUP: &str = "front_wash";

/// Channel attributes a fixture may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Red,
    Green,
    Blue,
    Intensity,
    Pan,
    Tilt,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Red => "red",
            Capability::Green => "green",
            Capability::Blue => "blue",
            Capability::Intensity => "intensity",
            Capability::Pan => "pan",
            Capability::Tilt => "tilt",
        }
    }
}

/// Channel number for a capability, either bare or as `{"channel": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelSpec {
    Channel(u16),
    Detailed { channel: u16 },
}

impl ChannelSpec {
    pub fn channel(&self) -> u16 {
        match self {
            ChannelSpec::Channel(channel) | ChannelSpec::Detailed { channel } => *channel,
        }
    }
}

/// One physical fixture from the venue inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    #[serde(rename = "type", default)]
    pub fixture_type: String,
    #[serde(default)]
    pub dmx_start_channel: u16,
    /// Explicit group membership. Takes precedence over the type heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub notes: String,
    /// Capability name to channel. Names outside [`Capability`] are kept but
    /// never written.
    #[serde(default)]
    pub capabilities: BTreeMap<String, ChannelSpec>,
}

impl Fixture {
    pub fn channel(&self, capability: Capability) -> Option<u16> {
        self.capabilities
            .get(capability.as_str())
            .map(ChannelSpec::channel)
    }

    /// Group this fixture belongs to. Always one of [`CANONICAL_GROUPS`].
    pub fn assigned_group(&self) -> &'static str {
        if let Some(group) = self.group.as_deref() {
            if let Some(canonical) = CANONICAL_GROUPS.iter().copied().find(|g| *g == group) {
                return canonical;
            }
            tracing::warn!(fixture = %self.id, group, "unknown group, using fallback");
            return FALLBACK_GROUP;
        }

        let kind = self.fixture_type.to_ascii_lowercase();
        if kind.contains("par") || self.id.contains("PAR") {
            if self.notes.to_ascii_lowercase().contains("front") {
                "front_wash"
            } else {
                "back_light"
            }
        } else if kind.contains("moving") {
            "specials"
        } else if kind.contains("wash") || kind.contains("rgb") {
            "ambient"
        } else {
            FALLBACK_GROUP
        }
    }
}

/// Venue fixture list, as stored in `{"fixtures": [...]}` JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureInventory {
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

impl FixtureInventory {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an inventory file. A missing file yields an empty inventory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(?path, "fixture inventory not found, using empty inventory");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let inventory = Self::from_json(&raw)?;
        tracing::info!(?path, fixtures = inventory.fixtures.len(), "loaded fixture inventory");
        Ok(inventory)
    }
}

/// Channel writes for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCue {
    pub fixture_id: String,
    pub fixture_type: String,
    pub dmx_start_channel: u16,
    /// Channel number to device value, ascending by channel.
    pub channels: BTreeMap<u16, u8>,
    pub transition_type: TransitionType,
    pub transition_duration: f64,
    pub description: String,
}

/// Fixture-level rendering of one instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueSheet {
    pub scene_id: String,
    pub emotion: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    /// `generation_method` from the instruction metadata, or `"unknown"`.
    pub generation_method: String,
    pub cues: Vec<FixtureCue>,
}

/// Turns semantic group instructions into fixture channel values.
#[derive(Debug, Clone)]
pub struct DeviceAdapter {
    inventory: FixtureInventory,
    groups: IndexMap<&'static str, Vec<usize>>,
}

impl DeviceAdapter {
    pub fn new(inventory: FixtureInventory) -> Self {
        let mut groups: IndexMap<&'static str, Vec<usize>> = CANONICAL_GROUPS
            .iter()
            .map(|group| (*group, Vec::new()))
            .collect();

        for (index, fixture) in inventory.fixtures.iter().enumerate() {
            groups
                .entry(fixture.assigned_group())
                .or_default()
                .push(index);
        }

        tracing::debug!(
            fixtures = inventory.fixtures.len(),
            groups = ?groups.iter().map(|(g, f)| (*g, f.len())).collect::<Vec<_>>(),
            "built group mapping"
        );

        Self { inventory, groups }
    }

    pub fn inventory(&self) -> &FixtureInventory {
        &self.inventory
    }

    /// Fixtures claimed by `group_id`, in inventory order. Unknown groups
    /// have no fixtures.
    pub fn fixtures_in<'a>(&'a self, group_id: &str) -> impl Iterator<Item = &'a Fixture> + 'a {
        self.groups
            .get(group_id)
            .into_iter()
            .flatten()
            .map(move |index| &self.inventory.fixtures[*index])
    }

    pub fn convert(&self, instruction: &LightingInstruction) -> CueSheet {
        let cues: Vec<FixtureCue> = instruction
            .groups
            .iter()
            .flat_map(|group| {
                self.fixtures_in(&group.group_id)
                    .map(move |fixture| fixture_cue(fixture, group))
            })
            .collect();

        tracing::debug!(
            scene = %instruction.scene_id,
            cues = cues.len(),
            "converted instruction to fixture cues"
        );

        CueSheet {
            scene_id: instruction.scene_id.clone(),
            emotion: instruction.emotion.clone(),
            start_time: instruction.time_window.start,
            end_time: instruction.time_window.end,
            generation_method: generation_method(instruction).to_string(),
            cues,
        }
    }

    pub fn convert_all(&self, instructions: &[LightingInstruction]) -> Vec<CueSheet> {
        instructions
            .iter()
            .map(|instruction| self.convert(instruction))
            .collect()
    }
}

fn generation_method(instruction: &LightingInstruction) -> &str {
    instruction
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.get("generation_method"))
        .and_then(|method| method.as_str())
        .unwrap_or("unknown")
}

/// Writes every channel the fixture actually has.
pub fn fixture_cue(fixture: &Fixture, group: &GroupInstruction) -> FixtureCue {
    let params = &group.parameters;
    let color_name = params.color.as_deref().unwrap_or("white");
    let rgb: Rgb = resolve_color(color_name);
    let position = focus_area_to_position(params.focus_area.as_deref());

    let writes = [
        (Capability::Red, rgb.r),
        (Capability::Green, rgb.g),
        (Capability::Blue, rgb.b),
        (Capability::Intensity, intensity_to_device(params.intensity)),
        (Capability::Pan, position.pan),
        (Capability::Tilt, position.tilt),
    ];

    let channels = writes
        .into_iter()
        .filter_map(|(capability, value)| fixture.channel(capability).map(|ch| (ch, value)))
        .collect();

    let transition = group.transition_or_cut();

    FixtureCue {
        fixture_id: fixture.id.clone(),
        fixture_type: fixture.fixture_type.clone(),
        dmx_start_channel: fixture.dmx_start_channel,
        channels,
        transition_type: transition.kind,
        transition_duration: transition.duration_seconds,
        description: format!("{color_name} @ {}%", params.intensity),
    }
}
