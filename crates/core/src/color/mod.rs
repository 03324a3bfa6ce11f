//! Pure lookups from semantic lighting vocabulary to display and device values.
//!
//! Nothing in here fails. Unknown names fall back to full white, unknown focus
//! areas fall back to a home position, and intensities are clamped before they
//! are scaled, so a typo upstream can never black out the stage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the native device range for a single channel.
pub const DEVICE_MAX: u8 = 255;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Baseline colour for a group that has been reset.
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    /// Safe default for names that cannot be resolved.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }

    /// Lower-case `#rrggbb` representation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::OFF
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

const PALETTE: &[(&str, Rgb)] = &[
    ("white", Rgb::new(255, 255, 255)),
    ("warm_white", Rgb::new(255, 244, 229)),
    ("warm_amber", Rgb::new(255, 191, 0)),
    ("amber", Rgb::new(255, 126, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cool_white", Rgb::new(240, 248, 255)),
    ("steel_blue", Rgb::new(70, 130, 180)),
    ("lavender", Rgb::new(230, 230, 250)),
    ("deep_red", Rgb::new(150, 0, 50)),
    ("dark_red", Rgb::new(139, 0, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("deep_purple", Rgb::new(50, 0, 100)),
    ("purple", Rgb::new(128, 0, 128)),
    ("blue", Rgb::new(0, 0, 255)),
    ("green", Rgb::new(0, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("pink", Rgb::new(255, 192, 203)),
    ("neutral", Rgb::new(255, 255, 255)),
    ("off", Rgb::OFF),
    ("black", Rgb::OFF),
];

/// Resolves a palette name or `#rrggbb` string to a display colour.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Anything
/// that is neither a known name nor a well-formed hex string resolves to
/// [`Rgb::WHITE`].
pub fn resolve_color(name_or_hex: &str) -> Rgb {
    let key = name_or_hex.trim().to_ascii_lowercase();

    if let Some(rgb) = lookup_named(&key) {
        return rgb;
    }

    if let Some(rgb) = parse_hex(&key) {
        return rgb;
    }

    tracing::warn!(color = name_or_hex, "unknown colour, falling back to white");
    Rgb::WHITE
}

fn lookup_named(key: &str) -> Option<Rgb> {
    PALETTE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rgb)| *rgb)
}

fn parse_hex(key: &str) -> Option<Rgb> {
    let digits = key.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Maps a 0-100 percentage onto `0..=DEVICE_MAX`, truncating.
///
/// Values outside the percentage range are clamped first; NaN maps to zero.
pub fn intensity_to_device(percent: f32) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    let clamped = percent.clamp(0.0, 100.0);
    ((clamped / 100.0) * DEVICE_MAX as f32) as u8
}

/// Human readable band for an intensity percentage.
pub fn intensity_label(percent: f32) -> &'static str {
    if percent <= 0.0 || percent.is_nan() {
        "Off"
    } else if percent < 20.0 {
        "Very Dim"
    } else if percent < 40.0 {
        "Dim"
    } else if percent < 60.0 {
        "Medium"
    } else if percent < 80.0 {
        "Bright"
    } else {
        "Very Bright"
    }
}

/// Closed set of stage regions a group can be focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    CenterStage,
    StageLeft,
    StageRight,
    Upstage,
    Downstage,
    FullStage,
    Audience,
}

impl FocusArea {
    pub const ALL: [FocusArea; 7] = [
        FocusArea::CenterStage,
        FocusArea::StageLeft,
        FocusArea::StageRight,
        FocusArea::Upstage,
        FocusArea::Downstage,
        FocusArea::FullStage,
        FocusArea::Audience,
    ];

    /// Parses a focus label, tolerating case and a couple of short aliases.
    pub fn parse(label: &str) -> Option<Self> {
        let key = label.trim().to_ascii_lowercase();
        let area = match key.as_str() {
            "center_stage" | "center" | "centre" => FocusArea::CenterStage,
            "stage_left" => FocusArea::StageLeft,
            "stage_right" => FocusArea::StageRight,
            "upstage" => FocusArea::Upstage,
            "downstage" => FocusArea::Downstage,
            "full_stage" => FocusArea::FullStage,
            "audience" | "house" => FocusArea::Audience,
            _ => return None,
        };
        Some(area)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::CenterStage => "center_stage",
            FocusArea::StageLeft => "stage_left",
            FocusArea::StageRight => "stage_right",
            FocusArea::Upstage => "upstage",
            FocusArea::Downstage => "downstage",
            FocusArea::FullStage => "full_stage",
            FocusArea::Audience => "audience",
        }
    }

    /// Pan/tilt preset for moving heads aimed at this region.
    pub fn position(&self) -> PanTilt {
        match self {
            FocusArea::CenterStage => PanTilt::new(128, 100),
            FocusArea::StageLeft => PanTilt::new(64, 100),
            FocusArea::StageRight => PanTilt::new(192, 100),
            FocusArea::Upstage => PanTilt::new(128, 70),
            FocusArea::Downstage => PanTilt::new(128, 130),
            FocusArea::FullStage => PanTilt::new(128, 100),
            FocusArea::Audience => PanTilt::new(128, 160),
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device values for the pan and tilt channels of a moving head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanTilt {
    pub pan: u8,
    pub tilt: u8,
}

impl PanTilt {
    /// Home position used for absent or unrecognised focus areas.
    pub const FALLBACK: PanTilt = PanTilt::new(128, 100);

    pub const fn new(pan: u8, tilt: u8) -> Self {
        Self { pan, tilt }
    }
}

/// Looks up the pan/tilt preset for a focus label.
pub fn focus_area_to_position(focus_area: Option<&str>) -> PanTilt {
    focus_area
        .and_then(FocusArea::parse)
        .map(|area| area.position())
        .unwrap_or(PanTilt::FALLBACK)
}
