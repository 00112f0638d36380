//! Orbital positions such as `13.0E` or `0.8W`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::XrefError;

/// Rendered in place of an empty satellite set.
pub const UNKNOWN_SATELLITES: &str = "Unknown";

fn position_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+\.\d+)([EW])$").expect("satellite position regex must compile")
    })
}

fn section_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:\d+(?:\.\d+)?\s*°?\s*[EW]|dvb-?[stc]2?|iptv|cable|terrestrial|satellite|ott)\b",
        )
        .expect("section label regex must compile")
    })
}

/// True when a comment is a satellite or transport heading rather than a
/// channel name (e.g. `13.0E`, `19.2 E`, `DVB-T`, `IPTV`).
pub fn is_section_label(text: &str) -> bool {
    let text = text.trim();
    position_re().is_match(text) || section_label_re().is_match(text)
}

/// A satellite orbital position.
///
/// Ordered by signed degrees (West negative), then by the original text.
#[derive(Debug, Clone)]
pub struct SatellitePosition {
    raw: String,
    degrees: f64,
}

impl SatellitePosition {
    /// Parse `<digits>.<digits>[EW]`, ignoring surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        let caps = position_re().captures(raw)?;
        let magnitude: f64 = caps[1].parse().ok()?;
        let degrees = if &caps[2] == "W" { -magnitude } else { magnitude };
        Some(Self {
            raw: raw.to_string(),
            degrees,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Signed position in degrees; West is negative.
    pub fn degrees(&self) -> f64 {
        self.degrees
    }
}

impl PartialEq for SatellitePosition {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SatellitePosition {}

impl Hash for SatellitePosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for SatellitePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SatellitePosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degrees
            .total_cmp(&other.degrees)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl fmt::Display for SatellitePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for SatellitePosition {
    type Err = XrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| XrefError::invalid_satellite(s))
    }
}

/// Render a set of positions for a report line: ascending, `|`-joined,
/// [`UNKNOWN_SATELLITES`] when empty.
pub fn format_satellites<'a, I>(positions: I) -> String
where
    I: IntoIterator<Item = &'a SatellitePosition>,
{
    let mut sorted: Vec<&SatellitePosition> = positions.into_iter().collect();
    if sorted.is_empty() {
        return UNKNOWN_SATELLITES.to_string();
    }
    sorted.sort();
    sorted.dedup();
    sorted
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join("|")
}
