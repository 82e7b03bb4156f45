use serde::{Deserialize, Serialize};

use crate::axis::{Axis, Direction};

/// Top-left corner of a party icon, in percent of the compass surface.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A percentage on one axis plus the label that gives it a direction.
///
/// The label is kept as text so that an unexpected label degrades to
/// "no data" instead of rejecting the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisValue {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub direction: String,
}

impl AxisValue {
    pub fn new(value: f64, direction: Direction) -> Self {
        Self {
            value,
            direction: direction.label().to_string(),
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::from_label(&self.direction)
    }

    /// Signed scalar for `axis`: `+value` for the positive label, `-value`
    /// for the negative one, 0.0 for anything unusable.
    pub fn signed(&self, axis: Axis) -> f64 {
        if !self.value.is_finite() {
            return 0.0;
        }
        match self.direction() {
            Some(dir) if dir.axis() == axis => self.value * dir.sign(),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticalPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<AxisValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<AxisValue>,
}

impl PoliticalPosition {
    pub fn get(&self, axis: Axis) -> Option<&AxisValue> {
        match axis {
            Axis::Horizontal => self.horizontal.as_ref(),
            Axis::Vertical => self.vertical.as_ref(),
        }
    }

    pub fn set(&mut self, value: AxisValue, axis: Axis) {
        match axis {
            Axis::Horizontal => self.horizontal = Some(value),
            Axis::Vertical => self.vertical = Some(value),
        }
    }

    /// Signed value on `axis`, 0.0 when the axis has no data.
    pub fn signed(&self, axis: Axis) -> f64 {
        self.get(axis).map(|v| v.signed(axis)).unwrap_or(0.0)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
}

impl ElectionResult {
    pub fn with_seats(seats: u32) -> Self {
        Self { seats: Some(seats) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub political_position: PoliticalPosition,
    #[serde(
        default,
        rename = "electionResults2025",
        skip_serializing_if = "Option::is_none"
    )]
    pub election_results_2025: Option<ElectionResult>,
}

impl Party {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            position,
            political_position: PoliticalPosition::default(),
            election_results_2025: None,
        }
    }

    pub fn seats(&self) -> Option<u32> {
        self.election_results_2025.and_then(|r| r.seats)
    }

    pub fn seats_or_zero(&self) -> u32 {
        self.seats().unwrap_or(0)
    }

    /// Short name normalized for matching (trimmed, uppercase).
    pub fn match_key(&self) -> String {
        normalize_short_name(&self.short_name)
    }
}

pub fn normalize_short_name(s: &str) -> String {
    s.trim().to_uppercase()
}
