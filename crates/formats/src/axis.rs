use serde::{Deserialize, Serialize};

/// One of the two compass axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Label that maps to a positive signed value on this axis.
    pub fn positive(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Rechts,
            Axis::Vertical => Direction::Conservatief,
        }
    }

    /// Label that maps to a negative signed value on this axis.
    pub fn negative(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Links,
            Axis::Vertical => Direction::Progressief,
        }
    }

    /// Direction label for a signed value. Zero reads as the positive label.
    pub fn direction_for(self, signed: f64) -> Direction {
        if signed >= 0.0 {
            self.positive()
        } else {
            self.negative()
        }
    }
}

/// The fixed set of direction labels used in party titles and data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Links,
    Rechts,
    Progressief,
    Conservatief,
}

impl Direction {
    /// Parses a label case-insensitively. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "links" => Some(Direction::Links),
            "rechts" => Some(Direction::Rechts),
            "progressief" => Some(Direction::Progressief),
            "conservatief" => Some(Direction::Conservatief),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Links => "links",
            Direction::Rechts => "rechts",
            Direction::Progressief => "progressief",
            Direction::Conservatief => "conservatief",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Links | Direction::Rechts => Axis::Horizontal,
            Direction::Progressief | Direction::Conservatief => Axis::Vertical,
        }
    }

    /// +1.0 for the positive label of its axis, -1.0 for the negative one.
    pub fn sign(self) -> f64 {
        if self.axis().positive() == self { 1.0 } else { -1.0 }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabelPair {
    pub negative: String,
    pub positive: String,
}

impl AxisLabelPair {
    pub fn for_axis(axis: Axis) -> Self {
        Self {
            negative: axis.negative().label().to_string(),
            positive: axis.positive().label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub horizontal: AxisLabelPair,
    pub vertical: AxisLabelPair,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            horizontal: AxisLabelPair::for_axis(Axis::Horizontal),
            vertical: AxisLabelPair::for_axis(Axis::Vertical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisLabels, Direction};

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Direction::from_label(" Rechts "), Some(Direction::Rechts));
        assert_eq!(
            Direction::from_label("CONSERVATIEF"),
            Some(Direction::Conservatief)
        );
        assert_eq!(Direction::from_label("midden"), None);
    }

    #[test]
    fn signs_follow_axis_polarity() {
        assert_eq!(Direction::Rechts.sign(), 1.0);
        assert_eq!(Direction::Links.sign(), -1.0);
        assert_eq!(Direction::Conservatief.sign(), 1.0);
        assert_eq!(Direction::Progressief.sign(), -1.0);
    }

    #[test]
    fn zero_reads_as_positive_label() {
        assert_eq!(Axis::Horizontal.direction_for(0.0), Direction::Rechts);
        assert_eq!(Axis::Horizontal.direction_for(-0.1), Direction::Links);
        assert_eq!(Axis::Vertical.direction_for(3.0), Direction::Conservatief);
    }

    #[test]
    fn default_axis_labels_serialize() {
        let json = serde_json::to_value(AxisLabels::default()).unwrap();
        assert_eq!(json["horizontal"]["negative"], "links");
        assert_eq!(json["vertical"]["positive"], "conservatief");
    }
}
