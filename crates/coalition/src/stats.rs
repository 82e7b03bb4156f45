use formats::{Axis, Direction, Party};
use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::selection::SelectionSet;
use crate::table::PartyTable;

/// Weight used for a party without seat data when averaging positions.
pub const MISSING_SEATS_WEIGHT: f64 = 1.0;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    #[default]
    Unweighted,
    Seats,
}

impl Weighting {
    pub fn from_weighted(weighted: bool) -> Self {
        if weighted {
            Weighting::Seats
        } else {
            Weighting::Unweighted
        }
    }

    /// Weight of one party under this scheme.
    pub fn weight_of(self, party: &Party) -> f64 {
        match self {
            Weighting::Unweighted => 1.0,
            Weighting::Seats => party
                .seats()
                .map(f64::from)
                .unwrap_or(MISSING_SEATS_WEIGHT),
        }
    }
}

pub struct Statistics;

impl Statistics {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        Some(sum / values.len() as f64)
    }

    /// Weighted mean of `(weight, value)` samples.
    ///
    /// When the weights sum to zero the plain mean over the sample count is
    /// returned instead.
    pub fn weighted_mean(samples: &[(f64, f64)]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let total_weight: f64 = samples.iter().map(|(w, _)| w).sum();
        if total_weight == 0.0 {
            let values: Vec<f64> = samples.iter().map(|(_, v)| *v).collect();
            return Self::mean(&values);
        }
        let sum: f64 = samples.iter().map(|(w, v)| w * v).sum();
        Some(sum / total_weight)
    }

    /// Weighted centroid of `(weight, point)` samples, same fallback as
    /// [`Statistics::weighted_mean`].
    pub fn weighted_centroid(samples: &[(f64, Vec2)]) -> Option<Vec2> {
        if samples.is_empty() {
            return None;
        }
        let total_weight: f64 = samples.iter().map(|(w, _)| w).sum();
        if total_weight == 0.0 {
            let sum: Vec2 = samples.iter().map(|(_, p)| *p).sum();
            return Some(sum / samples.len() as f64);
        }
        let sum: Vec2 = samples.iter().map(|(w, p)| *p * *w).sum();
        Some(sum / total_weight)
    }
}

fn selected<'a>(
    table: &'a PartyTable,
    selection: &'a SelectionSet,
) -> impl Iterator<Item = &'a Party> + 'a {
    selection.iter().filter_map(|idx| table.get(idx))
}

/// Sum of seats over the selection. Parties without seat data count as 0.
pub fn seat_total(table: &PartyTable, selection: &SelectionSet) -> u64 {
    selected(table, selection)
        .map(|p| u64::from(p.seats_or_zero()))
        .sum()
}

/// Centroid of the selected parties' positions. `None` for an empty
/// selection.
pub fn average_position(
    table: &PartyTable,
    selection: &SelectionSet,
    weighting: Weighting,
) -> Option<Vec2> {
    let samples: Vec<(f64, Vec2)> = selected(table, selection)
        .map(|p| {
            (
                weighting.weight_of(p),
                Vec2::new(p.position.x, p.position.y),
            )
        })
        .collect();
    Statistics::weighted_centroid(&samples)
}

/// Mean signed position on one axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisReading {
    pub axis: Axis,
    pub signed: f64,
}

impl AxisReading {
    pub fn magnitude(&self) -> f64 {
        self.signed.abs()
    }

    pub fn direction(&self) -> Direction {
        self.axis.direction_for(self.signed)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisAverages {
    pub horizontal: AxisReading,
    pub vertical: AxisReading,
}

/// Averages each axis as signed values, so that opposite directions cancel
/// out. Missing axis data contributes 0.0 but still carries its weight.
pub fn signed_average(
    table: &PartyTable,
    selection: &SelectionSet,
    weighting: Weighting,
) -> Option<AxisAverages> {
    let parties: Vec<&Party> = selected(table, selection).collect();
    let reading = |axis: Axis| -> Option<AxisReading> {
        let samples: Vec<(f64, f64)> = parties
            .iter()
            .map(|p| (weighting.weight_of(p), p.political_position.signed(axis)))
            .collect();
        Statistics::weighted_mean(&samples).map(|signed| AxisReading { axis, signed })
    };
    Some(AxisAverages {
        horizontal: reading(Axis::Horizontal)?,
        vertical: reading(Axis::Vertical)?,
    })
}
