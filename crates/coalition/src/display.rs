//! Read-out strings. Rounding to one decimal happens here and nowhere else.

use foundation::math::Vec2;

use crate::reducer::CoalitionStats;
use crate::stats::AxisReading;

/// `10.0% rechts`
pub fn format_axis(reading: &AxisReading) -> String {
    format!("{:.1}% {}", reading.magnitude(), reading.direction())
}

/// `x 45.0% · y 30.0%`
pub fn format_position(position: Vec2) -> String {
    format!("x {:.1}% · y {:.1}%", position.x, position.y)
}

pub fn format_seats(stats: &CoalitionStats) -> String {
    let seats = match stats.seat_total {
        1 => "1 zetel".to_string(),
        n => format!("{n} zetels"),
    };
    if stats.house_seats == 0 || stats.is_empty() {
        return seats;
    }
    if stats.has_majority {
        format!("{seats} van {} (meerderheid)", stats.house_seats)
    } else {
        format!("{seats} van {} (geen meerderheid)", stats.house_seats)
    }
}

/// Text for each line of the stats panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsView {
    pub parties: String,
    pub seats: String,
    pub position: String,
    pub horizontal: String,
    pub vertical: String,
}

impl StatsView {
    pub fn from_stats(stats: &CoalitionStats) -> Self {
        if stats.is_empty() {
            return Self {
                parties: "Geen partijen geselecteerd".to_string(),
                seats: format_seats(stats),
                position: "–".to_string(),
                horizontal: "–".to_string(),
                vertical: "–".to_string(),
            };
        }
        let (horizontal, vertical) = match &stats.axes {
            Some(axes) => (format_axis(&axes.horizontal), format_axis(&axes.vertical)),
            None => ("–".to_string(), "–".to_string()),
        };
        Self {
            parties: stats.short_names.join(", "),
            seats: format_seats(stats),
            position: stats
                .average_position
                .map(format_position)
                .unwrap_or_else(|| "–".to_string()),
            horizontal,
            vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StatsView, format_axis, format_position};
    use crate::reducer::{CoalitionState, Event, reduce};
    use crate::stats::{AxisReading, Weighting};
    use crate::table::PartyTable;
    use crate::table::fixtures::{party, with_axes};
    use formats::{Axis, Direction};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    #[test]
    fn axis_reading_shows_magnitude_and_label() {
        let r = AxisReading {
            axis: Axis::Horizontal,
            signed: 10.0,
        };
        assert_eq!(format_axis(&r), "10.0% rechts");
        let r = AxisReading {
            axis: Axis::Vertical,
            signed: -33.333_333,
        };
        assert_eq!(format_axis(&r), "33.3% progressief");
    }

    #[test]
    fn position_rounds_only_for_display() {
        assert_eq!(format_position(Vec2::new(45.0, 100.0 / 3.0)), "x 45.0% · y 33.3%");
    }

    #[test]
    fn coalition_readout() {
        let table = PartyTable::new(vec![
            with_axes(
                party("A", Some(10), 45.0, 30.0),
                Some((40.0, Direction::Rechts)),
                Some((10.0, Direction::Conservatief)),
            ),
            with_axes(
                party("B", Some(10), 45.0, 30.0),
                Some((20.0, Direction::Links)),
                None,
            ),
            party("C", Some(5), 0.0, 0.0),
        ]);
        let (_, stats) = reduce(
            &table,
            &CoalitionState {
                weighting: Weighting::Seats,
                ..Default::default()
            },
            Event::CheckboxesChanged(vec![true, true, false]),
        );
        let view = StatsView::from_stats(&stats);
        assert_eq!(
            view,
            StatsView {
                parties: "A, B".to_string(),
                seats: "20 zetels van 25 (meerderheid)".to_string(),
                position: "x 45.0% · y 30.0%".to_string(),
                horizontal: "10.0% rechts".to_string(),
                vertical: "5.0% conservatief".to_string(),
            }
        );
    }

    #[test]
    fn empty_readout() {
        let table = PartyTable::new(vec![party("A", Some(1), 0.0, 0.0)]);
        let (_, stats) = reduce(&table, &CoalitionState::default(), Event::Clear);
        let view = StatsView::from_stats(&stats);
        assert_eq!(view.seats, "0 zetels");
        assert_eq!(view.position, "–");
    }
}
