use foundation::math::Vec2;

use crate::query::{selected_short_names, selection_from_query};
use crate::selection::SelectionSet;
use crate::stats::{AxisAverages, Weighting, average_position, seat_total, signed_average};
use crate::table::PartyTable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoalitionState {
    pub selection: SelectionSet,
    pub weighting: Weighting,
}

/// Inputs the page feeds into [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Checked state of every party checkbox, in table order. The whole
    /// selection is rebuilt from it.
    CheckboxesChanged(Vec<bool>),
    /// Location search string read on page load.
    Restore { search: String },
    SetWeighting(Weighting),
    Clear,
}

/// Everything derived from a [`CoalitionState`]. Never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoalitionStats {
    pub party_count: usize,
    pub seat_total: u64,
    pub house_seats: u64,
    pub has_majority: bool,
    pub weighting: Weighting,
    /// `None` when nothing is selected.
    pub average_position: Option<Vec2>,
    pub axes: Option<AxisAverages>,
    pub short_names: Vec<String>,
}

impl CoalitionStats {
    pub fn is_empty(&self) -> bool {
        self.party_count == 0
    }
}

pub fn derive(table: &PartyTable, state: &CoalitionState) -> CoalitionStats {
    let selection = &state.selection;
    let seats = seat_total(table, selection);
    let house_seats = table.house_seats();
    CoalitionStats {
        party_count: selection.len(),
        seat_total: seats,
        house_seats,
        has_majority: house_seats > 0 && seats >= table.majority_threshold(),
        weighting: state.weighting,
        average_position: average_position(table, selection, state.weighting),
        axes: signed_average(table, selection, state.weighting),
        short_names: selected_short_names(table, selection),
    }
}

/// Applies one event and recomputes the derived statistics.
pub fn reduce(
    table: &PartyTable,
    state: &CoalitionState,
    event: Event,
) -> (CoalitionState, CoalitionStats) {
    let mut next = state.clone();
    match event {
        Event::CheckboxesChanged(flags) => {
            next.selection = SelectionSet::from_flags(&flags);
        }
        Event::Restore { search } => {
            next.selection = selection_from_query(table, &search);
        }
        Event::SetWeighting(weighting) => {
            next.weighting = weighting;
        }
        Event::Clear => {
            next.selection.clear();
        }
    }
    next.selection.truncate(table.len() as u32);
    let stats = derive(table, &next);
    (next, stats)
}

#[cfg(test)]
mod tests {
    use super::{CoalitionState, Event, reduce};
    use crate::stats::Weighting;
    use crate::table::PartyTable;
    use crate::table::fixtures::party;
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    fn table() -> PartyTable {
        PartyTable::new(vec![
            party("A", Some(80), 10.0, 20.0),
            party("B", Some(50), 50.0, 60.0),
            party("C", Some(20), 90.0, 20.0),
        ])
    }

    #[test]
    fn checkbox_states_rebuild_the_selection() {
        let t = table();
        let (state, stats) = reduce(
            &t,
            &CoalitionState::default(),
            Event::CheckboxesChanged(vec![true, false, true]),
        );
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(stats.party_count, 2);
        assert_eq!(stats.seat_total, 100);
        assert!(stats.has_majority);
        assert_eq!(stats.short_names, vec!["A".to_string(), "C".to_string()]);
        assert_eq!(stats.average_position, Some(Vec2::new(50.0, 20.0)));

        // A later change replaces, never merges.
        let (state, stats) = reduce(&t, &state, Event::CheckboxesChanged(vec![false, true, false]));
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), vec![1]);
        assert!(!stats.has_majority);
    }

    #[test]
    fn empty_selection_is_neutral() {
        let t = table();
        let (_, stats) = reduce(&t, &CoalitionState::default(), Event::Clear);
        assert!(stats.is_empty());
        assert_eq!(stats.seat_total, 0);
        assert_eq!(stats.average_position, None);
        assert_eq!(stats.axes, None);
        assert!(stats.short_names.is_empty());
    }

    #[test]
    fn restore_reads_the_query() {
        let t = table();
        let (state, stats) = reduce(
            &t,
            &CoalitionState::default(),
            Event::Restore {
                search: "?parties=c,a".to_string(),
            },
        );
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(stats.seat_total, 100);
    }

    #[test]
    fn weighting_switch_keeps_selection() {
        let t = table();
        let (state, _) = reduce(
            &t,
            &CoalitionState::default(),
            Event::CheckboxesChanged(vec![true, false, true]),
        );
        let (state, stats) = reduce(&t, &state, Event::SetWeighting(Weighting::Seats));
        assert_eq!(state.selection.len(), 2);
        assert_eq!(stats.weighting, Weighting::Seats);
        // (10 * 80 + 90 * 20) / 100
        assert_eq!(stats.average_position, Some(Vec2::new(26.0, 20.0)));
    }

    #[test]
    fn extra_flags_are_ignored() {
        let t = table();
        let (state, stats) = reduce(
            &t,
            &CoalitionState::default(),
            Event::CheckboxesChanged(vec![false, false, true, true, true]),
        );
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(stats.party_count, 1);
    }

    #[test]
    fn majority_holds_for_large_seat_counts() {
        let t = PartyTable::new(vec![
            party("A", Some(3_000_000_000), 0.0, 0.0),
            party("B", Some(2_000_000_000), 0.0, 0.0),
        ]);
        let (_, stats) = reduce(
            &t,
            &CoalitionState::default(),
            Event::CheckboxesChanged(vec![true, false]),
        );
        assert_eq!(stats.seat_total, 3_000_000_000);
        assert_eq!(stats.house_seats, 5_000_000_000);
        assert!(stats.has_majority);
    }
}
