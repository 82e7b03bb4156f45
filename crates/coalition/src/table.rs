use formats::{Party, PartyDocument, normalize_short_name};

/// Parties in their session order: most seats first, missing seats count
/// as zero, ties keep document order.
///
/// A party's index in this table is its identifier for the whole session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyTable {
    parties: Vec<Party>,
    keys: Vec<String>,
    house_seats: u64,
}

impl PartyTable {
    pub fn new(mut parties: Vec<Party>) -> Self {
        // `sort_by` is stable, which keeps ties in document order.
        parties.sort_by(|a, b| b.seats_or_zero().cmp(&a.seats_or_zero()));
        let keys = parties.iter().map(Party::match_key).collect();
        let house_seats = parties
            .iter()
            .map(|p| u64::from(p.seats_or_zero()))
            .sum();
        Self {
            parties,
            keys,
            house_seats,
        }
    }

    pub fn from_document(document: PartyDocument) -> Self {
        Self::new(document.parties)
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&Party> {
        self.parties.get(index as usize)
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Party)> + '_ {
        self.parties
            .iter()
            .enumerate()
            .map(|(idx, p)| (idx as u32, p))
    }

    /// Case-insensitive lookup by short name.
    pub fn index_of(&self, short_name: &str) -> Option<u32> {
        let key = normalize_short_name(short_name);
        if key.is_empty() {
            return None;
        }
        self.keys.iter().position(|k| *k == key).map(|i| i as u32)
    }

    /// Total seats over every party in the table.
    pub fn house_seats(&self) -> u64 {
        self.house_seats
    }

    /// Smallest seat count that is more than half the house.
    pub fn majority_threshold(&self) -> u64 {
        self.house_seats / 2 + 1
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use formats::{AxisValue, Direction, ElectionResult, Party, Position};

    pub fn party(short: &str, seats: Option<u32>, x: f64, y: f64) -> Party {
        let mut p = Party::new(format!("{short} partij"), short, Position::new(x, y));
        p.election_results_2025 = seats.map(ElectionResult::with_seats);
        p
    }

    pub fn with_axes(
        mut p: Party,
        horizontal: Option<(f64, Direction)>,
        vertical: Option<(f64, Direction)>,
    ) -> Party {
        p.political_position.horizontal = horizontal.map(|(v, d)| AxisValue::new(v, d));
        p.political_position.vertical = vertical.map(|(v, d)| AxisValue::new(v, d));
        p
    }
}
