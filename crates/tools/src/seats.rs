//! Seats won in the 2025 Tweede Kamer election, keyed by short name.

use formats::normalize_short_name;

pub const SEATS_2025: &[(&str, u32)] = &[
    ("D66", 26),
    ("PVV", 26),
    ("VVD", 22),
    ("GL-PvdA", 20),
    ("CDA", 18),
    ("JA21", 9),
    ("FvD", 7),
    ("BBB", 4),
    ("DENK", 3),
    ("SGP", 3),
    ("PvdD", 3),
    ("CU", 3),
    ("SP", 3),
    ("50PLUS", 2),
    ("Volt", 1),
    ("NSC", 0),
];

/// Seats for `short_name`, matched case-insensitively.
pub fn seats_for(short_name: &str) -> Option<u32> {
    let key = normalize_short_name(short_name);
    SEATS_2025
        .iter()
        .find(|(name, _)| normalize_short_name(name) == key)
        .map(|(_, seats)| *seats)
}
