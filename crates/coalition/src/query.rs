//! The `parties` query parameter as a projection of the selection.
//!
//! Encoding writes canonical short names (as stored in the table) joined by
//! commas. Decoding is case-insensitive and ignores names it doesn't know.

use url::form_urlencoded;

use crate::selection::SelectionSet;
use crate::table::PartyTable;

pub const PARTIES_PARAM: &str = "parties";

const SEPARATOR: char = ',';

/// Short names of the selected parties in table order.
pub fn selected_short_names(table: &PartyTable, selection: &SelectionSet) -> Vec<String> {
    selection
        .iter()
        .filter_map(|idx| table.get(idx))
        .map(|p| p.short_name.clone())
        .collect()
}

/// Parameter value for `selection`, or `None` when nothing is selected.
pub fn encode_selection(table: &PartyTable, selection: &SelectionSet) -> Option<String> {
    let names = selected_short_names(table, selection);
    if names.is_empty() {
        return None;
    }
    Some(names.join(&SEPARATOR.to_string()))
}

/// Parses a parameter value back into a selection.
pub fn decode_selection(table: &PartyTable, value: &str) -> SelectionSet {
    value
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| table.index_of(name))
        .collect()
}

fn parse_pairs(search: &str) -> Vec<(String, String)> {
    let raw = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Raw `parties` value from a location search string (`?a=b&parties=…`).
pub fn parties_param(search: &str) -> Option<String> {
    parse_pairs(search)
        .into_iter()
        .find(|(k, _)| k == PARTIES_PARAM)
        .map(|(_, v)| v)
}

/// Selection encoded in a location search string. Empty when the parameter
/// is absent.
pub fn selection_from_query(table: &PartyTable, search: &str) -> SelectionSet {
    parties_param(search)
        .map(|v| decode_selection(table, &v))
        .unwrap_or_default()
}

/// Rewrites `search` so that its `parties` parameter mirrors `selection`.
///
/// Other parameters keep their order. An empty selection removes the key
/// entirely. Returns `""` when no parameters remain, otherwise a string
/// starting with `?`.
pub fn sync_query(search: &str, table: &PartyTable, selection: &SelectionSet) -> String {
    let value = encode_selection(table, selection);
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut placed = false;
    for (k, v) in parse_pairs(search) {
        if k != PARTIES_PARAM {
            pairs.push((k, v));
            continue;
        }
        // Keep the first occurrence's slot and drop duplicates.
        if let (false, Some(value)) = (placed, &value) {
            pairs.push((k, value.clone()));
        }
        placed = true;
    }
    if let (false, Some(value)) = (placed, value) {
        pairs.push((PARTIES_PARAM.to_string(), value));
    }

    if pairs.is_empty() {
        return String::new();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish();
    format!("?{encoded}")
}

#[cfg(test)]
mod tests {
    use super::{
        decode_selection, encode_selection, parties_param, selection_from_query, sync_query,
    };
    use crate::selection::SelectionSet;
    use crate::table::PartyTable;
    use crate::table::fixtures::party;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn table() -> PartyTable {
        PartyTable::new(vec![
            party("D66", Some(26), 0.0, 0.0),
            party("PVV", Some(26), 0.0, 0.0),
            party("VVD", Some(22), 0.0, 0.0),
            party("GL-PvdA", Some(20), 0.0, 0.0),
            party("CDA", Some(18), 0.0, 0.0),
            party("Volt", Some(1), 0.0, 0.0),
            party("NSC", None, 0.0, 0.0),
        ])
    }

    fn sel(indices: &[u32]) -> SelectionSet {
        indices.iter().copied().collect()
    }

    #[test]
    fn encodes_canonical_names_in_table_order() {
        let t = table();
        assert_eq!(
            encode_selection(&t, &sel(&[5, 0, 3])),
            Some("D66,GL-PvdA,Volt".to_string())
        );
        assert_eq!(encode_selection(&t, &SelectionSet::new()), None);
    }

    #[test]
    fn decodes_case_insensitively_and_skips_unknown() {
        let t = table();
        let got = decode_selection(&t, " volt, gl-pvda ,,FVD,d66");
        assert_eq!(got, sel(&[0, 3, 5]));
    }

    #[test]
    fn sync_sets_parameter_and_keeps_others() {
        let t = table();
        let out = sync_query("?lang=nl", &t, &sel(&[0, 2]));
        assert_eq!(out, "?lang=nl&parties=D66%2CVVD");
        assert_eq!(parties_param(&out), Some("D66,VVD".to_string()));
    }

    #[test]
    fn sync_replaces_in_place() {
        let t = table();
        let out = sync_query("?parties=cda&lang=nl&parties=sp", &t, &sel(&[4]));
        assert_eq!(out, "?parties=CDA&lang=nl");
    }

    #[test]
    fn removing_last_party_drops_the_key() {
        let t = table();
        assert_eq!(sync_query("?parties=VVD", &t, &SelectionSet::new()), "");
        let out = sync_query("?parties=VVD&lang=nl", &t, &SelectionSet::new());
        assert_eq!(out, "?lang=nl");
        assert_eq!(parties_param(&out), None);
    }

    #[test]
    fn restores_from_plain_commas() {
        let t = table();
        assert_eq!(selection_from_query(&t, "?parties=pvv,Volt"), sel(&[1, 5]));
        assert_eq!(selection_from_query(&t, "parties=NSC"), sel(&[6]));
        assert_eq!(selection_from_query(&t, ""), SelectionSet::new());
    }

    proptest! {
        #[test]
        fn query_roundtrip_any_case(mask in 1u32..(1 << 7), upper in any::<bool>()) {
            let t = table();
            let original: SelectionSet = (0..7u32).filter(|i| mask & (1 << i) != 0).collect();
            let value = encode_selection(&t, &original).unwrap();
            let value = if upper { value.to_uppercase() } else { value.to_lowercase() };
            let search = sync_query("", &t, &decode_selection(&t, &value));
            prop_assert_eq!(selection_from_query(&t, &search), original);
        }
    }
}
