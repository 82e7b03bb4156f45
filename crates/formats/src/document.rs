use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::AxisLabels;
use crate::party::{ElectionResult, Party};

pub const DOCUMENT_FILE_NAME: &str = "party-data.json";

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// The JSON document the extractor writes and the page reads.
///
/// Only `parties` is required on read; the page ignores everything else.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDocument {
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub axis_labels: AxisLabels,
    pub parties: Vec<Party>,
    #[serde(default)]
    pub party_count: usize,
    #[serde(default, rename = "electionResults2025")]
    pub election_results_2025: BTreeMap<String, ElectionResult>,
    #[serde(default)]
    pub generated_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("party document parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PartyDocument {
    pub fn new(dimensions: Dimensions, parties: Vec<Party>, generated_at: impl Into<String>) -> Self {
        let election_results_2025 = parties
            .iter()
            .filter_map(|p| p.election_results_2025.map(|r| (p.short_name.clone(), r)))
            .collect();
        Self {
            dimensions,
            axis_labels: AxisLabels::default(),
            party_count: parties.len(),
            parties,
            election_results_2025,
            generated_at: generated_at.into(),
        }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let payload = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&payload)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DOCUMENT_FILE_NAME, Dimensions, DocumentError, PartyDocument};
    use crate::party::{ElectionResult, Party, Position};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        let id = format!("compass_party_document_{label}_{}", std::process::id());
        dir.push(id);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn sample() -> PartyDocument {
        let mut d66 = Party::new("Democraten 66", "D66", Position::new(40.0, 60.0));
        d66.election_results_2025 = Some(ElectionResult::with_seats(26));
        let nsc = Party::new("Nieuw Sociaal Contract", "NSC", Position::new(55.0, 45.0));
        PartyDocument::new(
            Dimensions {
                width: 800.0,
                height: 800.0,
            },
            vec![d66, nsc],
            "2025-11-01T12:00:00+00:00",
        )
    }

    #[test]
    fn new_fills_counts_and_seat_map() {
        let doc = sample();
        assert_eq!(doc.party_count, 2);
        assert_eq!(doc.election_results_2025.len(), 1);
        assert_eq!(doc.election_results_2025["D66"].seats, Some(26));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let root = temp_dir("save");
        let path = root.join(DOCUMENT_FILE_NAME);
        let doc = sample();
        doc.save(&path).expect("save document");

        let loaded = PartyDocument::load(&path).expect("load document");
        assert_eq!(loaded, doc);
    }

    #[test]
    fn only_parties_is_required() {
        let doc = PartyDocument::from_json_str(r#"{ "parties": [ { "shortName": "SP" } ] }"#)
            .expect("parse minimal document");
        assert_eq!(doc.parties.len(), 1);
        assert_eq!(doc.party_count, 0);
        assert!(doc.generated_at.is_empty());
    }

    #[test]
    fn rejects_document_without_parties() {
        let err = PartyDocument::from_json_str(r#"{ "partyCount": 3 }"#).expect_err("expect error");
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let root = temp_dir("missing");
        let err = PartyDocument::load(root.join("nope.json")).expect_err("expect error");
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
