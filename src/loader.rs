//! Reading the clan dataset, for builds (fatal on error) and for views
//! (falls back to a one-clan dataset)

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::error::RecordError;
use crate::types::{ClanRecord, Dataset, RawClan};

/// Records that validated, plus the ones that did not
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub clans: Vec<ClanRecord>,
    pub rejected: Vec<RecordError>,
}

/// Parse a JSON array of clan records, validating each one separately
pub fn parse_records(json: &str) -> Result<ParsedRecords> {
    let raw: Vec<RawClan> =
        serde_json::from_str(json).context("Dataset is not a JSON array of clan records")?;

    let mut parsed = ParsedRecords::default();
    for (index, record) in raw.into_iter().enumerate() {
        match record.validate(index) {
            Ok(clan) => parsed.clans.push(clan),
            Err(e) => parsed.rejected.push(e),
        }
    }
    Ok(parsed)
}

/// Read the dataset file for a build. Any I/O or parse failure is fatal.
pub fn read_dataset_file(path: &Path) -> Result<ParsedRecords> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    parse_records(&content).with_context(|| format!("Failed to parse dataset: {}", path.display()))
}

fn fetch_text(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; IzithakazeloKeeper/1.0)")
            .build()?;
        let text = client
            .get(source)
            .send()
            .with_context(|| format!("Failed to fetch: {}", source))?
            .error_for_status()
            .with_context(|| format!("Bad response from: {}", source))?
            .text()
            .with_context(|| format!("Failed to read response: {}", source))?;
        Ok(text)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read dataset: {}", source))
    }
}

/// Load the dataset for a page view.
///
/// Never fails: anything wrong with the source yields [`Dataset::fallback`].
/// Individual invalid records are dropped.
pub fn load_dataset(source: &str) -> Dataset {
    let parsed = fetch_text(source).and_then(|text| parse_records(&text));
    match parsed {
        Ok(parsed) => {
            for rejected in &parsed.rejected {
                warn!("Dropping {}", rejected);
            }
            debug!("Loaded {} clans from {}", parsed.clans.len(), source);
            Dataset::new(parsed.clans)
        }
        Err(e) => {
            warn!("Using fallback dataset: {:#}", e);
            Dataset::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatasetOrigin;
    use tempfile::tempdir;

    #[test]
    fn parse_records_isolates_bad_records() -> Result<()> {
        let parsed = parse_records(
            r#"[
                {"id": 1, "name": "Bhengu", "izithakazelo": ["Ngcolosi"]},
                {"izithakazelo": ["orphan"]},
                {"name": "Zulu"}
            ]"#,
        )?;
        assert_eq!(parsed.clans.len(), 1);
        assert_eq!(
            parsed.rejected,
            vec![
                RecordError::MissingName { index: 1 },
                RecordError::MissingPraises {
                    index: 2,
                    name: "Zulu".into()
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn parse_records_rejects_non_array() {
        assert!(parse_records(r#"{"name": "Bhengu"}"#).is_err());
    }

    #[test]
    fn load_dataset_reads_local_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("clans.json");
        fs::write(
            &path,
            r#"[{"name": "Mthembu", "izithakazelo": ["Mvelase"]}, {"name": "Ngcobo", "izithakazelo": []}]"#,
        )?;

        let data = load_dataset(&path.to_string_lossy());
        assert_eq!(data.origin(), DatasetOrigin::Loaded);
        assert_eq!(data.len(), 2);
        Ok(())
    }

    #[test]
    fn load_dataset_tolerates_odd_ids() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("clans.json");
        fs::write(
            &path,
            r#"[
                {"id": 1.0, "name": "Zulu", "izithakazelo": ["Ndabezitha"]},
                {"id": -3, "name": "Cele", "izithakazelo": ["Mashwabada"]},
                {"id": 4, "name": "Mkhize", "izithakazelo": ["Khabazela"]}
            ]"#,
        )?;

        let data = load_dataset(&path.to_string_lossy());
        assert_eq!(data.origin(), DatasetOrigin::Loaded);
        let ids: Vec<Option<u64>> = data.clans().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![Some(1), None, Some(4)]);
        Ok(())
    }

    #[test]
    fn load_dataset_falls_back_on_unreachable_url() {
        let data = load_dataset("http://127.0.0.1:1/clans.json");
        assert_eq!(data.origin(), DatasetOrigin::Fallback);
        assert_eq!(data.clans()[0].name, "Bhengu");
    }

    #[test]
    fn load_dataset_falls_back_on_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let data = load_dataset(&dir.path().join("nope.json").to_string_lossy());
        assert_eq!(data.origin(), DatasetOrigin::Fallback);
        assert_eq!(data.clans()[0].name, "Bhengu");
        Ok(())
    }

    #[test]
    fn load_dataset_falls_back_on_malformed_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("clans.json");
        fs::write(&path, "<html>502 Bad Gateway</html>")?;
        let data = load_dataset(&path.to_string_lossy());
        assert_eq!(data.origin(), DatasetOrigin::Fallback);
        Ok(())
    }
}
