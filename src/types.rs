//! Clan record types shared by the page generator and the site renderer

use serde::{Deserialize, Deserializer};

use crate::error::RecordError;
use crate::utils::slugify;

/// Name shown when a detail page is opened without a `name` parameter,
/// and the single clan of the fallback dataset.
pub const FALLBACK_CLAN_NAME: &str = "Bhengu";

/// A clan and its praise verses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanRecord {
    pub id: Option<u64>,
    pub name: String,
    pub izithakazelo: Vec<String>,
}

impl ClanRecord {
    pub fn new(name: impl Into<String>, izithakazelo: &[&str]) -> Self {
        Self {
            id: None,
            name: name.into(),
            izithakazelo: izithakazelo.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Upper-cased first character of the name, used as the listing group key
    pub fn first_letter(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Record as it appears in the JSON dataset, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawClan {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub izithakazelo: Option<Vec<String>>,
}

/// Accept any JSON value for `id`, keeping it only when it reads as a
/// non-negative whole number
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
    }))
}

/// Slugs that would leave the output directory or need subdirectories
fn is_unsafe_slug(slug: &str) -> bool {
    slug.contains('/') || slug.contains('\\') || slug == ".."
}

impl RawClan {
    /// Validate a raw record found at `index` in the dataset
    pub fn validate(self, index: usize) -> Result<ClanRecord, RecordError> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(RecordError::MissingName { index }),
        };
        if is_unsafe_slug(&slugify(&name)) {
            return Err(RecordError::UnsafeName { index, name });
        }
        let Some(izithakazelo) = self.izithakazelo else {
            return Err(RecordError::MissingPraises { index, name });
        };
        Ok(ClanRecord {
            id: self.id,
            name,
            izithakazelo,
        })
    }
}

/// Where a dataset snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Loaded,
    Fallback,
}

/// Immutable snapshot of the clan dataset for one build or one page view
#[derive(Debug, Clone)]
pub struct Dataset {
    clans: Vec<ClanRecord>,
    origin: DatasetOrigin,
}

impl Dataset {
    pub fn new(clans: Vec<ClanRecord>) -> Self {
        Self {
            clans,
            origin: DatasetOrigin::Loaded,
        }
    }

    /// Single-clan dataset used when the real one cannot be loaded
    pub fn fallback() -> Self {
        let mut bhengu = ClanRecord::new(
            FALLBACK_CLAN_NAME,
            &["Ngcolosi", "Wena WakwaDlabazane", "KaNephu kaLamula"],
        );
        bhengu.id = Some(1);
        Self {
            clans: vec![bhengu],
            origin: DatasetOrigin::Fallback,
        }
    }

    pub fn clans(&self) -> &[ClanRecord] {
        &self.clans
    }

    pub fn origin(&self) -> DatasetOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.clans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_name() {
        let raw: RawClan = serde_json::from_str(r#"{"name": "  ", "izithakazelo": []}"#).unwrap();
        assert!(matches!(
            raw.validate(3),
            Err(RecordError::MissingName { index: 3 })
        ));
    }

    #[test]
    fn validate_rejects_missing_praises_but_accepts_empty() {
        let missing: RawClan = serde_json::from_str(r#"{"name": "Zulu"}"#).unwrap();
        assert!(matches!(
            missing.validate(0),
            Err(RecordError::MissingPraises { .. })
        ));

        let empty: RawClan = serde_json::from_str(r#"{"name": "Zulu", "izithakazelo": []}"#).unwrap();
        let clan = empty.validate(0).unwrap();
        assert!(clan.izithakazelo.is_empty());
    }

    #[test]
    fn id_is_read_leniently() {
        let whole: RawClan = serde_json::from_str(r#"{"id": 1.0, "name": "Zulu", "izithakazelo": []}"#).unwrap();
        assert_eq!(whole.id, Some(1));
        let negative: RawClan = serde_json::from_str(r#"{"id": -3, "name": "Zulu", "izithakazelo": []}"#).unwrap();
        assert_eq!(negative.id, None);
        let text: RawClan = serde_json::from_str(r#"{"id": "seven", "name": "Zulu", "izithakazelo": []}"#).unwrap();
        assert_eq!(text.id, None);
        let null: RawClan = serde_json::from_str(r#"{"id": null, "name": "Zulu", "izithakazelo": []}"#).unwrap();
        assert_eq!(null.id, None);
    }

    #[test]
    fn validate_rejects_path_like_names() {
        for name in ["../Escaped", "A/B", "C\\D", ".."] {
            let raw = RawClan {
                id: None,
                name: Some(name.to_string()),
                izithakazelo: Some(vec![]),
            };
            assert!(
                matches!(raw.validate(0), Err(RecordError::UnsafeName { .. })),
                "{} accepted",
                name
            );
        }
    }

    #[test]
    fn first_letter_is_uppercased() {
        assert_eq!(ClanRecord::new("mthembu", &[]).first_letter(), "M");
    }

    #[test]
    fn fallback_holds_one_clan() {
        let data = Dataset::fallback();
        assert_eq!(data.origin(), DatasetOrigin::Fallback);
        assert_eq!(data.len(), 1);
        assert_eq!(data.clans()[0].name, "Bhengu");
        assert_eq!(data.clans()[0].izithakazelo.len(), 3);
    }
}
