//! Catalog loading from the combat achievements JSON document.
//!
//! The document is an object keyed by string-encoded id whose values use the
//! capitalized field names of the source data (`Name`, `Monster`, `Tier`...).
//! Those names are normalized to [`AchievementRecord`] fields here and
//! nowhere else.

use super::types::{AchievementId, AchievementRecord, Catalog, Tier};
use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Monster")]
    monster: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "URL", default)]
    url: String,
}

/// Parse a catalog document.
///
/// Records with an unrecognized tier are skipped with a warning; a key that
/// is not a positive integer fails the whole load.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let raw: BTreeMap<String, RawRecord> = serde_json::from_str(json)?;
    let mut catalog = Catalog::new();

    for (key, entry) in raw {
        let id = parse_id(&key)?;
        let Some(tier) = Tier::parse(&entry.tier) else {
            warn!(id, tier = %entry.tier, "skipping achievement with unknown tier");
            continue;
        };
        catalog.insert(AchievementRecord {
            id,
            name: entry.name,
            description: entry.description,
            monster: entry.monster,
            tier,
            kind: entry.kind,
            url: entry.url,
        });
    }

    Ok(catalog)
}

/// Read and parse the catalog file at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let json = fs::read_to_string(path)?;
    let catalog = parse_catalog(&json)?;
    info!(path = %path.display(), records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn parse_id(key: &str) -> Result<AchievementId, CatalogError> {
    match key.trim().parse::<AchievementId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CatalogError::InvalidId(key.to_string())),
    }
}
