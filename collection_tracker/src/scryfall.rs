//! Scryfall bulk-data client.
//!
//! The default-cards list can be read from a previously downloaded file or
//! fetched in two steps: the bulk-data API endpoint describes the current
//! dump and carries a `download_uri`, the dump itself is a JSON array.

use std::path::Path;

use chrono::{DateTime, Utc};
use mtgo_common::scryfall::ScryfallCard;
use mtgo_common::{FetchError, Result};
use serde::Deserialize;

const BULK_DATA_URL: &str = "https://api.scryfall.com/bulk-data/default-cards";
const USER_AGENT: &str = "collection_tracker/0.1";

/// Metadata for the current default-cards dump.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDataInfo {
    pub download_uri: String,
    pub updated_at: DateTime<Utc>,
}

/// Fetches the bulk-data metadata describing the current dump.
pub fn bulk_data_info() -> Result<BulkDataInfo> {
    let response = reqwest::blocking::Client::new()
        .get(BULK_DATA_URL)
        .header("User-Agent", USER_AGENT)
        .send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status()));
    }
    Ok(response.json::<BulkDataInfo>()?)
}

/// Fetches the full default-cards dump.
pub fn fetch_bulk_cards() -> Result<Vec<ScryfallCard>> {
    let info = bulk_data_info()?;
    log::info!(
        "Fetching Scryfall bulk cards (updated {})...",
        info.updated_at
    );

    let response = reqwest::blocking::Client::new()
        .get(&info.download_uri)
        .header("User-Agent", USER_AGENT)
        .send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status()));
    }
    let cards: Vec<ScryfallCard> = response.json()?;
    log::info!("Fetched {} Scryfall cards", cards.len());
    Ok(cards)
}

/// Reads a previously downloaded default-cards dump.
pub fn read_bulk_cards(path: &Path) -> Result<Vec<ScryfallCard>> {
    let json = std::fs::read_to_string(path)?;
    let cards: Vec<ScryfallCard> = serde_json::from_str(&json)?;
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_data_url_is_valid() {
        assert!(reqwest::Url::parse(BULK_DATA_URL).is_ok());
    }

    #[test]
    fn reads_bulk_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default-cards.json");
        std::fs::write(
            &path,
            r#"[{"mtgo_id": 94060, "name": "Arlinn, the Pack's Hope", "prices": {"tix": "0.94"}}]"#,
        )
        .unwrap();

        let cards = read_bulk_cards(&path).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].mtgo_id, Some(94060));
    }

    #[ignore = "Will download data from the Scryfall API"]
    #[test]
    fn fetches_bulk_data_info() {
        let info = bulk_data_info().unwrap();
        assert!(info.download_uri.starts_with("https://"));
    }

    #[ignore = "Will download data from the Scryfall API"]
    #[test]
    fn fetches_bulk_cards() {
        let cards = fetch_bulk_cards().unwrap();
        assert!(!cards.is_empty());
    }
}
