//! Goatbots card-definitions document.

use std::collections::HashMap;
use std::path::Path;

use mtgo_common::Result;
use serde::{Deserialize, Serialize};

/// The card information carried by one entry of the card-definitions
/// document:
///
/// ```json
/// {
///     "47483": {
///         "name": "Gruul Charm",
///         "cardset": "GTC",
///         "rarity": "Uncommon",
///         "foil": 0
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub cardset: String,
    pub rarity: String,
    pub foil: u8,
}

/// Parses the card-definitions JSON document into a lookup map keyed by
/// catalog id.
pub fn parse_card_definitions(json: &str) -> Result<HashMap<String, CardDefinition>> {
    let definitions: HashMap<String, CardDefinition> = serde_json::from_str(json)?;
    log::debug!("Parsed {} card definitions", definitions.len());
    Ok(definitions)
}

/// Reads and parses a card-definitions file.
pub fn read_card_definitions(path: &Path) -> Result<HashMap<String, CardDefinition>> {
    let json = std::fs::read_to_string(path)?;
    parse_card_definitions(&json)
}
