//! Goatbots price-history document: a flat map of catalog id to the
//! current sell price in event tickets.

use std::collections::HashMap;
use std::path::Path;

use mtgo_common::Result;

/// Parses the price-history JSON document into a lookup map keyed by
/// catalog id.
pub fn parse_price_history(json: &str) -> Result<HashMap<String, f32>> {
    let prices: HashMap<String, f32> = serde_json::from_str(json)?;
    log::debug!("Parsed {} price entries", prices.len());
    Ok(prices)
}

/// Reads and parses a price-history file.
pub fn read_price_history(path: &Path) -> Result<HashMap<String, f32>> {
    let json = std::fs::read_to_string(path)?;
    parse_price_history(&json)
}
