//! Per-card price/quantity history and its table-row encoding.

use mtgo_common::Rarity;
use serde::{Deserialize, Serialize};

use super::field_parsers::{parse_price_points, render_price_point, split_fields};
use super::PricePoint;
use crate::card::Card;
use crate::error::{Result, TrackerError};

/// The time-series view of one card: identity and classification plus one
/// [`PricePoint`] per snapshot column, oldest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardHistory {
    pub id: u32,
    pub quantity: String,
    pub name: String,
    pub set: String,
    pub rarity: Rarity,
    pub foil: bool,
    pub price_history: Vec<PricePoint>,
}

impl CardHistory {
    /// Starts a history from one enriched card: a single price point
    /// carrying its current quantity and quotes.
    ///
    /// Returns `None` when the card id is not numeric; such cards cannot
    /// enter the history table and are logged as skipped.
    ///
    /// # Panics
    ///
    /// Panics if the card's quantity text is not a valid quantity (an
    /// unsigned integer up to 65 535).
    pub fn from_card(card: &Card) -> Option<Self> {
        let id = match card.id.parse::<u32>() {
            Ok(id) => id,
            Err(_) => {
                log::warn!("Card id '{}' is not numeric, skipping history entry", card.id);
                return None;
            }
        };
        let quantity = card.quantity.parse::<u16>().unwrap_or_else(|e| {
            panic!("Invalid quantity '{}' for card id={id}: {e}", card.quantity)
        });

        let point = PricePoint {
            quantity: Some(quantity),
            goatbots_price: Some(card.goatbots_price as f32),
            // The collection JSON stores 0 for "no quote yet"
            scryfall_price: (card.scryfall_price != 0.0).then_some(card.scryfall_price as f32),
        };

        Some(Self {
            id,
            quantity: card.quantity.clone(),
            name: card.name.clone(),
            set: card.set.clone(),
            rarity: Rarity::from(card.rarity.as_str()),
            foil: card.foil,
            price_history: vec![point],
        })
    }

    /// Renders this card as one table row: the six fixed columns, then one
    /// cell per snapshot. The name is always double-quoted since card names
    /// may contain commas.
    pub fn to_csv_row(&self) -> String {
        let mut row = String::with_capacity(64 + 12 * self.price_history.len());
        row.push_str(&self.id.to_string());
        row.push(',');
        row.push_str(&self.quantity);
        row.push(',');
        row.push('"');
        row.push_str(&self.name);
        row.push('"');
        row.push(',');
        row.push_str(&self.set);
        row.push(',');
        row.push_str(&self.rarity.to_string());
        row.push(',');
        row.push_str(if self.foil { "true" } else { "false" });
        for point in &self.price_history {
            row.push(',');
            row.push_str(&render_price_point(point));
        }
        row
    }

    /// Parses one table row produced by [`to_csv_row`].
    ///
    /// Structural problems in the six fixed columns (bad id, missing
    /// closing quote, bad foil flag) are reported as recoverable errors.
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric tokens inside the snapshot cells, which
    /// only a broken writer can produce.
    pub fn from_csv_row(row: &str) -> Result<Self> {
        let fields = split_fields(row, ',');
        let mut iter = fields.into_iter();

        let id_field = next_field(&mut iter, row)?;
        let id = id_field
            .parse::<u32>()
            .map_err(|e| TrackerError::HistoryFormat(format!("bad id '{id_field}': {e}")))?;
        let quantity = next_field(&mut iter, row)?;
        let name = parse_quoted_name(&mut iter, row)?;
        let set = next_field(&mut iter, row)?;
        let rarity = Rarity::from(next_field(&mut iter, row)?.as_str());
        let foil_field = next_field(&mut iter, row)?;
        let foil = foil_field
            .parse::<bool>()
            .map_err(|e| TrackerError::HistoryFormat(format!("bad foil flag '{foil_field}': {e}")))?;

        let cells: Vec<String> = iter.collect();
        let price_history = parse_price_points(&cells);

        Ok(Self {
            id,
            quantity,
            name,
            set,
            rarity,
            foil,
            price_history,
        })
    }
}

fn next_field(iter: &mut impl Iterator<Item = String>, row: &str) -> Result<String> {
    iter.next()
        .ok_or_else(|| TrackerError::HistoryFormat(format!("row ended early: '{row}'")))
}

// The name column is quoted and may itself contain commas, in which case
// the split scattered it over several fields; stitch them back together up
// to the closing quote.
fn parse_quoted_name(iter: &mut impl Iterator<Item = String>, row: &str) -> Result<String> {
    let first = next_field(iter, row)?;
    let Some(first) = first.strip_prefix('"') else {
        return Err(TrackerError::HistoryFormat(format!(
            "name column not quoted: '{first}'"
        )));
    };
    if let Some(whole) = first.strip_suffix('"') {
        return Ok(whole.to_string());
    }

    let mut name = first.to_string();
    for piece in iter {
        name.push(',');
        if let Some(end) = piece.strip_suffix('"') {
            name.push_str(end);
            return Ok(name);
        }
        name.push_str(&piece);
    }
    Err(TrackerError::HistoryFormat(format!(
        "unterminated quoted name in row '{row}'"
    )))
}

#[cfg(test)]
#[path = "card_history_tests.rs"]
mod tests;
