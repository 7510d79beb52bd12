//! Collection price/quantity history.
//!
//! Tracks how card prices and owned quantities develop across snapshots and
//! encodes the whole table as text for archival and diffing. The encoding
//! is exact: rendering a parsed table reproduces it byte for byte.

mod card_history;
pub mod field_parsers;

pub use card_history::CardHistory;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use field_parsers::split_fields;

/// One snapshot column's data for a card. Absent fields are first-class:
/// a missing quantity means "unchanged since the previous column", a
/// missing price means the source had no quote at that time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PricePoint {
    pub quantity: Option<u16>,
    pub goatbots_price: Option<f32>,
    pub scryfall_price: Option<f32>,
}

/// One tracked card plus the bookkeeping the snapshot merge needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CardHistoryEntry {
    pub card_history: CardHistory,
    /// Quantity recorded the last time it changed; quantities equal to this
    /// are elided from subsequent columns.
    pub newest_quantity: u16,
}

/// The whole history table: one timestamp label per snapshot column and one
/// entry per card ever seen in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionHistory {
    pub timestamps: Vec<String>,
    pub entries: Vec<CardHistoryEntry>,
}

// Column labels preceding the timestamp columns in the header row
const FIXED_HEADER: &str = "id,quantity,name,set,rarity,foil";
const FIXED_COLUMNS: usize = 6;

impl CollectionHistory {
    /// Builds a history from already-populated card histories.
    ///
    /// Each card's `newest_quantity` is recovered by scanning its points
    /// from the newest column backwards for the last recorded quantity.
    pub fn from_card_histories(timestamps: Vec<String>, histories: Vec<CardHistory>) -> Self {
        let entries = histories
            .into_iter()
            .map(|card_history| {
                let newest_quantity = card_history
                    .price_history
                    .iter()
                    .rev()
                    .find_map(|point| point.quantity)
                    .unwrap_or(0);
                CardHistoryEntry {
                    card_history,
                    newest_quantity,
                }
            })
            .collect();

        Self {
            timestamps,
            entries,
        }
    }

    /// Number of tracked cards.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds one new snapshot into the history.
    ///
    /// Every element of `snapshot` must carry exactly one price point (as
    /// produced by [`CardHistory::from_card`]). Cards present in both sides
    /// get the new point appended, with the quantity elided when it did not
    /// change. Cards that left the collection get an explicit zero
    /// quantity. Cards seen for the first time are padded with empty points
    /// for all earlier columns. The timestamp label is appended last.
    pub fn add_snapshot(&mut self, timestamp: String, mut snapshot: Vec<CardHistory>) {
        debug_assert!(snapshot.iter().all(|c| c.price_history.len() == 1));

        snapshot.sort_unstable_by_key(|c| c.id);
        self.entries.sort_unstable_by_key(|e| e.card_history.id);

        let prior_columns = self.timestamps.len();
        let mut merged = Vec::with_capacity(self.entries.len().max(snapshot.len()));
        let mut tracked = std::mem::take(&mut self.entries).into_iter().peekable();
        let mut incoming = snapshot.into_iter().peekable();

        loop {
            let ordering = match (tracked.peek(), incoming.peek()) {
                (Some(entry), Some(card)) => entry.card_history.id.cmp(&card.id),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };
            match ordering {
                // Tracked card missing from the snapshot: it left the collection
                Ordering::Less => {
                    if let Some(mut entry) = tracked.next() {
                        entry.newest_quantity = 0;
                        entry.card_history.price_history.push(PricePoint {
                            quantity: Some(0),
                            goatbots_price: None,
                            scryfall_price: None,
                        });
                        merged.push(entry);
                    }
                }
                Ordering::Equal => {
                    if let (Some(mut entry), Some(mut card)) = (tracked.next(), incoming.next()) {
                        let mut point = card.price_history.pop().unwrap_or_default();
                        match point.quantity {
                            Some(quantity) if quantity == entry.newest_quantity => {
                                point.quantity = None;
                            }
                            Some(quantity) => entry.newest_quantity = quantity,
                            None => (),
                        }
                        entry.card_history.price_history.push(point);
                        merged.push(entry);
                    }
                }
                // Snapshot card never seen before
                Ordering::Greater => {
                    if let Some(card) = incoming.next() {
                        merged.push(entry_for_new_card(card, prior_columns));
                    }
                }
            }
        }

        self.entries = merged;
        self.timestamps.push(timestamp);
    }

    /// Renders the full table: header row (six fixed labels then the
    /// timestamp labels), then one row per card, sorted by id, each line
    /// newline-terminated.
    pub fn to_csv_string(&mut self) -> String {
        self.entries.sort_unstable_by_key(|e| e.card_history.id);

        let mut out = String::with_capacity(64 + 80 * self.entries.len());
        out.push_str(FIXED_HEADER);
        for timestamp in &self.timestamps {
            out.push(',');
            out.push_str(timestamp);
        }
        out.push('\n');

        for entry in &self.entries {
            out.push_str(&entry.card_history.to_csv_row());
            out.push('\n');
        }
        out
    }

    /// Parses a table produced by [`to_csv_string`].
    ///
    /// Structural errors (missing header labels, malformed rows) are
    /// recoverable; malformed numeric tokens inside snapshot cells panic,
    /// since only a broken writer can produce them.
    pub fn from_csv_string(text: &str) -> Result<Self> {
        let rows = split_fields(text, '\n');
        let mut row_iter = rows.into_iter();

        let header = row_iter
            .next()
            .ok_or_else(|| TrackerError::HistoryFormat("empty history table".to_string()))?;
        let header_fields = split_fields(&header, ',');
        if header_fields.len() < FIXED_COLUMNS
            || header_fields[..FIXED_COLUMNS].join(",") != FIXED_HEADER
        {
            return Err(TrackerError::HistoryFormat(format!(
                "unexpected header row: '{header}'"
            )));
        }
        let timestamps: Vec<String> = header_fields[FIXED_COLUMNS..].to_vec();

        let mut histories = Vec::new();
        for row in row_iter.filter(|row| !row.is_empty()) {
            let history = CardHistory::from_csv_row(&row)?;
            if history.price_history.len() != timestamps.len() {
                return Err(TrackerError::HistoryFormat(format!(
                    "row for id={} has {} snapshot cells, expected {}",
                    history.id,
                    history.price_history.len(),
                    timestamps.len()
                )));
            }
            histories.push(history);
        }

        Ok(Self::from_card_histories(timestamps, histories))
    }
}

fn entry_for_new_card(mut card: CardHistory, prior_columns: usize) -> CardHistoryEntry {
    let point = card.price_history.pop().unwrap_or_default();
    let mut padded = vec![PricePoint::default(); prior_columns];
    padded.push(point);
    card.price_history = padded;

    CardHistoryEntry {
        newest_quantity: point.quantity.unwrap_or(0),
        card_history: card,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
