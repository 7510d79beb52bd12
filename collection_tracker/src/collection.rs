//! The collection aggregate: owns the cards, runs the reference-data joins
//! and serializes to/from the collection JSON.

use std::collections::HashMap;
use std::fmt;

use mtgo_common::scryfall::ScryfallCard;

use crate::card::Card;
use crate::error::Result;
use crate::goatbots::CardDefinition;

/// Which reference source had no entry for a card id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissedSource {
    CardDefinitions,
    PriceHistory,
}

/// Structured diagnostic for one reference-data miss during the
/// enrichment join. Misses are expected (new sets lag the reference
/// dumps); they never abort the join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentMiss {
    pub id: String,
    pub source: MissedSource,
}

/// An ordered collection of cards plus memoized quantity aggregates.
///
/// The aggregates are computed on first request and cached for the
/// lifetime of the collection. Mutations performed through this type reset
/// the cache; callers that mutate cards through [`Collection::cards_mut`]
/// must call [`Collection::invalidate_quantities`] afterwards or accept
/// stale aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    cards: Vec<Card>,
    total_quantity: Option<u32>,
    card_quantities: Option<Vec<u16>>,
}

impl Collection {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            total_quantity: None,
            card_quantities: None,
        }
    }

    /// Builds a collection from its JSON form: an array of card records.
    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Ok(Self::new(cards))
    }

    /// Number of distinct card records.
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Mutable access to the cards. Mutating quantities through this
    /// without a subsequent [`Collection::invalidate_quantities`] leaves
    /// the memoized aggregates stale.
    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Moves the cards out, leaving the collection empty.
    pub fn take_cards(&mut self) -> Vec<Card> {
        self.invalidate_quantities();
        std::mem::take(&mut self.cards)
    }

    /// Total number of cards owned, summed over all records.
    ///
    /// The first call parses every card's quantity text and caches both the
    /// per-card quantities and the sum; later calls are served from the
    /// cache without reparsing.
    ///
    /// # Panics
    ///
    /// Panics if any card's quantity text is not an unsigned integer up to
    /// 65 535. Quantity text comes from the trusted trade-list importer, so
    /// this is a format-contract violation with no recovery path.
    pub fn total_cards(&mut self) -> u32 {
        if self.total_quantity.is_none() {
            self.memoize_quantities();
        }
        self.total_quantity.unwrap_or(0)
    }

    /// Per-card quantities in card order, memoized alongside
    /// [`Collection::total_cards`].
    ///
    /// # Panics
    ///
    /// Same contract as [`Collection::total_cards`].
    pub fn card_quantities(&mut self) -> &[u16] {
        if self.card_quantities.is_none() {
            self.memoize_quantities();
        }
        self.card_quantities.as_deref().unwrap_or(&[])
    }

    /// Drops the memoized aggregates so the next request recomputes them.
    /// Required after mutating cards through [`Collection::cards_mut`].
    pub fn invalidate_quantities(&mut self) {
        self.total_quantity = None;
        self.card_quantities = None;
    }

    fn memoize_quantities(&mut self) {
        let quantities: Vec<u16> = self
            .cards
            .iter()
            .map(|card| {
                card.quantity.parse::<u16>().unwrap_or_else(|e| {
                    panic!(
                        "Invalid quantity '{}' for card id={}: {e}",
                        card.quantity, card.id
                    )
                })
            })
            .collect();

        self.total_quantity = Some(quantities.iter().copied().map(u32::from).sum());
        self.card_quantities = Some(quantities);
    }

    /// Enriches every card from the two Goatbots reference maps: set,
    /// rarity and foil from the card definitions, the Goatbots price from
    /// the price history.
    ///
    /// A left outer join on card id, per field: a card can hit one source
    /// and miss the other. Missed lookups leave the card's fields as they
    /// were and are reported in the returned diagnostics; they never abort
    /// the join. Reapplying with the same maps is idempotent.
    pub fn extract_goatbots_info(
        &mut self,
        card_definitions: &HashMap<String, CardDefinition>,
        price_history: &HashMap<String, f32>,
    ) -> Vec<EnrichmentMiss> {
        let mut misses = Vec::new();

        for card in &mut self.cards {
            match card_definitions.get(&card.id) {
                Some(definition) => {
                    card.set = definition.cardset.clone();
                    card.rarity = definition.rarity.clone();
                    card.foil = definition.foil == 1;
                }
                None => {
                    log::warn!("Card definition key not found: ID={}", card.id);
                    misses.push(EnrichmentMiss {
                        id: card.id.clone(),
                        source: MissedSource::CardDefinitions,
                    });
                }
            }
            match price_history.get(&card.id) {
                Some(price) => card.goatbots_price = f64::from(*price),
                None => {
                    log::warn!("Price history key not found: ID={}", card.id);
                    misses.push(EnrichmentMiss {
                        id: card.id.clone(),
                        source: MissedSource::PriceHistory,
                    });
                }
            }
        }

        misses
    }

    /// Assigns Scryfall tix quotes by MTGO id.
    ///
    /// Foil cards are skipped (Scryfall carries no foil tix quotes), as are
    /// cards whose id is not numeric and bulk entries without a quote; all
    /// of these are expected, logged conditions.
    pub fn extract_scryfall_info(&mut self, mut bulk_cards: Vec<ScryfallCard>) {
        bulk_cards.sort_unstable_by_key(|card| card.mtgo_id);

        for card in &mut self.cards {
            if card.foil {
                continue;
            }
            let Ok(id) = card.id.parse::<u32>() else {
                log::warn!("Card id '{}' is not numeric, no Scryfall lookup", card.id);
                continue;
            };
            let Ok(index) = bulk_cards.binary_search_by_key(&Some(id), |c| c.mtgo_id) else {
                log::warn!("No Scryfall entry for MTGO id {id}");
                continue;
            };
            match bulk_cards[index].prices.tix.as_deref() {
                Some(tix) => match tix.parse::<f64>() {
                    Ok(price) => card.scryfall_price = price,
                    Err(e) => log::warn!("Unparseable tix quote '{tix}' for MTGO id {id}: {e}"),
                },
                None => log::debug!("Scryfall entry for MTGO id {id} has no tix quote"),
            }
        }
    }

    /// Serializes the card list to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.cards)?)
    }

    /// Serializes the card list to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.cards)?)
    }

    /// Replaces the card list from a JSON document, all or nothing.
    ///
    /// On a malformed document the error is logged, the current card list
    /// and memoized aggregates are left untouched. On success the memo is
    /// reset along with the cards.
    pub fn replace_from_json(&mut self, json: &str) {
        match serde_json::from_str::<Vec<Card>>(json) {
            Ok(cards) => {
                self.cards = cards;
                self.invalidate_quantities();
            }
            Err(e) => log::error!("Discarding malformed collection JSON: {e}"),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{: <25}{: <12}{: <10}{: <8}{: <8}{: <12}{: <12}",
            "Name", "Quantity", "Set", "Foil", "Rarity", "Goatbots", "Scryfall"
        )?;
        for card in &self.cards {
            writeln!(
                f,
                "{: <25}{: <12}{: <10}{: <8}{: <8}{: <12}{: <12}",
                card.name,
                card.quantity,
                card.set,
                card.foil,
                card.rarity,
                card.goatbots_price,
                card.scryfall_price
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;
