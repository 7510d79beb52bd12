//! The unit record of a collection: one card with identity, quantity,
//! classification and the two price quotes.

use serde::{Deserialize, Serialize};

/// A single MTGO card as stored in the collection JSON.
///
/// `id` is the MTGO catalog id kept as an opaque token; it is the join key
/// for all reference-data lookups. `quantity` stays text until aggregation
/// needs it as a number. The two prices default to 0 until the respective
/// join fills them in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub quantity: String,
    pub name: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub foil: bool,
    #[serde(default)]
    pub goatbots_price: f64,
    #[serde(default)]
    pub scryfall_price: f64,
}

impl Card {
    /// A card as it arrives from a trade-list export: identity, quantity and
    /// name only, classification and prices still unset.
    pub fn new(id: impl Into<String>, quantity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            quantity: quantity.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}
