//! Scryfall bulk-card data shapes.
//!
//! Only the fields the price join needs are deserialized; the bulk
//! "default cards" document carries far more.

use serde::{Deserialize, Serialize};

/// One card entry from the Scryfall bulk default-cards document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryfallCard {
    /// Absent for cards that never existed on MTGO
    #[serde(default)]
    pub mtgo_id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub prices: Prices,
}

/// Price quotes for a card; `tix` is the MTGO event-ticket quote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub tix: Option<String>,
}
