//! Shared types for MTGO collection tracking.
//!
//! Holds the data types and errors that both the tracker binary and any
//! future tooling need: Scryfall bulk-card shapes, the card rarity
//! classification and the reference-data fetch error.

pub mod error;
pub mod rarity;
pub mod scryfall;

pub use error::{FetchError, Result};
pub use rarity::Rarity;
