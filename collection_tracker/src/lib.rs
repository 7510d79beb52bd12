//! Collection Tracker - MTGO collection enrichment and price history
//!
//! Loads MTGO collection snapshots, enriches them with Goatbots and
//! Scryfall reference data and maintains a lossless price/quantity history
//! table across snapshots.

pub mod card;
pub mod collection;
pub mod compression;
pub mod error;
pub mod goatbots;
pub mod history;
pub mod scryfall;
pub mod util;

pub use card::Card;
pub use collection::{Collection, EnrichmentMiss, MissedSource};
pub use error::{Result, TrackerError};
pub use history::{CardHistory, CollectionHistory, PricePoint};
