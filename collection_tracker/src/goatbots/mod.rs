//! Goatbots reference-data parsing: card definitions and price history.
//!
//! Both documents arrive as JSON keyed by MTGO catalog id; downloading the
//! zip archives they ship in is the caller's job.

mod card_definitions;
mod price_history;

pub use card_definitions::{parse_card_definitions, read_card_definitions, CardDefinition};
pub use price_history::{parse_price_history, read_price_history};
