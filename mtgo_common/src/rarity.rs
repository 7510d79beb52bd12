//! Card rarity classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of MTGO card rarities.
///
/// Goatbots card definitions carry the full word ("Rare"), the history
/// table stores the single-letter form ("R"); both parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
    Booster,
}

impl From<&str> for Rarity {
    fn from(value: &str) -> Self {
        match value.chars().next() {
            Some('C' | 'c') => Rarity::Common,
            Some('U' | 'u') => Rarity::Uncommon,
            Some('R' | 'r') => Rarity::Rare,
            Some('M' | 'm') => Rarity::Mythic,
            Some('B' | 'b') => Rarity::Booster,
            _ => {
                log::warn!("Unknown rarity '{value}', defaulting to Common");
                Rarity::Common
            }
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Mythic => "Mythic",
            Rarity::Booster => "Booster",
        };
        write!(f, "{word}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_words() {
        assert_eq!(Rarity::from("Common"), Rarity::Common);
        assert_eq!(Rarity::from("Uncommon"), Rarity::Uncommon);
        assert_eq!(Rarity::from("Rare"), Rarity::Rare);
        assert_eq!(Rarity::from("Mythic"), Rarity::Mythic);
        assert_eq!(Rarity::from("Booster"), Rarity::Booster);
    }

    #[test]
    fn parses_single_letters() {
        assert_eq!(Rarity::from("C"), Rarity::Common);
        assert_eq!(Rarity::from("U"), Rarity::Uncommon);
        assert_eq!(Rarity::from("R"), Rarity::Rare);
        assert_eq!(Rarity::from("M"), Rarity::Mythic);
        assert_eq!(Rarity::from("B"), Rarity::Booster);
    }

    #[test]
    fn unknown_defaults_to_common() {
        assert_eq!(Rarity::from(""), Rarity::Common);
        assert_eq!(Rarity::from("???"), Rarity::Common);
    }

    #[test]
    fn displays_full_word() {
        assert_eq!(Rarity::Rare.to_string(), "Rare");
        assert_eq!(Rarity::Mythic.to_string(), "Mythic");
    }
}
