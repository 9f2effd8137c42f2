use serde::{Deserialize, Deserializer};

pub mod event;
pub use event::*;
pub mod book;
pub use book::*;
pub mod inventory;
pub use inventory::*;
pub mod order;
pub use order::*;
pub mod trade;
pub use trade::*;
pub mod results;
pub use results::*;
pub mod session;
pub use session::*;

/// Display name the exchange uses to attribute quotes and trades.
pub type PlayerName = String;

/// The four trading instruments.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Suit {
    Spade,
    Club,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Diamond, Suit::Heart];

    /// Singular wire name, as used in trade summaries and order bodies.
    pub fn singular(&self) -> &'static str {
        match self {
            Suit::Spade => "spade",
            Suit::Club => "club",
            Suit::Diamond => "diamond",
            Suit::Heart => "heart",
        }
    }

    /// Plural wire name, as used for deal and book payload keys.
    pub fn plural(&self) -> &'static str {
        match self {
            Suit::Spade => "spades",
            Suit::Club => "clubs",
            Suit::Diamond => "diamonds",
            Suit::Heart => "hearts",
        }
    }

    /// Capitalized name for table rows and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Suit::Spade => "Spades",
            Suit::Club => "Clubs",
            Suit::Diamond => "Diamonds",
            Suit::Heart => "Hearts",
        }
    }

    pub fn from_singular(name: &str) -> Option<Suit> {
        match name {
            "spade" => Some(Suit::Spade),
            "club" => Some(Suit::Club),
            "diamond" => Some(Suit::Diamond),
            "heart" => Some(Suit::Heart),
            _ => None,
        }
    }

    pub fn from_plural(name: &str) -> Option<Suit> {
        match name {
            "spades" => Some(Suit::Spade),
            "clubs" => Some(Suit::Club),
            "diamonds" => Some(Suit::Diamond),
            "hearts" => Some(Suit::Heart),
            _ => None,
        }
    }
}

// Round summaries name suits inconsistently (singular in some payloads,
// plural in others), so accept either form.
impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Suit::from_plural(&name)
            .or_else(|| Suit::from_singular(&name))
            .ok_or_else(|| serde::de::Error::custom(format!("unknown suit `{name}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_singular(suit.singular()), Some(suit));
            assert_eq!(Suit::from_plural(suit.plural()), Some(suit));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Suit::from_singular("spades"), None);
        assert_eq!(Suit::from_plural("spade"), None);
        assert_eq!(Suit::from_plural("joker"), None);
    }

    #[test]
    fn deserializes_from_either_form() {
        let suit: Suit = serde_json::from_str("\"spades\"").unwrap();
        assert_eq!(suit, Suit::Spade);
        let suit: Suit = serde_json::from_str("\"spade\"").unwrap();
        assert_eq!(suit, Suit::Spade);
        assert!(serde_json::from_str::<Suit>("\"joker\"").is_err());
    }
}
