use std::fmt;

use crate::error::TradeParseError;

use super::{PlayerName, Suit};

/// An executed trade, owned by the ledger once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub suit: Suit,
    pub price: i64,
    pub buyer: PlayerName,
    pub seller: PlayerName,
}

impl Trade {
    /// Parse the fixed wire format `<suit-singular>,<price>,<buyer>,<seller>`.
    /// No escaping exists, so player names cannot contain commas.
    pub fn parse(raw: &str) -> Result<Trade, TradeParseError> {
        let fields: Vec<&str> = raw.split(',').collect();
        if fields.len() != 4 {
            return Err(TradeParseError::FieldCount(fields.len()));
        }

        let suit = Suit::from_singular(fields[0])
            .ok_or_else(|| TradeParseError::UnknownSuit(fields[0].to_string()))?;
        let price = fields[1]
            .parse::<i64>()
            .map_err(|_| TradeParseError::BadPrice(fields[1].to_string()))?;

        Ok(Trade {
            suit,
            price,
            buyer: fields[2].to_string(),
            seller: fields[3].to_string(),
        })
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade: {} at {} from {} to {}",
            self.suit.singular(),
            self.price,
            self.seller,
            self.buyer
        )
    }
}
