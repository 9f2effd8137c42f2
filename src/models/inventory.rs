use std::collections::HashMap;

use super::{Suit, Trade};

/// The local player's held-card counts, one per suit.
///
/// Counts are signed: a well-formed exchange never drives a count below zero,
/// but if it happens the negative value must stay visible so the desync can
/// be reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    pub spades: i64,
    pub clubs: i64,
    pub diamonds: i64,
    pub hearts: i64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the counts named in a deal payload. Suits absent from the
    /// payload keep their current count (the exchange's partial-update
    /// convention), they are not zeroed.
    pub fn apply_deal(&mut self, counts: &HashMap<Suit, i64>) {
        for (suit, count) in counts {
            self.set(*suit, *count);
        }
    }

    /// Apply a trade to the local hand: +1 if the local player bought, -1 if
    /// they sold, untouched otherwise. Returns the suit that changed.
    pub fn apply_trade(&mut self, trade: &Trade, local_player: &str) -> Option<Suit> {
        if trade.buyer == local_player {
            self.set(trade.suit, self.get(trade.suit) + 1);
            Some(trade.suit)
        } else if trade.seller == local_player {
            self.set(trade.suit, self.get(trade.suit) - 1);
            Some(trade.suit)
        } else {
            None
        }
    }

    pub fn get(&self, suit: Suit) -> i64 {
        match suit {
            Suit::Spade => self.spades,
            Suit::Club => self.clubs,
            Suit::Diamond => self.diamonds,
            Suit::Heart => self.hearts,
        }
    }

    pub fn total(&self) -> i64 {
        self.spades + self.clubs + self.diamonds + self.hearts
    }

    fn set(&mut self, suit: Suit, count: i64) {
        match suit {
            Suit::Spade => self.spades = count,
            Suit::Club => self.clubs = count,
            Suit::Diamond => self.diamonds = count,
            Suit::Heart => self.hearts = count,
        }
    }
}
