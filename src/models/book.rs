use super::PlayerName;

/// Price the exchange uses to mark a vacant side of the book. Reserved: a
/// real quote at this price is never stored.
pub const VACANT_PRICE: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub price: i64,
    pub player_name: PlayerName,
}

/// Best bid/ask for one suit plus the last trade summary, mirrored from the
/// exchange. Replaced wholesale per update; never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub bid: Option<Quote>,
    pub ask: Option<Quote>,
    pub last_trade: Option<String>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }
}
