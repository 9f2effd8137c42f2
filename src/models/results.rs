use std::collections::HashMap;

use serde::Deserialize;

use super::{PlayerName, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerPoints {
    pub player_name: PlayerName,
    pub points: i64,
}

/// One player's final hand as reported at round end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerHand {
    pub player_name: PlayerName,
    #[serde(default)]
    pub spades: i64,
    #[serde(default)]
    pub clubs: i64,
    #[serde(default)]
    pub diamonds: i64,
    #[serde(default)]
    pub hearts: i64,
}

/// The `end_round` payload. Rendered once, then discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundResult {
    pub common_suit: Suit,
    pub goal_suit: Suit,
    pub card_count: HashMap<Suit, i64>,
    pub player_inventories: Vec<PlayerHand>,
    pub player_points: Vec<PlayerPoints>,
}

/// The `end_game` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GameResult {
    pub player_points: Vec<PlayerPoints>,
}

impl GameResult {
    /// Final standings, highest points first. The sort is stable, so players
    /// on equal points keep the order the exchange sent them in.
    pub fn standings(&self) -> Vec<PlayerPoints> {
        let mut ranked = self.player_points.clone();
        ranked.sort_by_key(|player| std::cmp::Reverse(player.points));
        ranked
    }
}
