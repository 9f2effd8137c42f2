use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::PlayerName;

/// The local player's identity and connection state. Clones share the same
/// flags, so the feed, the synchronizer and the command sender all observe
/// one session.
///
/// `trading` is the sole gate for command entry: raised on a deal, lowered
/// on round end and game end, and on nothing else.
#[derive(Debug, Clone)]
pub struct Session {
    pub player_id: String,
    pub player_name: PlayerName,
    pub connected: Arc<AtomicBool>,
    pub trading: Arc<AtomicBool>,
}

impl Session {
    pub fn new(player_id: &str, player_name: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            connected: Arc::new(AtomicBool::new(false)),
            trading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    pub fn trading_enabled(&self) -> bool {
        self.trading.load(Ordering::Acquire)
    }

    pub fn set_trading(&self, enabled: bool) {
        self.trading.store(enabled, Ordering::Release);
    }
}
