use std::collections::HashMap;
use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio::sync::broadcast::Sender;
use tracing::{info, warn};

use crate::models::{Book, GameResult, Inventory, RoundResult, ServerEvent, Session, Suit, Trade};

/// Where the client is in the round/game lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RoundActive,
    BetweenRounds,
    GameOver,
}

impl Phase {
    pub fn status_line(&self) -> &'static str {
        match self {
            Phase::Idle => "Waiting for round start...",
            Phase::RoundActive => "Round started!",
            Phase::BetweenRounds => "Round ended. Waiting for next round...",
            Phase::GameOver => "Game ended.",
        }
    }
}

/// State-change notifications for the rendering surface. Each carries an
/// owned snapshot of the piece that changed, never a reference into the
/// mirrors, so the surface cannot observe a half-written entry.
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    Inventory(Inventory),
    BookRow(Suit, Book),
    TradeLine(Trade),
    Status(Phase),
    RoundSummary(RoundResult),
    GameSummary(GameResult),
    Note(String),
}

/// Single consumer of the event stream, sole owner and sole writer of the
/// local game-state mirrors. Events are handled one at a time, to
/// completion, in arrival order.
pub struct Synchronizer {
    pub session: Session,
    pub inventory: Inventory,
    pub books: HashMap<Suit, Book>,
    pub trades: Vec<Trade>,
    pub phase: Phase,
    pub event_receiver: Arc<AsyncReceiver<ServerEvent>>,
    pub surface_sender: Sender<SurfaceEvent>,
}

impl Synchronizer {
    pub fn new(
        session: Session,
        event_receiver: Arc<AsyncReceiver<ServerEvent>>,
        surface_sender: Sender<SurfaceEvent>,
    ) -> Self {
        let mut books = HashMap::new();
        for suit in Suit::ALL {
            books.insert(suit, Book::new());
        }

        Self {
            session,
            inventory: Inventory::new(),
            books,
            trades: Vec::new(),
            phase: Phase::Idle,
            event_receiver,
            surface_sender,
        }
    }

    pub async fn start(&mut self) {
        while let Ok(event) = self.event_receiver.recv().await {
            self.handle_event(event);
        }
        info!("event channel closed, synchronizer stopping");
    }

    /// Route one event into the mirrors. GameOver is absorbing: everything
    /// arriving after it is logged and dropped.
    pub fn handle_event(&mut self, event: ServerEvent) {
        if self.phase == Phase::GameOver {
            info!(kind = event.kind(), "event after game end ignored");
            return;
        }

        match event {
            ServerEvent::DealingCards(counts) => self.apply_deal(&counts),
            ServerEvent::Update { books, trade } => {
                self.apply_update(books);
                if let Some(raw) = trade {
                    self.record_trade(&raw);
                }
            }
            ServerEvent::EndRound(result) => self.end_round(result),
            ServerEvent::EndGame(result) => self.end_game(result),
            ServerEvent::Notice { status, message } => {
                self.emit(SurfaceEvent::Note(format!(
                    "Server message: {status} - {message}"
                )));
            }
            ServerEvent::Unknown { kind } => {
                warn!(%kind, "ignoring event of unknown kind");
            }
        }
    }

    fn apply_deal(&mut self, counts: &HashMap<Suit, i64>) {
        self.inventory.apply_deal(counts);
        self.phase = Phase::RoundActive;
        self.session.set_trading(true);

        info!(cards = self.inventory.total(), "new round, cards dealt");
        self.emit(SurfaceEvent::Inventory(self.inventory));
        self.emit(SurfaceEvent::Status(self.phase));
        self.emit(SurfaceEvent::Note("New round started. Cards dealt.".to_string()));
    }

    /// Replace the book entry for every suit in the payload. Entries for
    /// suits the payload does not mention are left untouched.
    fn apply_update(&mut self, books: HashMap<Suit, Book>) {
        for (suit, book) in books {
            self.emit(SurfaceEvent::BookRow(suit, book.clone()));
            self.books.insert(suit, book);
        }
    }

    /// Append a trade to the ledger and apply it to the local hand. A
    /// malformed summary is dropped without touching either.
    fn record_trade(&mut self, raw: &str) {
        let trade = match Trade::parse(raw) {
            Ok(trade) => trade,
            Err(error) => {
                warn!(raw, %error, "dropping malformed trade summary");
                return;
            }
        };

        if let Some(suit) = self.inventory.apply_trade(&trade, &self.session.player_name) {
            let count = self.inventory.get(suit);
            if count < 0 {
                warn!(
                    suit = suit.plural(),
                    count, "inventory went negative, mirror out of sync with exchange"
                );
            }
            self.emit(SurfaceEvent::Inventory(self.inventory));
        }

        self.emit(SurfaceEvent::TradeLine(trade.clone()));
        self.trades.push(trade);
    }

    fn end_round(&mut self, result: RoundResult) {
        self.session.set_trading(false);
        self.phase = Phase::BetweenRounds;

        self.emit(SurfaceEvent::Status(self.phase));
        self.emit(SurfaceEvent::RoundSummary(result));
    }

    fn end_game(&mut self, result: GameResult) {
        self.session.set_trading(false);
        self.phase = Phase::GameOver;

        self.emit(SurfaceEvent::Status(self.phase));
        self.emit(SurfaceEvent::GameSummary(result));
    }

    fn emit(&self, event: SurfaceEvent) {
        // send only fails with no subscriber attached (headless tests)
        let _ = self.surface_sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synchronizer() -> Synchronizer {
        let (_, event_receiver) = kanal::unbounded_async::<ServerEvent>();
        let (surface_sender, _) = tokio::sync::broadcast::channel(64);
        Synchronizer::new(
            Session::new("me", "me"),
            Arc::new(event_receiver),
            surface_sender,
        )
    }

    fn deal(counts: &[(Suit, i64)]) -> ServerEvent {
        ServerEvent::DealingCards(counts.iter().copied().collect())
    }

    fn update_with_trade(raw: &str) -> ServerEvent {
        ServerEvent::Update {
            books: HashMap::new(),
            trade: Some(raw.to_string()),
        }
    }

    fn end_round() -> ServerEvent {
        ServerEvent::EndRound(RoundResult {
            common_suit: Suit::Spade,
            goal_suit: Suit::Club,
            card_count: HashMap::new(),
            player_inventories: Vec::new(),
            player_points: Vec::new(),
        })
    }

    fn end_game() -> ServerEvent {
        ServerEvent::EndGame(GameResult {
            player_points: Vec::new(),
        })
    }

    // Lifecycle

    #[test]
    fn deal_activates_round_and_enables_trading() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3)]));

        assert_eq!(sync.phase, Phase::RoundActive);
        assert!(sync.session.trading_enabled());
        assert_eq!(sync.inventory.spades, 3);
    }

    #[test]
    fn end_round_parks_between_rounds_and_disables_trading() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3)]));
        sync.handle_event(end_round());

        assert_eq!(sync.phase, Phase::BetweenRounds);
        assert!(!sync.session.trading_enabled());
    }

    #[test]
    fn deal_reactivates_from_any_non_terminal_phase() {
        let mut sync = synchronizer();
        for warmup in [None, Some(end_round())] {
            if let Some(event) = warmup {
                sync.handle_event(deal(&[(Suit::Spade, 1)]));
                sync.handle_event(event);
            }
            sync.handle_event(deal(&[(Suit::Spade, 2)]));
            assert_eq!(sync.phase, Phase::RoundActive);
            assert!(sync.session.trading_enabled());
        }
    }

    #[test]
    fn game_over_is_absorbing() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3)]));
        sync.handle_event(end_game());

        assert_eq!(sync.phase, Phase::GameOver);
        assert!(!sync.session.trading_enabled());

        // nothing received afterwards changes anything
        sync.handle_event(deal(&[(Suit::Spade, 9)]));
        sync.handle_event(update_with_trade("spade,2,me,them"));
        assert_eq!(sync.phase, Phase::GameOver);
        assert!(!sync.session.trading_enabled());
        assert_eq!(sync.inventory.spades, 3);
        assert!(sync.trades.is_empty());
    }

    #[test]
    fn end_game_terminates_even_between_rounds() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3)]));
        sync.handle_event(end_round());
        sync.handle_event(end_game());

        assert_eq!(sync.phase, Phase::GameOver);
    }

    // Books

    #[test]
    fn updates_touch_only_the_suits_present() {
        let mut sync = synchronizer();
        let hearts_before = sync.books[&Suit::Heart].clone();

        let mut books = HashMap::new();
        books.insert(
            Suit::Spade,
            Book {
                bid: Some(crate::models::Quote {
                    price: 2,
                    player_name: "alice".to_string(),
                }),
                ask: None,
                last_trade: None,
            },
        );
        sync.handle_event(ServerEvent::Update { books, trade: None });

        assert_eq!(sync.books[&Suit::Spade].bid.as_ref().unwrap().price, 2);
        assert_eq!(sync.books[&Suit::Heart], hearts_before);
    }

    // Trades

    #[test]
    fn trades_append_to_the_ledger_in_arrival_order() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3)]));
        sync.handle_event(update_with_trade("spade,2,alice,bob"));
        sync.handle_event(update_with_trade("heart,5,bob,alice"));

        assert_eq!(sync.trades.len(), 2);
        assert_eq!(sync.trades[0].suit, Suit::Spade);
        assert_eq!(sync.trades[1].suit, Suit::Heart);
        // neither trade names the local player
        assert_eq!(sync.inventory.spades, 3);
        assert_eq!(sync.inventory.hearts, 0);
    }

    #[test]
    fn own_trades_move_the_hand() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3), (Suit::Heart, 1)]));
        sync.handle_event(update_with_trade("spade,2,me,bob"));
        sync.handle_event(update_with_trade("heart,4,bob,me"));

        assert_eq!(sync.inventory.spades, 4);
        assert_eq!(sync.inventory.hearts, 0);
    }

    #[test]
    fn malformed_trades_touch_nothing() {
        let mut sync = synchronizer();
        sync.handle_event(deal(&[(Suit::Spade, 3)]));
        sync.handle_event(update_with_trade("spade,2,me"));

        assert!(sync.trades.is_empty());
        assert_eq!(sync.inventory.spades, 3);
    }

    // Notices

    #[test]
    fn notices_mutate_no_state() {
        let mut sync = synchronizer();
        sync.handle_event(ServerEvent::Notice {
            status: "SUCCESS".to_string(),
            message: "subscribed".to_string(),
        });

        assert_eq!(sync.phase, Phase::Idle);
        assert_eq!(sync.inventory, Inventory::new());
        assert!(sync.trades.is_empty());
    }
}
